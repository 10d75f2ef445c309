use std::time::Duration;

use axum::{Router, http::StatusCode};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Трассировка запросов, таймаут и ограничение числа одновременных запросов.
pub(crate) fn apply_trace(router: Router, timeout: Duration, concurrency_limit: usize) -> Router {
    router
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(ConcurrencyLimitLayer::new(concurrency_limit))
        .layer(TraceLayer::new_for_http())
}
