use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::infrastructure::settings::Settings;
use crate::presentation::middleware::trace::apply_trace;
use crate::presentation::{AppState, http_handlers};

pub(crate) async fn run_http(settings: &Settings, state: AppState) -> anyhow::Result<()> {
    let app = build_router(state);
    let app = apply_trace(
        app,
        Duration::from_secs(settings.http_request_timeout_secs),
        settings.http_concurrency_limit,
    );

    let listener = TcpListener::bind(&settings.http_addr).await?;

    info!(
        addr = %settings.http_addr,
        static_dir = %settings.static_dir.display(),
        api = %settings.api_base_url,
        "journal gate listening"
    );
    axum::serve(listener, app).await?;
    Ok(())
}

pub(crate) fn build_router(state: AppState) -> Router {
    http_handlers::routes(state)
}
