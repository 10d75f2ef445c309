use axum::{Json, Router, middleware::from_fn_with_state, routing::get};
use serde::Serialize;
use tower_http::services::{ServeDir, ServeFile};

use super::AppState;
use super::middleware::auth_gate::auth_gate;

/// Страницы фронтенда: файлы из `static_dir`, для остальных путей
/// `index.html` (маршрутизацией занимается само приложение).
pub(crate) fn routes(state: AppState) -> Router {
    let index = state.static_dir.join("index.html");
    let frontend = ServeDir::new(&state.static_dir).fallback(ServeFile::new(index));

    Router::new()
        .route("/healthz", get(health_handler))
        .fallback_service(frontend)
        .layer(from_fn_with_state(state.clone(), auth_gate))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthzResponse {
    status: &'static str,
}

async fn health_handler() -> Json<HealthzResponse> {
    Json(HealthzResponse { status: "ok" })
}
