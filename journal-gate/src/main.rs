use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use journal_client::JournalClient;
use tracing::warn;

mod infrastructure;
mod presentation;
mod server;

use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use infrastructure::verifier::RemoteTokenVerifier;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    if !settings.static_dir.join("index.html").is_file() {
        warn!(
            static_dir = %settings.static_dir.display(),
            "index.html not found, build the frontend first"
        );
    }

    let client = JournalClient::new(settings.api_base_url.clone())
        .context("failed to build API client")?;
    let verifier = RemoteTokenVerifier::new(
        client,
        Duration::from_secs(settings.verify_timeout_secs),
    );
    let state = AppState::new(Arc::new(verifier), settings.static_dir.clone());

    server::run_http(&settings, state).await
}
