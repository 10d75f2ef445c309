use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

/// Директивы, добавляемые к уровню из настроек, если `RUST_LOG` не задан:
/// `TraceLayer` пишет запросы на debug, hyper слишком шумный.
const GATE_DIRECTIVES: &str = "tower_http=debug,hyper=warn";

/// Подписчик tracing для gate: `RUST_LOG`, иначе уровень из настроек.
pub fn init_logging(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives(default_level)))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to init gate logging: {e}"))?;

    Ok(())
}

fn default_directives(level: &str) -> String {
    let level = level.trim();
    if level.is_empty() {
        return format!("info,{GATE_DIRECTIVES}");
    }
    format!("{level},{GATE_DIRECTIVES}")
}
