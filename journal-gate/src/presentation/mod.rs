use std::path::PathBuf;
use std::sync::Arc;

use crate::infrastructure::verifier::TokenVerifier;

pub(crate) mod http_handlers;
pub(crate) mod middleware;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) verifier: Arc<dyn TokenVerifier>,
    pub(crate) static_dir: PathBuf,
}

impl AppState {
    pub(crate) fn new(verifier: Arc<dyn TokenVerifier>, static_dir: PathBuf) -> Self {
        Self {
            verifier,
            static_dir,
        }
    }
}
