use std::time::Duration;

use async_trait::async_trait;
use journal_client::{ClientError, JournalClient};
use thiserror::Error;

use super::token::check_structure;

#[derive(Debug, Error)]
pub(crate) enum VerifyError {
    #[error("token is not a well-formed JWT")]
    Malformed,

    #[error("token expired")]
    Expired,

    #[error("token rejected by API")]
    Rejected,

    #[error("token verification timed out")]
    Timeout,

    #[error("token verification failed")]
    Unavailable(#[source] ClientError),
}

/// Проверка токена сессии при загрузке страницы.
#[async_trait]
pub(crate) trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<(), VerifyError>;
}

/// Локальная проверка формата и срока, затем `GET /auth/profile` в API.
pub(crate) struct RemoteTokenVerifier {
    client: JournalClient,
    timeout: Duration,
}

impl RemoteTokenVerifier {
    pub(crate) fn new(client: JournalClient, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait]
impl TokenVerifier for RemoteTokenVerifier {
    async fn verify(&self, token: &str) -> Result<(), VerifyError> {
        check_structure(token)?;

        match tokio::time::timeout(self.timeout, self.client.verify_token(token)).await {
            Err(_) => Err(VerifyError::Timeout),
            Ok(Ok(true)) => Ok(()),
            Ok(Ok(false)) => Err(VerifyError::Rejected),
            Ok(Err(err)) => Err(VerifyError::Unavailable(err)),
        }
    }
}
