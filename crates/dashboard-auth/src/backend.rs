use async_trait::async_trait;
use dashboard_core::Backend;

use crate::backends::gpg::GpgLoginResponse;
use crate::backends::valesco::ValescoLoginResponse;
use crate::credentials::Credentials;
use crate::error::BackendError;

/// A 2xx login payload, still in the backend's own shape and not yet
/// checked for a token and user.
#[derive(Debug, Clone)]
pub enum RawLogin {
    Gpg(GpgLoginResponse),
    Valesco(ValescoLoginResponse),
}

impl RawLogin {
    pub fn backend(&self) -> Backend {
        match self {
            Self::Gpg(_) => Backend::Gpg,
            Self::Valesco(_) => Backend::Valesco,
        }
    }
}

/// One REST backend's identity endpoint.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// The backend this implementation talks to.
    fn backend(&self) -> Backend;

    /// Submit credentials. Network errors, non-2xx statuses and
    /// undecodable bodies are all errors.
    async fn login(&self, credentials: &Credentials) -> Result<RawLogin, BackendError>;
}
