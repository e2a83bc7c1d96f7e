use thiserror::Error;

/// Why a single backend request did not produce a usable result.
/// Logged by the resolver, never shown to the user directly.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Request failed: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unreadable response: {0}")]
    Decode(String),

    #[error("Login response missing {0}")]
    InvalidPayload(&'static str),

    #[error("Invalid backend URL: {0}")]
    Url(String),
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Login timed out, try again")]
    Timeout,

    #[error("Incorrect login or password")]
    InvalidCredentials,

    #[error("Enter login and password")]
    MissingCredentials,

    #[error("Session expired, log in again")]
    SessionExpired,

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Storage error: {0}")]
    Storage(#[from] dashboard_store::StoreError),

    #[error("{0}")]
    Request(#[from] BackendError),
}

impl AuthError {
    /// Whether the user has to log in (again) before continuing.
    pub fn requires_login(&self) -> bool {
        matches!(self, Self::SessionExpired | Self::NotLoggedIn)
    }
}
