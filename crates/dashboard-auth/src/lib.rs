pub mod api;
pub mod backend;
pub mod backends;
pub mod credentials;
pub mod error;
pub mod resolver;
pub mod session;

pub use api::ApiClient;
pub use backend::{AuthBackend, RawLogin};
pub use backends::{GpgBackend, ValescoBackend};
pub use credentials::Credentials;
pub use error::{AuthError, BackendError};
pub use resolver::SessionResolver;
pub use session::CandidateSession;
