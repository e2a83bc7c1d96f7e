pub mod auth;
pub mod config;
pub mod lifecycle;
pub mod profile;

pub use auth::{Backend, ResolvedSession};
pub use config::AppConfig;
pub use profile::UserProfile;
