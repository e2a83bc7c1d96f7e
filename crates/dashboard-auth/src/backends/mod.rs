pub mod gpg;
pub(crate) mod http;
pub mod valesco;

pub use gpg::GpgBackend;
pub use valesco::ValescoBackend;
