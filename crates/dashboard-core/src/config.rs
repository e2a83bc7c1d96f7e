use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::auth::Backend;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub backends: BackendsConfig,
}

/// Where the session slot and cached entries live.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// `"persistent"` (JSON file) or `"memory"`.
    #[serde(default = "default_storage_mode")]
    pub mode: String,
    #[serde(default = "default_storage_path")]
    pub path: String,
}

fn default_storage_mode() -> String {
    "persistent".into()
}
fn default_storage_path() -> String {
    "data/session.json".into()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            mode: default_storage_mode(),
            path: default_storage_path(),
        }
    }
}

/// Login timing.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Deadline for a whole login attempt across both backends.
    #[serde(default = "default_login_timeout_ms")]
    pub login_timeout_ms: u64,
    /// Timeout applied to each individual HTTP request.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_login_timeout_ms() -> u64 {
    30_000
}
fn default_request_timeout_ms() -> u64 {
    30_000
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_timeout_ms: default_login_timeout_ms(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl AuthConfig {
    pub fn login_timeout(&self) -> Duration {
        Duration::from_millis(self.login_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendsConfig {
    #[serde(default = "default_gpg_endpoint")]
    pub gpg: BackendEndpoint,
    #[serde(default = "default_valesco_endpoint")]
    pub valesco: BackendEndpoint,
}

impl Default for BackendsConfig {
    fn default() -> Self {
        Self {
            gpg: default_gpg_endpoint(),
            valesco: default_valesco_endpoint(),
        }
    }
}

impl BackendsConfig {
    pub fn endpoint(&self, backend: Backend) -> &BackendEndpoint {
        match backend {
            Backend::Gpg => &self.gpg,
            Backend::Valesco => &self.valesco,
        }
    }
}

/// A single REST backend.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendEndpoint {
    pub base_url: String,
}

fn default_gpg_endpoint() -> BackendEndpoint {
    BackendEndpoint {
        base_url: "https://gpg-backend-vgrz.onrender.com".into(),
    }
}

fn default_valesco_endpoint() -> BackendEndpoint {
    BackendEndpoint {
        base_url: "https://backend.valescooil.com".into(),
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            auth: AuthConfig::default(),
            backends: BackendsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load config with fallback chain: explicit path → ./config/default.toml → hardcoded defaults.
    pub fn load_or_default(explicit_path: Option<&Path>) -> Self {
        if let Some(path) = explicit_path {
            match Self::load(path) {
                Ok(cfg) => return cfg,
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {e}", path.display());
                }
            }
        }

        let default_path = Path::new("config/default.toml");
        if default_path.exists() {
            match Self::load(default_path) {
                Ok(cfg) => return cfg,
                Err(e) => {
                    tracing::warn!("Failed to load default config: {e}");
                }
            }
        }

        tracing::debug!("Using hardcoded default configuration");
        Self::default()
    }
}
