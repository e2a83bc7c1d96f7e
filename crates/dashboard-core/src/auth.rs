use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::profile::UserProfile;

/// Which REST backend a session belongs to.
///
/// Declaration order is login priority: a valid `Gpg` session always wins
/// over a valid `Valesco` one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Gpg,
    Valesco,
}

impl Backend {
    /// Human-readable name for headers and prompts.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Gpg => "GPG",
            Self::Valesco => "Valesco",
        }
    }

    /// Brand management only exists on the GPG backend.
    pub fn supports_brands(&self) -> bool {
        matches!(self, Self::Gpg)
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gpg => write!(f, "gpg"),
            Self::Valesco => write!(f, "valesco"),
        }
    }
}

impl std::str::FromStr for Backend {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gpg" => Ok(Self::Gpg),
            "valesco" => Ok(Self::Valesco),
            _ => Err(format!("Unknown backend: {s}")),
        }
    }
}

/// The single authoritative session, as persisted in the `auth` slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSession {
    #[serde(rename = "site")]
    pub backend: Backend,
    pub token: String,
    pub user: UserProfile,
    #[serde(default = "Utc::now")]
    pub authenticated_at: DateTime<Utc>,
}

impl ResolvedSession {
    pub fn new(backend: Backend, token: String, user: UserProfile) -> Self {
        Self {
            backend,
            token,
            user,
            authenticated_at: Utc::now(),
        }
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_parse_and_display() {
        assert_eq!("GPG".parse::<Backend>().unwrap(), Backend::Gpg);
        assert_eq!("valesco".parse::<Backend>().unwrap(), Backend::Valesco);
        assert!("shopify".parse::<Backend>().is_err());
        assert_eq!(Backend::Valesco.to_string(), "valesco");
    }

    #[test]
    fn only_gpg_manages_brands() {
        assert!(Backend::Gpg.supports_brands());
        assert!(!Backend::Valesco.supports_brands());
    }

    #[test]
    fn session_serializes_with_site_tag() {
        let session = ResolvedSession::new(
            Backend::Gpg,
            "abc".into(),
            UserProfile::new("admin", "super_admin"),
        );
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["site"], "gpg");
        assert_eq!(json["token"], "abc");
        assert_eq!(json["user"]["role"], "super_admin");
        assert_eq!(session.bearer(), "Bearer abc");
    }

    #[test]
    fn session_without_timestamp_still_loads() {
        let json = r#"{"site":"valesco","token":"t","user":{"username":"op","role":"admin"}}"#;
        let session: ResolvedSession = serde_json::from_str(json).unwrap();
        assert_eq!(session.backend, Backend::Valesco);
        assert_eq!(session.user.username, "op");
    }
}
