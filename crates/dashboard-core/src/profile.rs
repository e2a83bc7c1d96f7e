//! Normalized user profile shared by both backends.
//!
//! Each backend returns its own user shape; those are mapped into this
//! struct once, when a login result becomes the resolved session.

use serde::{Deserialize, Serialize};

const FALLBACK_NAME: &str = "Admin";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    #[serde(default)]
    pub role: String,
}

impl UserProfile {
    pub fn new(username: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            role: role.into(),
        }
    }

    /// Build a profile from whichever name fields a backend filled in.
    /// Preference: `username`, then `login`, then a generic fallback.
    pub fn from_names(username: Option<&str>, login: Option<&str>, role: Option<&str>) -> Self {
        let name = [username, login]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or(FALLBACK_NAME);
        Self::new(name, role.unwrap_or_default())
    }

    pub fn is_super_admin(&self) -> bool {
        matches!(self.role.as_str(), "super_admin" | "superAdmin")
    }

    pub fn role_label(&self) -> &'static str {
        if self.is_super_admin() {
            "Super Admin"
        } else {
            "Admin"
        }
    }
}
