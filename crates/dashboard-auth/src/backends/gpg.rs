use std::time::Duration;

use async_trait::async_trait;
use dashboard_core::config::BackendEndpoint;
use dashboard_core::{Backend, UserProfile};
use serde::{Deserialize, Serialize};

use super::http::{build_client, endpoint_url, post_json, LOGIN_PATH};
use crate::backend::{AuthBackend, RawLogin};
use crate::credentials::Credentials;
use crate::error::BackendError;

/// Login client for the GPG backend.
///
/// Sends `{"login", "password"}` and expects `{"access_token", "user"}` back.
pub struct GpgBackend {
    base_url: String,
    client: reqwest::Client,
}

impl GpgBackend {
    pub fn new(endpoint: &BackendEndpoint, request_timeout: Duration) -> Result<Self, BackendError> {
        // Fail on a bad base URL here rather than on every login.
        endpoint_url(&endpoint.base_url, LOGIN_PATH)?;
        Ok(Self {
            base_url: endpoint.base_url.clone(),
            client: build_client(request_timeout)?,
        })
    }
}

#[derive(Debug, Serialize)]
struct GpgLoginRequest<'a> {
    login: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GpgLoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub user: Option<GpgUser>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GpgUser {
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl From<GpgUser> for UserProfile {
    fn from(user: GpgUser) -> Self {
        UserProfile::from_names(
            user.username.as_deref(),
            user.login.as_deref(),
            user.role.as_deref(),
        )
    }
}

#[async_trait]
impl AuthBackend for GpgBackend {
    fn backend(&self) -> Backend {
        Backend::Gpg
    }

    async fn login(&self, credentials: &Credentials) -> Result<RawLogin, BackendError> {
        let url = endpoint_url(&self.base_url, LOGIN_PATH)?;
        let request = GpgLoginRequest {
            login: credentials.login(),
            password: credentials.password(),
        };
        let response: GpgLoginResponse = post_json(&self.client, url, &request).await?;
        Ok(RawLogin::Gpg(response))
    }
}
