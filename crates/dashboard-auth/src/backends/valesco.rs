use std::time::Duration;

use async_trait::async_trait;
use dashboard_core::config::BackendEndpoint;
use dashboard_core::{Backend, UserProfile};
use serde::{Deserialize, Serialize};

use super::http::{build_client, endpoint_url, post_json, LOGIN_PATH};
use crate::backend::{AuthBackend, RawLogin};
use crate::credentials::Credentials;
use crate::error::BackendError;

/// Login client for the Valesco backend.
///
/// Sends `{"username", "password"}` and expects `{"accessToken", "user"}` back.
pub struct ValescoBackend {
    base_url: String,
    client: reqwest::Client,
}

impl ValescoBackend {
    pub fn new(endpoint: &BackendEndpoint, request_timeout: Duration) -> Result<Self, BackendError> {
        endpoint_url(&endpoint.base_url, LOGIN_PATH)?;
        Ok(Self {
            base_url: endpoint.base_url.clone(),
            client: build_client(request_timeout)?,
        })
    }
}

#[derive(Debug, Serialize)]
struct ValescoLoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValescoLoginResponse {
    #[serde(default, rename = "accessToken")]
    pub access_token: Option<String>,
    #[serde(default)]
    pub user: Option<ValescoUser>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ValescoUser {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl From<ValescoUser> for UserProfile {
    fn from(user: ValescoUser) -> Self {
        UserProfile::from_names(
            user.username.as_deref(),
            user.login.as_deref(),
            user.role.as_deref(),
        )
    }
}

#[async_trait]
impl AuthBackend for ValescoBackend {
    fn backend(&self) -> Backend {
        Backend::Valesco
    }

    async fn login(&self, credentials: &Credentials) -> Result<RawLogin, BackendError> {
        let url = endpoint_url(&self.base_url, LOGIN_PATH)?;
        let request = ValescoLoginRequest {
            username: credentials.login(),
            password: credentials.password(),
        };
        let response: ValescoLoginResponse = post_json(&self.client, url, &request).await?;
        Ok(RawLogin::Valesco(response))
    }
}
