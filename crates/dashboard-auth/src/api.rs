use std::sync::Arc;

use dashboard_core::{AppConfig, ResolvedSession};
use dashboard_store::KeyValueStore;
use serde::de::DeserializeOwned;

use crate::backends::http::{build_client, endpoint_url, is_login_path, read_json};
use crate::error::{AuthError, BackendError};

/// Authorized requests against whichever backend the current session
/// belongs to.
///
/// A 401 outside the login endpoint means the backend no longer accepts the
/// token: the session is removed from the store and the caller gets
/// `AuthError::SessionExpired`.
pub struct ApiClient {
    session: ResolvedSession,
    base_url: String,
    client: reqwest::Client,
    store: Arc<dyn KeyValueStore>,
}

impl ApiClient {
    pub fn new(
        config: &AppConfig,
        session: ResolvedSession,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, AuthError> {
        let base_url = config.backends.endpoint(session.backend).base_url.clone();
        Ok(Self {
            session,
            base_url,
            client: build_client(config.auth.request_timeout())?,
            store,
        })
    }

    /// Build a client for the persisted session, if there is one.
    pub async fn from_store(
        config: &AppConfig,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, AuthError> {
        let session = store.load_session().await?.ok_or(AuthError::NotLoggedIn)?;
        Self::new(config, session, store)
    }

    pub fn session(&self) -> &ResolvedSession {
        &self.session
    }

    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, AuthError> {
        let url = endpoint_url(&self.base_url, path)?;
        tracing::debug!("GET {url} ({})", self.session.backend);
        let resp = self
            .client
            .get(url)
            .header(reqwest::header::AUTHORIZATION, self.session.bearer())
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::UNAUTHORIZED && !is_login_path(path) {
            tracing::warn!(
                "{} rejected the session token, dropping session",
                self.session.backend.display_name()
            );
            self.store.remove_session().await?;
            return Err(AuthError::SessionExpired);
        }

        Ok(read_json(resp).await?)
    }
}
