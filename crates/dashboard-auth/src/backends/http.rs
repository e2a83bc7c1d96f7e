//! Request plumbing shared by the backend clients and `ApiClient`.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::error::BackendError;

pub(crate) const LOGIN_PATH: &str = "/auth/login";

pub(crate) fn build_client(request_timeout: Duration) -> Result<reqwest::Client, BackendError> {
    reqwest::Client::builder()
        .timeout(request_timeout)
        .build()
        .map_err(|e| BackendError::Network(format!("HTTP client setup: {e}")))
}

/// Join a base URL and an API path, keeping any path prefix on the base.
pub(crate) fn endpoint_url(base_url: &str, path: &str) -> Result<Url, BackendError> {
    let joined = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&joined).map_err(|e| BackendError::Url(format!("{joined}: {e}")))
}

pub(crate) fn is_login_path(path: &str) -> bool {
    path.contains(LOGIN_PATH)
}

/// Turn a response into `R`, mapping non-2xx statuses to `BackendError::Status`.
pub(crate) async fn read_json<R: DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<R, BackendError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(BackendError::Status {
            status: status.as_u16(),
            body,
        });
    }
    resp.json::<R>()
        .await
        .map_err(|e| BackendError::Decode(e.to_string()))
}

pub(crate) async fn post_json<B, R>(
    client: &reqwest::Client,
    url: Url,
    body: &B,
) -> Result<R, BackendError>
where
    B: serde::Serialize + ?Sized,
    R: DeserializeOwned,
{
    tracing::debug!("POST {url}");
    let resp = client
        .post(url)
        .json(body)
        .send()
        .await
        .map_err(|e| BackendError::Network(e.to_string()))?;
    read_json(resp).await
}
