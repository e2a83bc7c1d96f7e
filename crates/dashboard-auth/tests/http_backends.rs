//! Drives the reqwest backends and `ApiClient` against in-process axum servers.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use dashboard_auth::{
    ApiClient, AuthBackend, AuthError, BackendError, Credentials, GpgBackend, RawLogin,
    SessionResolver, ValescoBackend,
};
use dashboard_core::config::BackendEndpoint;
use dashboard_core::{AppConfig, Backend};
use dashboard_store::{KeyValueStore, MemoryStore};
use serde_json::{json, Value};

const TIMEOUT: Duration = Duration::from_secs(5);

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// A base URL nothing is listening on.
async fn closed_port() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

fn bearer_ok(headers: &HeaderMap, token: &str) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {token}"))
}

async fn gpg_login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["login"] == "admin" && body["password"] == "secret" {
        (
            StatusCode::OK,
            Json(json!({
                "access_token": "gpg-token",
                "user": { "id": 1, "login": "admin", "role": "super_admin" }
            })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid credentials" })),
        )
    }
}

async fn gpg_products(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if bearer_ok(&headers, "gpg-token") {
        (StatusCode::OK, Json(json!([{ "id": 1, "name": "Motor oil 5W-30" }])))
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Unauthorized" })))
    }
}

async fn valesco_login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["username"] == "admin" && body["password"] == "secret" {
        (
            StatusCode::OK,
            Json(json!({
                "accessToken": "valesco-token",
                "user": { "username": "admin", "role": "admin" }
            })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Unauthorized" })),
        )
    }
}

fn gpg_app() -> Router {
    Router::new()
        .route("/auth/login", post(gpg_login))
        .route("/products", get(gpg_products))
}

fn valesco_app() -> Router {
    Router::new().route("/auth/login", post(valesco_login))
}

fn config(gpg: &str, valesco: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.backends.gpg.base_url = gpg.to_string();
    config.backends.valesco.base_url = valesco.to_string();
    config.auth.login_timeout_ms = 10_000;
    config.auth.request_timeout_ms = 5_000;
    config
}

fn endpoint(base_url: &str) -> BackendEndpoint {
    BackendEndpoint {
        base_url: base_url.to_string(),
    }
}

#[tokio::test]
async fn gpg_backend_sends_login_field() {
    let base = spawn(gpg_app()).await;
    let backend = GpgBackend::new(&endpoint(&base), TIMEOUT).unwrap();

    let raw = backend
        .login(&Credentials::new("admin", "secret"))
        .await
        .unwrap();
    match raw {
        RawLogin::Gpg(resp) => {
            assert_eq!(resp.access_token.as_deref(), Some("gpg-token"));
            assert_eq!(resp.user.unwrap().role.as_deref(), Some("super_admin"));
        }
        other => panic!("unexpected payload: {other:?}"),
    }
}

#[tokio::test]
async fn valesco_rejection_is_status_error() {
    let base = spawn(valesco_app()).await;
    let backend = ValescoBackend::new(&endpoint(&base), TIMEOUT).unwrap();

    let err = backend
        .login(&Credentials::new("admin", "wrong"))
        .await
        .unwrap_err();
    assert!(matches!(err, BackendError::Status { status: 401, .. }));
}

#[tokio::test]
async fn non_json_body_is_decode_error() {
    let app = Router::new().route("/auth/login", post(|| async { "welcome!" }));
    let base = spawn(app).await;
    let backend = GpgBackend::new(&endpoint(&base), TIMEOUT).unwrap();

    let err = backend
        .login(&Credentials::new("admin", "secret"))
        .await
        .unwrap_err();
    assert!(matches!(err, BackendError::Decode(_)));
}

#[tokio::test]
async fn slow_backend_hits_request_timeout() {
    let app = Router::new().route(
        "/auth/login",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({}))
        }),
    );
    let base = spawn(app).await;
    let backend = GpgBackend::new(&endpoint(&base), Duration::from_millis(200)).unwrap();

    let err = backend
        .login(&Credentials::new("admin", "secret"))
        .await
        .unwrap_err();
    assert!(matches!(err, BackendError::Network(_)));
}

#[tokio::test]
async fn resolver_prefers_gpg_when_both_accept() {
    let gpg = spawn(gpg_app()).await;
    let valesco = spawn(valesco_app()).await;
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let resolver = SessionResolver::from_config(&config(&gpg, &valesco), store.clone()).unwrap();

    let session = resolver
        .resolve(&Credentials::new("admin", "secret"))
        .await
        .unwrap();
    assert_eq!(session.backend, Backend::Gpg);
    assert_eq!(session.token, "gpg-token");
    assert!(session.user.is_super_admin());
    assert_eq!(store.load_session().await.unwrap().unwrap().token, "gpg-token");
}

#[tokio::test]
async fn resolver_falls_back_to_valesco_when_gpg_unreachable() {
    let gpg = closed_port().await;
    let valesco = spawn(valesco_app()).await;
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let resolver = SessionResolver::from_config(&config(&gpg, &valesco), store).unwrap();

    let session = resolver
        .resolve(&Credentials::new("admin", "secret"))
        .await
        .unwrap();
    assert_eq!(session.backend, Backend::Valesco);
    assert_eq!(session.token, "valesco-token");
}

#[tokio::test]
async fn resolver_reports_invalid_credentials_when_both_reject() {
    let gpg = spawn(gpg_app()).await;
    let valesco = spawn(valesco_app()).await;
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let resolver = SessionResolver::from_config(&config(&gpg, &valesco), store.clone()).unwrap();

    let err = resolver
        .resolve(&Credentials::new("admin", "nope"))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
    assert!(store.load_session().await.unwrap().is_none());
}

#[tokio::test]
async fn api_client_sends_bearer_token() {
    let gpg = spawn(gpg_app()).await;
    let valesco = spawn(valesco_app()).await;
    let config = config(&gpg, &valesco);
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    SessionResolver::from_config(&config, store.clone())
        .unwrap()
        .resolve(&Credentials::new("admin", "secret"))
        .await
        .unwrap();

    let client = ApiClient::from_store(&config, store).await.unwrap();
    let products: Value = client.get_json("/products").await.unwrap();
    assert_eq!(products[0]["id"], 1);
}

#[tokio::test]
async fn unauthorized_response_drops_session() {
    let gpg = spawn(gpg_app()).await;
    let valesco = spawn(valesco_app()).await;
    let config = config(&gpg, &valesco);
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());

    // A token the backend no longer honours.
    let stale = dashboard_core::ResolvedSession::new(
        Backend::Gpg,
        "revoked".into(),
        dashboard_core::UserProfile::new("admin", "admin"),
    );
    store.save_session(&stale).await.unwrap();
    store.set("products", "[]").await.unwrap();

    let client = ApiClient::from_store(&config, store.clone()).await.unwrap();
    let err = client.get_json::<Value>("/products").await.unwrap_err();
    assert!(matches!(err, AuthError::SessionExpired));
    assert!(err.requires_login());
    assert!(store.load_session().await.unwrap().is_none());
    // Only the session slot is dropped.
    assert!(store.get("products").await.unwrap().is_some());
}
