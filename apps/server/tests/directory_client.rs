//! Exercises `HttpDirectoryClient` against a local stand-in for the Discord API.

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, Request, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Json;
use serde_json::{json, Value};
use tower::ServiceExt;

use userproxy_server::config::{DirectoryConfig, ServerConfig};
use userproxy_server::directory::{DirectoryClient, HttpDirectoryClient};
use userproxy_server::router::build_router;
use userproxy_server::state::AppState;
use userproxy_shared::error::ProxyError;

/// (raw request path, Authorization header) for every request received.
#[derive(Clone, Default)]
struct Seen(Arc<Mutex<Vec<(String, Option<String>)>>>);

impl Seen {
    fn record(&self, uri: &Uri, headers: &HeaderMap) {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        self.0.lock().unwrap().push((uri.path().to_string(), auth));
    }

    fn take(&self) -> Vec<(String, Option<String>)> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

async fn fake_user(
    State(seen): State<Seen>,
    Path(id): Path<String>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    seen.record(&uri, &headers);
    if id == "404" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Unknown User", "code": 10013 })),
        )
            .into_response();
    }
    Json(json!({
        "id": id,
        "username": "fake",
        "avatar": "a_1269e74af4df7417b13759eae50c83dc",
        "discriminator": "0",
        "banner": null,
    }))
    .into_response()
}

async fn fake_profile(
    State(seen): State<Seen>,
    Path(_id): Path<String>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    seen.record(&uri, &headers);
    (
        StatusCode::FORBIDDEN,
        Json(json!({ "message": "Missing Access", "code": 50001 })),
    )
        .into_response()
}

/// Starts the stand-in on an ephemeral port and returns its API base URL.
async fn spawn_fake_discord() -> (String, Seen) {
    let seen = Seen::default();
    let app = axum::Router::new()
        .route("/api/v10/users/{id}", get(fake_user))
        .route("/api/v10/users/{id}/profile", get(fake_profile))
        .with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/api/v10"), seen)
}

fn client_for(base: &str) -> HttpDirectoryClient {
    HttpDirectoryClient::new(&DirectoryConfig {
        api_base_url: base.to_string(),
        request_timeout_secs: Some(5),
        ..Default::default()
    })
    .unwrap()
}

#[tokio::test]
async fn fetch_user_sends_bot_authorization() {
    let (base, seen) = spawn_fake_discord().await;
    let client = client_for(&base);

    let response = client.fetch_user("my-token", "123").await.unwrap();
    assert!(response.is_success());
    let body: Value = serde_json::from_slice(&response.body).unwrap();
    assert_eq!(body["id"], "123");

    assert_eq!(
        seen.take(),
        vec![("/api/v10/users/123".to_string(), Some("Bot my-token".to_string()))]
    );
}

#[tokio::test]
async fn fetch_user_returns_error_statuses_as_ok() {
    let (base, _seen) = spawn_fake_discord().await;
    let client = client_for(&base);

    let response = client.fetch_user("t", "404").await.unwrap();
    assert_eq!(response.status, 404);
    assert!(!response.is_success());
}

#[tokio::test]
async fn fetch_user_profile_hits_profile_path() {
    let (base, seen) = spawn_fake_discord().await;
    let client = client_for(&base);

    let response = client.fetch_user_profile("t", "77").await.unwrap();
    assert_eq!(response.status, 403);
    assert_eq!(seen.take()[0].0, "/api/v10/users/77/profile");
}

#[tokio::test]
async fn user_id_cannot_escape_its_path_segment() {
    let (base, seen) = spawn_fake_discord().await;
    let client = client_for(&base);

    let response = client.fetch_user("t", "1/profile").await.unwrap();
    assert!(response.is_success());
    let body: Value = serde_json::from_slice(&response.body).unwrap();
    assert_eq!(body["id"], "1/profile");
    assert_eq!(seen.take()[0].0, "/api/v10/users/1%2Fprofile");
}

#[tokio::test]
async fn connection_failure_is_an_internal_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(&format!("http://{addr}/api/v10"));
    let result = client.fetch_user("t", "1").await;
    assert!(matches!(result, Err(ProxyError::Internal(msg)) if !msg.is_empty()));
}

#[tokio::test]
async fn end_to_end_lookup_through_router() {
    let (base, seen) = spawn_fake_discord().await;
    let state = AppState {
        config: Arc::new(ServerConfig::default()),
        directory: Arc::new(client_for(&base)),
    };
    let app = build_router(state);

    let request = Request::builder()
        .method("POST")
        .uri("/api/discord-user")
        .header("Content-Type", "application/json")
        .body(Body::from(
            json!({ "token": "e2e-token", "userId": "80351110224678912" }).to_string(),
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["username"], "fake");
    assert_eq!(json["profile"], Value::Null);
    assert_eq!(
        json["avatar_url"],
        "https://cdn.discordapp.com/avatars/80351110224678912/a_1269e74af4df7417b13759eae50c83dc.gif?size=256"
    );
    assert_eq!(json["banner_url"], Value::Null);

    let seen = seen.take();
    assert_eq!(seen.len(), 2);
    assert!(seen
        .iter()
        .all(|(_, auth)| auth.as_deref() == Some("Bot e2e-token")));
}

#[tokio::test]
async fn end_to_end_user_not_found_is_passed_through() {
    let (base, _seen) = spawn_fake_discord().await;
    let state = AppState {
        config: Arc::new(ServerConfig::default()),
        directory: Arc::new(client_for(&base)),
    };
    let app = build_router(state);

    let request = Request::builder()
        .method("POST")
        .uri("/api/discord-user")
        .body(Body::from(json!({ "token": "t", "userId": "404" }).to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["details"]["code"], 10013);
}
