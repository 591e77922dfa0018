//! ApiClient against an in-process REST API.

use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use mymedia_core::auth::{AuthApi, AuthFailure, CredentialSink, Credentials, UserType};
use mymedia_core::config::ClientConfig;
use mymedia_interaction::{ApiClient, ApiError};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

async fn login(Json(request): Json<LoginRequest>) -> (StatusCode, Json<Value>) {
    match (request.email.as_str(), request.password.as_str()) {
        ("a@b.com", "pw1") => (
            StatusCode::OK,
            Json(json!({
                "message": "loginSuccess",
                "data": {
                    "token": "T1",
                    "user": {
                        "_id": "u1",
                        "username": "ana",
                        "email": "a@b.com",
                        "userType": "admin",
                        "language": "es"
                    }
                }
            })),
        ),
        ("broken@b.com", _) => (
            StatusCode::OK,
            Json(json!({ "message": "loginSuccess", "data": { "token": "T9" } })),
        ),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "invalidCredentials" })),
        ),
    }
}

async fn categories(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let authorized = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        == Some("Bearer T1");

    if authorized {
        (
            StatusCode::OK,
            Json(json!({ "data": [{ "name": "music" }, { "name": "video" }] })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "tokenRequired" })),
        )
    }
}

/// Serves the fake API on an ephemeral port and returns its base URL.
async fn spawn_api() -> String {
    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/categories", get(categories));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/api")
}

fn client_for(base_url: String) -> ApiClient {
    ApiClient::new(&ClientConfig {
        api_base_url: base_url,
        request_timeout_secs: 5,
    })
    .unwrap()
}

#[derive(Debug, Deserialize)]
struct Category {
    name: String,
}

#[tokio::test]
async fn test_login_success() {
    let client = client_for(spawn_api().await);

    let response = client
        .login(&Credentials::new("a@b.com", "pw1"))
        .await
        .unwrap();

    assert_eq!(response.token, "T1");
    assert_eq!(response.message, "loginSuccess");
    assert_eq!(response.user.id, "u1");
    assert_eq!(response.user.user_type, UserType::Admin);
}

#[tokio::test]
async fn test_login_rejected_carries_server_message() {
    let client = client_for(spawn_api().await);

    let failure = client
        .login(&Credentials::new("a@b.com", "wrong"))
        .await
        .unwrap_err();

    assert_eq!(failure, AuthFailure::rejected(401, "invalidCredentials"));
}

#[tokio::test]
async fn test_login_missing_user_is_malformed() {
    let client = client_for(spawn_api().await);

    let failure = client
        .login(&Credentials::new("broken@b.com", "pw"))
        .await
        .unwrap_err();

    assert!(matches!(failure, AuthFailure::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_login_transport_failure() {
    // Bind then drop to get a port nobody listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(format!("http://{addr}/api"));
    let failure = client
        .login(&Credentials::new("a@b.com", "pw1"))
        .await
        .unwrap_err();

    assert!(matches!(failure, AuthFailure::Transport { .. }));
    assert_eq!(failure.message(), mymedia_core::auth::NETWORK_ERROR);
}

#[tokio::test]
async fn test_get_data_uses_configured_credentials() {
    let client = client_for(spawn_api().await);

    let err = client.get_data::<Vec<Category>>("/categories").await.unwrap_err();
    assert_eq!(err, ApiError::Unauthorized);

    client.configure_credentials("T1").unwrap();
    let categories: Vec<Category> = client.get_data("/categories").await.unwrap();
    let names: Vec<_> = categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["music", "video"]);

    client.clear_credentials();
    assert!(client.get_data::<Vec<Category>>("/categories").await.is_err());
}
