//! ApiClient - HTTP client for the MyMultimedia REST API.
//!
//! Every response body is wrapped as `{ "message": ..., "data": ... }`; error
//! bodies carry only `{ "message": ... }`.

use async_trait::async_trait;
use mymedia_core::MymediaError;
use mymedia_core::auth::{AuthApi, AuthFailure, CredentialSink, Credentials, LoginResponse, User};
use mymedia_core::config::ClientConfig;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::ApiError;

const LOGIN_PATH: &str = "/auth/login";

/// Success envelope used by every endpoint.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    message: Option<String>,
    data: Option<T>,
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// `data` of a login response. Fields are optional so that missing ones can
/// be reported as a malformed response rather than a decode error.
#[derive(Debug, Deserialize)]
struct LoginData {
    token: Option<String>,
    user: Option<User>,
}

/// Client for the REST API with an explicit outgoing-credential slot.
///
/// Clones share the same credential slot.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
    authorization: Arc<RwLock<Option<HeaderValue>>>,
}

impl ApiClient {
    /// Builds a client honouring the configured request timeout.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|err| ApiError::Transport(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            config: config.clone(),
            authorization: Arc::new(RwLock::new(None)),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Whether outgoing requests currently carry credentials.
    pub fn has_credentials(&self) -> bool {
        self.authorization
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// GETs `path` and returns the `data` of the response envelope.
    ///
    /// A 401 maps to [`ApiError::Unauthorized`], the signal for the view layer
    /// to drop an expired session.
    pub async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .request(Method::GET, path)
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))?;
        envelope
            .data
            .ok_or_else(|| ApiError::Decode(format!("response to {path} has no data")))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.config.endpoint(path);
        tracing::debug!("{} {}", method, url);

        let builder = self.client.request(method, url);
        let authorization = self
            .authorization
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        match authorization {
            Some(value) => builder.header(AUTHORIZATION, value),
            None => builder,
        }
    }
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, AuthFailure> {
        let response = self
            .request(Method::POST, LOGIN_PATH)
            .json(credentials)
            .send()
            .await
            .map_err(|err| AuthFailure::transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| AuthFailure::transport(err.to_string()))?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&body);
            return Err(AuthFailure::rejected(
                status.as_u16(),
                error_message(status, &body),
            ));
        }

        parse_login_body(&body)
    }
}

impl CredentialSink for ApiClient {
    fn configure_credentials(&self, token: &str) -> Result<(), MymediaError> {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| MymediaError::security("token contains characters not allowed in a header"))?;
        value.set_sensitive(true);

        *self
            .authorization
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(value);
        Ok(())
    }

    fn clear_credentials(&self) {
        *self
            .authorization
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }
}

fn parse_login_body(body: &[u8]) -> Result<LoginResponse, AuthFailure> {
    let envelope: Envelope<LoginData> = serde_json::from_slice(body)
        .map_err(|err| AuthFailure::malformed(format!("unreadable login response: {err}")))?;

    let data = envelope
        .data
        .ok_or_else(|| AuthFailure::malformed("login response has no data"))?;
    let token = data
        .token
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AuthFailure::malformed("login response has no token"))?;
    let user = data
        .user
        .ok_or_else(|| AuthFailure::malformed("login response has no user"))?;

    Ok(LoginResponse {
        token,
        user,
        message: envelope.message.unwrap_or_default(),
    })
}

/// Extracts `message` from an error body, falling back to the status reason.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("requestFailed")
                .to_string()
        })
}
