//! Client for the marketplace REST API.
//!
//! Every outbound call goes through [`ApiClient::request`], which applies the
//! base URL, the global timeout and the caller's credentials, and maps the
//! response onto [`ApiError`].

pub mod auth;
pub mod checkout;
pub mod gigs;
pub mod search;

use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use crate::auth::middleware::Credentials;
use crate::error::ApiError;
use crate::models::users::FieldErrors;

/// Per-call options for [`ApiClient::request`].
#[derive(Debug, Default)]
pub struct RequestOptions<'a> {
    pub credentials: Option<&'a Credentials>,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<serde_json::Value>,
}

impl<'a> RequestOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn credentials(mut self, credentials: Option<&'a Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    /// Adds query parameters, dropping blank values.
    pub fn query(mut self, pairs: Vec<(&'static str, String)>) -> Self {
        self.query
            .extend(pairs.into_iter().filter(|(_, v)| !v.trim().is_empty()));
        self
    }

    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default, alias = "error")]
    message: Option<String>,
    #[serde(default)]
    errors: Option<serde_json::Value>,
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Issue one request and decode the envelope payload into `T`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions<'_>,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!("{method} {url} {:?}", options.query);

        let mut builder = self.http.request(method.clone(), &url);
        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }
        if let Some(credentials) = options.credentials {
            builder = builder.bearer_auth(credentials.token());
        }
        if let Some(body) = &options.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!("{method} {url} failed: {e}");
            ApiError::from(e)
        })?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let error = error_from_status(status, &text);
            warn!("{method} {url} -> {status}: {error}");
            return Err(error);
        }

        // Every endpoint answers `{ success, message?, ...payload }`.
        let value: serde_json::Value = serde_json::from_str(&text)
            .map_err(|e| ApiError::Decode(format!("{method} {url}: {e}")))?;

        if value.get("success").and_then(serde_json::Value::as_bool) == Some(false) {
            let message = value
                .get("message")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("The request was not successful")
                .to_string();
            return Err(ApiError::Rejected(message));
        }

        serde_json::from_value(value).map_err(|e| ApiError::Decode(format!("{method} {url}: {e}")))
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions<'_>,
    ) -> Result<T, ApiError> {
        self.request(Method::GET, path, options).await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions<'_>,
    ) -> Result<T, ApiError> {
        self.request(Method::POST, path, options).await
    }
}

fn error_from_status(status: StatusCode, text: &str) -> ApiError {
    let body: ErrorBody = serde_json::from_str(text).unwrap_or_default();
    let message = body
        .message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });

    match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
            ApiError::Validation {
                message,
                fields: body.errors.map(field_errors).unwrap_or_default(),
            }
        }
        _ => ApiError::Status {
            status: status.as_u16(),
            message,
        },
    }
}

/// Accepts `{ "field": "msg" }` or `[{ "path"|"field"|"param": .., "msg"|"message": .. }]`.
fn field_errors(value: serde_json::Value) -> FieldErrors {
    let mut fields = FieldErrors::new();
    match value {
        serde_json::Value::Object(map) => {
            for (field, msg) in map {
                let text = match msg {
                    serde_json::Value::String(s) => s,
                    serde_json::Value::Object(inner) => inner
                        .get("message")
                        .and_then(|m| m.as_str())
                        .unwrap_or_default()
                        .to_string(),
                    other => other.to_string(),
                };
                fields.insert(field, text);
            }
        }
        serde_json::Value::Array(items) => {
            for item in items {
                let field = ["path", "field", "param"]
                    .iter()
                    .find_map(|k| item.get(*k).and_then(|v| v.as_str()));
                let msg = ["msg", "message"]
                    .iter()
                    .find_map(|k| item.get(*k).and_then(|v| v.as_str()));
                if let (Some(field), Some(msg)) = (field, msg) {
                    fields.entry(field.to_string()).or_insert_with(|| msg.to_string());
                }
            }
        }
        _ => {}
    }
    fields
}
