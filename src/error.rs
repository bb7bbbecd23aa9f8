use actix_web::cookie::Cookie;
use actix_web::http::{StatusCode, header};
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use thiserror::Error;

use crate::auth::SESSION_COOKIE;
use crate::models::users::FieldErrors;

/// Everything a call to the marketplace API can fail with.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP 401. Carries no side effect; the caller decides what to do.
    #[error("authentication required")]
    Unauthorized,

    #[error("not found: {0}")]
    NotFound(String),

    /// 400/409/422 with optional per-field messages.
    #[error("{message}")]
    Validation { message: String, fields: FieldErrors },

    /// 2xx answer with `success: false`.
    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// Short text for a toast.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized => "Please log in to continue".to_string(),
            ApiError::NotFound(_) => "We couldn't find what you were looking for".to_string(),
            ApiError::Validation { message, .. } | ApiError::Rejected(message) => message.clone(),
            ApiError::Timeout => "The server took too long to respond. Please try again".to_string(),
            ApiError::Transport(_) | ApiError::Status { .. } | ApiError::Decode(_) => {
                "Something went wrong. Please try again".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

/// Errors raised by page handlers. Authentication failures are turned into
/// a redirect to the login page here, at the top of the stack.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("login required")]
    LoginRequired { next: Option<String> },

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl AppError {
    pub fn login_required(next: impl Into<String>) -> Self {
        AppError::LoginRequired {
            next: Some(next.into()),
        }
    }

    /// Point the login redirect of an API 401 back at the page `req` asked for.
    pub fn for_request(self, req: &HttpRequest) -> Self {
        match self {
            AppError::Api(ApiError::Unauthorized) | AppError::LoginRequired { next: None } => {
                AppError::login_required(request_target(req))
            }
            other => other,
        }
    }

    fn login_location(next: Option<&str>) -> String {
        match next {
            Some(next) if next.starts_with('/') && !next.starts_with("//") => {
                match reqwest::Url::parse_with_params("http://localhost/login", &[("next", next)]) {
                    Ok(url) => format!("/login?{}", url.query().unwrap_or_default()),
                    Err(_) => "/login".to_string(),
                }
            }
            _ => "/login".to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::LoginRequired { .. } | AppError::Api(ApiError::Unauthorized) => {
                StatusCode::FOUND
            }
            AppError::Api(ApiError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Api(ApiError::Validation { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Api(ApiError::Rejected(_)) => StatusCode::BAD_REQUEST,
            AppError::Api(ApiError::Timeout) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Api(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::LoginRequired { next } => redirect_to_login(next.as_deref()),
            AppError::Api(ApiError::Unauthorized) => redirect_to_login(None),
            AppError::Api(ApiError::Validation { message, fields }) => {
                HttpResponse::build(self.status_code()).json(serde_json::json!({
                    "error": message,
                    "fields": fields,
                }))
            }
            AppError::Api(e) => HttpResponse::build(self.status_code()).json(serde_json::json!({
                "error": e.user_message(),
            })),
        }
    }
}

/// Path plus query string of `req`, the page to come back to after login.
pub fn request_target(req: &HttpRequest) -> String {
    match req.query_string() {
        "" => req.path().to_string(),
        query => format!("{}?{query}", req.path()),
    }
}

/// Session cookie that instructs the user agent to drop the token.
pub fn removal_cookie(name: &str) -> Cookie<'static> {
    let mut cookie = Cookie::new(name.to_string(), "");
    cookie.set_path("/");
    cookie.make_removal();
    cookie
}

fn redirect_to_login(next: Option<&str>) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, AppError::login_location(next)))
        .cookie(removal_cookie(SESSION_COOKIE))
        .finish()
}
