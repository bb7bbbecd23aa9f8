use actix_web::http::header::Header;
use actix_web::{Error, FromRequest, HttpRequest, dev::Payload};
use actix_web_httpauth::headers::authorization::{Authorization, Bearer};
use chrono::Utc;
use std::future::{Ready, ready};
use tracing::debug;

use crate::auth::SESSION_COOKIE;
use crate::auth::jwt::{self, Claims};
use crate::error::{AppError, request_target};

/// The caller's API token, passed explicitly to every API call that needs it.
///
/// Extracted from `Authorization: Bearer <token>` or, for browser sessions,
/// from the session cookie. Use `Option<Credentials>` in handlers where
/// logging in is optional; a bare `Credentials` redirects to the login page.
#[derive(Debug, Clone)]
pub struct Credentials {
    token: String,
    claims: Option<Claims>,
}

impl Credentials {
    /// Wrap a token, reading its claims when they are decodable.
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        let claims = jwt::read_claims(&token)
            .map_err(|e| debug!("Opaque session token: {e}"))
            .ok();
        Self { token, claims }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn claims(&self) -> Option<&Claims> {
        self.claims.as_ref()
    }

    pub fn is_expired(&self) -> bool {
        self.claims
            .as_ref()
            .is_some_and(|c| c.is_expired(Utc::now()))
    }

    /// Credentials from the request, if any usable ones are present.
    pub fn from_http_request(req: &HttpRequest) -> Option<Self> {
        let token = Authorization::<Bearer>::parse(req)
            .ok()
            .map(|auth| auth.as_ref().token().to_string())
            .or_else(|| req.cookie(SESSION_COOKIE).map(|c| c.value().to_string()))
            .filter(|t| !t.trim().is_empty())?;

        let credentials = Self::new(token);
        if credentials.is_expired() {
            debug!("Ignoring expired session token");
            return None;
        }
        Some(credentials)
    }
}

impl FromRequest for Credentials {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            Self::from_http_request(req)
                .ok_or_else(|| AppError::login_required(request_target(req)).into()),
        )
    }
}
