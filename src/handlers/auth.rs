use actix_web::cookie::{Cookie, SameSite, time::Duration as CookieDuration};
use actix_web::{HttpResponse, web};
use chrono::Utc;
use tracing::info;

use crate::auth::SESSION_COOKIE;
use crate::auth::middleware::Credentials;
use crate::error::{ApiError, AppError, removal_cookie};
use crate::models::users::{AuthPayload, FieldErrors, LoginUser, RegisterUser};
use crate::state::AppState;

/// The cookie lives exactly as long as the token. Opaque tokens get a
/// browser-session cookie.
fn session_cookie(credentials: &Credentials, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, credentials.token().to_string())
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .finish();

    if let Some(expires_at) = credentials.claims().and_then(|c| c.expires_at()) {
        let seconds = (expires_at - Utc::now()).num_seconds().max(0);
        cookie.set_max_age(CookieDuration::seconds(seconds));
    }
    cookie
}

fn invalid_form(fields: FieldErrors) -> HttpResponse {
    HttpResponse::UnprocessableEntity().json(serde_json::json!({
        "error": "Please correct the highlighted fields",
        "fields": fields,
    }))
}

fn logged_in(
    mut response: actix_web::HttpResponseBuilder,
    payload: AuthPayload,
    state: &AppState,
) -> HttpResponse {
    let credentials = Credentials::new(payload.token);
    let secure = !state.config.is_development();
    response.cookie(session_cookie(&credentials, secure)).json(serde_json::json!({
        "user": payload.user,
        "expiresAt": credentials.claims().and_then(|c| c.expires_at()),
    }))
}

/// POST /login — exchange email and password for a session cookie.
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginUser>,
) -> Result<HttpResponse, AppError> {
    let input = body.into_inner();
    if let Err(fields) = input.validate() {
        return Ok(invalid_form(fields));
    }

    let payload = match state.api.login(&input).await {
        Ok(payload) => payload,
        Err(ApiError::Unauthorized) => {
            return Ok(HttpResponse::Unauthorized().json(serde_json::json!({
                "error": "Invalid email or password",
            })));
        }
        Err(e) => return Err(e.into()),
    };
    info!("User logged in: {}", input.email.trim());
    Ok(logged_in(HttpResponse::Ok(), payload, &state))
}

/// POST /register — create an account and start a session.
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterUser>,
) -> Result<HttpResponse, AppError> {
    let input = body.into_inner();
    if let Err(fields) = input.validate() {
        return Ok(invalid_form(fields));
    }

    let payload = state.api.register(&input).await?;
    info!("User registered: {}", input.username.trim());
    Ok(logged_in(HttpResponse::Created(), payload, &state))
}

/// POST /logout — drop the session cookie.
pub async fn logout() -> HttpResponse {
    HttpResponse::Ok()
        .cookie(removal_cookie(SESSION_COOKIE))
        .json(serde_json::json!({
            "message": "Logged out",
        }))
}

/// GET /account — the logged-in user as the session token describes them.
pub async fn account(credentials: Credentials) -> HttpResponse {
    match credentials.claims() {
        Some(claims) => HttpResponse::Ok().json(serde_json::json!({
            "id": claims.id,
            "username": claims.username,
            "email": claims.email,
            "displayName": claims.display_name(),
            "isSeller": claims.is_seller,
            "expiresAt": claims.expires_at(),
        })),
        None => HttpResponse::Ok().json(serde_json::json!({
            "id": null,
            "message": "Session token carries no profile details",
        })),
    }
}
