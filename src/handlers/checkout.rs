use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use tracing::info;

use crate::auth::middleware::Credentials;
use crate::error::AppError;
use crate::models::checkout::{CheckoutForm, CreateCheckoutSession};
use crate::models::gigs::PackageType;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CheckoutQuery {
    pub package: Option<String>,
}

/// POST /checkout/{gig_id}?package=basic — open a payment session.
///
/// Requires a session; without one the caller is sent to the login page.
/// The body may carry `{"requirements": [..]}` for the seller.
pub async fn create_checkout(
    req: HttpRequest,
    credentials: Credentials,
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<CheckoutQuery>,
    body: Option<web::Json<CheckoutForm>>,
) -> Result<HttpResponse, AppError> {
    let Some(publishable_key) = state.config.stripe_publishable_key.clone() else {
        return Ok(HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "error": "Checkout is not available right now",
        })));
    };

    let gig_id = path.into_inner();
    let package = query.package.as_deref().unwrap_or("basic");
    let Some(package_type) = PackageType::parse(package) else {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "error": format!("Unknown package '{package}'"),
        })));
    };

    let requirements = body.map(|b| b.cleaned()).unwrap_or_default();
    let input = CreateCheckoutSession {
        gig_id: gig_id.clone(),
        package_type,
        requirements,
    };

    let session = state
        .api
        .create_checkout_session(&input, &credentials)
        .await
        .map_err(|e| AppError::from(e).for_request(&req))?;
    info!(
        "Checkout session created for gig {gig_id} ({})",
        package_type.as_str()
    );

    Ok(HttpResponse::Created().json(serde_json::json!({
        "url": session.url,
        "sessionId": session.session_id,
        "publishableKey": publishable_key,
    })))
}
