use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;

use crate::auth::middleware::Credentials;
use crate::error::{ApiError, AppError};
use crate::models::Pagination;
use crate::models::gigs::{GigDetails, GigListQuery, GigPackage};
use crate::search::format::{StarRating, format_price};
use crate::search::results::CardView;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GigListView {
    cards: Vec<CardView>,
    pagination: Option<Pagination>,
}

/// GET /gigs?category=&page=&limit=&sortBy= — plain gig listing.
pub async fn get_gigs(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<GigListQuery>,
    credentials: Option<Credentials>,
) -> Result<HttpResponse, AppError> {
    let listing = state
        .api
        .list_gigs(&query.into_inner(), credentials.as_ref())
        .await
        .map_err(|e| AppError::from(e).for_request(&req))?;

    let currency = &state.config.currency;
    Ok(HttpResponse::Ok().json(GigListView {
        cards: listing
            .gigs
            .into_iter()
            .map(|card| CardView::from_card(card, currency))
            .collect(),
        pagination: listing.pagination,
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PackageView {
    #[serde(flatten)]
    package: GigPackage,
    price_label: String,
    checkout_href: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GigDetailsView {
    #[serde(flatten)]
    gig: GigDetails,
    price_label: String,
    stars: StarRating,
    packages: Vec<PackageView>,
}

/// GET /gigs/{id} — a single gig with its packages.
pub async fn get_gig(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<String>,
    credentials: Option<Credentials>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let mut gig = match state.api.gig_details(&id, credentials.as_ref()).await {
        Ok(gig) => gig,
        Err(ApiError::NotFound(_)) => {
            return Ok(HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Gig {id} not found"),
            })));
        }
        Err(e) => return Err(AppError::from(e).for_request(&req)),
    };

    let currency = &state.config.currency;
    let packages = std::mem::take(&mut gig.packages)
        .into_iter()
        .map(|package| PackageView {
            price_label: format_price(package.price, currency),
            checkout_href: format!(
                "/checkout/{}?package={}",
                gig.card.id,
                package.kind.as_str()
            ),
            package,
        })
        .collect();

    Ok(HttpResponse::Ok().json(GigDetailsView {
        price_label: format_price(gig.card.price, currency),
        stars: StarRating::from_rating(gig.card.rating_average),
        packages,
        gig,
    }))
}
