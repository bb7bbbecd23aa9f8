use serde::Deserialize;
use tracing::warn;

use crate::api::{ApiClient, RequestOptions};
use crate::auth::middleware::Credentials;
use crate::error::ApiError;
use crate::models::Pagination;
use crate::models::gigs::{GigCard, GigDetails, GigListQuery};

/// Payload of `GET /gigs`.
#[derive(Debug, Clone, Deserialize)]
pub struct GigListing {
    #[serde(default)]
    pub gigs: Vec<GigCard>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Ids are single opaque path segments. Anything else could rewrite the
/// upstream path once interpolated, so it never leaves this service.
fn is_gig_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[derive(Debug, Deserialize)]
struct GigPayload {
    #[serde(alias = "data")]
    gig: GigDetails,
}

impl ApiClient {
    /// `GET /gigs/details/:id`.
    pub async fn gig_details(
        &self,
        id: &str,
        credentials: Option<&Credentials>,
    ) -> Result<GigDetails, ApiError> {
        let id = id.trim();
        if !is_gig_id(id) {
            warn!("Refusing malformed gig id {id:?}");
            return Err(ApiError::NotFound(format!("No gig with id {id:?}")));
        }
        let payload: GigPayload = self
            .get(
                &format!("/gigs/details/{id}"),
                RequestOptions::new().credentials(credentials),
            )
            .await?;
        Ok(payload.gig)
    }

    /// `GET /gigs` listing.
    pub async fn list_gigs(
        &self,
        query: &GigListQuery,
        credentials: Option<&Credentials>,
    ) -> Result<GigListing, ApiError> {
        self.get(
            "/gigs",
            RequestOptions::new()
                .credentials(credentials)
                .query(query.to_request_params()),
        )
        .await
    }
}
