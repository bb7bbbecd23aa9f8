use serde::Deserialize;
use std::future::Future;

use crate::api::{ApiClient, RequestOptions};
use crate::auth::middleware::Credentials;
use crate::error::ApiError;
use crate::models::Pagination;
use crate::models::gigs::GigCard;
use crate::models::query::QueryState;
use crate::models::suggestions::{FilterFacets, Suggestion, TrendingQuery};
use crate::search::suggest::SuggestionSource;

/// Payload of `GET /search`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResults {
    #[serde(default, alias = "gigs")]
    pub results: Vec<GigCard>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Deserialize)]
struct SuggestionsPayload {
    #[serde(default)]
    suggestions: Vec<Suggestion>,
}

#[derive(Debug, Deserialize)]
struct FiltersPayload {
    #[serde(default)]
    filters: FilterFacets,
}

#[derive(Debug, Deserialize)]
struct TrendingPayload {
    #[serde(default, alias = "trending", alias = "searches")]
    queries: Vec<TrendingQuery>,
}

impl ApiClient {
    /// `GET /search` with every non-empty parameter of `query`.
    pub async fn search(
        &self,
        query: &QueryState,
        credentials: Option<&Credentials>,
    ) -> Result<SearchResults, ApiError> {
        self.get(
            "/search",
            RequestOptions::new()
                .credentials(credentials)
                .query(query.to_request_params()),
        )
        .await
    }

    /// `GET /search/suggestions?q=&limit=`.
    pub async fn suggestions(&self, text: &str, limit: usize) -> Result<Vec<Suggestion>, ApiError> {
        let payload: SuggestionsPayload = self
            .get(
                "/search/suggestions",
                RequestOptions::new().query(vec![
                    ("q", text.trim().to_string()),
                    ("limit", limit.to_string()),
                ]),
            )
            .await?;
        Ok(payload.suggestions)
    }

    /// `GET /search/filters`.
    pub async fn filters(&self) -> Result<FilterFacets, ApiError> {
        let payload: FiltersPayload = self.get("/search/filters", RequestOptions::new()).await?;
        Ok(payload.filters)
    }

    /// `GET /search/trending?limit=`.
    pub async fn trending(&self, limit: usize) -> Result<Vec<TrendingQuery>, ApiError> {
        let payload: TrendingPayload = self
            .get(
                "/search/trending",
                RequestOptions::new().query(vec![("limit", limit.to_string())]),
            )
            .await?;
        Ok(payload.queries)
    }
}

impl SuggestionSource for ApiClient {
    fn fetch_suggestions(
        &self,
        text: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Suggestion>, ApiError>> + Send {
        self.suggestions(text, limit)
    }
}
