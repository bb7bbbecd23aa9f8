//! Search results page: controller, render contract and page model.

use serde::Serialize;
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::api::search::SearchResults;
use crate::auth::middleware::Credentials;
use crate::error::ApiError;
use crate::models::Pagination;
use crate::models::gigs::{GigCard, SellerSummary};
use crate::models::query::{QueryChange, QueryState, SortKey};
use crate::models::suggestions::FilterFacets;
use crate::search::format::{StarRating, format_price};

/// Pages listed around the current one in the pagination bar.
const PAGE_WINDOW: u32 = 5;

/// Rendering inputs that do not come from the response.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Path the page lives at; every generated link points here.
    pub path: String,
    pub currency: String,
    /// API base URL, set only in development to enable the debug panel.
    pub debug_api_base_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub id: String,
    pub title: String,
    pub href: String,
    pub image: Option<String>,
    pub seller: SellerSummary,
    pub price: f64,
    pub price_label: String,
    pub rating_average: f64,
    pub rating_count: u32,
    pub stars: StarRating,
    pub delivery_time_days: u32,
}

impl CardView {
    pub fn from_card(card: GigCard, currency: &str) -> Self {
        Self {
            href: format!("/gigs/{}", card.id),
            image: card.images.first().cloned(),
            price_label: format_price(card.price, currency),
            stars: StarRating::from_rating(card.rating_average),
            id: card.id,
            title: card.title,
            seller: card.seller_summary,
            price: card.price,
            rating_average: card.rating_average,
            rating_count: card.rating_count,
            delivery_time_days: card.delivery_time_days,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub page: u32,
    pub href: String,
    pub current: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationControls {
    pub current_page: u32,
    pub total_pages: u32,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
    pub pages: Vec<PageLink>,
}

impl PaginationControls {
    /// Controls for `pagination`, or `None` when everything fits on one page.
    pub fn build(pagination: &Pagination, query: &QueryState, path: &str) -> Option<Self> {
        if pagination.total_pages <= 1 {
            return None;
        }
        let total = pagination.total_pages;
        let current = pagination.current_page.clamp(1, total);
        let link = |page: u32| query.apply([QueryChange::Page(page)]).href(path);

        let half = PAGE_WINDOW / 2;
        let mut first = current.saturating_sub(half).max(1);
        let last = (first + PAGE_WINDOW - 1).min(total);
        first = last.saturating_sub(PAGE_WINDOW - 1).max(1);

        Some(Self {
            current_page: current,
            total_pages: total,
            prev_href: (pagination.has_prev_page && current > 1).then(|| link(current - 1)),
            next_href: (pagination.has_next_page && current < total).then(|| link(current + 1)),
            pages: (first..=last)
                .map(|page| PageLink {
                    page,
                    href: link(page),
                    current: page == current,
                })
                .collect(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Error,
    Success,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }
}

/// Shown on failures in development builds only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugPanel {
    pub raw_query: String,
    pub result_count: usize,
    pub api_base_url: String,
}

/// Render contract of the results area.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ResultsView {
    Loading,
    #[serde(rename_all = "camelCase")]
    Results {
        cards: Vec<CardView>,
        total_results: u64,
        pagination: Option<PaginationControls>,
    },
    #[serde(rename_all = "camelCase")]
    Empty {
        message: String,
        clear_filters_href: String,
    },
    Failed {
        toast: Toast,
        debug: Option<DebugPanel>,
    },
}

impl ResultsView {
    pub fn render(
        query: &QueryState,
        result: Result<SearchResults, ApiError>,
        ctx: &RenderContext,
    ) -> Self {
        match result {
            Ok(found) if found.results.is_empty() => ResultsView::Empty {
                message: if query.text.is_empty() {
                    "No services match these filters".to_string()
                } else {
                    format!("No services found for \"{}\"", query.text)
                },
                clear_filters_href: query.cleared().href(&ctx.path),
            },
            Ok(found) => {
                let total_results = found
                    .pagination
                    .as_ref()
                    .map(|p| p.total_results)
                    .unwrap_or(found.results.len() as u64);
                let pagination = found
                    .pagination
                    .as_ref()
                    .and_then(|p| PaginationControls::build(p, query, &ctx.path));
                ResultsView::Results {
                    cards: found
                        .results
                        .into_iter()
                        .map(|card| CardView::from_card(card, &ctx.currency))
                        .collect(),
                    total_results,
                    pagination,
                }
            }
            Err(e) => ResultsView::Failed {
                toast: Toast::error(e.user_message()),
                debug: ctx.debug_api_base_url.as_ref().map(|api_base_url| DebugPanel {
                    raw_query: query.to_query_string(),
                    result_count: 0,
                    api_base_url: api_base_url.clone(),
                }),
            },
        }
    }

    pub fn is_empty_state(&self) -> bool {
        matches!(self, ResultsView::Empty { .. })
    }
}

/// Owns the view state of one results page and applies only the newest load.
#[derive(Debug)]
pub struct ResultsPage {
    query: QueryState,
    issued: u64,
    view: ResultsView,
}

impl ResultsPage {
    pub fn new(query: QueryState) -> Self {
        Self {
            query,
            issued: 0,
            view: ResultsView::Loading,
        }
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn view(&self) -> &ResultsView {
        &self.view
    }

    pub fn into_view(self) -> ResultsView {
        self.view
    }

    /// Start a load for `query`; the view shows loading until it finishes.
    pub fn begin(&mut self, query: QueryState) -> u64 {
        self.issued += 1;
        self.query = query;
        self.view = ResultsView::Loading;
        self.issued
    }

    /// Apply the outcome of load `seq`. Returns `false` for superseded loads.
    pub fn finish(
        &mut self,
        seq: u64,
        result: Result<SearchResults, ApiError>,
        ctx: &RenderContext,
    ) -> bool {
        if seq != self.issued {
            return false;
        }
        if let Err(e) = &result {
            warn!("Search failed for '{}': {e}", self.query.to_query_string());
        }
        self.view = ResultsView::render(&self.query, result, ctx);
        true
    }

    /// Run one load against the API.
    ///
    /// An authentication failure is returned to the caller instead of being
    /// rendered, so the top-level guard can send the user to log in.
    pub async fn load(
        &mut self,
        api: &ApiClient,
        credentials: Option<&Credentials>,
        ctx: &RenderContext,
    ) -> Result<(), ApiError> {
        let seq = self.begin(self.query.clone());
        let result = api.search(&self.query, credentials).await;
        if let Err(ApiError::Unauthorized) = result {
            return Err(ApiError::Unauthorized);
        }
        if let Ok(found) = &result {
            info!(
                "Search '{}' returned {} results",
                self.query.to_query_string(),
                found.results.len()
            );
        }
        self.finish(seq, result, ctx);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortOption {
    pub key: SortKey,
    pub label: &'static str,
    pub href: String,
    pub selected: bool,
}

/// An applied filter with a link that removes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterChip {
    pub label: String,
    pub remove_href: String,
}

/// Everything the search page renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPageView {
    pub query: QueryState,
    pub heading: String,
    pub sort_options: Vec<SortOption>,
    pub active_filters: Vec<FilterChip>,
    pub facets: Option<FilterFacets>,
    pub results: ResultsView,
}

impl SearchPageView {
    /// With `category_pinned` the category is fixed by the page itself and
    /// gets no removal chip.
    pub fn build(
        query: QueryState,
        facets: Option<FilterFacets>,
        results: ResultsView,
        ctx: &RenderContext,
        category_pinned: bool,
    ) -> Self {
        let heading = match (&query.text, &query.category) {
            (text, _) if !text.is_empty() => format!("Results for \"{text}\""),
            (_, Some(category)) => category.clone(),
            _ => "All services".to_string(),
        };

        let sort_options = SortKey::ALL
            .into_iter()
            .map(|key| SortOption {
                key,
                label: key.label(),
                href: query.apply([QueryChange::Sort(key)]).href(&ctx.path),
                selected: key == query.sort_key,
            })
            .collect();

        Self {
            heading,
            sort_options,
            active_filters: filter_chips(&query, ctx, category_pinned),
            facets,
            results,
            query,
        }
    }
}

fn filter_chips(query: &QueryState, ctx: &RenderContext, category_pinned: bool) -> Vec<FilterChip> {
    let mut chips = Vec::new();
    let mut push = |label: String, change: QueryChange| {
        chips.push(FilterChip {
            label,
            remove_href: query.apply([change]).href(&ctx.path),
        });
    };

    if let Some(category) = query.category.as_ref().filter(|_| !category_pinned) {
        push(category.clone(), QueryChange::Category(None));
    }
    if let Some(subcategory) = &query.subcategory {
        push(subcategory.clone(), QueryChange::Subcategory(None));
    }
    if let Some(min) = query.min_price {
        push(format!("From {}", format_price(min, &ctx.currency)), QueryChange::MinPrice(None));
    }
    if let Some(max) = query.max_price {
        push(format!("Up to {}", format_price(max, &ctx.currency)), QueryChange::MaxPrice(None));
    }
    if let Some(days) = query.delivery_time_days {
        let unit = if days == 1 { "day" } else { "days" };
        push(format!("Delivery within {days} {unit}"), QueryChange::DeliveryTime(None));
    }
    if let Some(rating) = query.min_rating {
        push(format!("{rating}+ stars"), QueryChange::MinRating(None));
    }
    chips
}
