use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use tracing::warn;

use crate::auth::middleware::Credentials;
use crate::error::AppError;
use crate::models::query::QueryState;
use crate::search::results::{ResultsPage, SearchPageView};
use crate::search::suggest::{Autocomplete, DropdownView, InputOutcome};
use crate::state::AppState;

/// GET /search?q=&category=&... — the search results page.
///
/// Every recognized parameter goes into one `GET /search` call; filter
/// facets are fetched alongside and are optional.
pub async fn search_page(
    req: HttpRequest,
    state: web::Data<AppState>,
    credentials: Option<Credentials>,
) -> Result<HttpResponse, AppError> {
    let query = QueryState::from_query_str(req.query_string());
    let ctx = state.render_context("/search");

    let mut page = ResultsPage::new(query);
    let (loaded, facets) = futures_util::join!(
        page.load(&state.api, credentials.as_ref(), &ctx),
        state.api.filters(),
    );
    loaded.map_err(|e| AppError::from(e).for_request(&req))?;

    let facets = facets
        .map_err(|e| warn!("Failed to fetch search filters: {e}"))
        .ok();

    let query = page.query().clone();
    let view = SearchPageView::build(query, facets, page.into_view(), &ctx, false);
    Ok(HttpResponse::Ok().json(view))
}

#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    pub q: String,
}

/// GET /search/suggestions?q= — one-shot suggestions without debouncing,
/// for clients that do not keep a socket open.
pub async fn suggestions(
    state: web::Data<AppState>,
    query: web::Query<SuggestQuery>,
) -> HttpResponse {
    let mut machine = Autocomplete::new(state.config.suggest.min_chars);

    let view = match machine.input(query.into_inner().q) {
        InputOutcome::Closed => DropdownView::Hidden,
        InputOutcome::Debounce { generation } => match machine.timer_elapsed(generation) {
            Some(ticket) => {
                let result = state
                    .api
                    .suggestions(&ticket.text, state.config.suggest.limit)
                    .await;
                machine.resolve(ticket.seq, result).unwrap_or(DropdownView::Hidden)
            }
            None => DropdownView::Hidden,
        },
    };

    HttpResponse::Ok().json(view)
}
