use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;
use tracing::warn;

use crate::auth::middleware::Credentials;
use crate::categories::{Categories, CategoryConfig};
use crate::error::AppError;
use crate::models::query::{QueryChange, QueryState};
use crate::models::suggestions::TrendingQuery;
use crate::search::results::{ResultsPage, SearchPageView};
use crate::search::suggest::search_href;
use crate::state::AppState;

const TRENDING_LIMIT: usize = 8;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CategoryTile {
    #[serde(flatten)]
    config: &'static CategoryConfig,
    href: String,
}

#[derive(Debug, Serialize)]
struct TrendingChip {
    #[serde(flatten)]
    query: TrendingQuery,
    href: String,
}

/// GET /explore — every category plus trending searches.
pub async fn explore(state: web::Data<AppState>) -> HttpResponse {
    let categories: Vec<CategoryTile> = Categories::ALL
        .into_iter()
        .map(|c| CategoryTile {
            config: c.config(),
            href: c.href(),
        })
        .collect();

    let trending: Vec<TrendingChip> = match state.api.trending(TRENDING_LIMIT).await {
        Ok(queries) => queries
            .into_iter()
            .map(|query| TrendingChip {
                href: search_href(&query.text),
                query,
            })
            .collect(),
        Err(e) => {
            warn!("Failed to fetch trending searches: {e}");
            Vec::new()
        }
    };

    HttpResponse::Ok().json(serde_json::json!({
        "categories": categories,
        "trending": trending,
    }))
}

#[derive(Debug, Serialize)]
struct SubcategoryTile {
    name: &'static str,
    href: String,
    selected: bool,
}

#[derive(Debug, Serialize)]
struct CategoryPageView {
    category: &'static CategoryConfig,
    subcategories: Vec<SubcategoryTile>,
    page: SearchPageView,
}

/// GET /categories/{slug} — the results page with the category pinned.
pub async fn category_page(
    req: HttpRequest,
    path: web::Path<String>,
    state: web::Data<AppState>,
    credentials: Option<Credentials>,
) -> Result<HttpResponse, AppError> {
    let slug = path.into_inner();
    let Some(category) = Categories::from_slug(&slug) else {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Category {slug} not found"),
        })));
    };
    let config = category.config();
    let page_path = category.href();

    // The URL cannot move the page to another category.
    let mut query = QueryState::from_query_str(req.query_string());
    query.category = Some(config.display_name.to_string());

    let ctx = state.render_context(page_path.clone());
    let mut page = ResultsPage::new(query);
    page.load(&state.api, credentials.as_ref(), &ctx)
        .await
        .map_err(|e| AppError::from(e).for_request(&req))?;

    let query = page.query().clone();
    let subcategories = config
        .subcategories
        .iter()
        .map(|&name| SubcategoryTile {
            name,
            href: query
                .apply([QueryChange::Subcategory(Some(name.to_string()))])
                .href(&page_path),
            selected: query.subcategory.as_deref() == Some(name),
        })
        .collect();

    Ok(HttpResponse::Ok().json(CategoryPageView {
        category: config,
        subcategories,
        page: SearchPageView::build(query, None, page.into_view(), &ctx, true),
    }))
}
