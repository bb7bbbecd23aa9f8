use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Sort orders understood by `GET /search`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Relevance,
    Newest,
    PriceLow,
    PriceHigh,
    Rating,
    Popular,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::Relevance,
        SortKey::Newest,
        SortKey::PriceLow,
        SortKey::PriceHigh,
        SortKey::Rating,
        SortKey::Popular,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Relevance => "relevance",
            SortKey::Newest => "newest",
            SortKey::PriceLow => "price_low",
            SortKey::PriceHigh => "price_high",
            SortKey::Rating => "rating",
            SortKey::Popular => "popular",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Relevance => "Best match",
            SortKey::Newest => "Newest arrivals",
            SortKey::PriceLow => "Price: low to high",
            SortKey::PriceHigh => "Price: high to low",
            SortKey::Rating => "Top rated",
            SortKey::Popular => "Most popular",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == value)
    }
}

/// Raw query-string parameters as they appear in the URL.
///
/// Every field is kept as text so a malformed number drops only that key
/// instead of rejecting the whole query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub q: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub delivery_time: Option<String>,
    pub min_rating: Option<String>,
    pub sort_by: Option<String>,
    pub page: Option<String>,
}

/// The state of a search view, mirrored one-to-one with the URL query string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryState {
    pub text: String,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub delivery_time_days: Option<u32>,
    pub min_rating: Option<f64>,
    pub sort_key: SortKey,
    pub page: u32,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            text: String::new(),
            category: None,
            subcategory: None,
            min_price: None,
            max_price: None,
            delivery_time_days: None,
            min_rating: None,
            sort_key: SortKey::Relevance,
            page: 1,
        }
    }
}

/// A single key change applied to a [`QueryState`].
#[derive(Debug, Clone, PartialEq)]
pub enum QueryChange {
    Text(String),
    Category(Option<String>),
    Subcategory(Option<String>),
    MinPrice(Option<f64>),
    MaxPrice(Option<f64>),
    DeliveryTime(Option<u32>),
    MinRating(Option<f64>),
    Sort(SortKey),
    Page(u32),
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_number<T: std::str::FromStr>(value: Option<String>) -> Option<T> {
    non_empty(value).and_then(|v| v.parse().ok())
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v >= 0.0)
}

impl From<SearchParams> for QueryState {
    fn from(p: SearchParams) -> Self {
        Self {
            text: non_empty(p.q).unwrap_or_default(),
            category: non_empty(p.category),
            subcategory: non_empty(p.subcategory),
            min_price: finite(parse_number(p.min_price)),
            max_price: finite(parse_number(p.max_price)),
            delivery_time_days: parse_number(p.delivery_time),
            min_rating: finite(parse_number(p.min_rating)),
            sort_key: non_empty(p.sort_by)
                .and_then(|s| SortKey::parse(&s))
                .unwrap_or_default(),
            page: parse_number::<u32>(p.page).filter(|p| *p >= 1).unwrap_or(1),
        }
    }
}

impl QueryState {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into().trim().to_string(),
            ..Self::default()
        }
    }

    /// Parse a raw query string (without the leading `?`).
    ///
    /// Unknown keys are ignored; an undecodable query string yields the
    /// default state.
    pub fn from_query_str(query: &str) -> Self {
        actix_web::web::Query::<SearchParams>::from_query(query)
            .map(|q| q.into_inner().into())
            .unwrap_or_else(|_| Self::new(""))
    }

    /// Non-empty parameters in their wire names, in a stable order.
    ///
    /// Defaults (`page = 1`, relevance sort) are left out so a bare search
    /// keeps a short URL.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if !self.text.is_empty() {
            pairs.push(("q", self.text.clone()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(subcategory) = &self.subcategory {
            pairs.push(("subcategory", subcategory.clone()));
        }
        if let Some(v) = self.min_price {
            pairs.push(("minPrice", v.to_string()));
        }
        if let Some(v) = self.max_price {
            pairs.push(("maxPrice", v.to_string()));
        }
        if let Some(v) = self.delivery_time_days {
            pairs.push(("deliveryTime", v.to_string()));
        }
        if let Some(v) = self.min_rating {
            pairs.push(("minRating", v.to_string()));
        }
        if self.sort_key != SortKey::Relevance {
            pairs.push(("sortBy", self.sort_key.as_str().to_string()));
        }
        if self.page > 1 {
            pairs.push(("page", self.page.to_string()));
        }
        pairs
    }

    /// Parameters for the outbound `GET /search` call. Unlike [`to_pairs`]
    /// the page is always sent.
    ///
    /// [`to_pairs`]: QueryState::to_pairs
    pub fn to_request_params(&self) -> Vec<(&'static str, String)> {
        let mut pairs = self.to_pairs();
        if self.page <= 1 {
            pairs.push(("page", "1".to_string()));
        }
        pairs
    }

    /// Form-encoded query string, empty when every key is at its default.
    pub fn to_query_string(&self) -> String {
        let pairs = self.to_pairs();
        if pairs.is_empty() {
            return String::new();
        }
        Url::parse_with_params("http://localhost/", &pairs)
            .ok()
            .and_then(|url| url.query().map(str::to_string))
            .unwrap_or_default()
    }

    /// Link to `path` carrying this state.
    pub fn href(&self, path: &str) -> String {
        let query = self.to_query_string();
        if query.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{query}")
        }
    }

    /// Merge `changes` into a copy of this state.
    ///
    /// The page is forced back to 1 unless every change is a page change.
    pub fn apply(&self, changes: impl IntoIterator<Item = QueryChange>) -> Self {
        let mut next = self.clone();
        let mut only_page = true;
        let mut any = false;

        for change in changes {
            any = true;
            match change {
                QueryChange::Page(page) => next.page = page.max(1),
                other => {
                    only_page = false;
                    next.set(other);
                }
            }
        }

        if any && !only_page {
            next.page = 1;
        }
        next
    }

    fn set(&mut self, change: QueryChange) {
        match change {
            QueryChange::Text(text) => self.text = text.trim().to_string(),
            QueryChange::Category(v) => self.category = non_empty(v),
            QueryChange::Subcategory(v) => self.subcategory = non_empty(v),
            QueryChange::MinPrice(v) => self.min_price = finite(v),
            QueryChange::MaxPrice(v) => self.max_price = finite(v),
            QueryChange::DeliveryTime(v) => self.delivery_time_days = v,
            QueryChange::MinRating(v) => self.min_rating = finite(v),
            QueryChange::Sort(key) => self.sort_key = key,
            QueryChange::Page(page) => self.page = page.max(1),
        }
    }

    /// Drop every filter, keeping only the raw query text.
    pub fn cleared(&self) -> Self {
        Self::new(self.text.clone())
    }

    pub fn has_filters(&self) -> bool {
        *self != self.cleared()
    }
}
