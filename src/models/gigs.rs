use serde::{Deserialize, Serialize};

/// Seller block embedded in a gig card.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerSummary {
    #[serde(default, alias = "username")]
    pub name: String,
    #[serde(default, alias = "profilePicture")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// A gig as listed in search results and category grids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GigCard {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, alias = "seller", alias = "sellerId")]
    pub seller_summary: SellerSummary,
    #[serde(default)]
    pub rating_average: f64,
    #[serde(default)]
    pub rating_count: u32,
    #[serde(default, alias = "deliveryTime")]
    pub delivery_time_days: u32,
}

/// The three fixed package tiers a gig can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
    Basic,
    Standard,
    Premium,
}

impl PackageType {
    pub fn as_str(self) -> &'static str {
        match self {
            PackageType::Basic => "basic",
            PackageType::Standard => "standard",
            PackageType::Premium => "premium",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "basic" => Some(PackageType::Basic),
            "standard" => Some(PackageType::Standard),
            "premium" => Some(PackageType::Premium),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GigPackage {
    #[serde(alias = "type")]
    pub kind: PackageType,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default, alias = "deliveryTime")]
    pub delivery_time_days: u32,
    #[serde(default)]
    pub revisions: Option<u32>,
    #[serde(default)]
    pub features: Vec<String>,
}

/// Full gig payload from `GET /gigs/details/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GigDetails {
    #[serde(flatten)]
    pub card: GigCard,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub packages: Vec<GigPackage>,
}

impl GigDetails {
    pub fn package(&self, kind: PackageType) -> Option<&GigPackage> {
        self.packages.iter().find(|p| p.kind == kind)
    }
}

/// Query for the plain `GET /gigs` listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GigListQuery {
    pub category: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sort_by: Option<String>,
}

impl GigListQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }

    pub fn to_request_params(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page().to_string()),
            ("limit", self.limit().to_string()),
        ];
        if let Some(category) = self.category.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            pairs.push(("category", category.to_string()));
        }
        if let Some(sort) = self.sort_by.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            pairs.push(("sortBy", sort.to_string()));
        }
        pairs
    }
}
