pub mod checkout;
pub mod gigs;
pub mod query;
pub mod suggestions;
pub mod users;

use serde::{Deserialize, Serialize};

/// Pagination block as reported by the API. Never computed locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    #[serde(default, alias = "totalGigs", alias = "total")]
    pub total_results: u64,
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default, alias = "hasPreviousPage")]
    pub has_prev_page: bool,
}
