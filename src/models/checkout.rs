use serde::{Deserialize, Serialize};

use crate::models::gigs::PackageType;

/// Body of `POST /stripe/create-checkout-session`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutSession {
    pub gig_id: String,
    pub package_type: PackageType,
    pub requirements: Vec<String>,
}

/// Payment provider session returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    pub url: String,
    #[serde(default, alias = "id")]
    pub session_id: Option<String>,
}

/// Body accepted by `POST /checkout/{gig_id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutForm {
    #[serde(default)]
    pub requirements: Vec<String>,
}

impl CheckoutForm {
    /// Requirements with blank lines dropped and whitespace trimmed.
    pub fn cleaned(&self) -> Vec<String> {
        self.requirements
            .iter()
            .map(|r| r.trim())
            .filter(|r| !r.is_empty())
            .map(str::to_string)
            .collect()
    }
}
