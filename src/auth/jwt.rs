use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, Validation, decode, decode_header};
use serde::{Deserialize, Serialize};

/// Claims carried by a marketplace API token.
///
/// The API signs the token; this service only reads it to know who is
/// logged in and when the session ends. The signature is checked by the
/// API on every call the token is forwarded with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// The user id (`_id` of the user document).
    #[serde(alias = "_id", alias = "sub")]
    pub id: String,
    pub exp: Option<usize>,
    pub iat: Option<usize>,
    pub email: Option<String>,
    pub username: Option<String>,
    #[serde(default)]
    pub is_seller: bool,
}

impl Claims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp
            .and_then(|exp| DateTime::<Utc>::from_timestamp(exp as i64, 0))
    }

    /// A token without `exp` never expires on our side.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|exp| exp <= now)
    }

    /// Best-effort display name.
    pub fn display_name(&self) -> Option<String> {
        self.username.clone().or_else(|| self.email.clone())
    }
}

/// Read the claims of `token` without verifying its signature.
pub fn read_claims(token: &str) -> Result<Claims, String> {
    let header = decode_header(token).map_err(|e| format!("Failed to decode header: {e}"))?;

    let mut validation = Validation::new(header.alg);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|e| format!("Failed to read token claims: {e}"))
}
