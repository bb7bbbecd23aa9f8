use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body of `POST /register`, forwarded to `POST /auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUser {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default)]
    pub is_seller: bool,
}

/// Body of `POST /login`, forwarded to `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUser {
    pub email: String,
    pub password: String,
}

/// User record returned by the auth endpoints. Never carries the password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "profilePicture")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub is_seller: bool,
}

/// `{ token, user }` payload of a successful login or registration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    pub token: String,
    #[serde(default)]
    pub user: Option<AuthUser>,
}

/// Field name → message.
pub type FieldErrors = BTreeMap<String, String>;

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        && !email.chars().any(char::is_whitespace)
}

impl RegisterUser {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        let username = self.username.trim();
        if username.len() < 3 || username.len() > 30 {
            errors.insert(
                "username".into(),
                "Username must be between 3 and 30 characters".into(),
            );
        } else if !username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            errors.insert(
                "username".into(),
                "Username may only contain letters, numbers and underscores".into(),
            );
        }

        if !is_valid_email(self.email.trim()) {
            errors.insert("email".into(), "Enter a valid email address".into());
        }

        if self.password.chars().count() < 6 {
            errors.insert(
                "password".into(),
                "Password must be at least 6 characters".into(),
            );
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl LoginUser {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if !is_valid_email(self.email.trim()) {
            errors.insert("email".into(), "Enter a valid email address".into());
        }
        if self.password.is_empty() {
            errors.insert("password".into(), "Password is required".into());
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
