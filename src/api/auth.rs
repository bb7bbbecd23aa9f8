use crate::api::{ApiClient, RequestOptions};
use crate::error::ApiError;
use crate::models::users::{AuthPayload, LoginUser, RegisterUser};

fn encode<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Decode(format!("Failed to encode body: {e}")))
}

impl ApiClient {
    /// `POST /auth/register`.
    pub async fn register(&self, input: &RegisterUser) -> Result<AuthPayload, ApiError> {
        self.post("/auth/register", RequestOptions::new().json(encode(input)?))
            .await
    }

    /// `POST /auth/login`.
    pub async fn login(&self, input: &LoginUser) -> Result<AuthPayload, ApiError> {
        self.post("/auth/login", RequestOptions::new().json(encode(input)?))
            .await
    }
}
