use crate::api::{ApiClient, RequestOptions};
use crate::auth::middleware::Credentials;
use crate::error::ApiError;
use crate::models::checkout::{CheckoutSession, CreateCheckoutSession};

impl ApiClient {
    /// `POST /stripe/create-checkout-session`. Always authenticated.
    pub async fn create_checkout_session(
        &self,
        input: &CreateCheckoutSession,
        credentials: &Credentials,
    ) -> Result<CheckoutSession, ApiError> {
        let body = serde_json::to_value(input)
            .map_err(|e| ApiError::Decode(format!("Failed to encode checkout request: {e}")))?;

        self.post(
            "/stripe/create-checkout-session",
            RequestOptions::new().credentials(Some(credentials)).json(body),
        )
        .await
    }
}
