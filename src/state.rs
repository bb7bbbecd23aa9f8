use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::search::results::RenderContext;

/// Shared by every handler through `web::Data<AppState>`.
pub struct AppState {
    pub api: Arc<ApiClient>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, ApiError> {
        let api = ApiClient::new(&config.api_base_url, config.request_timeout)?;
        Ok(Self {
            api: Arc::new(api),
            config,
        })
    }

    pub fn render_context(&self, path: impl Into<String>) -> RenderContext {
        RenderContext {
            path: path.into(),
            currency: self.config.currency.clone(),
            debug_api_base_url: self
                .config
                .is_development()
                .then(|| self.api.base_url().to_string()),
        }
    }
}
