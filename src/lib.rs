pub mod api;
pub mod auth;
pub mod categories;
pub mod config;
pub mod error;
pub mod handlers;
pub mod live;
pub mod models;
pub mod search;
pub mod state;

pub use api::ApiClient;
pub use config::AppConfig;
pub use state::AppState;
