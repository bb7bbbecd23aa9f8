use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn from_build() -> Self {
        if cfg!(debug_assertions) {
            Environment::Development
        } else {
            Environment::Production
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("unknown environment '{other}'")),
        }
    }
}

/// Tuning for the live suggestion dropdown.
#[derive(Debug, Clone)]
pub struct SuggestConfig {
    pub debounce: Duration,
    pub min_chars: usize,
    pub limit: usize,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            min_chars: 2,
            limit: 8,
        }
    }
}

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub stripe_publishable_key: Option<String>,
    pub port: u16,
    pub request_timeout: Duration,
    pub suggest: SuggestConfig,
    pub environment: Environment,
    pub static_dir: PathBuf,
    pub currency: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000/api".to_string(),
            stripe_publishable_key: None,
            port: 8080,
            request_timeout: Duration::from_secs(10),
            suggest: SuggestConfig::default(),
            environment: Environment::from_build(),
            static_dir: PathBuf::from("./public"),
            currency: "USD".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; missing or invalid values fall
    /// back to the defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let stripe_publishable_key = get("STRIPE_PUBLISHABLE_KEY");
        if stripe_publishable_key.is_none() {
            warn!("STRIPE_PUBLISHABLE_KEY not set, checkout is disabled");
        }

        Self {
            api_base_url: get("API_BASE_URL").unwrap_or_else(|| {
                info!("API_BASE_URL not set, using default: {}", defaults.api_base_url);
                defaults.api_base_url.clone()
            }),
            stripe_publishable_key,
            port: parse_or(get("PORT"), "PORT", defaults.port),
            request_timeout: Duration::from_secs(parse_or(
                get("REQUEST_TIMEOUT_SECS"),
                "REQUEST_TIMEOUT_SECS",
                defaults.request_timeout.as_secs(),
            )),
            suggest: SuggestConfig {
                debounce: Duration::from_millis(parse_or(
                    get("SUGGEST_DEBOUNCE_MS"),
                    "SUGGEST_DEBOUNCE_MS",
                    defaults.suggest.debounce.as_millis() as u64,
                )),
                min_chars: parse_or(
                    get("SUGGEST_MIN_CHARS"),
                    "SUGGEST_MIN_CHARS",
                    defaults.suggest.min_chars,
                )
                .max(1),
                limit: parse_or(get("SUGGEST_LIMIT"), "SUGGEST_LIMIT", defaults.suggest.limit)
                    .clamp(1, 50),
            },
            environment: parse_or(get("APP_ENV"), "APP_ENV", defaults.environment),
            static_dir: get("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            currency: get("CURRENCY")
                .map(|c| c.to_ascii_uppercase())
                .unwrap_or(defaults.currency),
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}

fn parse_or<T: FromStr>(value: Option<String>, key: &str, default: T) -> T
where
    T::Err: Display,
{
    match value {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value '{raw}': {e}, using default");
            default
        }),
    }
}
