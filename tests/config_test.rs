use std::collections::HashMap;
use std::time::Duration;

use skillbridge_web::config::{AppConfig, Environment};

fn config_from(vars: &[(&str, &str)]) -> AppConfig {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    AppConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_defaults() {
    let config = config_from(&[]);

    assert_eq!(config.api_base_url, "http://localhost:5000/api");
    assert!(config.stripe_publishable_key.is_none());
    assert_eq!(config.port, 8080);
    assert_eq!(config.request_timeout, Duration::from_secs(10));
    assert_eq!(config.suggest.debounce, Duration::from_millis(300));
    assert_eq!(config.suggest.min_chars, 2);
    assert_eq!(config.suggest.limit, 8);
    assert_eq!(config.currency, "USD");
}

#[test]
fn test_values_are_read() {
    let config = config_from(&[
        ("API_BASE_URL", "https://api.example.com/api"),
        ("STRIPE_PUBLISHABLE_KEY", "pk_live_abc"),
        ("PORT", "3000"),
        ("REQUEST_TIMEOUT_SECS", "4"),
        ("SUGGEST_DEBOUNCE_MS", "150"),
        ("APP_ENV", "production"),
        ("CURRENCY", "eur"),
    ]);

    assert_eq!(config.api_base_url, "https://api.example.com/api");
    assert_eq!(config.stripe_publishable_key.as_deref(), Some("pk_live_abc"));
    assert_eq!(config.port, 3000);
    assert_eq!(config.request_timeout, Duration::from_secs(4));
    assert_eq!(config.suggest.debounce, Duration::from_millis(150));
    assert_eq!(config.environment, Environment::Production);
    assert!(!config.is_development());
    assert_eq!(config.currency, "EUR");
}

#[test]
fn test_invalid_or_blank_values_fall_back() {
    let config = config_from(&[
        ("PORT", "eighty"),
        ("STRIPE_PUBLISHABLE_KEY", "   "),
        ("SUGGEST_MIN_CHARS", "0"),
        ("SUGGEST_LIMIT", "500"),
        ("APP_ENV", "staging"),
    ]);

    assert_eq!(config.port, 8080);
    assert!(config.stripe_publishable_key.is_none());
    assert_eq!(config.suggest.min_chars, 1);
    assert_eq!(config.suggest.limit, 50);
    assert_eq!(config.environment, AppConfig::default().environment);
}
