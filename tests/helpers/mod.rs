//! In-process stand-in for the marketplace REST API.
#![allow(dead_code)]

use actix_web::dev::Service;
use actix_web::{App, HttpServer, web};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use skillbridge_web::config::{AppConfig, Environment};
use skillbridge_web::{ApiClient, AppState};

/// A request as the mock API saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: String,
    pub authorization: Option<String>,
}

impl Recorded {
    /// Decoded query parameters, in order.
    pub fn params(&self) -> Vec<(String, String)> {
        actix_web::web::Query::<Vec<(String, String)>>::from_query(&self.query)
            .map(|q| q.into_inner())
            .unwrap_or_default()
    }

    pub fn param(&self, key: &str) -> Option<String> {
        self.params()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

pub struct MockApi {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockApi {
    /// Serve `routes` on an ephemeral port, recording every request.
    pub fn start<F>(routes: F) -> Self
    where
        F: Fn(&mut web::ServiceConfig) + Send + Sync + Clone + 'static,
    {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::clone(&requests);

        let server = HttpServer::new(move || {
            let recorder = Arc::clone(&recorder);
            App::new()
                .wrap_fn(move |req, srv| {
                    recorder.lock().unwrap().push(Recorded {
                        method: req.method().to_string(),
                        path: req.path().to_string(),
                        query: req.query_string().to_string(),
                        authorization: req
                            .headers()
                            .get("Authorization")
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string),
                    });
                    srv.call(req)
                })
                .configure(routes.clone())
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("mock API should bind");

        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());

        Self {
            base_url: format!("http://{addr}/api"),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.base_url, Duration::from_secs(5)).unwrap()
    }

    pub fn config(&self, environment: Environment) -> AppConfig {
        AppConfig {
            api_base_url: self.base_url.clone(),
            stripe_publishable_key: Some("pk_test_123".to_string()),
            environment,
            ..AppConfig::default()
        }
    }

    pub fn state(&self, environment: Environment) -> AppState {
        AppState::new(self.config(environment)).unwrap()
    }
}

pub fn gig_json(id: &str, title: &str, price: f64, rating: f64) -> serde_json::Value {
    serde_json::json!({
        "_id": id,
        "title": title,
        "price": price,
        "images": [format!("https://img.example.com/{id}.png")],
        "seller": { "username": "maria", "avatar": null, "country": "Portugal" },
        "ratingAverage": rating,
        "ratingCount": 12,
        "deliveryTime": 3,
    })
}
