use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use skillbridge_web::{AppConfig, AppState, handlers};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = AppConfig::from_env();
    let port = config.port;
    let static_dir = config.static_dir.clone();
    let serve_static = static_dir.is_dir();

    let state = AppState::new(config).map_err(std::io::Error::other)?;
    tracing::info!("Marketplace API at {}", state.api.base_url());
    let state = web::Data::new(state);

    let bind_addr = format!("0.0.0.0:{port}");
    tracing::info!("Server running at http://{bind_addr}");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        let mut app = App::new()
            .wrap(cors)
            .app_data(state.clone())
            .configure(handlers::init_routes);

        if serve_static {
            app = app.service(Files::new("/static", static_dir.clone()));
        }
        app
    })
    .bind(&bind_addr)?
    .run()
    .await
}
