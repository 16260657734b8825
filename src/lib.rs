use actix_web::{middleware, web, App, HttpServer};
use anyhow::Result;
use log::*;

pub mod config;
mod favorites;
mod http_error;
mod pages;
mod session;
pub mod tmdb;


pub static DEBUG: bool = cfg!(debug_assertions);

pub async fn run() -> Result<()> {
    let port: u16 = std::env::var("MARQUEE_PORT")
        .unwrap_or("8080".to_string())
        .parse()
        .unwrap_or(8080);
    pretty_env_logger::env_logger::builder()
        .filter_level(if DEBUG {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .format_timestamp(None)
        .init();

    info!("Starting Marquee v{}...", env!("CARGO_PKG_VERSION"));

    // Initialize shared state
    let shared_config = config::init_shared_config();
    let tmdb_client = web::Data::new(tmdb::client::TmdbClient::new(shared_config));
    let favorites_store = web::Data::new(favorites::store::FavoritesStore::new());

    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(
                web::JsonConfig::default()
                    .limit(262144)
                    .error_handler(|err, _req| http_error::Error::BadRequest(err.to_string()).into()),
            )
            .app_data(tmdb_client.clone())
            .app_data(favorites_store.clone())
            .configure(pages::home::configure)
            .configure(pages::search::configure)
            .configure(pages::movie::configure)
            .configure(pages::today::configure)
            .configure(favorites::configure)
            .default_service(web::route().to(http_error::not_found))
    })
    .workers(4)
    .bind(format!("0.0.0.0:{port}", port = port))?
    .run();

    info!(
        "Starting {} server at http://127.0.0.1:{}...",
        if DEBUG { "development" } else { "production" },
        port
    );

    let stop_result = server.await;
    debug!("Server stopped");

    Ok(stop_result?)
}
