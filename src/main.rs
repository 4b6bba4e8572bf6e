//! Payment request server.
//!
//! Loads configuration from the environment, sets up logging and serves the
//! payment request API under `/api/v1`.
use actix_web::{middleware, middleware::Logger, web, App, HttpServer};
use color_eyre::Result;
use dotenvy::dotenv;
use log::info;

use vault_client::{
    api::routes::configure_routes, bootstrap::initialize_app_state, config::ServerConfig,
    constants::API_SCOPE, logging::setup_logging,
};

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();
    setup_logging()?;

    let config = ServerConfig::from_env();
    let app_state = initialize_app_state(&config)?;

    info!("Starting server on {}:{}", config.host, config.port);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::NormalizePath::trim())
            .wrap(middleware::DefaultHeaders::new())
            .wrap(Logger::default())
            .app_data(app_state.clone())
            .service(web::scope(API_SCOPE).configure(configure_routes))
    })
    .bind((config.host.as_str(), config.port))?
    .shutdown_timeout(5);

    info!("Server running at http://{}:{}", config.host, config.port);

    server.run().await?;
    Ok(())
}
