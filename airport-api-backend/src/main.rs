//! Backend crate for the airport directory API.
//!
//! Uses actix to serve CRUD and paging over airports held in memory, loaded once from a JSON
//! dataset at startup.

pub mod airport_source;
pub mod api_docs;
pub mod cli;
pub mod config;
pub mod directory;
pub mod error;
pub mod logging;
pub mod web_app;

use actix_web::{middleware::Logger, web, App, HttpServer};
use clap::Parser;
use tokio::sync::RwLock;

use crate::airport_source::JsonFileSource;
use crate::cli::Cli;
use crate::config::Config;
use crate::directory::AirportDirectory;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbosity());

    let config = Config::load(&cli)?;

    let directory =
        AirportDirectory::from_source(&JsonFileSource::new(&config.dataset.path)).await?;
    if directory.is_empty() {
        tracing::warn!(path = %config.dataset.path.display(), "Airport dataset is empty");
    }

    let directory = web::Data::new(RwLock::new(directory));

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(directory.clone())
            .configure(web_app::configure)
    })
    .bind((config.server.host.as_str(), config.server.port))?;

    if let Some(workers) = config.server.workers {
        server = server.workers(workers);
    }

    tracing::info!(
        "Airport API ready on http://{}:{}, documents at /api-docs",
        config.server.host,
        config.server.port
    );

    server.run().await?;

    Ok(())
}
