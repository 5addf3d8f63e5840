use std::sync::Arc;

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::web::{self, Data, JsonConfig, PathConfig};
use actix_web::{get, App, HttpResponse, HttpServer, ResponseError};
use mongodb::Client;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

pub mod campaign;
pub mod config;
pub mod database;
pub mod error;
pub mod message;
pub mod typedid;

pub use error::Error;

use crate::config::{Config, StorageBackend};
use crate::database::{Database, MemoryDatabase, MongoDatabase};
use crate::message::generator::{GeminiTextGenerator, TextGenerator};
use crate::message::scraper::{ProfileScraper, RapidApiProfileScraper};

/// Registers extractor error formatting and every route. Expects
/// `Data<dyn Database>`, `Data<dyn TextGenerator>` and
/// `Data<dyn ProfileScraper>` to be provided by the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(JsonConfig::default().error_handler(|err, _req| {
        // format json errors with custom format
        Error::InvalidJson(err).into()
    }))
    .app_data(PathConfig::default().error_handler(|err, _req| {
        // format path errors with custom format
        Error::InvalidPath(err).into()
    }))
    .service(campaign::endpoints::get_campaigns)
    .service(campaign::endpoints::get_campaign_by_id)
    .service(campaign::endpoints::create_campaign)
    .service(campaign::endpoints::update_campaign)
    .service(campaign::endpoints::delete_campaign)
    .service(message::endpoints::generate_personalized_message)
    .service(message::endpoints::generate_personalized_message_from_url);
}

/// Liveness check, served outside the api prefix.
#[get("/")]
pub async fn index() -> &'static str {
    "Hello, Outflo!"
}

/// Cross-origin policy for the browser frontend.
pub fn cors(origins: &[String]) -> Cors {
    origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
        .supports_credentials()
}

pub async fn path_does_not_exist() -> HttpResponse {
    Error::PathDoesNotExist.error_response()
}

async fn connect_database(config: &Config) -> Result<Arc<dyn Database>, Error> {
    match config.storage {
        StorageBackend::MongoDb => {
            info!("connecting to db: {}", config.mongodb_uri);
            let client = Client::with_uri_str(&config.mongodb_uri).await?;
            let db = MongoDatabase::initialize(client.database(&config.mongodb_database)).await?;
            Ok(Arc::new(db))
        }
        StorageBackend::Memory => {
            warn!("using in-memory storage, campaigns are lost on shutdown");
            Ok(Arc::new(MemoryDatabase::new()))
        }
    }
}

pub async fn run(config: Config) -> Result<(), Error> {
    let db = Data::from(connect_database(&config).await?);

    if config.gemini.api_key.is_none() {
        warn!("GEMINI_API_KEY is not set, message generation will fail");
    }
    if config.rapid_api.api_key.is_none() {
        warn!("RAPID_API_KEY is not set, profile lookups will fail");
    }
    let generator: Arc<dyn TextGenerator> = Arc::new(GeminiTextGenerator::new(&config.gemini));
    let generator = Data::from(generator);
    let scraper: Arc<dyn ProfileScraper> =
        Arc::new(RapidApiProfileScraper::new(&config.rapid_api));
    let scraper = Data::from(scraper);

    let prefix = config.api_prefix.clone();
    let cors_origins = config.cors_origins.clone();
    info!("listening on {}:{}{}", config.host, config.port, prefix);

    HttpServer::new(move || {
        App::new()
            .app_data(db.clone())
            .app_data(generator.clone())
            .app_data(scraper.clone())
            .wrap(cors(&cors_origins))
            .wrap(TracingLogger::default())
            .service(index)
            .service(web::scope(&prefix).configure(configure))
            .default_service(web::to(path_does_not_exist))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
