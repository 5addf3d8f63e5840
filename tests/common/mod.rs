#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use outflo_server::database::{Database, MemoryDatabase};
use outflo_server::message::generator::TextGenerator;
use outflo_server::message::scraper::ProfileScraper;
use outflo_server::message::PartialProfile;
use outflo_server::Error;

/// The only browser origin the test service accepts.
pub const FRONTEND_ORIGIN: &str = "http://localhost:5173";

/// Builds a service with every route registered on top of the given
/// database, text generator and profile scraper.
macro_rules! init_app {
    ($db:expr, $generator:expr, $scraper:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::from($db))
                .app_data(actix_web::web::Data::from($generator))
                .app_data(actix_web::web::Data::from($scraper))
                .wrap(outflo_server::cors(&[common::FRONTEND_ORIGIN.to_string()]))
                .service(outflo_server::index)
                .configure(outflo_server::configure)
                .default_service(actix_web::web::to(outflo_server::path_does_not_exist)),
        )
        .await
    };
}

pub fn memory_db() -> Arc<dyn Database> {
    Arc::new(MemoryDatabase::new())
}

pub struct StubGenerator(fn() -> Result<String, Error>);

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, Error> {
        (self.0)()
    }
}

pub fn generator(answer: fn() -> Result<String, Error>) -> Arc<dyn TextGenerator> {
    Arc::new(StubGenerator(answer))
}

pub fn unused_generator() -> Arc<dyn TextGenerator> {
    generator(|| panic!("generator should not be called"))
}

pub struct StubScraper(PartialProfile);

#[async_trait]
impl ProfileScraper for StubScraper {
    async fn fetch(&self, _profile_url: &str) -> Result<PartialProfile, Error> {
        Ok(self.0.clone())
    }
}

pub fn scraper(profile: PartialProfile) -> Arc<dyn ProfileScraper> {
    Arc::new(StubScraper(profile))
}

pub fn unused_scraper() -> Arc<dyn ProfileScraper> {
    scraper(PartialProfile::default())
}
