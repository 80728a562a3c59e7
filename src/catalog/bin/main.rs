use lms_catalog::catalog::domain::CatalogService;
use lms_catalog::catalog::factory::{create_catalog_service, open_catalog};
use lms_catalog::core::domain::Configuration;
use lms_catalog::core::library::LibraryError;
use lms_catalog::core::repository::RepositoryStore;
use lms_catalog::utils::logs::setup_tracing;
use tracing::info;

// Loads the configured catalog file and prints its statistics report as JSON.
#[tokio::main]
async fn main() -> Result<(), LibraryError> {
    setup_tracing();

    let config = Configuration::from_env();
    let context = open_catalog(&config, RepositoryStore::TextFile)?;
    let svc = create_catalog_service(&context);
    let stats = svc.stats().await?;
    info!("catalog {} has {} books", context.repository.location(), stats.total);
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
