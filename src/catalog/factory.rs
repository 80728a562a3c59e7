use std::sync::Arc;
use crate::catalog::domain::{CatalogContext, CatalogService};
use crate::catalog::domain::service::CatalogServiceImpl;
use crate::catalog::repository::CatalogRepository;
use crate::catalog::repository::in_memory_repository::InMemoryCatalogRepository;
use crate::catalog::repository::text_file_repository::TextFileCatalogRepository;
use crate::core::domain::Configuration;
use crate::core::library::LibraryResult;
use crate::core::repository::{Repository, RepositoryStore};

pub fn create_catalog_repository(config: &Configuration, store: RepositoryStore) -> Arc<dyn CatalogRepository> {
    match store {
        RepositoryStore::TextFile => {
            Arc::new(TextFileCatalogRepository::new(config.data_file.as_str()))
        }
        RepositoryStore::InMemory => {
            Arc::new(InMemoryCatalogRepository::new())
        }
    }
}

pub fn open_catalog(config: &Configuration, store: RepositoryStore) -> LibraryResult<CatalogContext> {
    open_catalog_with(config, create_catalog_repository(config, store))
}

pub fn open_catalog_with(config: &Configuration, repository: Arc<dyn CatalogRepository>) -> LibraryResult<CatalogContext> {
    let store = repository.load()?;
    Ok(CatalogContext::new(config, store, repository))
}

pub fn create_catalog_service(context: &CatalogContext) -> Box<dyn CatalogService> {
    Box::new(CatalogServiceImpl::new(context))
}
