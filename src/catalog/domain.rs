pub mod query;
pub mod service;
pub mod stats;
pub mod store;

use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;
use crate::books::dto::BookDto;
use crate::books::validator::BookFields;
use crate::catalog::domain::stats::CatalogStats;
use crate::catalog::domain::store::CatalogStore;
use crate::catalog::repository::CatalogRepository;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;

#[async_trait]
pub trait CatalogService: Sync + Send {
    async fn add_book(&self, fields: &BookFields) -> LibraryResult<BookDto>;
    async fn remove_book(&self, isbn: &str) -> LibraryResult<BookDto>;
    async fn update_book(&self, isbn: &str, updates: &HashMap<String, String>) -> LibraryResult<BookDto>;
    async fn find_book_by_isbn(&self, isbn: &str) -> LibraryResult<BookDto>;
    async fn find_all(&self) -> LibraryResult<Vec<BookDto>>;
    async fn search_books(&self, field: &str, value: &str) -> LibraryResult<Vec<BookDto>>;
    async fn filter_books(&self, criteria: &HashMap<String, String>) -> LibraryResult<Vec<BookDto>>;
    async fn sort_books(&self, field: &str, ascending: bool) -> LibraryResult<()>;
    async fn stats(&self) -> LibraryResult<CatalogStats>;
    async fn save(&self) -> LibraryResult<usize>;
}

// CatalogContext is the explicitly shared state behind the services: one
// store guarded by one lock, plus the gateway it was loaded from.
#[derive(Clone)]
pub struct CatalogContext {
    pub config: Configuration,
    pub store: Arc<Mutex<CatalogStore>>,
    pub repository: Arc<dyn CatalogRepository>,
}

impl CatalogContext {
    pub fn new(config: &Configuration, store: CatalogStore, repository: Arc<dyn CatalogRepository>) -> Self {
        Self {
            config: config.clone(),
            store: Arc::new(Mutex::new(store)),
            repository,
        }
    }

    // Writes a snapshot on the blocking pool. The caller holds the store
    // lock until the write completes, so saves never interleave.
    pub(crate) async fn save_snapshot(&self, store: &CatalogStore) -> LibraryResult<usize> {
        let repository = self.repository.clone();
        let snapshot = store.clone();
        tokio::task::spawn_blocking(move || repository.save(&snapshot)).await
            .map_err(|err| LibraryError::io(format!("catalog save did not complete: {}", err).as_str(), None))?
    }

    // Flushes after a mutation when autosave is on.
    pub(crate) async fn persist_if_enabled(&self, store: &CatalogStore) -> LibraryResult<()> {
        if self.config.autosave {
            let written = self.save_snapshot(store).await?;
            info!("autosaved {} books to {}", written, self.repository.location());
        }
        Ok(())
    }
}
