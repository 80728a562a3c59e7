use std::sync::Mutex;
use tracing::debug;
use crate::catalog::domain::store::CatalogStore;
use crate::catalog::repository::{decode_lines, encode_lines, CatalogRepository};
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::Repository;

// InMemoryCatalogRepository stores the encoded lines instead of a file. It
// goes through the same codec, so it behaves like the file gateway.
#[derive(Debug, Default)]
pub struct InMemoryCatalogRepository {
    lines: Mutex<Vec<String>>,
}

impl InMemoryCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> LibraryResult<Vec<String>> {
        Ok(self.lines.lock().map_err(poisoned)?.clone())
    }
}

fn poisoned<T>(_: T) -> LibraryError {
    LibraryError::io("in-memory catalog lock poisoned", None)
}

impl Repository<CatalogStore> for InMemoryCatalogRepository {
    fn load(&self) -> LibraryResult<CatalogStore> {
        let lines = self.lines.lock().map_err(poisoned)?;
        let store = decode_lines(lines.iter().enumerate().skip(1).map(|(i, line)| (i + 1, line.as_str())));
        debug!("loaded {} books from memory", store.len());
        Ok(store)
    }

    fn save(&self, aggregate: &CatalogStore) -> LibraryResult<usize> {
        let mut lines = self.lines.lock().map_err(poisoned)?;
        *lines = encode_lines(aggregate);
        Ok(aggregate.len())
    }
}

impl CatalogRepository for InMemoryCatalogRepository {
    fn location(&self) -> String {
        "memory".to_string()
    }
}
