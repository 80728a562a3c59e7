use serde::{Deserialize, Serialize};
use crate::core::library::LibraryResult;

// Repository loads and flushes a whole aggregate at once. Both calls are
// synchronous and run to completion.
pub trait Repository<Aggregate>: Sync + Send {
    // load the aggregate, creating empty storage when none exists yet
    fn load(&self) -> LibraryResult<Aggregate>;

    // overwrite storage with the aggregate, returns number of records written
    fn save(&self, aggregate: &Aggregate) -> LibraryResult<usize>;
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub enum RepositoryStore {
    TextFile,
    InMemory,
}
