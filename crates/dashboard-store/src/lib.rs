pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

use std::sync::Arc;

pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use traits::{KeyValueStore, SESSION_KEY};

/// Storage mode for the session store.
pub enum StorageMode {
    Memory,
    Persistent(String),
}

/// Open a store for the given mode, loading any existing file contents.
pub async fn open_store(mode: StorageMode) -> StoreResult<Arc<dyn KeyValueStore>> {
    let store: Arc<dyn KeyValueStore> = match mode {
        StorageMode::Memory => Arc::new(MemoryStore::new()),
        StorageMode::Persistent(path) => Arc::new(FileStore::open(path).await?),
    };
    Ok(store)
}
