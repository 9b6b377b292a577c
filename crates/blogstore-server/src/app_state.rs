// ABOUTME: Shared application state for the blogstore HTTP server.
// ABOUTME: Holds the post store and the id allocator used by create requests.

use std::path::PathBuf;
use std::sync::Arc;

use blogstore_store::{FileStore, IdAllocator, StoreError};

/// Shared application state accessible by all Axum handlers.
pub struct AppState {
    pub store: FileStore,
    pub allocator: IdAllocator,
}

/// Type alias for the Arc-wrapped state used with Axum's State extractor.
pub type SharedState = Arc<AppState>;

impl AppState {
    /// Open (creating if needed) the post store at `data_dir`.
    pub fn new(data_dir: PathBuf) -> Result<Self, StoreError> {
        Ok(Self {
            store: FileStore::open(data_dir)?,
            allocator: IdAllocator::new(),
        })
    }
}
