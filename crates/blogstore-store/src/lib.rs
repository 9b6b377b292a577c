// ABOUTME: Persistence layer for blogstore, storing each post as its own JSON file.
// ABOUTME: Provides the PostStore contract, the file-backed implementation, and id allocation.

pub mod allocator;
pub mod error;
pub mod file_store;

pub use allocator::IdAllocator;
pub use error::StoreError;
pub use file_store::{FileStore, PostStore, ViewOutcome};
