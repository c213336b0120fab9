//! QuoteDeck Core Library
//!
//! Shared types and logic for QuoteDeck applications: the quote store,
//! category filtering, and remote synchronization.

pub mod models;
pub mod remote;
pub mod storage;
pub mod store;
pub mod sync;
pub mod view;

pub use models::Quote;
pub use remote::{HttpRemoteSource, RemoteError, RemotePost, RemoteSource};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::{QuoteStore, StoreError, QUOTES_KEY, SELECTED_CATEGORY_KEY};
pub use sync::{SyncEngine, SyncError, SyncReport};
pub use view::{distinct_categories, filtered, pick_random, EmptySelectionError, ALL_CATEGORIES};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
