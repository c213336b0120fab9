//! Synchronization between the quote store and a remote source.
//!
//! A sync cycle fetches the remote quotes, merges them into the local list
//! keyed by quote text with a remote-wins conflict rule, persists the
//! merged list through the store, and reports what changed. Cycles always
//! end back at idle; a remote failure produces a zero-effect report, never
//! an error.

mod engine;
mod error;

pub use engine::{SyncEngine, SyncReport};
pub use error::SyncError;
