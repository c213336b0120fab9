//! The sync engine: one fetch-merge-persist cycle at a time.

use std::sync::atomic::{AtomicBool, Ordering};

use super::SyncError;
use crate::remote::RemoteSource;
use crate::storage::KeyValueStore;
use crate::store::QuoteStore;

/// Summary of one sync cycle.
#[derive(Debug, Clone)]
pub struct SyncReport {
    /// Remote quotes appended because no local quote shared their text.
    pub new_quotes_added: usize,
    /// Local quotes overwritten by a differing remote version.
    pub conflicts_resolved: usize,
    /// Set when the remote could not be reached; the cycle completed with
    /// zero effect and the next scheduled cycle retries.
    pub remote_error: Option<String>,
}

impl SyncReport {
    /// True when the cycle changed the local list.
    pub fn had_effect(&self) -> bool {
        self.new_quotes_added > 0 || self.conflicts_resolved > 0
    }
}

/// Orchestrates reconciliation between the store and a remote source.
///
/// The engine is single-flight: a cycle started while another is in flight
/// is dropped and reported as [`SyncError::InFlight`]. Every cycle ends
/// back at idle regardless of outcome.
pub struct SyncEngine {
    in_flight: AtomicBool,
}

impl SyncEngine {
    pub fn new() -> Self {
        Self {
            in_flight: AtomicBool::new(false),
        }
    }

    /// Runs one sync cycle.
    ///
    /// Remote quotes merge into the local list keyed by exact text match
    /// (first local match wins): a differing match is overwritten with the
    /// remote version, a missing one is appended. The merged list is
    /// persisted through the store before the report is returned.
    pub async fn sync<S, R>(
        &self,
        store: &mut QuoteStore<S>,
        remote: &R,
    ) -> Result<SyncReport, SyncError>
    where
        S: KeyValueStore,
        R: RemoteSource,
    {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(SyncError::InFlight);
        }

        let result = self.run_cycle(store, remote).await;
        self.in_flight.store(false, Ordering::SeqCst);
        result
    }

    async fn run_cycle<S, R>(
        &self,
        store: &mut QuoteStore<S>,
        remote: &R,
    ) -> Result<SyncReport, SyncError>
    where
        S: KeyValueStore,
        R: RemoteSource,
    {
        let remote_quotes = match remote.fetch_quotes().await {
            Ok(quotes) => quotes,
            Err(e) => {
                tracing::warn!("remote fetch failed, sync cycle has no effect: {}", e);
                return Ok(SyncReport {
                    new_quotes_added: 0,
                    conflicts_resolved: 0,
                    remote_error: Some(e.to_string()),
                });
            }
        };

        let mut merged = store.quotes().to_vec();
        let mut new_quotes_added = 0;
        let mut conflicts_resolved = 0;

        for remote_quote in remote_quotes {
            match merged.iter_mut().find(|q| q.text == remote_quote.text) {
                Some(local) => {
                    // Remote wins on any structural difference.
                    if *local != remote_quote {
                        *local = remote_quote;
                        conflicts_resolved += 1;
                    }
                }
                None => {
                    merged.push(remote_quote);
                    new_quotes_added += 1;
                }
            }
        }

        store.replace_all(merged)?;

        tracing::debug!(
            "sync cycle complete: {} new, {} conflicts resolved",
            new_quotes_added,
            conflicts_resolved
        );

        Ok(SyncReport {
            new_quotes_added,
            conflicts_resolved,
            remote_error: None,
        })
    }
}

impl Default for SyncEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Quote;
    use crate::remote::RemoteError;
    use crate::storage::{MemoryStore, StorageError};
    use crate::store::QUOTES_KEY;

    /// Remote fake serving a fixed quote list, or failing outright.
    struct FakeRemote {
        quotes: Vec<Quote>,
        fail: bool,
    }

    impl FakeRemote {
        fn serving(quotes: Vec<Quote>) -> Self {
            Self {
                quotes,
                fail: false,
            }
        }

        fn unavailable() -> Self {
            Self {
                quotes: Vec::new(),
                fail: true,
            }
        }
    }

    impl RemoteSource for FakeRemote {
        async fn fetch_quotes(&self) -> Result<Vec<Quote>, RemoteError> {
            if self.fail {
                return Err(RemoteError::HttpError("connection refused".to_string()));
            }
            Ok(self.quotes.clone())
        }

        async fn post_quote(&self, _quote: &Quote) -> Result<(), RemoteError> {
            Ok(())
        }
    }

    fn store_with(quotes: Vec<Quote>) -> QuoteStore<MemoryStore> {
        let mut store = QuoteStore::load(MemoryStore::new()).unwrap();
        store.replace_all(quotes).unwrap();
        store
    }

    fn persisted(store: &QuoteStore<MemoryStore>) -> Vec<Quote> {
        let raw = store.storage().get(QUOTES_KEY).unwrap().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[tokio::test]
    async fn test_sync_conflict_remote_wins() {
        let mut store = store_with(vec![Quote::new("X", "M")]);
        let remote = FakeRemote::serving(vec![Quote::new("X", "N")]);
        let engine = SyncEngine::new();

        let report = engine.sync(&mut store, &remote).await.unwrap();

        assert_eq!(report.conflicts_resolved, 1);
        assert_eq!(report.new_quotes_added, 0);
        assert_eq!(store.quotes(), &[Quote::new("X", "N")]);
        assert_eq!(persisted(&store), vec![Quote::new("X", "N")]);
    }

    #[tokio::test]
    async fn test_sync_appends_new_remote_quote() {
        let mut store = store_with(Vec::new());
        let remote = FakeRemote::serving(vec![Quote::new("Y", "P")]);
        let engine = SyncEngine::new();

        let report = engine.sync(&mut store, &remote).await.unwrap();

        assert_eq!(report.new_quotes_added, 1);
        assert_eq!(report.conflicts_resolved, 0);
        assert_eq!(store.quotes(), &[Quote::new("Y", "P")]);
    }

    #[tokio::test]
    async fn test_sync_identical_quote_is_noop() {
        let mut store = store_with(vec![Quote::new("X", "M")]);
        let remote = FakeRemote::serving(vec![Quote::new("X", "M")]);
        let engine = SyncEngine::new();

        let report = engine.sync(&mut store, &remote).await.unwrap();

        assert!(!report.had_effect());
        assert_eq!(store.quotes(), &[Quote::new("X", "M")]);
    }

    #[tokio::test]
    async fn test_sync_first_local_match_wins_on_duplicates() {
        let mut store = store_with(vec![Quote::new("X", "M"), Quote::new("X", "O")]);
        let remote = FakeRemote::serving(vec![Quote::new("X", "N")]);
        let engine = SyncEngine::new();

        let report = engine.sync(&mut store, &remote).await.unwrap();

        assert_eq!(report.conflicts_resolved, 1);
        assert_eq!(
            store.quotes(),
            &[Quote::new("X", "N"), Quote::new("X", "O")]
        );
    }

    #[tokio::test]
    async fn test_sync_preserves_local_order_and_appends_at_end() {
        let mut store = store_with(vec![Quote::new("a", "A"), Quote::new("b", "B")]);
        let remote = FakeRemote::serving(vec![Quote::new("c", "C"), Quote::new("a", "Z")]);
        let engine = SyncEngine::new();

        engine.sync(&mut store, &remote).await.unwrap();

        let texts: Vec<&str> = store.quotes().iter().map(|q| q.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
        assert_eq!(store.quotes()[0].category, "Z");
    }

    #[tokio::test]
    async fn test_sync_remote_failure_has_zero_effect() {
        let mut store = store_with(vec![Quote::new("X", "M")]);
        let remote = FakeRemote::unavailable();
        let engine = SyncEngine::new();

        let report = engine.sync(&mut store, &remote).await.unwrap();

        assert!(!report.had_effect());
        assert!(report.remote_error.is_some());
        assert_eq!(store.quotes(), &[Quote::new("X", "M")]);
    }

    #[tokio::test]
    async fn test_sync_runs_again_after_completed_cycle() {
        let mut store = store_with(Vec::new());
        let remote = FakeRemote::serving(vec![Quote::new("Y", "P")]);
        let engine = SyncEngine::new();

        let first = engine.sync(&mut store, &remote).await.unwrap();
        let second = engine.sync(&mut store, &remote).await.unwrap();

        assert_eq!(first.new_quotes_added, 1);
        assert_eq!(second.new_quotes_added, 0);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_sync_persist_failure_propagates() {
        struct FailingStore;

        impl crate::storage::KeyValueStore for FailingStore {
            fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
                Ok(None)
            }

            fn set(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
                Err(StorageError::IoError(
                    std::path::PathBuf::from(key),
                    std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
                ))
            }
        }

        let mut store = QuoteStore::load(FailingStore).unwrap();
        let remote = FakeRemote::serving(vec![Quote::new("Y", "P")]);
        let engine = SyncEngine::new();

        let err = engine.sync(&mut store, &remote).await.unwrap_err();
        assert!(matches!(err, SyncError::StoreError(_)));

        // The failed cycle must not leave the engine stuck in flight.
        let remote_down = FakeRemote::unavailable();
        let report = engine.sync(&mut store, &remote_down).await.unwrap();
        assert!(report.remote_error.is_some());
    }
}
