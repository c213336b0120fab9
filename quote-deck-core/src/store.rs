//! The quote store: canonical in-memory state with write-through persistence.
//!
//! The store owns the ordered quote list and the selected category filter.
//! Every mutation persists through the injected [`KeyValueStore`] before the
//! in-memory state is updated, so a persistence failure leaves the store at
//! its last-known-good state.

use thiserror::Error;

use crate::models::Quote;
use crate::storage::{KeyValueStore, StorageError};
use crate::view::ALL_CATEGORIES;

/// Storage key for the persisted quote list (JSON array).
pub const QUOTES_KEY: &str = "quotes";

/// Storage key for the persisted filter value (raw string).
pub const SELECTED_CATEGORY_KEY: &str = "selectedCategory";

/// Errors that can occur with store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid quote: {0}")]
    Validation(String),

    #[error("Invalid quotes JSON: {0}")]
    Format(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// The canonical quote list and filter selection.
///
/// Owned by the composition root and passed to every consumer; there is no
/// ambient global state.
pub struct QuoteStore<S: KeyValueStore> {
    storage: S,
    quotes: Vec<Quote>,
    selected_category: String,
}

impl<S: KeyValueStore> QuoteStore<S> {
    /// Loads the store from persisted state.
    ///
    /// An absent or unparseable quote blob installs the default seed set;
    /// an absent filter value falls back to `"all"`. Only storage-level
    /// I/O errors propagate.
    pub fn load(storage: S) -> Result<Self, StoreError> {
        let quotes = match storage.get(QUOTES_KEY)? {
            Some(raw) => match serde_json::from_str::<Vec<Quote>>(&raw) {
                Ok(quotes) => quotes,
                Err(e) => {
                    tracing::warn!("persisted quotes unreadable, installing defaults: {}", e);
                    Quote::defaults()
                }
            },
            None => Quote::defaults(),
        };

        let selected_category = storage
            .get(SELECTED_CATEGORY_KEY)?
            .unwrap_or_else(|| ALL_CATEGORIES.to_string());

        Ok(Self {
            storage,
            quotes,
            selected_category,
        })
    }

    /// Returns the quotes in insertion order.
    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// Returns the active filter value (`"all"` or a category).
    pub fn selected_category(&self) -> &str {
        &self.selected_category
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Returns the storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Appends a quote and persists the list.
    ///
    /// Both arguments are trimmed; an empty result is a validation error
    /// and nothing is mutated. Returns the new quote count.
    pub fn add_quote(&mut self, text: &str, category: &str) -> Result<usize, StoreError> {
        let text = text.trim();
        let category = category.trim();

        if text.is_empty() {
            return Err(StoreError::Validation(
                "quote text must not be empty".to_string(),
            ));
        }
        if category.is_empty() {
            return Err(StoreError::Validation(
                "quote category must not be empty".to_string(),
            ));
        }

        let mut quotes = self.quotes.clone();
        quotes.push(Quote::new(text, category));
        self.commit_quotes(quotes)?;

        Ok(self.quotes.len())
    }

    /// Sets the filter value and persists it under its own key.
    ///
    /// Any string is accepted, including categories no longer present; a
    /// stale filter simply yields an empty filtered view.
    pub fn set_selected_category(&mut self, category: &str) -> Result<(), StoreError> {
        self.storage.set(SELECTED_CATEGORY_KEY, category)?;
        self.selected_category = category.to_string();
        Ok(())
    }

    /// Appends a batch of quotes, persisting once.
    ///
    /// Every item is checked before anything is appended; a single invalid
    /// item rejects the whole batch. Returns the number appended.
    pub fn bulk_import(&mut self, incoming: Vec<Quote>) -> Result<usize, StoreError> {
        for quote in &incoming {
            if quote.text.trim().is_empty() {
                return Err(StoreError::Validation(
                    "imported quote has empty text".to_string(),
                ));
            }
            if quote.category.trim().is_empty() {
                return Err(StoreError::Validation(
                    "imported quote has empty category".to_string(),
                ));
            }
        }

        let added = incoming.len();
        let mut quotes = self.quotes.clone();
        quotes.extend(incoming);
        self.commit_quotes(quotes)?;

        Ok(added)
    }

    /// Swaps the entire quote list and persists it. Used by the sync engine.
    pub fn replace_all(&mut self, quotes: Vec<Quote>) -> Result<(), StoreError> {
        self.commit_quotes(quotes)
    }

    /// Produces the export artifact: a pretty-printed JSON array.
    pub fn serialize(&self) -> Result<String, StoreError> {
        serde_json::to_string_pretty(&self.quotes).map_err(|e| StoreError::Format(e.to_string()))
    }

    /// Parses an exported/imported JSON array.
    ///
    /// Anything that is not an array of objects with string `text` and
    /// `category` fields is a format error.
    pub fn deserialize(bytes: &[u8]) -> Result<Vec<Quote>, StoreError> {
        serde_json::from_slice::<Vec<Quote>>(bytes).map_err(|e| StoreError::Format(e.to_string()))
    }

    /// Imports an exported file: parse, validate, append, persist once.
    pub fn import_json(&mut self, bytes: &[u8]) -> Result<usize, StoreError> {
        let incoming = Self::deserialize(bytes)?;
        self.bulk_import(incoming)
    }

    /// Persists a candidate list, then swaps it in.
    fn commit_quotes(&mut self, quotes: Vec<Quote>) -> Result<(), StoreError> {
        let json = serde_json::to_string(&quotes).map_err(|e| StoreError::Format(e.to_string()))?;
        self.storage.set(QUOTES_KEY, &json)?;
        self.quotes = quotes;
        Ok(())
    }
}
