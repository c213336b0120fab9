//! Derived views over the quote list.
//!
//! Pure functions with no state of their own; callers recompute them from
//! the store after every mutation, so they are always consistent with it.

use rand::Rng;

use crate::models::Quote;

/// Sentinel filter value matching every category.
pub const ALL_CATEGORIES: &str = "all";

/// No quote matches the current selection.
#[derive(Debug, PartialEq, Eq)]
pub struct EmptySelectionError;

impl std::fmt::Display for EmptySelectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "no quote available for the current selection")
    }
}

impl std::error::Error for EmptySelectionError {}

/// Returns the sorted set of distinct category values.
///
/// The `"all"` sentinel is never included; callers prepend it themselves.
pub fn distinct_categories(quotes: &[Quote]) -> Vec<String> {
    let mut categories: Vec<String> = quotes.iter().map(|q| q.category.clone()).collect();
    categories.sort();
    categories.dedup();
    categories
}

/// Returns the quotes matching a filter value, in insertion order.
///
/// `"all"` matches everything. An unmatched (possibly stale) category
/// yields an empty list, never an error.
pub fn filtered(quotes: &[Quote], selected_category: &str) -> Vec<Quote> {
    quotes
        .iter()
        .filter(|q| selected_category == ALL_CATEGORIES || q.category == selected_category)
        .cloned()
        .collect()
}

/// Picks one quote uniformly at random.
pub fn pick_random(quotes: &[Quote]) -> Result<&Quote, EmptySelectionError> {
    if quotes.is_empty() {
        return Err(EmptySelectionError);
    }

    let index = rand::rng().random_range(0..quotes.len());
    Ok(&quotes[index])
}
