use serde::{Deserialize, Serialize};
use std::fmt;

/// A single quote: the text itself and the category it belongs to.
///
/// Quotes carry no identifier. Two quotes are the same entry for merge
/// purposes when their `text` matches exactly; the full pair decides
/// whether a matching entry is a conflict.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Quote {
    pub text: String,
    pub category: String,
}

impl Quote {
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
        }
    }

    /// The fixed set installed on first run, before anything is persisted.
    pub fn defaults() -> Vec<Quote> {
        vec![
            Quote::new(
                "The only way to do great work is to love what you do.",
                "Motivation",
            ),
            Quote::new(
                "Innovation distinguishes between a leader and a follower.",
                "Innovation",
            ),
            Quote::new("Stay hungry, stay foolish.", "Motivation"),
            Quote::new("Believe you can and you're halfway there.", "Inspiration"),
        ]
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" - {}", self.text, self.category)
    }
}
