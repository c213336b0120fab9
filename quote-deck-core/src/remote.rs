//! Remote data source for quote synchronization.
//!
//! The remote exposes a posts-style collection: `GET /posts` returns
//! records bearing a title and an owner id, `POST /posts` accepts
//! `{title, body, userId}`. The adapter normalizes those records into the
//! local quote shape; failures are recoverable by contract and a sync
//! cycle simply contributes zero remote quotes.

use serde::{Deserialize, Serialize};

use crate::models::Quote;

/// How many remote records a fetch normalizes into quotes.
pub const DEFAULT_FETCH_LIMIT: usize = 5;

/// A remote collection the sync engine can reconcile against.
pub trait RemoteSource {
    /// Fetches and normalizes the remote quotes.
    fn fetch_quotes(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Quote>, RemoteError>>;

    /// Pushes a single local quote outward, best-effort.
    fn post_quote(
        &self,
        quote: &Quote,
    ) -> impl std::future::Future<Output = Result<(), RemoteError>>;
}

/// A record as the remote serves it.
#[derive(Debug, Clone, Deserialize)]
pub struct RemotePost {
    #[serde(rename = "userId")]
    pub user_id: u64,
    pub title: String,
}

/// Outbound payload for pushing a quote to the remote.
#[derive(Debug, Serialize)]
struct OutboundPost<'a> {
    title: &'a str,
    body: &'a str,
    #[serde(rename = "userId")]
    user_id: u64,
}

/// Errors that can occur talking to the remote.
#[derive(Debug)]
pub enum RemoteError {
    /// Network-level failure reaching the remote.
    HttpError(String),
    /// Remote answered with a non-success status.
    StatusError(u16),
    /// Remote body could not be decoded.
    DecodeError(String),
}

impl std::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemoteError::HttpError(e) => write!(f, "HTTP error: {}", e),
            RemoteError::StatusError(status) => {
                write!(f, "Remote returned status {}", status)
            }
            RemoteError::DecodeError(e) => write!(f, "Failed to decode remote response: {}", e),
        }
    }
}

impl std::error::Error for RemoteError {}

/// HTTP-backed remote source.
pub struct HttpRemoteSource {
    base_url: String,
    user_id: u64,
    fetch_limit: usize,
}

impl HttpRemoteSource {
    /// Creates a remote source against a base URL.
    ///
    /// `user_id` is the owner id stamped on outbound posts.
    pub fn new(base_url: impl Into<String>, user_id: u64) -> Self {
        Self {
            base_url: base_url.into(),
            user_id,
            fetch_limit: DEFAULT_FETCH_LIMIT,
        }
    }

    /// Overrides how many remote records a fetch takes.
    pub fn with_fetch_limit(mut self, fetch_limit: usize) -> Self {
        self.fetch_limit = fetch_limit;
        self
    }

    /// Builds the collection URL.
    fn posts_url(&self) -> String {
        format!("{}/posts", self.base_url.trim_end_matches('/'))
    }
}

impl RemoteSource for HttpRemoteSource {
    async fn fetch_quotes(&self) -> Result<Vec<Quote>, RemoteError> {
        let client = reqwest::Client::new();

        let response = client
            .get(self.posts_url())
            .send()
            .await
            .map_err(|e| RemoteError::HttpError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RemoteError::StatusError(response.status().as_u16()));
        }

        let posts: Vec<RemotePost> = response
            .json()
            .await
            .map_err(|e| RemoteError::DecodeError(e.to_string()))?;

        Ok(quotes_from_posts(posts, self.fetch_limit))
    }

    async fn post_quote(&self, quote: &Quote) -> Result<(), RemoteError> {
        let client = reqwest::Client::new();

        let payload = OutboundPost {
            title: &quote.text,
            body: &quote.category,
            user_id: self.user_id,
        };

        let response = client
            .post(self.posts_url())
            .json(&payload)
            .send()
            .await
            .map_err(|e| RemoteError::HttpError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RemoteError::StatusError(response.status().as_u16()));
        }

        tracing::debug!("posted quote to remote: {}", quote.text);
        Ok(())
    }
}

/// Normalizes remote records into the local quote shape.
///
/// Takes the first `limit` records; the title becomes the text and the
/// owner id derives the category tag.
pub fn quotes_from_posts(posts: Vec<RemotePost>, limit: usize) -> Vec<Quote> {
    posts
        .into_iter()
        .take(limit)
        .map(|post| Quote::new(post.title, format!("Server-{}", post.user_id)))
        .collect()
}
