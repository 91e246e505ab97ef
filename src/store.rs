//! The record-store boundary: feed/post models, the `RecordStore` trait the
//! exporter reads through, and a `Vec`-backed implementation usable as a
//! test double or embedding seam.

use crate::error::Result;
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// Owning source of posts, carrying the category label that partitions the
/// corpus into output subdirectories.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    pub id: String,
    pub title: String,
    pub link: String,
    pub category: String,
    pub active: bool,
}

/// One exportable content item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub feed_id: String,
    pub title: String,
    pub url: String,
    pub content: String,
    pub created_utc: Option<i64>,
}

/// Abstract document store the exporter reads from.
///
/// Implementations promise that `stream_posts` performs a single forward
/// pass over the post collection and never re-fetches the owning feed per
/// post; the exporter resolves categories through a prebuilt index instead.
pub trait RecordStore {
    /// Distinct category values known to the store.
    fn distinct_categories(&self) -> Result<Vec<String>>;

    /// All feeds whose category is in `categories`.
    fn feeds(&self, categories: &[String]) -> Result<Vec<Feed>>;

    /// Lazy single-pass stream over posts whose owning feed id is in `feed_ids`.
    fn stream_posts<'a>(
        &'a self,
        feed_ids: AHashSet<String>,
    ) -> Result<Box<dyn Iterator<Item = Result<Post>> + 'a>>;

    /// Total number of posts in the store. Drives the progress bar total.
    fn post_count(&self) -> Result<u64>;
}

/// Simple in-memory store. Categories come back in first-seen order and
/// `stream_posts` yields posts in insertion order, which keeps tests
/// deterministic.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    feeds: Vec<Feed>,
    posts: Vec<Post>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_feed(&mut self, feed: Feed) {
        self.feeds.push(feed);
    }

    pub fn add_post(&mut self, post: Post) {
        self.posts.push(post);
    }
}

impl RecordStore for MemoryStore {
    fn distinct_categories(&self) -> Result<Vec<String>> {
        let mut seen = AHashSet::new();
        let mut out = Vec::new();
        for f in &self.feeds {
            if seen.insert(f.category.as_str()) {
                out.push(f.category.clone());
            }
        }
        Ok(out)
    }

    fn feeds(&self, categories: &[String]) -> Result<Vec<Feed>> {
        Ok(self
            .feeds
            .iter()
            .filter(|f| categories.iter().any(|c| c == &f.category))
            .cloned()
            .collect())
    }

    fn stream_posts<'a>(
        &'a self,
        feed_ids: AHashSet<String>,
    ) -> Result<Box<dyn Iterator<Item = Result<Post>> + 'a>> {
        Ok(Box::new(
            self.posts
                .iter()
                .filter(move |p| feed_ids.contains(&p.feed_id))
                .cloned()
                .map(Ok),
        ))
    }

    fn post_count(&self) -> Result<u64> {
        Ok(self.posts.len() as u64)
    }
}
