//! The single-pass post stream: classification against a prebuilt
//! feed-to-category index, with per-category counting as a side effect of
//! iteration.

use crate::error::Result;
use crate::store::Post;
use ahash::AHashMap;
use std::collections::BTreeMap;

/// Lazy `(post, category)` sequence over one scan of the post collection.
///
/// Counting happens here, as each pair is produced: merely consuming the
/// iterator mutates the exporter's per-category counts, even if no file is
/// ever written for the item. A caller that aborts mid-stream therefore
/// observes counts for every record *seen*, not every record successfully
/// exported.
pub struct PostStream<'a> {
    pub(crate) inner: Box<dyn Iterator<Item = Result<Post>> + 'a>,
    pub(crate) index: AHashMap<String, String>,
    pub(crate) counts: &'a mut BTreeMap<String, u64>,
}

impl Iterator for PostStream<'_> {
    type Item = Result<(Post, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let post = match self.inner.next()? {
                Ok(p) => p,
                Err(e) => return Some(Err(e)),
            };
            // The store already filters on the index's key set; a miss here
            // means the store and the index disagree, so skip rather than
            // guess a category.
            let Some(category) = self.index.get(&post.feed_id) else {
                tracing::warn!(
                    post = %post.id,
                    feed = %post.feed_id,
                    "post has no feed in the category index; skipping"
                );
                continue;
            };
            let category = category.clone();
            *self.counts.entry(category.clone()).or_insert(0) += 1;
            return Some(Ok((post, category)));
        }
    }
}
