//! The export orchestrator: drives the record store through the lifecycle
//! state machine, writes one file per post into per-category directories,
//! and emits the README / feeds.json reports once the stream is exhausted.

use crate::config::{ExportOptions, ExportOverrides, SanitizeLevel, Scheme};
use crate::error::{ExportError, Result};
use crate::partition::{ensure_dir, CategoryDirs};
use crate::progress::make_count_progress;
use crate::render::{render_html, render_json};
use crate::report::{feedinfo_json, readme_text};
use crate::state::ExportState;
use crate::store::{Feed, RecordStore};
use crate::stream::PostStream;
use crate::util::{create_with_backoff, init_tracing_once};
use ahash::{AHashMap, AHashSet};
use std::collections::BTreeMap;
use std::io::{BufWriter, Write};
use std::path::Path;
use time::OffsetDateTime;

/// Streams a post store to disk as a category-partitioned corpus.
///
/// One exporter can run many exports sequentially; each `export` call
/// clears the counters and re-enters the `Started` state. It must not be
/// driven by two overlapping calls: there is no internal locking, the
/// single-caller contract is documented rather than enforced.
pub struct CorpusExporter<S: RecordStore> {
    store: S,
    opts: ExportOptions,
    state: ExportState,
    counts: BTreeMap<String, u64>,
    // Store-wide category set, computed once from an absent filter and
    // reused thereafter. An explicitly configured filter never lands here.
    default_categories: Option<Vec<String>>,
}

impl<S: RecordStore> CorpusExporter<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            opts: ExportOptions::default(),
            state: ExportState::Init,
            counts: BTreeMap::new(),
            default_categories: None,
        }
    }

    // -------- Builder methods --------
    pub fn with_options(mut self, opts: ExportOptions) -> Self { self.opts = opts; self }
    pub fn root(mut self, root: impl AsRef<Path>) -> Self { self.opts = self.opts.with_root(root); self }
    pub fn categories<I, T>(mut self, categories: I) -> Self where I: IntoIterator<Item = T>, T: Into<String> { self.opts = self.opts.with_categories(categories); self }
    pub fn scheme(mut self, scheme: Scheme) -> Self { self.opts = self.opts.with_scheme(scheme); self }
    pub fn sanitize_level(mut self, level: SanitizeLevel) -> Self { self.opts = self.opts.with_sanitize_level(level); self }
    pub fn progress(mut self, yes: bool) -> Self { self.opts = self.opts.with_progress(yes); self }
    pub fn progress_label(mut self, label: impl Into<String>) -> Self { self.opts = self.opts.with_progress_label(label); self }
    pub fn io_write_buffer(mut self, bytes: usize) -> Self { self.opts = self.opts.with_io_write_buffer(bytes); self }

    // -------- Accessors --------

    /// Current lifecycle state.
    pub fn state(&self) -> ExportState {
        self.state
    }

    /// Per-category counts accumulated by the most recent (or in-progress)
    /// run. Sorted by category name.
    pub fn counts(&self) -> &BTreeMap<String, u64> {
        &self.counts
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The effective category set: the configured filter when present,
    /// otherwise the store's distinct categories (computed once, then
    /// served from the cache).
    pub fn category_set(&mut self) -> Result<Vec<String>> {
        if let Some(cats) = &self.opts.categories {
            return Ok(cats.clone());
        }
        if self.default_categories.is_none() {
            self.default_categories = Some(self.store.distinct_categories()?);
        }
        Ok(self.default_categories.clone().unwrap_or_default())
    }

    /// Feeds for the given categories; `None` falls back to the effective
    /// category set.
    pub fn feeds(&mut self, categories: Option<&[String]>) -> Result<Vec<Feed>> {
        let cats = match categories {
            Some(c) => c.to_vec(),
            None => self.category_set()?,
        };
        self.store.feeds(&cats)
    }

    /// Clear the counters and enter the `Started` state, as `export_with`
    /// does at the beginning of each run. Exposed so callers can drive
    /// `posts` directly, e.g. to consume the stream without writing files.
    pub fn begin_export(&mut self) {
        self.counts.clear();
        self.state = ExportState::Started;
    }

    /// Lazy `(post, category)` stream for one export pass.
    ///
    /// Builds the feed → category index from `feeds(categories)`, then scans
    /// the post collection once, filtered to those feed ids, resolving each
    /// post's category through the index instead of re-fetching its feed:
    /// one collection scan total, O(1) category lookup per post.
    ///
    /// Consuming the stream increments the per-category counts as a side
    /// effect of iteration (see `PostStream`). Refuses to run outside the
    /// `Started` state: a stray call could double count or trigger a second
    /// collection scan.
    pub fn posts(&mut self, categories: Option<&[String]>) -> Result<PostStream<'_>> {
        self.state.require(ExportState::Started, "posts")?;

        let index: AHashMap<String, String> = self
            .feeds(categories)?
            .into_iter()
            .map(|f| (f.id, f.category))
            .collect();
        let feed_ids: AHashSet<String> = index.keys().cloned().collect();

        let inner = self.store.stream_posts(feed_ids)?;
        Ok(PostStream { inner, index, counts: &mut self.counts })
    }

    /// Run a full export with the constructed options.
    pub fn export(&mut self) -> Result<()> {
        self.export_with(ExportOverrides::default())
    }

    /// Run a full export, letting `overrides` win over the constructed
    /// options for this invocation only.
    ///
    /// There is no partial-success mode: the first write failure aborts the
    /// run, leaving whatever was already written on disk and no README or
    /// feeds.json (the state never reaches `Finished`). Counts accumulated
    /// up to the failure remain observable via `counts`.
    pub fn export_with(&mut self, overrides: ExportOverrides) -> Result<()> {
        init_tracing_once();

        let root = overrides.root.unwrap_or_else(|| self.opts.root.clone());
        let scheme = overrides.scheme.unwrap_or(self.opts.scheme);
        let level = overrides.sanitize_level.unwrap_or(self.opts.sanitize_level);

        ensure_dir(&root)?;

        self.begin_export();

        let pb = if self.opts.progress {
            Some(make_count_progress(
                self.store.post_count()?,
                self.opts.progress_label.as_deref(),
            ))
        } else {
            None
        };

        let mut dirs = CategoryDirs::new();
        let write_buf = self.opts.write_buffer_bytes;

        for item in self.posts(overrides.categories.as_deref())? {
            let (post, category) = item?;
            let dir = dirs.dir_for(&root, &category)?;
            let path = dir.join(format!("{}.{}", post.id, scheme.extension()));

            let rendered = match scheme {
                Scheme::Json => render_json(&post)?,
                Scheme::Html => render_html(&post, level),
            };

            let file = create_with_backoff(&path, 16, 50)
                .map_err(|e| ExportError::Write { path: path.clone(), source: e })?;
            let mut writer = BufWriter::with_capacity(write_buf, file);
            writer
                .write_all(rendered.as_bytes())
                .and_then(|_| writer.flush())
                .map_err(|e| ExportError::Write { path, source: e })?;

            if let Some(pb) = &pb {
                pb.inc(1);
            }
        }

        if let Some(pb) = pb {
            pb.finish_with_message("done");
        }

        // Stream exhausted: counts are final, reporting becomes legal.
        self.state = ExportState::Finished;

        tracing::info!(
            posts = self.counts.values().sum::<u64>(),
            categories = self.counts.len(),
            root = %root.display(),
            "export complete"
        );

        self.write_readme(&root.join("README"))?;
        self.write_feedinfo(&root.join("feeds.json"))?;
        Ok(())
    }

    /// Write the summary README for a finished export to `path` as UTF-8
    /// text. Requires `Finished`: writing earlier could record totals that
    /// do not match what is on disk.
    pub fn write_readme(&mut self, path: &Path) -> Result<()> {
        self.state.require(ExportState::Finished, "write_readme")?;
        let feed_total = self.feeds(None)?.len();
        let category_total = self.category_set()?.len();
        // Local wall-clock time when the offset is determinable, UTC otherwise.
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        let text = readme_text(now, feed_total, category_total, &self.counts);
        write_text(path, &text)
    }

    /// Write feed metadata (id, title, link, category, active) for the
    /// effective categories to `path` as a JSON array. Same precondition as
    /// the README.
    pub fn write_feedinfo(&mut self, path: &Path) -> Result<()> {
        self.state.require(ExportState::Finished, "write_feedinfo")?;
        let feeds = self.feeds(None)?;
        let json = feedinfo_json(&feeds)?;
        write_text(path, &json)
    }
}

fn write_text(path: &Path, text: &str) -> Result<()> {
    let file = create_with_backoff(path, 16, 50)
        .map_err(|e| ExportError::Write { path: path.to_path_buf(), source: e })?;
    let mut w = BufWriter::new(file);
    w.write_all(text.as_bytes())
        .and_then(|_| w.flush())
        .map_err(|e| ExportError::Write { path: path.to_path_buf(), source: e })
}
