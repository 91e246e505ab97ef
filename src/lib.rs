mod config;
mod error;
mod state;
mod store;

mod partition;
mod render;
mod sanitize;
mod stream;

mod exporter;
mod report;

mod integrity;
mod progress;
mod util;

pub use crate::config::{ExportOptions, ExportOverrides, SanitizeLevel, Scheme};
pub use crate::error::{ExportError, Result};
pub use crate::exporter::CorpusExporter;
pub use crate::state::ExportState;
pub use crate::store::{Feed, MemoryStore, Post, RecordStore};
pub use crate::stream::PostStream;

// Expose the render/sanitize adapters so callers can reproduce a single
// record's output without running a full export.
pub use crate::render::{render_html, render_json};
pub use crate::sanitize::sanitize;

// Expose the directory partitioner and report renderer for direct use.
pub use crate::partition::{ensure_dir, CategoryDirs};
pub use crate::report::readme_text;

// Expose corpus verification so consumers can check a snapshot against its
// README before analyzing it.
pub use crate::integrity::{verify_corpus, CorpusCheck};

// Expose progress and file helpers so embedding applications can reuse them.
pub use crate::progress::make_count_progress;
pub use crate::util::{create_with_backoff, init_tracing_once};
