//! Typed error surface for the export pipeline.
//!
//! Every error here is fatal to the `export` call that raised it: there is
//! no per-record retry or skip-and-continue. A failed run leaves whatever
//! was already written on disk and no README / feeds.json.

use crate::state::ExportState;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = ExportError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ExportError {
    /// Unknown output scheme string supplied at configuration time.
    #[error("unknown export scheme '{0}' - use one of: json, html")]
    InvalidScheme(String),

    /// Unknown sanitization level string supplied at configuration time.
    #[error("unknown sanitize level '{0}' - use one of: none, raw, safe, prune, strip")]
    InvalidSanitizeLevel(String),

    /// An operation was invoked while the lifecycle machine was in the wrong
    /// state (streaming outside `Started`, reporting outside `Finished`).
    #[error("{operation} requires the {required:?} state (export is currently {actual:?})")]
    InvalidState {
        operation: &'static str,
        required: ExportState,
        actual: ExportState,
    },

    /// A required output path exists but is not a directory.
    #[error("'{0}' exists but is not a directory")]
    NotADirectory(PathBuf),

    /// A record or report file could not be written. The underlying OS error
    /// (code and message) rides along as the source.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A post or feed could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The backing record store failed while listing feeds or streaming posts.
    #[error("record store error: {0}")]
    Store(String),

    /// Any other filesystem failure (directory creation, tree walks).
    #[error(transparent)]
    Io(#[from] io::Error),
}
