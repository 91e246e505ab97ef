//! Per-category output directories, created lazily and memoized for the run.

use crate::error::{ExportError, Result};
use ahash::AHashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::path::{Path, PathBuf};

/// Lazily-created `root/<category>` directories.
///
/// Within one export run a category resolves to the same path every time
/// and the directory is created at most once; the cache is never
/// invalidated inside a run.
#[derive(Debug, Default)]
pub struct CategoryDirs {
    cache: AHashMap<String, PathBuf>,
}

impl CategoryDirs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve (and create, on first encounter) the directory for `category`.
    pub fn dir_for(&mut self, root: &Path, category: &str) -> Result<&Path> {
        let path = match self.cache.entry(category.to_string()) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(v) => {
                let path = root.join(category);
                ensure_dir(&path)?;
                v.insert(path)
            }
        };
        Ok(path)
    }
}

/// Create `dir` if absent; error if the path exists but is not a directory.
/// `create_dir_all` absorbs the already-exists race.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    if !dir.is_dir() {
        return Err(ExportError::NotADirectory(dir.to_path_buf()));
    }
    Ok(())
}
