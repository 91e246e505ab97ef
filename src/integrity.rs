//! Post-export verification: walk an exported corpus and tally what is
//! actually on disk, independently of the counts the exporter accumulated.

use crate::error::Result;
use std::collections::BTreeMap;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// What `verify_corpus` found on disk.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CorpusCheck {
    /// Files per category directory (directory name → file count).
    pub files_per_category: BTreeMap<String, u64>,
    pub has_readme: bool,
    pub has_feedinfo: bool,
}

impl CorpusCheck {
    pub fn total_files(&self) -> u64 {
        self.files_per_category.values().sum()
    }
}

/// Walk `root` (two levels deep: report files, then category directories)
/// and count the per-category post files. Lets a consumer confirm a
/// snapshot matches its README before analyzing it.
pub fn verify_corpus(root: &Path) -> Result<CorpusCheck> {
    let mut check = CorpusCheck::default();
    for entry in WalkDir::new(root).min_depth(1).max_depth(2) {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        match entry.depth() {
            1 => {
                let name = entry.file_name().to_string_lossy();
                if name == "README" {
                    check.has_readme = true;
                } else if name == "feeds.json" {
                    check.has_feedinfo = true;
                }
            }
            _ => {
                if let Some(category) = entry.path().parent().and_then(|p| p.file_name()) {
                    *check
                        .files_per_category
                        .entry(category.to_string_lossy().into_owned())
                        .or_insert(0) += 1;
                }
            }
        }
    }
    Ok(check)
}
