//! Summary report (README) and feed metadata (feeds.json) rendering.

use crate::error::Result;
use crate::store::Feed;
use std::collections::BTreeMap;
use time::macros::format_description;
use time::OffsetDateTime;

/// Build the plain-text README body for a finished export.
///
/// Categories are listed one per line in ascending name order, which the
/// `BTreeMap` gives for free.
pub fn readme_text(
    exported_at: OffsetDateTime,
    feed_total: usize,
    category_total: usize,
    counts: &BTreeMap<String, u64>,
) -> String {
    let fmt = format_description!("[month repr:short] [day], [year] at [hour]:[minute]");
    let stamp = exported_at
        .format(&fmt)
        .unwrap_or_else(|_| exported_at.to_string());
    let post_total: u64 = counts.values().sum();

    let mut out = vec![
        "Corpex Feed Export".to_string(),
        "==================".to_string(),
        String::new(),
        format!("Exported on: {stamp}"),
        format!("{feed_total} feeds containing {post_total} posts in {category_total} categories."),
        String::new(),
        "Category Counts".to_string(),
        "---------------".to_string(),
        String::new(),
    ];
    for (category, n) in counts {
        out.push(format!("- {category}: {n}"));
    }
    out.push(String::new());
    out.join("\n")
}

/// Pretty-printed JSON array describing the exported feeds, for resolving
/// the feed ids found in individual post files.
pub fn feedinfo_json(feeds: &[Feed]) -> Result<String> {
    Ok(serde_json::to_string_pretty(feeds)?)
}
