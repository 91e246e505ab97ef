//! Regex-based HTML cleanup applied before rendering posts as HTML.
//!
//! This is deliberately conservative text processing, not a full HTML
//! parser: feed content is messy and the corpus consumer wants predictable
//! plain markup, so unrecognized constructs are dropped rather than kept.

use crate::config::SanitizeLevel;
use regex::Regex;
use std::sync::OnceLock;

fn script_style_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)\s*>").unwrap()
    })
}

fn comment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<!--.*?-->").unwrap())
}

fn event_attr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)\s+on[a-z]+\s*=\s*("[^"]*"|'[^']*'|[^\s>]+)"#).unwrap()
    })
}

fn js_url_attr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?i)\s+(href|src)\s*=\s*("javascript:[^"]*"|'javascript:[^']*'|javascript:[^\s>]*)"#,
        )
        .unwrap()
    })
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)</?([a-zA-Z][a-zA-Z0-9]*)[^>]*>").unwrap())
}

/// Tags kept by `SanitizeLevel::Prune`. Everything else is unwrapped,
/// leaving its inner text in place.
const STRUCTURAL_TAGS: &[&str] = &[
    "p", "br", "a", "em", "strong", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "li",
    "blockquote", "pre", "code",
];

/// Clean `content` according to `level`. `Raw` returns the input unchanged.
pub fn sanitize(content: &str, level: SanitizeLevel) -> String {
    match level {
        SanitizeLevel::Raw => content.to_string(),
        SanitizeLevel::Safe => sanitize_safe(content),
        SanitizeLevel::Prune => prune(&sanitize_safe(content)),
        SanitizeLevel::Strip => strip_tags(&sanitize_safe(content)),
    }
}

/// Remove scripting vectors: script/style elements (with their contents),
/// HTML comments, inline `on*` event handlers, and `javascript:` URLs.
fn sanitize_safe(content: &str) -> String {
    let out = script_style_re().replace_all(content, "");
    let out = comment_re().replace_all(&out, "");
    let out = event_attr_re().replace_all(&out, "");
    let out = js_url_attr_re().replace_all(&out, "");
    out.into_owned()
}

fn prune(content: &str) -> String {
    tag_re()
        .replace_all(content, |caps: &regex::Captures<'_>| {
            let name = caps[1].to_ascii_lowercase();
            if STRUCTURAL_TAGS.contains(&name.as_str()) {
                caps[0].to_string()
            } else {
                String::new()
            }
        })
        .into_owned()
}

fn strip_tags(content: &str) -> String {
    tag_re().replace_all(content, "").into_owned()
}
