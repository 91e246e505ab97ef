//! Per-post output rendering: the JSON document scheme and the HTML page
//! scheme (sanitize-then-wrap).

use crate::config::SanitizeLevel;
use crate::error::Result;
use crate::sanitize::sanitize;
use crate::store::Post;

/// Pretty-printed JSON document for one post.
pub fn render_json(post: &Post) -> Result<String> {
    Ok(serde_json::to_string_pretty(post)?)
}

/// Standalone HTML page for one post, with content cleaned at `level`.
pub fn render_html(post: &Post, level: SanitizeLevel) -> String {
    let body = sanitize(&post.content, level);
    let title = escape_text(&post.title);
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\"/>\n\
         <title>{title}</title>\n\
         </head>\n\
         <body>\n\
         <article>\n\
         <h1><a href=\"{url}\">{title}</a></h1>\n\
         {body}\n\
         </article>\n\
         </body>\n\
         </html>\n",
        url = escape_attr(&post.url),
    )
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}
