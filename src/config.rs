use crate::error::ExportError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Output format for exported posts. The set is closed: records are written
/// either as pretty-printed JSON documents or as sanitized HTML pages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Scheme {
    #[default]
    Json,
    Html,
}

impl Scheme {
    /// File extension used for per-post output files.
    pub fn extension(self) -> &'static str {
        match self {
            Scheme::Json => "json",
            Scheme::Html => "html",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Scheme {
    type Err = ExportError;

    /// Case-insensitive: "json"/"JSON" and "html"/"HTML" are all accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Scheme::Json),
            "html" => Ok(Scheme::Html),
            _ => Err(ExportError::InvalidScheme(s.to_string())),
        }
    }
}

/// How aggressively HTML content is cleaned before rendering.
///
/// `Raw` is the "no sanitization" sentinel. `Safe` (the default) removes
/// scripting vectors but keeps markup; `Prune` additionally reduces markup
/// to a structural whitelist; `Strip` leaves text only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SanitizeLevel {
    Raw,
    #[default]
    Safe,
    Prune,
    Strip,
}

impl FromStr for SanitizeLevel {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" | "raw" => Ok(SanitizeLevel::Raw),
            "safe" => Ok(SanitizeLevel::Safe),
            "prune" => Ok(SanitizeLevel::Prune),
            "strip" => Ok(SanitizeLevel::Strip),
            _ => Err(ExportError::InvalidSanitizeLevel(s.to_string())),
        }
    }
}

/// User-facing options with sensible defaults and builder chaining.
#[derive(Clone, Debug)]
pub struct ExportOptions {
    pub root: PathBuf,
    pub categories: Option<Vec<String>>, // None = all categories known to the store
    pub scheme: Scheme,
    pub sanitize_level: SanitizeLevel,
    pub progress: bool,                 // show progress bar
    pub progress_label: Option<String>, // optional label for progress bar

    // IO tuning
    pub write_buffer_bytes: usize, // BufWriter capacity for record files
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("./corpus"),
            categories: None,
            scheme: Scheme::Json,
            sanitize_level: SanitizeLevel::Safe,
            progress: true,
            progress_label: None,
            write_buffer_bytes: 256 * 1024,
        }
    }
}

impl ExportOptions {
    pub fn with_root(mut self, root: impl AsRef<Path>) -> Self {
        self.root = root.as_ref().to_path_buf();
        self
    }
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }
    pub fn with_sanitize_level(mut self, level: SanitizeLevel) -> Self {
        self.sanitize_level = level;
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
    pub fn with_progress_label(mut self, label: impl Into<String>) -> Self {
        self.progress_label = Some(label.into());
        self
    }
    pub fn with_io_write_buffer(mut self, bytes: usize) -> Self {
        self.write_buffer_bytes = bytes.max(8 * 1024);
        self
    }
}

/// Per-invocation overrides for `CorpusExporter::export_with`. An explicit
/// value here wins over the constructed options for that run only; the
/// stored options are left untouched.
#[derive(Clone, Debug, Default)]
pub struct ExportOverrides {
    pub root: Option<PathBuf>,
    pub categories: Option<Vec<String>>,
    pub scheme: Option<Scheme>,
    pub sanitize_level: Option<SanitizeLevel>,
}

impl ExportOverrides {
    pub fn root(mut self, root: impl AsRef<Path>) -> Self {
        self.root = Some(root.as_ref().to_path_buf());
        self
    }
    pub fn categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }
    pub fn scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = Some(scheme);
        self
    }
    pub fn sanitize_level(mut self, level: SanitizeLevel) -> Self {
        self.sanitize_level = Some(level);
        self
    }
}
