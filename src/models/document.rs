//! Document-side models: source files, style blocks and extraction records.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Raw contents of one component-definition file plus its path.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

impl SourceDocument {
    pub fn new(path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            bytes: bytes.into(),
        }
    }
}

/// Stylesheet syntax declared by a style block's `lang` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Brace-delimited syntax.
    Scss,
    /// Indentation-significant syntax.
    Sass,
}

impl Dialect {
    /// Resolve an attribute value. Anything but an exact `scss`/`sass` is not extracted.
    pub fn from_lang(value: &str) -> Option<Self> {
        match value {
            "scss" => Some(Dialect::Scss),
            "sass" => Some(Dialect::Sass),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Scss => "scss",
            Dialect::Sass => "sass",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `<style>` element carrying a recognized dialect.
///
/// `content` is a borrowed slice of the original text, left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleBlock<'a> {
    pub content: &'a str,
    pub dialect: Dialect,
    /// Document-order index among all `<style>` elements.
    pub position: usize,
}

/// One unit of work for the linting engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionRecord {
    pub content: String,
    pub dialect: Dialect,
    pub line_offset: usize,
}
