//! Error taxonomy.
//!
//! File-scoped failures (`Discovery`, `Read`, `Parse`, `Engine`) are logged
//! and isolated to the file they belong to. `ConfigError` is run-fatal and
//! is returned to the caller instead of being collected.

use std::path::PathBuf;
use thiserror::Error;

/// Markup problems that stop extraction for one document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("document is not valid UTF-8")]
    InvalidUtf8,

    #[error("unterminated <style> start tag at line {line}")]
    UnterminatedStartTag { line: usize },

    #[error("<style> element opened at line {line} is never closed")]
    UnclosedStyle { line: usize },

    #[error("unterminated {what} starting at line {line}")]
    UnterminatedSection { what: &'static str, line: usize },
}

/// Failures of the external linting engine for a single request.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("engine produced unreadable output: {0}")]
    Output(String),

    #[error("engine command is empty")]
    EmptyCommand,
}

/// Configuration loading failures. Always fatal for the run.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// A per-file failure collected during a run.
#[derive(Debug, Error)]
pub enum LintError {
    #[error("invalid lint path {}: {reason}", path.display())]
    Discovery { path: PathBuf, reason: String },

    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("linting {} failed: {source}", path.display())]
    Engine {
        path: PathBuf,
        #[source]
        source: EngineError,
    },
}

impl LintError {
    /// Path of the file or input the error is scoped to.
    pub fn path(&self) -> &PathBuf {
        match self {
            LintError::Discovery { path, .. }
            | LintError::Read { path, .. }
            | LintError::Parse { path, .. }
            | LintError::Engine { path, .. } => path,
        }
    }

    /// Short kind tag used by the JSON reporter.
    pub fn kind(&self) -> &'static str {
        match self {
            LintError::Discovery { .. } => "discovery",
            LintError::Read { .. } => "read",
            LintError::Parse { .. } => "parse",
            LintError::Engine { .. } => "engine",
        }
    }
}
