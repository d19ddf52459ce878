//! sass-lint-vue core library.
//!
//! Extracts Sass/SCSS `<style>` blocks from Vue single-file components,
//! lints them through an external style linter, and maps every diagnostic
//! back to its line in the original file.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: `.sass-lint.yml`/`.sasslintrc` discovery and effective settings.
//! - `document`: Locating style blocks in component markup.
//! - `indent`: Base-indent stripping.
//! - `offset`: Line offset recovery by text search.
//! - `extract`: Style blocks to extraction records.
//! - `engine`: Linter seam and the external-command linter.
//! - `lint`: Discovery, per-file pipeline, and diagnostic dispatch.
//! - `models`: Documents, records, diagnostics, and summaries.
//! - `output`: Human/JSON printers.
//! - `error`: Error types.
pub mod cli;
pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod extract;
pub mod indent;
pub mod lint;
pub mod models;
pub mod offset;
pub mod output;
