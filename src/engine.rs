//! Linting engine seam.
//!
//! The dispatcher only needs something that turns `(text, dialect, path)`
//! into diagnostics. `CommandEngine` drives an external linter process and
//! reads its JSON report from stdout.

use crate::error::EngineError;
use crate::models::{Diagnostic, Dialect, Severity};
use serde::Deserialize;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Default external command. `{file}` and `{syntax}` are substituted per request.
pub const DEFAULT_ENGINE_CMD: &str =
    "stylelint --stdin --stdin-filename {file} --custom-syntax postcss-{syntax} --formatter json";

/// Input for one engine call.
pub struct LintRequest<'a> {
    pub text: &'a str,
    pub dialect: Dialect,
    pub path: &'a Path,
}

/// A style linter. Returned lines are 1-based in `request.text`.
pub trait StyleEngine: Sync {
    fn lint_text(&self, request: &LintRequest<'_>) -> Result<Vec<Diagnostic>, EngineError>;
}

/// Runs an external program, feeding the text on stdin.
#[derive(Debug, Clone)]
pub struct CommandEngine {
    program: String,
    args: Vec<String>,
}

impl CommandEngine {
    /// Build from a whitespace-separated command line.
    ///
    /// There is no shell quoting: a program path or argument cannot contain
    /// spaces, and quote characters are passed through literally.
    pub fn from_command_line(cmd: &str) -> Result<Self, EngineError> {
        let mut parts = cmd.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(EngineError::EmptyCommand)?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    fn expand_args(&self, request: &LintRequest<'_>) -> Vec<String> {
        let file = request.path.to_string_lossy();
        self.args
            .iter()
            .map(|a| {
                a.replace("{file}", &file)
                    .replace("{syntax}", request.dialect.as_str())
            })
            .collect()
    }
}

impl StyleEngine for CommandEngine {
    fn lint_text(&self, request: &LintRequest<'_>) -> Result<Vec<Diagnostic>, EngineError> {
        let spawn_err = |source| EngineError::Spawn {
            program: self.program.clone(),
            source,
        };
        let mut child = Command::new(&self.program)
            .args(self.expand_args(request))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_err)?;

        // Feed stdin from a separate thread so a chatty child cannot block us
        let writer = child.stdin.take().map(|mut stdin| {
            let text = request.text.to_string();
            std::thread::spawn(move || stdin.write_all(text.as_bytes()))
        });
        let output = child.wait_with_output().map_err(spawn_err)?;
        if let Some(handle) = writer {
            if let Ok(Err(err)) = handle.join() {
                tracing::debug!(%err, "engine closed stdin early");
            }
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        if stdout.trim().is_empty() {
            if output.status.success() {
                return Ok(Vec::new());
            }
            return Err(EngineError::Output(format!(
                "exit status {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        parse_report(&stdout)
    }
}

#[derive(Deserialize)]
struct ReportEntry {
    #[serde(default)]
    warnings: Vec<ReportWarning>,
}

#[derive(Deserialize)]
struct ReportWarning {
    line: usize,
    #[serde(default)]
    column: usize,
    #[serde(default)]
    rule: String,
    #[serde(default)]
    severity: String,
    #[serde(default)]
    text: String,
}

/// Parse a stylelint-style JSON report into diagnostics, keeping order.
pub fn parse_report(json: &str) -> Result<Vec<Diagnostic>, EngineError> {
    let entries: Vec<ReportEntry> =
        serde_json::from_str(json).map_err(|e| EngineError::Output(e.to_string()))?;
    Ok(entries
        .into_iter()
        .flat_map(|e| e.warnings)
        .map(|w| {
            let suffix = format!(" ({})", w.rule);
            let message = w
                .text
                .strip_suffix(&suffix)
                .unwrap_or(&w.text)
                .to_string();
            Diagnostic {
                line: w.line,
                column: w.column,
                severity: Severity::parse(&w.severity),
                rule: w.rule,
                message,
            }
        })
        .collect())
}
