//! Output rendering for lint results.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! per-batch messages, file-scoped errors, and a top-level summary.

use crate::error::LintError;
use crate::lint::RunResult;
use crate::models::{Diagnostic, Severity};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;
use std::path::Path;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

/// Path shown to the user: relative to `cwd` when possible.
fn display_path(file: &str, cwd: &Path) -> String {
    let p = Path::new(file);
    if p.is_relative() {
        return file.to_string();
    }
    pathdiff::diff_paths(p, cwd)
        .map(|rel| rel.to_string_lossy().to_string())
        .unwrap_or_else(|| file.to_string())
}

/// One human-readable diagnostic: `icon [severity] file:line:col (rule) message`.
fn human_line(file: &str, m: &Diagnostic, color: bool) -> String {
    let (icon, sev) = match m.severity {
        Severity::Error => ("✖", "[error]"),
        Severity::Warning => ("▲", "[warning]"),
    };
    let loc = format!("{}:{}:{}", file, m.line, m.column);
    if !color {
        return format!("{} {} {} ({}) {}", icon, sev, loc, m.rule, m.message);
    }
    let (icon, sev) = match m.severity {
        Severity::Error => (icon.red().to_string(), sev.red().bold().to_string()),
        Severity::Warning => (icon.yellow().to_string(), sev.yellow().bold().to_string()),
    };
    format!("{} {} {} ({}) {}", icon, sev, loc.bold(), m.rule, m.message)
}

/// Print lint results in the requested format.
pub fn print_lint(res: &RunResult, output: &str, cwd: &Path) {
    match output {
        "json" => match serde_json::to_string_pretty(&compose_lint_json(res)) {
            Ok(s) => println!("{}", s),
            Err(e) => tracing::error!(%e, "cannot serialize lint report"),
        },
        _ => {
            let color = use_colors(output);
            for report in &res.reports {
                let file = display_path(&report.file, cwd);
                for m in &report.messages {
                    println!("{}", human_line(&file, m, color));
                }
            }
            for e in &res.errors {
                let line = format!("skipped: {}", e);
                if color {
                    eprintln!("{}", line.bright_black());
                } else {
                    eprintln!("{}", line);
                }
            }
            let summary = format!(
                "Summary: errors={} warnings={} files={}",
                res.summary.errors, res.summary.warnings, res.summary.files
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

fn compose_error_json(e: &LintError) -> JsonVal {
    json!({
        "file": e.path().to_string_lossy(),
        "kind": e.kind(),
        "message": e.to_string(),
    })
}

/// Compose lint JSON object (pure) for testing/snapshot purposes.
pub fn compose_lint_json(res: &RunResult) -> JsonVal {
    json!({
        "results": res.reports,
        "errors": res.errors.iter().map(compose_error_json).collect::<Vec<_>>(),
        "summary": res.summary,
    })
}
