//! Lint runner: discovery, per-file extraction, and diagnostic dispatch.
//!
//! Each file is processed by an independent pipeline that returns its own
//! reports and errors; a single reducer merges them in input order. Errors
//! are scoped to the file they occur in and never stop the run.

use crate::document::decode;
use crate::engine::{LintRequest, StyleEngine};
use crate::error::LintError;
use crate::extract::extract_templates;
use crate::models::{ExtractionRecord, LintErrorSet, LintReport, SourceDocument, Summary};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extension of component-definition files.
pub const COMPONENT_EXT: &str = "vue";

/// Outcome of one file's pipeline.
#[derive(Debug, Default)]
pub struct FileOutcome {
    pub reports: Vec<LintReport>,
    pub errors: Vec<LintError>,
}

/// Merged result of a run.
#[derive(Debug, Default)]
pub struct RunResult {
    pub reports: LintErrorSet,
    pub errors: Vec<LintError>,
    pub summary: Summary,
}

/// Send each record to the engine and shift its diagnostics into file coordinates.
///
/// Batches keep the engine's order. Records with no diagnostics add nothing.
pub fn dispatch(
    records: &[ExtractionRecord],
    path: &Path,
    engine: &dyn StyleEngine,
) -> (Vec<LintReport>, Vec<LintError>) {
    let mut reports = Vec::new();
    let mut errors = Vec::new();
    for record in records {
        let request = LintRequest {
            text: &record.content,
            dialect: record.dialect,
            path,
        };
        match engine.lint_text(&request) {
            Ok(mut messages) => {
                if messages.is_empty() {
                    continue;
                }
                for m in messages.iter_mut() {
                    m.line += record.line_offset;
                }
                reports.push(LintReport::new(path.to_string_lossy(), messages));
            }
            Err(source) => {
                let err = LintError::Engine {
                    path: path.to_path_buf(),
                    source,
                };
                tracing::warn!("{err}");
                errors.push(err);
            }
        }
    }
    (reports, errors)
}

/// Extract and lint one in-memory document.
pub fn lint_document(
    doc: &SourceDocument,
    base_indent: Option<usize>,
    engine: &dyn StyleEngine,
) -> FileOutcome {
    let parsed = decode(&doc.bytes).and_then(|text| extract_templates(text, base_indent));
    let records = match parsed {
        Ok(r) => r,
        Err(source) => {
            let err = LintError::Parse {
                path: doc.path.clone(),
                source,
            };
            tracing::warn!("{err}");
            return FileOutcome {
                reports: Vec::new(),
                errors: vec![err],
            };
        }
    };
    let (reports, errors) = dispatch(&records, &doc.path, engine);
    FileOutcome { reports, errors }
}

/// Read, extract, and lint one file from disk.
pub fn lint_file(path: &Path, base_indent: Option<usize>, engine: &dyn StyleEngine) -> FileOutcome {
    tracing::debug!(path = %path.display(), "linting");
    match fs::read(path) {
        Ok(bytes) => lint_document(&SourceDocument::new(path, bytes), base_indent, engine),
        Err(source) => {
            let err = LintError::Read {
                path: path.to_path_buf(),
                source,
            };
            tracing::warn!("{err}");
            FileOutcome {
                reports: Vec::new(),
                errors: vec![err],
            }
        }
    }
}

fn is_component(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == COMPONENT_EXT)
}

/// Expand inputs into component files.
///
/// Files are taken as given when their extension matches. Directories are
/// searched recursively without following symlinks. Each input's matches are
/// sorted; duplicates across inputs are dropped, keeping the first.
pub fn collect_targets(inputs: &[PathBuf]) -> (Vec<PathBuf>, Vec<LintError>) {
    let mut targets: Vec<PathBuf> = Vec::new();
    let mut errors = Vec::new();

    for input in inputs {
        let meta = match fs::metadata(input) {
            Ok(m) => m,
            Err(e) => {
                errors.push(LintError::Discovery {
                    path: input.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };
        if meta.is_file() {
            if is_component(input) {
                push_unique(&mut targets, input.clone());
            }
            continue;
        }
        let mut found = Vec::new();
        for entry in WalkDir::new(input).follow_links(false) {
            match entry {
                // Symlinks are neither descended into nor linted
                Ok(e) if e.file_type().is_file() && is_component(e.path()) => {
                    found.push(e.into_path())
                }
                Ok(_) => {}
                Err(e) => errors.push(LintError::Discovery {
                    path: e.path().map(Path::to_path_buf).unwrap_or_else(|| input.clone()),
                    reason: e.to_string(),
                }),
            }
        }
        found.sort();
        for p in found {
            push_unique(&mut targets, p);
        }
    }
    for e in &errors {
        tracing::warn!("{e}");
    }
    (targets, errors)
}

fn push_unique(targets: &mut Vec<PathBuf>, p: PathBuf) {
    if !targets.contains(&p) {
        targets.push(p);
    }
}

/// Lint all component files reachable from `inputs`.
pub fn run_lint(
    inputs: &[PathBuf],
    base_indent: Option<usize>,
    engine: &dyn StyleEngine,
) -> RunResult {
    let (targets, mut errors) = collect_targets(inputs);

    let outcomes: Vec<FileOutcome> = targets
        .par_iter()
        .map(|path| lint_file(path, base_indent, engine))
        .collect();

    let mut reports: LintErrorSet = Vec::new();
    for outcome in outcomes {
        reports.extend(outcome.reports);
        errors.extend(outcome.errors);
    }
    let summary = Summary::from_reports(&reports, targets.len());
    RunResult {
        reports,
        errors,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::{Diagnostic, Dialect, Severity};
    use std::sync::Mutex;
    use tempfile::tempdir;

    /// Returns the configured lines for every request and records what it saw.
    struct FakeEngine {
        lines: Vec<usize>,
        seen: Mutex<Vec<(String, Dialect)>>,
    }

    impl FakeEngine {
        fn new(lines: Vec<usize>) -> Self {
            Self {
                lines,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl StyleEngine for FakeEngine {
        fn lint_text(&self, req: &LintRequest<'_>) -> Result<Vec<Diagnostic>, EngineError> {
            self.seen
                .lock()
                .unwrap()
                .push((req.text.to_string(), req.dialect));
            Ok(self
                .lines
                .iter()
                .map(|&line| Diagnostic {
                    line,
                    column: 1,
                    severity: Severity::Error,
                    rule: "fake".into(),
                    message: format!("at {line}"),
                })
                .collect())
        }
    }

    struct FailingEngine;

    impl StyleEngine for FailingEngine {
        fn lint_text(&self, _req: &LintRequest<'_>) -> Result<Vec<Diagnostic>, EngineError> {
            Err(EngineError::Output("boom".into()))
        }
    }

    fn record(offset: usize) -> ExtractionRecord {
        ExtractionRecord {
            content: ".a {}\n".into(),
            dialect: Dialect::Scss,
            line_offset: offset,
        }
    }

    #[test]
    fn dispatch_adds_offset_and_keeps_order() {
        let engine = FakeEngine::new(vec![5, 1, 3]);
        let (reports, errors) = dispatch(&[record(10)], Path::new("a.vue"), &engine);
        assert!(errors.is_empty());
        let lines: Vec<usize> = reports[0].messages.iter().map(|m| m.line).collect();
        assert_eq!(lines, vec![15, 11, 13]);
        assert_eq!(reports[0].file, "a.vue");
    }

    #[test]
    fn dispatch_line_zero_maps_to_offset() {
        let engine = FakeEngine::new(vec![0]);
        let (reports, _) = dispatch(&[record(1)], Path::new("a.vue"), &engine);
        assert_eq!(reports[0].messages[0].line, 1);
    }

    #[test]
    fn empty_batches_are_not_appended() {
        let engine = FakeEngine::new(vec![]);
        let (reports, errors) = dispatch(&[record(0), record(3)], Path::new("a.vue"), &engine);
        assert!(reports.is_empty());
        assert!(errors.is_empty());
    }

    #[test]
    fn engine_failures_are_collected() {
        let (reports, errors) = dispatch(&[record(0)], Path::new("a.vue"), &FailingEngine);
        assert!(reports.is_empty());
        assert_eq!(errors[0].kind(), "engine");
    }

    #[test]
    fn lint_document_passes_normalized_text() {
        let engine = FakeEngine::new(vec![2]);
        let doc = SourceDocument::new(
            "c.vue",
            "<template/>\n<style lang=\"scss\">\n  .a { color: red; }\n</style>",
        );
        let outcome = lint_document(&doc, Some(2), &engine);
        assert_eq!(outcome.reports[0].messages[0].line, 3);
        let seen = engine.seen.lock().unwrap();
        assert_eq!(seen[0], ("\n.a { color: red; }\n".to_string(), Dialect::Scss));
    }

    #[test]
    fn parse_error_is_isolated() {
        let engine = FakeEngine::new(vec![1]);
        let doc = SourceDocument::new("bad.vue", "<style lang=\"scss\">\n.a {}");
        let outcome = lint_document(&doc, None, &engine);
        assert!(outcome.reports.is_empty());
        assert_eq!(outcome.errors[0].kind(), "parse");
    }

    #[test]
    fn collect_targets_filters_and_reports_missing() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/components")).unwrap();
        fs::write(root.join("src/App.vue"), "").unwrap();
        fs::write(root.join("src/components/B.vue"), "").unwrap();
        fs::write(root.join("src/main.js"), "").unwrap();

        let inputs = vec![
            root.join("src"),
            root.join("src/App.vue"),
            root.join("missing"),
        ];
        let (targets, errors) = collect_targets(&inputs);
        assert_eq!(
            targets,
            vec![root.join("src/App.vue"), root.join("src/components/B.vue")]
        );
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind(), "discovery");
        assert_eq!(errors[0].path(), &root.join("missing"));
    }

    #[cfg(unix)]
    #[test]
    fn collect_targets_does_not_follow_symlinks() {
        use std::os::unix::fs::symlink;

        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/sub")).unwrap();
        fs::create_dir_all(root.join("outside")).unwrap();
        fs::write(root.join("src/A.vue"), "").unwrap();
        fs::write(root.join("outside/Ext.vue"), "").unwrap();
        symlink(root.join("outside"), root.join("src/link")).unwrap();
        symlink(root.join("src"), root.join("src/sub/loop")).unwrap();
        symlink(root.join("outside/Ext.vue"), root.join("src/Linked.vue")).unwrap();

        let (targets, errors) = collect_targets(&[root.join("src")]);
        assert_eq!(targets, vec![root.join("src/A.vue")]);
        assert!(errors.is_empty());
    }

    #[test]
    fn run_lint_merges_only_files_with_findings() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(
            root.join("a.vue"),
            "<template/>\n<style lang=\"sass\">\n.a\n  color: red\n</style>\n",
        )
        .unwrap();
        fs::write(root.join("b.vue"), "<template><p/></template>\n").unwrap();

        let engine = FakeEngine::new(vec![2]);
        let res = run_lint(&[root.to_path_buf()], None, &engine);
        assert_eq!(res.reports.len(), 1);
        assert!(res.reports[0].file.ends_with("a.vue"));
        assert_eq!(res.reports[0].messages[0].line, 3);
        assert_eq!(res.summary.files, 2);
        assert_eq!(res.summary.errors, 1);
        assert!(res.errors.is_empty());
    }

    #[test]
    fn malformed_file_does_not_stop_run() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("ok.vue"), "<style lang=\"scss\">\n.a {}\n</style>").unwrap();
        fs::write(root.join("bad.vue"), "<style lang=\"scss\">\n.a {}").unwrap();
        let engine = FakeEngine::new(vec![1]);
        let res = run_lint(&[root.to_path_buf()], None, &engine);
        assert_eq!(res.reports.len(), 1);
        assert!(res.reports[0].file.ends_with("ok.vue"));
        assert_eq!(res.errors.len(), 1);
        assert_eq!(res.errors[0].kind(), "parse");
    }
}
