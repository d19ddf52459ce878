//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "sass-lint-vue",
    version,
    about = "Lint Sass/SCSS style blocks inside .vue files",
    long_about = "sass-lint-vue extracts <style lang=\"scss\"> and <style lang=\"sass\"> blocks from Vue single-file components, lints them with an external style linter, and reports findings at their original line numbers.\n\nConfiguration: .sass-lint.yml or .sasslintrc in the working directory or an ancestor (home directory excluded). Precedence: CLI > config file > defaults.",
    after_help = "Examples:\n  sass-lint-vue lint src\n  sass-lint-vue lint src/App.vue --output json\n  sass-lint-vue lint src --engine \"stylelint --stdin --custom-syntax postcss-{syntax} -f json\"",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    /// Log pipeline steps to stderr (same as RUST_LOG=debug)
    #[arg(long, short, global = true, action = clap::ArgAction::SetTrue)]
    pub verbose: bool,
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(
        about = "Show version",
        long_about = "Print the current sass-lint-vue version."
    )]
    Version,
    /// Lint style blocks in component files
    #[command(
        about = "Run lint checks",
        long_about = "Scan the given files and directories for .vue files, lint their Sass/SCSS blocks, and report diagnostics. Exits 1 when any error-level diagnostic is found.",
        after_help = "Examples:\n  sass-lint-vue lint src components/Button.vue\n  sass-lint-vue lint . --output json"
    )]
    Lint {
        #[arg(required = true, help = "Files or directories to scan")]
        paths: Vec<PathBuf>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Explicit config file (skips discovery)")]
        config: Option<PathBuf>,
        #[arg(
            long,
            help = "Linter command, split on whitespace (no shell quoting, so paths and arguments cannot contain spaces); {file} and {syntax} are substituted, text is sent on stdin"
        )]
        engine: Option<String>,
    },
}
