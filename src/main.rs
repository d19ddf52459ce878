//! sass-lint-vue CLI binary entry point.
//! Resolves configuration, runs the lint pipeline, and prints results.

use clap::Parser;
use sass_lint_vue::cli::{Cli, Commands};
use sass_lint_vue::engine::CommandEngine;
use sass_lint_vue::{config, lint, output};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    // warn+ to stderr unless RUST_LOG or --verbose say otherwise
    let default = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Commands::Lint {
            paths,
            output: output_mode,
            config: config_file,
            engine,
        } => {
            let cwd = match std::env::current_dir() {
                Ok(d) => d,
                Err(e) => {
                    tracing::error!(%e, "cannot determine working directory");
                    return ExitCode::from(2);
                }
            };
            let eff = match config::resolve_effective(
                &cwd,
                config_file.as_deref(),
                output_mode.as_deref(),
                engine.as_deref(),
            ) {
                Ok(eff) => eff,
                Err(e) => {
                    tracing::error!("{e}");
                    return ExitCode::from(2);
                }
            };
            if eff.config_path.is_none() {
                tracing::info!("no .sass-lint.yml or .sasslintrc found; using defaults");
            }
            let engine = match CommandEngine::from_command_line(&eff.engine_cmd) {
                Ok(e) => e,
                Err(e) => {
                    tracing::error!("{e}");
                    return ExitCode::from(2);
                }
            };
            let result = lint::run_lint(&paths, eff.base_indent, &engine);
            output::print_lint(&result, &eff.output, &cwd);
            if result.summary.errors > 0 {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
    }
}
