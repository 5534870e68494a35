//! mobile-preflight CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use mobile_preflight::cli::{Cli, CommandDispatcher};
use mobile_preflight::shell::is_ci;
use mobile_preflight::ui::{create_ui, OutputMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Exit code for invalid configuration and engine misuse.
const EXIT_USAGE: u8 = 2;

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. `--verbose` sets level to INFO
/// 4. Default is ERROR; unmet requirements are reported by the UI, not the log
///
/// Logs go to stderr so that `--json` output on stdout stays parseable.
fn init_tracing(debug: bool, verbose: bool, no_color: bool) {
    let filter = if debug {
        EnvFilter::new("mobile_preflight=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(if verbose {
                "mobile_preflight=info"
            } else {
                "mobile_preflight=error"
            })
        })
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(!no_color)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug, cli.verbose, cli.no_color);

    tracing::debug!("mobile-preflight starting with args: {:?}", cli);

    let output_mode = OutputMode::from_flags(cli.verbose, cli.quiet);

    let project_root = cli
        .project
        .clone()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());

    let mut ui = create_ui(!is_ci(), output_mode, cli.no_color);

    let dispatcher = CommandDispatcher::new(project_root).with_config(cli.config.clone());

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(u8::try_from(result.exit_code).unwrap_or(1)),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            if e.is_usage_error() {
                ExitCode::from(EXIT_USAGE)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
