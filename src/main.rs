//! pycheck CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use pycheck::cli::{Cli, CommandDispatcher, Commands};
use pycheck::report::EXIT_SETUP;
use pycheck::ui::{create_ui, OutputMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the stderr log subscriber.
///
/// `--debug` forces `pycheck=debug`; otherwise `RUST_LOG` applies, falling
/// back to warnings only. Nothing is logged to stdout, which carries results.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("pycheck=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pycheck=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn wants_json(cli: &Cli) -> bool {
    match &cli.command {
        Some(Commands::Check(args)) => args.json,
        None => cli.check.json,
        _ => false,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);
    tracing::debug!("parsed arguments: {:?}", cli);

    let mut ui = create_ui(OutputMode::for_run(cli.quiet, wants_json(&cli)), cli.no_color);
    let dispatcher = CommandDispatcher::new(std::env::current_dir().unwrap_or_default());

    let code = match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => result.exit_code,
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            EXIT_SETUP
        }
    };
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
