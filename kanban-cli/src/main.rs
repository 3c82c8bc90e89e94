use clap::Parser;
use kanban_cli::cli::Cli;
use kanban_cli::commands;
use kanban_cli::config::KanbanConfig;
use kanban_cli::exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_WARNING};
use kanban_cli::output;
use serde_json::Value;
use std::process;

/// Load configuration, falling back to the defaults with a warning
fn load_cli_configuration() -> KanbanConfig {
    match KanbanConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Failed to load configuration: {}", e);
            eprintln!("Warning: Configuration loading failed: {}", e);
            eprintln!("Continuing with default configuration...");
            KanbanConfig::default()
        }
    }
}

fn main() {
    let cli = Cli::parse();
    configure_logging(cli.verbose, cli.debug, cli.quiet);

    let config = load_cli_configuration().with_data_dir(cli.data_dir.as_deref());
    process::exit(run(&cli, &config));
}

fn run(cli: &Cli, config: &KanbanConfig) -> i32 {
    let mut ctx = match commands::open_context(config) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return EXIT_ERROR;
        }
    };

    let value = match commands::execute(&cli.command, &mut ctx, config) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!("Command failed: {e:?}");
            eprintln!("Error: {e:#}");
            return EXIT_ERROR;
        }
    };

    if !cli.quiet {
        match output::render(&value, cli.format.unwrap_or_default()) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Error: failed to render output: {e:#}");
                return EXIT_ERROR;
            }
        }
    }

    if value.get("ignored").and_then(Value::as_bool).unwrap_or(false) {
        EXIT_WARNING
    } else {
        EXIT_SUCCESS
    }
}

/// Install the stderr subscriber.
///
/// Without any of the flags `RUST_LOG` decides, falling back to warnings and
/// engine notices.
fn configure_logging(verbose: bool, debug: bool, quiet: bool) {
    use tracing::Level;
    use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

    let filter = if quiet {
        EnvFilter::new(Level::ERROR.to_string())
    } else if debug {
        EnvFilter::new(Level::DEBUG.to_string())
    } else if verbose {
        EnvFilter::new(Level::TRACE.to_string())
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("warn,kanban_engine::notify={}", Level::INFO)))
    };

    registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
