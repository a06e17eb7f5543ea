//! pinmark CLI - Pin files and directories so they sort first in listings.

use clap::Parser;
use pinmark::cli::{Cli, Commands, ConfigCommands};
use pinmark::commands::{self, Output};
use pinmark::config::{self, ConfigOverrides, OutputFormat, ResolvedSettings};
use std::process;
use std::time::Instant;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter (e.g. `PM_LOG=debug`).
const LOG_ENV: &str = "PM_LOG";

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut overrides = ConfigOverrides::new();
    if let Some(path) = cli.pin_file {
        overrides = overrides.with_pin_file(path);
    }
    if cli.human_readable {
        overrides = overrides.with_output_format(OutputFormat::Human);
    }

    let settings = match config::resolve_settings(&overrides) {
        Ok(settings) => settings,
        Err(e) => exit_with_error(&e, cli.human_readable),
    };
    let human = settings.is_human();

    let start = Instant::now();
    let result = run_command(cli.command, &settings, human);
    debug!(elapsed_ms = start.elapsed().as_millis() as u64, "Command finished");

    if let Err(e) = result {
        exit_with_error(&e, human);
    }
}

/// Install the stderr log subscriber. `PM_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn exit_with_error(e: &pinmark::Error, human: bool) -> ! {
    if human {
        eprintln!("Error: {}", e);
    } else {
        eprintln!("{}", serde_json::json!({ "error": e.to_string() }));
    }
    process::exit(1);
}

fn run_command(
    command: Commands,
    settings: &ResolvedSettings,
    human: bool,
) -> Result<(), pinmark::Error> {
    match command {
        Commands::Pin { paths } => {
            let result = commands::pin(settings, &paths)?;
            output(&result, human);
        }

        Commands::Unpin { paths } => {
            let result = commands::unpin(settings, &paths)?;
            output(&result, human);
        }

        Commands::List => {
            let result = commands::list(settings)?;
            output(&result, human);
        }

        Commands::Check { path } => {
            let result = commands::check(settings, &path)?;
            output(&result, human);
        }

        Commands::Sort { key, tags, paths } => {
            let result = commands::sort(settings, &paths, &key, tags)?;
            output(&result, human);
        }

        Commands::Bindings => {
            let result = commands::bindings(settings)?;
            output(&result, human);
        }

        Commands::Config { command } => match command {
            ConfigCommands::Show => {
                let result = commands::config_show(settings);
                output(&result, human);
            }
            ConfigCommands::Path => {
                let result = commands::config_path(settings);
                output(&result, human);
            }
            ConfigCommands::Init { force } => {
                let result = commands::config_init(settings, force)?;
                output(&result, human);
            }
        },
    }

    Ok(())
}

fn output<T: Output>(result: &T, human: bool) {
    if human {
        println!("{}", result.to_human());
    } else {
        println!("{}", result.to_json());
    }
}
