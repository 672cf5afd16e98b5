pub mod commands;
pub mod logging;
pub mod types;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use crate::config::{self, Config};
use crate::utils::error::BoxResult;

/// Run the command-line interface
pub fn run() -> ExitCode {
    let cli = types::Cli::parse();

    logging::init_logging(cli.debug, cli.quiet);
    logging::configure_backtrace(cli.trace);

    let result = match &cli.command {
        types::Commands::Apply { dir } => load_cli_config(&cli)
            .and_then(|config| commands::handle_apply_command(&config, dir.as_ref())),
        types::Commands::Build { unpublished } => load_cli_config(&cli)
            .and_then(|config| commands::handle_build_command(&config, *unpublished)),
        types::Commands::New { title, force } => load_cli_config(&cli)
            .and_then(|config| commands::handle_new_command(&config, title, *force)),
        types::Commands::Init { path, title, force } => {
            commands::handle_init_command(path, title.as_deref(), *force)
        }
        types::Commands::Inspect { file, route } => {
            commands::handle_inspect_command(file, route.as_deref())
        }
    };

    exit_code(result)
}

fn exit_code(result: BoxResult<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Load the configuration and apply command line overrides
fn load_cli_config(cli: &types::Cli) -> BoxResult<Config> {
    let source = cli.source.clone().unwrap_or_else(|| PathBuf::from("."));
    let mut config = config::load_config(&source, cli.config.clone())?;

    if let Some(destination) = &cli.destination {
        config.destination = destination.clone();
    }

    Ok(config)
}
