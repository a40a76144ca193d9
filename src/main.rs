mod cli;
mod commands;

use crate::cli::{epilog, usage_error, Cli};
use crate::commands::render::{describe_error, execute_render, resolve_tools};
use clap::{CommandFactory, FromArgMatches};
use mcrender::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config_path = mcrender::config_path();
    let config_location = match &config_path {
        Ok(path) => path.display().to_string(),
        Err(_) => "unavailable on this platform".to_string(),
    };

    let matches = Cli::command().after_help(epilog(&config_location)).get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|err| err.exit());

    let default_filter = if cli.is_verbose() { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config_path = match config_path {
        Ok(path) => match mcrender::ensure_config_exists(&path) {
            Ok(_) => Some(path),
            Err(err) => {
                log::warn!("{err}; if this execution requires the config file, it will fail");
                None
            }
        },
        Err(err) => {
            log::warn!("{err}");
            None
        }
    };

    let tools = resolve_tools(&cli, config_path.as_deref());
    match execute_render(&cli, &tools) {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::Usage(err)) => usage_error(&err).exit(),
        Err(err) => {
            let prefix = if tools.is_verbose() { "\nError: " } else { "Error: " };
            eprintln!("{prefix}{}", describe_error(&err, &tools, &config_location));
            ExitCode::FAILURE
        }
    }
}
