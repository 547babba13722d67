use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use pushwrappers::cli::commands::{config, run, send};
use pushwrappers::cli::{Cli, Commands, ConfigAction};
use pushwrappers::config::{LoadedConfig, load_config};
use pushwrappers::notify;
use pushwrappers::telemetry::{TracingConfig, TracingGuard, init_tracing};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Run { label, command } => {
            let (loaded, _guard) = load_with_tracing(config_path, cli.debug)?;
            let notifier = notify::from_config(&loaded.config.notifications);
            let code = run::handle_run(label, &command, &notifier)?;
            Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
        }
        Commands::Send { title, message } => {
            let (loaded, _guard) = load_with_tracing(config_path, cli.debug)?;
            let notifier = notify::from_config(&loaded.config.notifications);
            send::handle_send(&message, &title, &notifier)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Config { action } => {
            match action {
                ConfigAction::Init { force } => config::handle_init(force, cli.config.clone())?,
                ConfigAction::Show { json } => {
                    let loaded = load_config(config_path)?;
                    config::handle_show(&loaded, json)?
                }
                ConfigAction::Validate => config::handle_validate(config_path)?,
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_with_tracing(
    path: Option<&Path>,
    debug: bool,
) -> anyhow::Result<(LoadedConfig, TracingGuard)> {
    let loaded = load_config(path)?;
    let tracing_config = TracingConfig::from_logging(&loaded.config.logging, debug)
        .context("invalid [logging] section")?;
    let guard = init_tracing(&tracing_config);
    Ok((loaded, guard))
}
