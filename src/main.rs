use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use matchform::cli::{Cli, Commands, ConfigAction};
use matchform::commands::{
    cmd_config_get, cmd_config_path, cmd_config_set, cmd_config_show, cmd_search,
};

/// Environment variable holding the tracing filter (e.g. `matchform=debug`)
const LOG_ENV: &str = "MATCHFORM_LOG";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Search {
            query,
            form,
            roster,
            json,
        } => cmd_search(&query, form, roster.as_deref(), &cli.config, json).await,
        Commands::Config { action } => match action {
            ConfigAction::Show { json } => cmd_config_show(&cli.config, json),
            ConfigAction::Get { key } => cmd_config_get(&cli.config, &key),
            ConfigAction::Set { key, value } => cmd_config_set(&cli.config, &key, &value),
            ConfigAction::Path => cmd_config_path(&cli.config),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
