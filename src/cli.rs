use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::CONFIG_FILE_NAME;
use crate::picker::PickerPreset;

#[derive(Parser)]
#[command(name = "matchform")]
#[command(about = "Player search and player-mode toggles for tournament match forms")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search players the way a form's player picker does
    #[command(visible_alias = "s")]
    Search {
        /// Nickname text to search for
        query: String,

        /// Form whose picker settings to use: match-entry, tournament-matches, face-off, merge-players
        #[arg(short, long, default_value = "match-entry", value_parser = parse_preset)]
        form: PickerPreset,

        /// Search a local JSON player list instead of the gateway
        #[arg(long)]
        roster: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Display current configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a configuration value
    Get {
        /// Key in dot notation (e.g. gateway.base_url)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Key in dot notation (e.g. picker.debounce_ms)
        key: String,

        /// New value
        value: String,
    },

    /// Print the config file location
    Path,
}

fn parse_preset(s: &str) -> Result<PickerPreset, String> {
    s.parse().map_err(|e: crate::error::MatchformError| e.to_string())
}
