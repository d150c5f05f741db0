//! CLI command implementations.

mod config;
mod search;

pub use config::{cmd_config_get, cmd_config_path, cmd_config_set, cmd_config_show};
pub use search::cmd_search;

use crate::error::Result;

/// Print a JSON value to stdout
pub fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
