//! Configuration commands.
//!
//! - `config show`: Display current configuration
//! - `config get`: Print a single value
//! - `config set`: Set a configuration value
//! - `config path`: Print the config file location

use std::path::Path;

use owo_colors::OwoColorize;
use serde_json::json;

use crate::commands::print_json;
use crate::config::{BASE_URL_ENV, Config};
use crate::error::Result;

/// Show current configuration
pub fn cmd_config_show(config_path: &Path, json: bool) -> Result<()> {
    let config = Config::load_from(config_path)?;
    let resolved_base_url = config.gateway.resolved_base_url();

    if json {
        return print_json(&json!({
            "gateway": config.gateway,
            "resolved_base_url": resolved_base_url,
            "picker": config.picker,
            "config_file": config_path.to_string_lossy(),
        }));
    }

    let mut text = String::new();
    text.push_str(&format!("{}\n\n", "Configuration:".cyan().bold()));

    text.push_str(&format!("{}:\n", "gateway".cyan()));
    text.push_str(&format!("  base_url: {}\n", config.gateway.base_url));
    if resolved_base_url != config.gateway.base_url {
        text.push_str(&format!(
            "  {}\n",
            format!("overridden by {BASE_URL_ENV}: {resolved_base_url}").yellow()
        ));
    }
    text.push_str(&format!(
        "  search_json_path: {}\n",
        config.gateway.search_json_path
    ));
    text.push_str(&format!("  search_path: {}\n", config.gateway.search_path));
    match config.gateway.timeout_secs {
        Some(secs) => text.push_str(&format!("  timeout_secs: {secs}\n")),
        None => text.push_str(&format!(
            "  timeout_secs: {}\n",
            "transport default".dimmed()
        )),
    }

    text.push('\n');
    text.push_str(&format!("{}:\n", "picker".cyan()));
    text.push_str(&format!("  debounce_ms: {}\n", config.picker.debounce_ms));
    text.push_str(&format!("  max_options: {}\n", config.picker.max_options));

    text.push('\n');
    text.push_str(&format!(
        "{}",
        format!("Config file: {}", config_path.display()).dimmed()
    ));

    println!("{text}");
    Ok(())
}

/// Print a single configuration value
pub fn cmd_config_get(config_path: &Path, key: &str) -> Result<()> {
    let config = Config::load_from(config_path)?;
    println!("{}", config.get(key)?);
    Ok(())
}

/// Set a configuration value and save the file
pub fn cmd_config_set(config_path: &Path, key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_from(config_path)?;
    config.set(key, value)?;
    config.save_to(config_path)?;
    println!("Set {} to {}", key.cyan(), config.get(key).unwrap_or_default());
    Ok(())
}

/// Print the config file location
pub fn cmd_config_path(config_path: &Path) -> Result<()> {
    println!("{}", config_path.display());
    Ok(())
}
