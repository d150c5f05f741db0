//! Player search command.
//!
//! Runs one query through the same picker the web forms use and prints the
//! resulting dropdown options.

use std::path::Path;
use std::sync::Arc;

use owo_colors::OwoColorize;
use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::commands::print_json;
use crate::config::Config;
use crate::error::Result;
use crate::form::SearchForm;
use crate::gateway::{HttpSearchGateway, RosterGateway, SearchGateway};
use crate::picker::{NICKNAME_FIELD, PickerPreset, QueryOutcome};

/// A row in the search results table
#[derive(Tabled)]
struct OptionRow {
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Player")]
    label: String,
}

fn outcome_name(outcome: QueryOutcome) -> &'static str {
    match outcome {
        QueryOutcome::Cleared => "cleared",
        QueryOutcome::Applied { .. } => "applied",
        QueryOutcome::Failed => "failed",
        QueryOutcome::Stale => "stale",
        QueryOutcome::Superseded => "superseded",
    }
}

/// Execute the search command
///
/// With `roster`, players are searched in a local JSON file instead of the
/// configured gateway.
pub async fn cmd_search(
    query: &str,
    preset: PickerPreset,
    roster: Option<&Path>,
    config_path: &Path,
    json: bool,
) -> Result<()> {
    let config = Config::load_from(config_path)?;

    let gateway: Arc<dyn SearchGateway> = match roster {
        Some(path) => Arc::new(RosterGateway::load(path, NICKNAME_FIELD)?),
        None => Arc::new(HttpSearchGateway::from_config(&config.gateway)?),
    };

    let form = SearchForm::new(preset, &config, gateway)?;
    let outcome = form.picker().handle_query_input(query).await;
    let options = form.picker().visible_options();

    if json {
        return print_json(&json!({
            "query": query,
            "form": preset.name(),
            "endpoint": form.picker().options().endpoint.path(),
            "outcome": outcome_name(outcome),
            "options": options,
        }));
    }

    println!(
        "Search results for \"{query}\" ({})\n",
        preset.name().cyan()
    );

    match outcome {
        QueryOutcome::Cleared => {
            println!("{}", "Empty query: the search gateway was not contacted.".dimmed());
        }
        QueryOutcome::Failed => {
            println!("{}", "Search unavailable, no players to show.".yellow());
        }
        _ if options.is_empty() => println!("No matching players found."),
        _ => {
            let rows: Vec<OptionRow> = options
                .iter()
                .map(|o| OptionRow {
                    value: o.value.clone(),
                    label: o.label.clone(),
                })
                .collect();
            let mut table = Table::new(rows);
            table.with(Style::rounded());
            println!("{table}");
        }
    }

    println!("\n{} option(s)", options.len());
    Ok(())
}
