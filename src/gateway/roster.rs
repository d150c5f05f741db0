//! In-memory player search.
//!
//! Mirrors the server's nickname search: the query is a case-insensitive
//! regular expression matched against the search field, results are ordered
//! by that field and capped at ten.

use std::fs;
use std::path::Path;

use async_trait::async_trait;
use regex::RegexBuilder;

use crate::candidate::Candidate;
use crate::error::{MatchformError, Result};

use super::{SearchEndpoint, SearchGateway};

/// Maximum number of candidates the search API returns per query
pub const SEARCH_RESULT_LIMIT: usize = 10;

/// Gateway answering queries from a fixed player list
#[derive(Debug, Clone)]
pub struct RosterGateway {
    players: Vec<Candidate>,
    search_field: String,
}

impl RosterGateway {
    pub fn new(players: Vec<Candidate>, search_field: impl Into<String>) -> Self {
        Self {
            players,
            search_field: search_field.into(),
        }
    }

    /// Load a roster from a JSON file holding an array of player records
    pub fn load(path: &Path, search_field: impl Into<String>) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            MatchformError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read roster at {}: {}", path.display(), e),
            ))
        })?;
        let players: Vec<Candidate> = serde_json::from_str(&content)?;
        Ok(Self::new(players, search_field))
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

#[async_trait]
impl SearchGateway for RosterGateway {
    async fn search(&self, _endpoint: &SearchEndpoint, query: &str) -> Result<Vec<Candidate>> {
        let pattern = RegexBuilder::new(query).case_insensitive(true).build()?;

        let mut matches: Vec<(String, &Candidate)> = self
            .players
            .iter()
            .filter_map(|player| {
                let text = player.field_text(&self.search_field)?;
                pattern.is_match(&text).then_some((text, player))
            })
            .collect();

        matches.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(matches
            .into_iter()
            .take(SEARCH_RESULT_LIMIT)
            .map(|(_, player)| player.clone())
            .collect())
    }
}
