//! Picker options and the presets used by the tournament forms.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::candidate::Candidate;
use crate::config::Config;
use crate::error::{MatchformError, Result};
use crate::gateway::roster::SEARCH_RESULT_LIMIT;
use crate::gateway::{EndpointKind, SearchEndpoint};

use super::state::PickerOption;

/// Field holding the player's display name in search results
pub const NICKNAME_FIELD: &str = "Nickname";

/// How a picker maps candidates to options and where it searches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOptions {
    /// Candidate field stored as the committed value
    pub value_field: String,
    /// Candidate field rendered as option text
    pub label_field: String,
    /// Candidate field the gateway matches the query against
    pub search_field: String,
    pub endpoint: SearchEndpoint,
    /// Quiet period before a typed query is sent
    pub debounce: Duration,
    /// Option list cap; values below 1 are treated as 1
    pub max_options: usize,
}

impl PickerOptions {
    /// Options keyed by `ID` and labelled by `Nickname`
    pub fn new(endpoint: SearchEndpoint) -> Self {
        Self {
            value_field: "ID".to_string(),
            label_field: NICKNAME_FIELD.to_string(),
            search_field: NICKNAME_FIELD.to_string(),
            endpoint,
            debounce: Duration::ZERO,
            max_options: SEARCH_RESULT_LIMIT,
        }
    }

    pub fn with_value_field(mut self, field: impl Into<String>) -> Self {
        self.value_field = field.into();
        self
    }

    pub fn with_label_field(mut self, field: impl Into<String>) -> Self {
        self.label_field = field.into();
        self
    }

    pub fn with_search_field(mut self, field: impl Into<String>) -> Self {
        self.search_field = field.into();
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_max_options(mut self, max_options: usize) -> Self {
        self.max_options = max_options.max(1);
        self
    }

    /// Render one candidate, falling back to the value when it has no label.
    ///
    /// Candidates without a value cannot be selected and render as `None`.
    pub fn render_option(&self, candidate: &Candidate) -> Option<PickerOption> {
        let value = candidate.field_text(&self.value_field)?;
        let label = candidate
            .field_text(&self.label_field)
            .unwrap_or_else(|| value.clone());
        Some(PickerOption { value, label })
    }

    /// Render a result set, keeping the first occurrence of each value
    pub fn render_options(&self, candidates: &[Candidate]) -> Vec<PickerOption> {
        let mut seen = HashSet::new();
        candidates
            .iter()
            .filter_map(|c| self.render_option(c))
            .filter(|option| seen.insert(option.value.clone()))
            .take(self.max_options.max(1))
            .collect()
    }
}

/// The forms that embed a player search picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickerPreset {
    /// Single match entry, wired to the player mode toggles
    MatchEntry,
    /// Bulk tournament match entry
    TournamentMatches,
    /// Head-to-head comparison, keyed by player URL path
    FaceOff,
    MergePlayers,
}

impl PickerPreset {
    pub const ALL: [PickerPreset; 4] = [
        PickerPreset::MatchEntry,
        PickerPreset::TournamentMatches,
        PickerPreset::FaceOff,
        PickerPreset::MergePlayers,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PickerPreset::MatchEntry => "match-entry",
            PickerPreset::TournamentMatches => "tournament-matches",
            PickerPreset::FaceOff => "face-off",
            PickerPreset::MergePlayers => "merge-players",
        }
    }

    pub fn value_field(self) -> &'static str {
        match self {
            PickerPreset::FaceOff => "URLPath",
            _ => "ID",
        }
    }

    pub fn endpoint_kind(self) -> EndpointKind {
        match self {
            PickerPreset::FaceOff => EndpointKind::Plain,
            _ => EndpointKind::Json,
        }
    }

    /// Build picker options for this form from the loaded configuration
    pub fn options(self, config: &Config) -> Result<PickerOptions> {
        let endpoint = config.gateway.endpoint(self.endpoint_kind())?;
        Ok(PickerOptions::new(endpoint)
            .with_value_field(self.value_field())
            .with_debounce(config.picker.debounce())
            .with_max_options(config.picker.max_options))
    }
}

impl fmt::Display for PickerPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PickerPreset {
    type Err = MatchformError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        PickerPreset::ALL
            .into_iter()
            .find(|preset| preset.name() == normalized)
            .ok_or_else(|| MatchformError::UnknownForm(s.to_string()))
    }
}
