//! Per-field search state.

use serde::Serialize;

/// A rendered, selectable entry in the picker's option list
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PickerOption {
    pub value: String,
    pub label: String,
}

impl PickerOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Identifies one issued query. Only the ticket with the latest sequence
/// number may write the option list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTicket {
    seq: u64,
    query: String,
}

impl QueryTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

/// Direction for keyboard highlight movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightMove {
    Up,
    Down,
}

/// In-flight search state for one selection field
#[derive(Debug, Clone, Default)]
pub struct QueryState {
    query: String,
    latest_seq: u64,
    pending: Option<u64>,
    options: Vec<PickerOption>,
    highlighted: Option<usize>,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new query, superseding every earlier ticket
    pub fn issue(&mut self, query: &str) -> QueryTicket {
        self.latest_seq += 1;
        self.query = query.to_string();
        self.pending = None;
        QueryTicket {
            seq: self.latest_seq,
            query: self.query.clone(),
        }
    }

    pub fn is_current(&self, ticket: &QueryTicket) -> bool {
        ticket.seq == self.latest_seq
    }

    /// Mark the ticket's request as outstanding (ignored for stale tickets)
    pub fn mark_pending(&mut self, ticket: &QueryTicket) {
        if self.is_current(ticket) {
            self.pending = Some(ticket.seq);
        }
    }

    /// Replace the option list with `options` if `ticket` is still current.
    ///
    /// Returns false, leaving the state untouched, for superseded tickets.
    pub fn apply(&mut self, ticket: &QueryTicket, options: Vec<PickerOption>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.pending = None;
        self.highlighted = if options.is_empty() { None } else { Some(0) };
        self.options = options;
        true
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    /// True while the latest issued request has not answered
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn options(&self) -> &[PickerOption] {
        &self.options
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn highlighted_option(&self) -> Option<&PickerOption> {
        self.highlighted.and_then(|i| self.options.get(i))
    }

    /// Move the highlight, stopping at either end of the list
    pub fn move_highlight(&mut self, direction: HighlightMove) {
        if self.options.is_empty() {
            self.highlighted = None;
            return;
        }
        let last = self.options.len() - 1;
        self.highlighted = Some(match (self.highlighted, direction) {
            (None, _) => 0,
            (Some(i), HighlightMove::Up) => i.saturating_sub(1),
            (Some(i), HighlightMove::Down) => (i + 1).min(last),
        });
    }
}
