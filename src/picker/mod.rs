//! Remote search picker.
//!
//! Turns a plain selection input into a type-ahead combobox: every query
//! typed into the field goes to the [`SearchGateway`] and the answer
//! replaces the option list. Behavior at the edges:
//! - An empty query never reaches the gateway and clears the options
//! - A failing gateway shows no options instead of surfacing an error
//! - Each query carries a sequence number; a response is applied only if
//!   no newer query was issued in the meantime
//! - With a non-zero debounce, a query superseded during the quiet period
//!   is never sent

pub mod options;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use parking_lot::Mutex;

use crate::candidate::Candidate;
use crate::gateway::SearchGateway;

pub use options::{NICKNAME_FIELD, PickerOptions, PickerPreset};
pub use state::{HighlightMove, PickerOption, QueryState, QueryTicket};

/// Notification sent to listeners when the committed value changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    Selected(PickerOption),
    Cleared,
}

/// Callback invoked after the committed value changes
pub type SelectionListener = Arc<dyn Fn(&SelectionEvent) + Send + Sync>;

/// What happened to a single query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Empty query: options cleared without contacting the gateway
    Cleared,
    /// Response applied to the option list
    Applied { count: usize },
    /// Gateway failed; the option list was emptied
    Failed,
    /// A newer query was issued before the response arrived; response dropped
    Stale,
    /// A newer query arrived during the debounce window; nothing was sent
    Superseded,
}

struct PickerInner {
    options: PickerOptions,
    gateway: Arc<dyn SearchGateway>,
    state: Mutex<QueryState>,
    selection: Mutex<Option<PickerOption>>,
    listeners: Mutex<Vec<SelectionListener>>,
}

/// Async, searchable, single-choice combobox.
///
/// Cloning yields another handle to the same field.
#[derive(Clone)]
pub struct RemoteSearchPicker {
    inner: Arc<PickerInner>,
}

impl RemoteSearchPicker {
    pub fn new(options: PickerOptions, gateway: Arc<dyn SearchGateway>) -> Self {
        Self {
            inner: Arc::new(PickerInner {
                options,
                gateway,
                state: Mutex::new(QueryState::new()),
                selection: Mutex::new(None),
                listeners: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn options(&self) -> &PickerOptions {
        &self.inner.options
    }

    /// Register a listener for selection changes
    pub fn on_selection_change<F>(&self, listener: F)
    where
        F: Fn(&SelectionEvent) + Send + Sync + 'static,
    {
        self.inner.listeners.lock().push(Arc::new(listener));
    }

    /// Handle the text currently typed into the field.
    ///
    /// Safe to call on every keystroke; concurrent calls resolve in favor of
    /// the most recently issued query.
    pub async fn handle_query_input(&self, query: &str) -> QueryOutcome {
        let ticket = self.inner.state.lock().issue(query);

        if query.is_empty() {
            self.inner.state.lock().apply(&ticket, Vec::new());
            tracing::debug!(seq = ticket.seq(), "empty query, cleared options");
            return QueryOutcome::Cleared;
        }

        let debounce = self.inner.options.debounce;
        if !debounce.is_zero() {
            tokio::time::sleep(debounce).await;
            if !self.inner.state.lock().is_current(&ticket) {
                tracing::debug!(seq = ticket.seq(), query, "query superseded while debouncing");
                return QueryOutcome::Superseded;
            }
        }

        self.inner.state.lock().mark_pending(&ticket);
        tracing::debug!(seq = ticket.seq(), query, "searching players");

        let result = self
            .inner
            .gateway
            .search(&self.inner.options.endpoint, query)
            .await;

        let (options, failed) = match result {
            Ok(candidates) => (self.inner.options.render_options(&candidates), false),
            Err(e) => {
                tracing::warn!("player search for '{query}' failed: {e}");
                (Vec::new(), true)
            }
        };
        let count = options.len();

        if !self.inner.state.lock().apply(&ticket, options) {
            tracing::debug!(seq = ticket.seq(), query, "discarding stale search response");
            return QueryOutcome::Stale;
        }

        if failed {
            QueryOutcome::Failed
        } else {
            QueryOutcome::Applied { count }
        }
    }

    /// Commit `candidate` as the field's value and notify listeners.
    ///
    /// Returns false if the candidate has no value field to commit.
    pub fn handle_selection_made(&self, candidate: &Candidate) -> bool {
        match self.inner.options.render_option(candidate) {
            Some(option) => {
                self.commit(option);
                true
            }
            None => {
                tracing::warn!(
                    "ignoring selection without a '{}' field",
                    self.inner.options.value_field
                );
                false
            }
        }
    }

    /// Select an entry of the current option list by its value
    pub fn select_value(&self, value: &str) -> bool {
        let option = self
            .inner
            .state
            .lock()
            .options()
            .iter()
            .find(|o| o.value == value)
            .cloned();
        match option {
            Some(option) => {
                self.commit(option);
                true
            }
            None => false,
        }
    }

    /// Select the highlighted entry, if any
    pub fn select_highlighted(&self) -> bool {
        let option = self.inner.state.lock().highlighted_option().cloned();
        match option {
            Some(option) => {
                self.commit(option);
                true
            }
            None => false,
        }
    }

    pub fn move_highlight(&self, direction: HighlightMove) {
        self.inner.state.lock().move_highlight(direction);
    }

    /// Empty the committed value and notify listeners
    pub fn clear_selection(&self) {
        let previous = self.inner.selection.lock().take();
        if previous.is_some() {
            self.notify(&SelectionEvent::Cleared);
        }
    }

    /// The committed value, if any
    pub fn value(&self) -> Option<String> {
        self.inner.selection.lock().as_ref().map(|o| o.value.clone())
    }

    pub fn selection(&self) -> Option<PickerOption> {
        self.inner.selection.lock().clone()
    }

    /// Options currently shown in the dropdown
    pub fn visible_options(&self) -> Vec<PickerOption> {
        self.inner.state.lock().options().to_vec()
    }

    /// Snapshot of the search state
    pub fn query_state(&self) -> QueryState {
        self.inner.state.lock().clone()
    }

    fn commit(&self, option: PickerOption) {
        tracing::debug!(value = %option.value, label = %option.label, "selection made");
        *self.inner.selection.lock() = Some(option.clone());
        self.notify(&SelectionEvent::Selected(option));
    }

    fn notify(&self, event: &SelectionEvent) {
        // Listeners may call back into the picker, so run them unlocked
        let listeners = self.inner.listeners.lock().clone();
        for listener in listeners {
            listener(event);
        }
    }
}
