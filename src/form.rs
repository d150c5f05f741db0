//! Form-level wiring of search pickers and player mode toggles.
//!
//! The match-entry form pairs each slot's picker with that slot's
//! [`ModeToggle`]: any change to the dropdown's value, picking a player or
//! clearing it, moves the slot to `select` mode. The other forms embed a single picker.

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::gateway::SearchGateway;
use crate::mode::{MarkerControl, ModeToggle, PlayerMode, Slot};
use crate::picker::{
    HighlightMove, PickerOptions, PickerPreset, QueryOutcome, RemoteSearchPicker, SelectionEvent,
};

/// Keys a form reacts to while a picker has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKey {
    Up,
    Down,
    Enter,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Handled by the picker; the host must not act on it
    Consumed,
    /// The host should submit the form
    Submit,
    /// Not handled; the host keeps its default behavior
    Ignored,
}

fn route_navigation(picker: &RemoteSearchPicker, key: FormKey) -> Option<KeyOutcome> {
    match key {
        FormKey::Up => picker.move_highlight(HighlightMove::Up),
        FormKey::Down => picker.move_highlight(HighlightMove::Down),
        FormKey::Enter | FormKey::Other => return None,
    }
    Some(KeyOutcome::Consumed)
}

/// One player position: its mode toggle and its search picker
pub struct PlayerSlot {
    slot: Slot,
    toggle: Arc<ModeToggle>,
    picker: RemoteSearchPicker,
}

impl PlayerSlot {
    fn wire(
        slot: Slot,
        markers: Vec<Arc<dyn MarkerControl>>,
        options: PickerOptions,
        gateway: Arc<dyn SearchGateway>,
    ) -> Result<Self> {
        let toggle = Arc::new(ModeToggle::new(slot, markers)?);
        let picker = RemoteSearchPicker::new(options, gateway);

        picker.on_selection_change({
            let toggle = Arc::clone(&toggle);
            move |_: &SelectionEvent| toggle.on_player_selected()
        });

        Ok(Self {
            slot,
            toggle,
            picker,
        })
    }

    pub fn slot(&self) -> Slot {
        self.slot
    }

    pub fn toggle(&self) -> &ModeToggle {
        &self.toggle
    }

    pub fn picker(&self) -> &RemoteSearchPicker {
        &self.picker
    }
}

/// Match-entry form with two player slots
pub struct MatchEntryForm {
    player1: PlayerSlot,
    player2: PlayerSlot,
}

impl MatchEntryForm {
    /// Wire both slots. Each slot receives only its own markers.
    pub fn new(
        options: PickerOptions,
        gateway: Arc<dyn SearchGateway>,
        player1_markers: Vec<Arc<dyn MarkerControl>>,
        player2_markers: Vec<Arc<dyn MarkerControl>>,
    ) -> Result<Self> {
        Ok(Self {
            player1: PlayerSlot::wire(
                Slot::Player1,
                player1_markers,
                options.clone(),
                Arc::clone(&gateway),
            )?,
            player2: PlayerSlot::wire(Slot::Player2, player2_markers, options, gateway)?,
        })
    }

    /// Build the form with the match-entry picker preset
    pub fn from_config(
        config: &Config,
        gateway: Arc<dyn SearchGateway>,
        player1_markers: Vec<Arc<dyn MarkerControl>>,
        player2_markers: Vec<Arc<dyn MarkerControl>>,
    ) -> Result<Self> {
        let options = PickerPreset::MatchEntry.options(config)?;
        Self::new(options, gateway, player1_markers, player2_markers)
    }

    pub fn slot(&self, slot: Slot) -> &PlayerSlot {
        match slot {
            Slot::Player1 => &self.player1,
            Slot::Player2 => &self.player2,
        }
    }

    pub fn set_mode(&self, slot: Slot, mode: PlayerMode) {
        self.slot(slot).toggle.set_mode(mode);
    }

    pub fn mode(&self, slot: Slot) -> Option<PlayerMode> {
        self.slot(slot).toggle.current_mode()
    }

    /// Text typed into a slot's player search
    pub async fn handle_query_input(&self, slot: Slot, query: &str) -> QueryOutcome {
        self.slot(slot).picker.handle_query_input(query).await
    }

    /// The user clicked into a slot's "new player name" field
    pub fn handle_new_name_activated(&self, slot: Slot) {
        self.slot(slot).toggle.on_new_name_activated();
    }

    /// Enter never submits this form: it picks the highlighted player instead
    pub fn handle_key(&self, slot: Slot, key: FormKey) -> KeyOutcome {
        let picker = &self.slot(slot).picker;
        if let Some(outcome) = route_navigation(picker, key) {
            return outcome;
        }
        match key {
            FormKey::Enter => {
                picker.select_highlighted();
                KeyOutcome::Consumed
            }
            _ => KeyOutcome::Ignored,
        }
    }
}

/// A form holding one player search picker
pub struct SearchForm {
    preset: PickerPreset,
    picker: RemoteSearchPicker,
}

impl SearchForm {
    pub fn new(preset: PickerPreset, config: &Config, gateway: Arc<dyn SearchGateway>) -> Result<Self> {
        let options = preset.options(config)?;
        Ok(Self {
            preset,
            picker: RemoteSearchPicker::new(options, gateway),
        })
    }

    pub fn preset(&self) -> PickerPreset {
        self.preset
    }

    pub fn picker(&self) -> &RemoteSearchPicker {
        &self.picker
    }

    /// Enter picks the highlighted player when the dropdown has one,
    /// otherwise it submits.
    pub fn handle_key(&self, key: FormKey) -> KeyOutcome {
        if let Some(outcome) = route_navigation(&self.picker, key) {
            return outcome;
        }
        match key {
            FormKey::Enter if self.picker.select_highlighted() => KeyOutcome::Consumed,
            FormKey::Enter => KeyOutcome::Submit,
            _ => KeyOutcome::Ignored,
        }
    }
}
