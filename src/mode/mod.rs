//! Exclusive "new player" / "select existing player" mode per slot.
//!
//! Each slot has several mode markers (radio buttons and mirrored hidden
//! inputs). A [`ModeToggle`] owns the markers of exactly one slot, handed to
//! it once at construction, and every transition goes through
//! [`ModeToggle::set_mode`], which rewrites every marker.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::{MatchformError, Result};

/// Player position on a match-entry form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    #[serde(rename = "player1")]
    Player1,
    #[serde(rename = "player2")]
    Player2,
}

impl Slot {
    pub const ALL: [Slot; 2] = [Slot::Player1, Slot::Player2];

    /// Form control name shared by the slot's mode markers
    pub fn name(self) -> &'static str {
        match self {
            Slot::Player1 => "player1",
            Slot::Player2 => "player2",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Slot {
    type Err = MatchformError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "player1" | "1" => Ok(Slot::Player1),
            "player2" | "2" => Ok(Slot::Player2),
            _ => Err(MatchformError::UnknownSlot(s.to_string())),
        }
    }
}

/// Whether a slot registers a new player or selects an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerMode {
    New,
    Select,
}

impl PlayerMode {
    /// Marker value as submitted by the form
    pub fn as_str(self) -> &'static str {
        match self {
            PlayerMode::New => "new",
            PlayerMode::Select => "select",
        }
    }
}

impl fmt::Display for PlayerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PlayerMode {
    type Err = MatchformError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "new" => Ok(PlayerMode::New),
            "select" => Ok(PlayerMode::Select),
            _ => Err(MatchformError::UnknownMode(s.to_string())),
        }
    }
}

/// A host control representing one mode for one slot
pub trait MarkerControl: Send + Sync {
    fn slot(&self) -> Slot;

    /// The mode this marker stands for
    fn mode(&self) -> PlayerMode;

    fn is_asserted(&self) -> bool;

    fn set_asserted(&self, asserted: bool);
}

/// Radio-style marker with a shared checked flag.
///
/// Clones observe the same flag, so the host form keeps one clone for
/// rendering and submission while the toggle holds another.
#[derive(Debug, Clone)]
pub struct RadioMarker {
    slot: Slot,
    mode: PlayerMode,
    checked: Arc<AtomicBool>,
}

impl RadioMarker {
    pub fn new(slot: Slot, mode: PlayerMode, checked: bool) -> Self {
        Self {
            slot,
            mode,
            checked: Arc::new(AtomicBool::new(checked)),
        }
    }

    /// The `new` and `select` radios for a slot, with `initial` pre-checked
    pub fn pair(slot: Slot, initial: Option<PlayerMode>) -> (RadioMarker, RadioMarker) {
        (
            RadioMarker::new(slot, PlayerMode::New, initial == Some(PlayerMode::New)),
            RadioMarker::new(slot, PlayerMode::Select, initial == Some(PlayerMode::Select)),
        )
    }

    /// Form control name
    pub fn name(&self) -> &'static str {
        self.slot.name()
    }

    pub fn is_checked(&self) -> bool {
        self.checked.load(Ordering::SeqCst)
    }
}

impl MarkerControl for RadioMarker {
    fn slot(&self) -> Slot {
        self.slot
    }

    fn mode(&self) -> PlayerMode {
        self.mode
    }

    fn is_asserted(&self) -> bool {
        self.is_checked()
    }

    fn set_asserted(&self, asserted: bool) {
        self.checked.store(asserted, Ordering::SeqCst);
    }
}

/// Keeps every mode marker of one slot consistent
pub struct ModeToggle {
    slot: Slot,
    markers: Vec<Arc<dyn MarkerControl>>,
    // Serialises reconciliation so concurrent triggers cannot interleave
    write_lock: Mutex<()>,
}

impl ModeToggle {
    /// Take ownership of a slot's markers.
    ///
    /// Fails if any marker belongs to another slot, or if either mode has
    /// no marker at all.
    pub fn new(slot: Slot, markers: Vec<Arc<dyn MarkerControl>>) -> Result<Self> {
        if let Some(foreign) = markers.iter().find(|m| m.slot() != slot) {
            return Err(MatchformError::InvalidInput(format!(
                "{} marker for {} handed to the {slot} toggle",
                foreign.mode(),
                foreign.slot()
            )));
        }
        for mode in [PlayerMode::New, PlayerMode::Select] {
            if !markers.iter().any(|m| m.mode() == mode) {
                return Err(MatchformError::InvalidInput(format!(
                    "{slot} has no '{mode}' marker"
                )));
            }
        }

        Ok(Self {
            slot,
            markers,
            write_lock: Mutex::new(()),
        })
    }

    /// Convenience constructor from radio markers
    pub fn from_radios<I>(slot: Slot, markers: I) -> Result<Self>
    where
        I: IntoIterator<Item = RadioMarker>,
    {
        Self::new(
            slot,
            markers
                .into_iter()
                .map(|m| Arc::new(m) as Arc<dyn MarkerControl>)
                .collect(),
        )
    }

    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// Assert every marker for `mode` and de-assert every other marker
    pub fn set_mode(&self, mode: PlayerMode) {
        let _guard = self.write_lock.lock();
        for marker in &self.markers {
            marker.set_asserted(marker.mode() == mode);
        }
        tracing::debug!(slot = %self.slot, %mode, "player mode set");
    }

    /// Mode shown by the markers, or `None` if they disagree or none is asserted
    pub fn current_mode(&self) -> Option<PlayerMode> {
        let mut asserted = self
            .markers
            .iter()
            .filter(|m| m.is_asserted())
            .map(|m| m.mode());
        let first = asserted.next()?;
        if asserted.all(|mode| mode == first) {
            Some(first)
        } else {
            None
        }
    }

    /// The user activated the slot's "new player name" field
    pub fn on_new_name_activated(&self) {
        self.set_mode(PlayerMode::New);
    }

    /// The slot's player search picked an existing player
    pub fn on_player_selected(&self) {
        self.set_mode(PlayerMode::Select);
    }
}

impl fmt::Debug for ModeToggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModeToggle")
            .field("slot", &self.slot)
            .field("markers", &self.markers.len())
            .field("current_mode", &self.current_mode())
            .finish()
    }
}
