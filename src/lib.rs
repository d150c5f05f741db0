pub mod candidate;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod form;
pub mod gateway;
pub mod mode;
pub mod picker;

pub use candidate::Candidate;
pub use config::{BASE_URL_ENV, CONFIG_FILE_NAME, Config, GatewayConfig, PickerConfig};
pub use error::{MatchformError, Result};
pub use form::{FormKey, KeyOutcome, MatchEntryForm, PlayerSlot, SearchForm};
pub use gateway::{
    EndpointKind, HttpSearchGateway, RosterGateway, SearchEndpoint, SearchGateway,
};
pub use mode::{MarkerControl, ModeToggle, PlayerMode, RadioMarker, Slot};
pub use picker::{
    PickerOption, PickerOptions, PickerPreset, QueryOutcome, RemoteSearchPicker, SelectionEvent,
};
