use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchformError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("search gateway returned HTTP {status}: {message}")]
    Gateway {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("invalid search pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("invalid search endpoint '{0}': {1}")]
    InvalidEndpoint(String, String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unknown slot '{0}', expected 'player1' or 'player2'")]
    UnknownSlot(String),

    #[error("unknown player mode '{0}', expected 'new' or 'select'")]
    UnknownMode(String),

    #[error("unknown form '{0}', expected one of: match-entry, tournament-matches, face-off, merge-players")]
    UnknownForm(String),
}

pub type Result<T> = std::result::Result<T, MatchformError>;
