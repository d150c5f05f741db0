//! Player search gateway.
//!
//! The gateway is the network boundary behind every search picker: given an
//! endpoint path and a free-text query it returns candidate records. Two
//! implementations are provided:
//! - [`HttpSearchGateway`] issues `GET <base><path>?query=<text>` requests
//! - [`RosterGateway`] searches an in-memory player list (offline use)

pub mod http;
pub mod roster;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::candidate::Candidate;
use crate::error::{MatchformError, Result};

pub use http::HttpSearchGateway;
pub use roster::RosterGateway;

/// JSON-suffixed search path used by the match and merge forms
pub const DEFAULT_SEARCH_JSON_PATH: &str = "/api/v1/players/search.json";

/// Plain search path used by the face-off form
pub const DEFAULT_SEARCH_PATH: &str = "/api/v1/players/search";

/// Query-string parameter carrying the search text
pub const QUERY_PARAM: &str = "query";

/// Which of the two configured search paths a form talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointKind {
    Json,
    Plain,
}

/// Absolute path of a search endpoint on the gateway host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEndpoint {
    path: String,
}

impl SearchEndpoint {
    /// Validate and wrap an endpoint path such as `/api/v1/players/search`
    pub fn parse(path: &str) -> Result<Self> {
        let path = path.trim();

        if !path.starts_with('/') {
            return Err(MatchformError::InvalidEndpoint(
                path.to_string(),
                "path must start with '/'".to_string(),
            ));
        }
        if path.contains('?') || path.contains('#') {
            return Err(MatchformError::InvalidEndpoint(
                path.to_string(),
                "path must not carry a query string or fragment".to_string(),
            ));
        }

        Ok(Self {
            path: path.to_string(),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Build the request URL for `query` against the gateway's base URL.
    ///
    /// The query is form-urlencoded into the `query` parameter.
    pub fn request_url(&self, base: &Url, query: &str) -> Result<Url> {
        let mut url = base.join(&self.path)?;
        url.query_pairs_mut().append_pair(QUERY_PARAM, query);
        Ok(url)
    }
}

impl fmt::Display for SearchEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)
    }
}

impl FromStr for SearchEndpoint {
    type Err = MatchformError;

    fn from_str(s: &str) -> Result<Self> {
        SearchEndpoint::parse(s)
    }
}

/// Remote player search.
///
/// Implementations report transport, status and decoding failures as errors;
/// callers decide how to degrade.
#[async_trait]
pub trait SearchGateway: Send + Sync {
    /// Search `endpoint` for players matching `query`
    async fn search(&self, endpoint: &SearchEndpoint, query: &str) -> Result<Vec<Candidate>>;
}
