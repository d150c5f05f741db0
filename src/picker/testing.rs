//! Search gateways with scripted behavior for picker and form tests.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;
use tokio::sync::oneshot;

use crate::candidate::Candidate;
use crate::error::{MatchformError, Result};
use crate::gateway::{SearchEndpoint, SearchGateway};

pub(crate) fn player(id: u64, nickname: &str) -> Candidate {
    Candidate::from_pairs([("ID", json!(id)), ("Nickname", json!(nickname))])
}

fn server_error(status: u16) -> MatchformError {
    MatchformError::Gateway {
        status: reqwest::StatusCode::from_u16(status).unwrap(),
        message: "scripted failure".to_string(),
    }
}

/// Answers immediately from a query -> result table.
/// Unknown queries get an empty result set.
#[derive(Default)]
pub(crate) struct ScriptedGateway {
    responses: Mutex<HashMap<String, Option<Vec<Candidate>>>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedGateway {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(&self, query: &str, candidates: Vec<Candidate>) {
        self.responses
            .lock()
            .insert(query.to_string(), Some(candidates));
    }

    pub(crate) fn fail(&self, query: &str) {
        self.responses.lock().insert(query.to_string(), None);
    }

    /// `(endpoint path, query)` for every request received
    pub(crate) fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl SearchGateway for ScriptedGateway {
    async fn search(&self, endpoint: &SearchEndpoint, query: &str) -> Result<Vec<Candidate>> {
        self.calls
            .lock()
            .push((endpoint.path().to_string(), query.to_string()));
        match self.responses.lock().get(query) {
            Some(Some(candidates)) => Ok(candidates.clone()),
            Some(None) => Err(server_error(500)),
            None => Ok(Vec::new()),
        }
    }
}

/// Holds each request open until the test releases it through a oneshot
/// channel, so responses can be delivered in any order.
#[derive(Default)]
pub(crate) struct GatedGateway {
    gates: Mutex<HashMap<String, oneshot::Receiver<std::result::Result<Vec<Candidate>, u16>>>>,
    calls: Mutex<Vec<String>>,
}

impl GatedGateway {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Hold requests for `query` until `release` yields candidates or an HTTP status
    pub(crate) fn gate(
        &self,
        query: &str,
        release: oneshot::Receiver<std::result::Result<Vec<Candidate>, u16>>,
    ) {
        self.gates.lock().insert(query.to_string(), release);
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub(crate) async fn wait_for_calls(&self, count: usize) {
        while self.call_count() < count {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl SearchGateway for GatedGateway {
    async fn search(&self, _endpoint: &SearchEndpoint, query: &str) -> Result<Vec<Candidate>> {
        self.calls.lock().push(query.to_string());
        let release = self.gates.lock().remove(query);
        let Some(release) = release else {
            return Ok(Vec::new());
        };

        match release.await {
            Ok(Ok(candidates)) => Ok(candidates),
            Ok(Err(status)) => Err(server_error(status)),
            Err(_) => Err(MatchformError::InvalidInput(format!(
                "gate for '{query}' was dropped"
            ))),
        }
    }
}
