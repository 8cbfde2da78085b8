//! Content API client over HTTP.
//!
//! Every search must name a content release by `ref`. On connect the client
//! reads the API root and pins the master ref, so all pages of one build see
//! the same published content.

use super::query::Query;
use super::source::{ApiError, ContentSource};
use crate::config::ApiConfig;
use crate::types::SearchResponse;
use log::debug;
use serde::Deserialize;
use std::time::Duration;
use ureq::Agent;

/// API root document (`GET {endpoint}`).
#[derive(Debug, Deserialize)]
struct ApiRoot {
    refs: Vec<ApiRef>,
}

#[derive(Debug, Deserialize)]
struct ApiRef {
    #[serde(rename = "ref")]
    reference: String,
    #[serde(rename = "isMasterRef", default)]
    is_master_ref: bool,
}

pub struct HttpSource {
    agent: Agent,
    endpoint: String,
    access_token: Option<String>,
    master_ref: String,
}

impl HttpSource {
    /// Connect to the API root and resolve the master ref.
    pub fn connect(config: &ApiConfig) -> Result<Self, ApiError> {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .build()
            .into();
        let endpoint = config.endpoint.trim_end_matches('/').to_string();

        debug!("GET {endpoint}");
        let mut request = agent.get(&endpoint);
        if let Some(token) = &config.access_token {
            request = request.query("access_token", token);
        }
        let root: ApiRoot = request.call()?.body_mut().read_json()?;
        let master_ref = master_ref(root).ok_or_else(|| ApiError::NoMasterRef(endpoint.clone()))?;
        debug!("master ref {master_ref}");

        Ok(Self {
            agent,
            endpoint,
            access_token: config.access_token.clone(),
            master_ref,
        })
    }

    fn search_url(&self) -> String {
        format!("{}/documents/search", self.endpoint)
    }
}

fn master_ref(root: ApiRoot) -> Option<String> {
    root.refs
        .into_iter()
        .find(|r| r.is_master_ref)
        .map(|r| r.reference)
}

/// Cursor URLs normally carry every original parameter; the token is only
/// appended when the API dropped it.
fn cursor_needs_token(cursor: &str) -> bool {
    !cursor.contains("access_token=")
}

impl ContentSource for HttpSource {
    fn query(&self, query: &Query) -> Result<SearchResponse, ApiError> {
        let url = self.search_url();
        debug!("GET {url} q={} page={}", query.render_q(), query.page);
        let mut request = self.agent.get(&url).query("ref", &self.master_ref);
        for (key, value) in query.params() {
            request = request.query(key, value);
        }
        if let Some(token) = &self.access_token {
            request = request.query("access_token", token);
        }
        Ok(request.call()?.body_mut().read_json()?)
    }

    fn follow(&self, cursor: &str) -> Result<SearchResponse, ApiError> {
        debug!("GET {cursor}");
        let mut request = self.agent.get(cursor);
        if let Some(token) = self.access_token.as_ref().filter(|_| cursor_needs_token(cursor)) {
            request = request.query("access_token", token);
        }
        Ok(request.call()?.body_mut().read_json()?)
    }
}
