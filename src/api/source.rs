//! Content source trait and shared error type.
//!
//! The [`ContentSource`] trait defines the three operations the pipeline
//! needs from the content API: search, follow a pagination cursor, and look
//! up one document by uid.
//!
//! The production implementation is [`HttpSource`](super::http_source::HttpSource).
//! [`FixtureSource`](super::fixture_source::FixtureSource) serves a JSON
//! snapshot from disk for offline builds.

use super::query::{Predicate, Query};
use crate::types::{Document, SearchResponse};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] ureq::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No master ref advertised by {0}")]
    NoMasterRef(String),
    #[error("No {doc_type} document with uid {uid:?}")]
    NotFound { doc_type: String, uid: String },
    #[error("Unknown pagination cursor: {0}")]
    UnknownCursor(String),
    #[error("Unsupported query: {0}")]
    Unsupported(String),
}

pub trait ContentSource: Sync {
    /// Run a document search and return the requested page.
    fn query(&self, query: &Query) -> Result<SearchResponse, ApiError>;

    /// Fetch the page behind a `next_page` cursor URL.
    fn follow(&self, cursor: &str) -> Result<SearchResponse, ApiError>;

    /// Fetch a single document of `doc_type` by uid.
    fn get_by_uid(&self, doc_type: &str, uid: &str) -> Result<Document, ApiError> {
        let mut query = Query::new(Predicate::document_type(doc_type)).page_size(1);
        query.predicates.push(Predicate::uid(doc_type, uid));
        self.query(&query)?
            .results
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::NotFound {
                doc_type: doc_type.to_string(),
                uid: uid.to_string(),
            })
    }
}
