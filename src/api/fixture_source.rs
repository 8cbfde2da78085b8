//! Offline content source backed by a JSON snapshot.
//!
//! The snapshot is a JSON array of documents exactly as the search API returns
//! them. Queries are answered in memory with the same predicate, ordering,
//! `after`, `fetch` and paging semantics as the live API, so a site can be
//! built (and tested) without network access.
//!
//! Cursor URLs have the form `fixture://search?query=K&page=N`, where `K`
//! indexes the queries this source has answered.

use super::query::{FIRST_PUBLICATION_DATE, LAST_PUBLICATION_DATE, Predicate, Query};
use super::source::{ApiError, ContentSource};
use crate::dates;
use crate::types::{Document, PostData, SearchResponse};
use std::cmp::Ordering;
use std::path::Path;
use std::sync::Mutex;

const CURSOR_PREFIX: &str = "fixture://search?";

pub struct FixtureSource {
    documents: Vec<Document>,
    issued: Mutex<Vec<Query>>,
}

impl FixtureSource {
    /// Load a snapshot file.
    pub fn load(path: &Path) -> Result<Self, ApiError> {
        let content = std::fs::read_to_string(path)?;
        let documents: Vec<Document> = serde_json::from_str(&content)?;
        Ok(Self::from_documents(documents))
    }

    pub fn from_documents(documents: Vec<Document>) -> Self {
        Self {
            documents,
            issued: Mutex::new(Vec::new()),
        }
    }

    fn run(&self, query: &Query, query_index: usize) -> Result<SearchResponse, ApiError> {
        let mut matched = Vec::new();
        for doc in &self.documents {
            if matches_all(doc, &query.predicates)? {
                matched.push(doc);
            }
        }

        for ordering in &query.orderings {
            if !is_sortable(&ordering.field) {
                return Err(ApiError::Unsupported(format!(
                    "ordering by {}",
                    ordering.field
                )));
            }
        }
        // Stable sort: earlier orderings take precedence.
        matched.sort_by(|a, b| {
            query
                .orderings
                .iter()
                .map(|o| {
                    let ord = compare_field(a, b, &o.field);
                    if o.descending { ord.reverse() } else { ord }
                })
                .find(|ord| *ord != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });

        let after_pos = query
            .after
            .as_ref()
            .and_then(|after| matched.iter().position(|d| &d.id == after));
        if let Some(pos) = after_pos {
            matched.drain(..=pos);
        }

        let page_size = query.page_size.max(1) as usize;
        let page = query.page.max(1) as usize;
        let total = matched.len();
        let total_pages = total.div_ceil(page_size);

        let results: Vec<Document> = matched
            .into_iter()
            .skip((page - 1) * page_size)
            .take(page_size)
            .map(|doc| project(doc, &query.fetch))
            .collect();

        let cursor = |p: usize| format!("{CURSOR_PREFIX}query={query_index}&page={p}");
        Ok(SearchResponse {
            page: page as u32,
            results_per_page: page_size as u32,
            results_size: results.len() as u32,
            total_results_size: total as u32,
            total_pages: total_pages as u32,
            next_page: (page < total_pages).then(|| cursor(page + 1)),
            prev_page: (page > 1 && page <= total_pages).then(|| cursor(page - 1)),
            results,
        })
    }
}

impl ContentSource for FixtureSource {
    fn query(&self, query: &Query) -> Result<SearchResponse, ApiError> {
        let index = {
            let mut issued = self.issued.lock().unwrap_or_else(|e| e.into_inner());
            issued.push(query.clone());
            issued.len() - 1
        };
        self.run(query, index)
    }

    fn follow(&self, cursor: &str) -> Result<SearchResponse, ApiError> {
        let (index, page) =
            parse_cursor(cursor).ok_or_else(|| ApiError::UnknownCursor(cursor.to_string()))?;
        let query = self
            .issued
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(index)
            .cloned()
            .ok_or_else(|| ApiError::UnknownCursor(cursor.to_string()))?;
        self.run(&query.page(page), index)
    }
}

fn parse_cursor(cursor: &str) -> Option<(usize, u32)> {
    let params = cursor.strip_prefix(CURSOR_PREFIX)?;
    let mut index = None;
    let mut page = None;
    for pair in params.split('&') {
        match pair.split_once('=')? {
            ("query", v) => index = v.parse().ok(),
            ("page", v) => page = v.parse().ok(),
            _ => {}
        }
    }
    Some((index?, page?))
}

fn matches_all(doc: &Document, predicates: &[Predicate]) -> Result<bool, ApiError> {
    for predicate in predicates {
        if !matches(doc, predicate)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn matches(doc: &Document, predicate: &Predicate) -> Result<bool, ApiError> {
    let Predicate::At { path, value } = predicate;
    match path.as_str() {
        "document.type" => Ok(&doc.doc_type == value),
        "document.id" => Ok(&doc.id == value),
        _ => match uid_path_type(path) {
            Some(doc_type) => {
                Ok(doc.doc_type == doc_type && doc.uid.as_deref() == Some(value.as_str()))
            }
            None => Err(ApiError::Unsupported(format!("predicate on {path}"))),
        },
    }
}

/// `my.post.uid` → `post`.
fn uid_path_type(path: &str) -> Option<&str> {
    path.strip_prefix("my.")?.strip_suffix(".uid")
}

fn is_sortable(field: &str) -> bool {
    matches!(
        field,
        FIRST_PUBLICATION_DATE | LAST_PUBLICATION_DATE | "document.id"
    )
}

fn compare_field(a: &Document, b: &Document, field: &str) -> Ordering {
    match field {
        FIRST_PUBLICATION_DATE => dates::compare_published(
            a.first_publication_date.as_deref(),
            b.first_publication_date.as_deref(),
        ),
        LAST_PUBLICATION_DATE => dates::compare_published(
            a.last_publication_date.as_deref(),
            b.last_publication_date.as_deref(),
        ),
        _ => a.id.cmp(&b.id),
    }
}

/// Keep only the `type.field` names listed in `fetch`. Empty keeps everything.
fn project(doc: &Document, fetch: &[String]) -> Document {
    let mut doc = doc.clone();
    if fetch.is_empty() {
        return doc;
    }
    let wants = |field: &str| fetch.iter().any(|f| *f == format!("{}.{field}", doc.doc_type));
    let data = &doc.data;
    let projected = PostData {
        title: if wants("title") { data.title.clone() } else { String::new() },
        subtitle: if wants("subtitle") { data.subtitle.clone() } else { String::new() },
        author: if wants("author") { data.author.clone() } else { String::new() },
        banner: if wants("banner") { data.banner.clone() } else { Default::default() },
        content: if wants("content") { data.content.clone() } else { Vec::new() },
    };
    doc.data = projected;
    doc
}
