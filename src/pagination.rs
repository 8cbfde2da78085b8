//! Pagination-cursor handling.
//!
//! Every search response carries a `next_page` cursor URL until the last page.
//! The listing follows those cursors and keeps each API page as one listing
//! page, so page N of the site holds exactly what page N of the API returned.
//!
//! ## Cursor failures
//!
//! The first page is required: failing to fetch it fails the stage. A failed
//! cursor fetch after that depends on [`CursorPolicy`]:
//!
//! - `Lenient` logs a warning, keeps the pages collected so far, clears the
//!   last page's cursor (so no "load more" link points at a page that was
//!   never generated), and marks the listing truncated.
//! - `Strict` propagates the error.
//!
//! A cursor that repeats an already visited URL ends the walk.

use crate::api::{ApiError, ContentSource, Query};
use crate::types::{Document, PostSummary};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorPolicy {
    #[default]
    Lenient,
    Strict,
}

/// One page of the post listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingPage {
    /// 1-based page number.
    pub number: u32,
    pub posts: Vec<PostSummary>,
    /// Cursor to the following page, if one was collected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page: Option<String>,
}

impl ListingPage {
    pub fn has_next(&self) -> bool {
        self.next_page.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    pub pages: Vec<ListingPage>,
    /// A cursor fetch failed and later pages are missing.
    pub truncated: bool,
}

/// Map listing documents to summaries, skipping documents without a usable
/// uid.
pub fn summarize(documents: &[Document]) -> Vec<PostSummary> {
    documents
        .iter()
        .filter_map(|doc| {
            let summary = PostSummary::from_document(doc);
            if summary.is_none() {
                warn!("skipping document {} without a usable uid", doc.id);
            }
            summary
        })
        .collect()
}

/// Run `query` and follow every `next_page` cursor, one listing page per
/// API page.
pub fn collect_listing<S: ContentSource + ?Sized>(
    source: &S,
    query: &Query,
    policy: CursorPolicy,
) -> Result<Listing, ApiError> {
    let first = source.query(query)?;
    let mut listing = Listing::default();
    let mut visited = HashSet::new();
    let mut cursor = first.next_page.clone();
    listing.pages.push(ListingPage {
        number: 1,
        posts: summarize(&first.results),
        next_page: first.next_page,
    });

    while let Some(url) = cursor.take() {
        if !visited.insert(url.clone()) {
            warn!("pagination cursor repeats {url}; stopping");
            clear_last_cursor(&mut listing);
            break;
        }
        debug!("following cursor {url}");
        let response = match source.follow(&url) {
            Ok(response) => response,
            Err(err) if policy == CursorPolicy::Lenient => {
                warn!(
                    "failed to fetch listing page {}: {err}; listing truncated",
                    listing.pages.len() + 1
                );
                clear_last_cursor(&mut listing);
                listing.truncated = true;
                break;
            }
            Err(err) => return Err(err),
        };
        cursor = response.next_page.clone();
        listing.pages.push(ListingPage {
            number: listing.pages.len() as u32 + 1,
            posts: summarize(&response.results),
            next_page: response.next_page,
        });
    }

    Ok(listing)
}

fn clear_last_cursor(listing: &mut Listing) {
    if let Some(last) = listing.pages.last_mut() {
        last.next_page = None;
    }
}

/// Run `query` and return every document across all pages.
///
/// Used to enumerate every post. Any failure is an error: a partial
/// enumeration would silently drop post pages.
pub fn collect_all<S: ContentSource + ?Sized>(
    source: &S,
    query: &Query,
) -> Result<Vec<Document>, ApiError> {
    let first = source.query(query)?;
    let mut documents = first.results;
    let mut cursor = first.next_page;
    let mut visited = HashSet::new();

    while let Some(url) = cursor.take() {
        if !visited.insert(url.clone()) {
            warn!("pagination cursor repeats {url}; stopping");
            break;
        }
        let response = source.follow(&url)?;
        documents.extend(response.results);
        cursor = response.next_page;
    }

    Ok(documents)
}
