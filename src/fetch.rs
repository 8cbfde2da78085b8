//! Content fetching and manifest generation.
//!
//! Stage 1 of the build pipeline. Queries the content API and produces a
//! [`Manifest`] holding everything the generate stage renders, so a build can
//! be inspected (and regenerated) without touching the network again.
//!
//! ## Requests
//!
//! ```text
//! listing   q=[[at(document.type,"post")]]  fetch=post.title,post.subtitle,post.author  pageSize=api.page_size
//!           + every next_page cursor
//! paths     q=[[at(document.type,"post")]]  pageSize=api.paths_page_size  + every cursor
//! details   q=[[at(document.type,"post")][at(my.post.uid,"<uid>")]]  one per post, in parallel
//! ```
//!
//! Reading time and prev/next neighbors are computed here from the fetched
//! details.

use crate::api::{ApiError, ContentSource, Predicate, Query};
use crate::config::SiteConfig;
use crate::neighbors;
use crate::pagination::{self, CursorPolicy, ListingPage};
use crate::reading;
use crate::types::{Neighbors, Post, is_safe_uid};
use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    #[error("Failed to fetch post {uid:?}: {source}")]
    Detail {
        uid: String,
        #[source]
        source: ApiError,
    },
}

/// Manifest output from the fetch stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub listing: Vec<ListingPage>,
    /// A listing cursor failed; later listing pages are missing.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub listing_truncated: bool,
    pub posts: Vec<PostEntry>,
    pub config: SiteConfig,
}

/// A post with its derived display values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostEntry {
    #[serde(flatten)]
    pub post: Post,
    pub word_count: usize,
    /// Minutes, rounded up.
    pub read_time: u32,
    #[serde(default)]
    pub neighbors: Neighbors,
}

impl Manifest {
    pub fn find_post(&self, uid: &str) -> Option<&PostEntry> {
        self.posts.iter().find(|p| p.post.uid == uid)
    }
}

/// The three display fields the listing needs.
fn listing_fields(doc_type: &str) -> [String; 3] {
    ["title", "subtitle", "author"].map(|f| format!("{doc_type}.{f}"))
}

pub fn listing_query(config: &SiteConfig) -> Query {
    let doc_type = &config.api.document_type;
    Query::new(Predicate::document_type(doc_type))
        .fetch(listing_fields(doc_type))
        .page_size(config.api.page_size)
}

pub fn paths_query(config: &SiteConfig) -> Query {
    let doc_type = &config.api.document_type;
    Query::new(Predicate::document_type(doc_type))
        .fetch(listing_fields(doc_type))
        .page_size(config.api.paths_page_size)
}

/// Fetch the listing, every post, and derive display values.
pub fn fetch<S: ContentSource + ?Sized>(
    source: &S,
    config: &SiteConfig,
    policy: CursorPolicy,
) -> Result<Manifest, FetchError> {
    let doc_type = config.api.document_type.as_str();

    let listing = pagination::collect_listing(source, &listing_query(config), policy)?;
    info!(
        "listing: {} page(s){}",
        listing.pages.len(),
        if listing.truncated { ", truncated" } else { "" }
    );

    let documents = pagination::collect_all(source, &paths_query(config))?;
    let mut seen = HashSet::new();
    let uids: Vec<String> = documents
        .into_iter()
        .filter_map(|doc| match doc.uid {
            Some(uid) if is_safe_uid(&uid) => Some(uid),
            uid => {
                warn!("skipping document {} without a usable uid ({uid:?})", doc.id);
                None
            }
        })
        .filter(|uid| seen.insert(uid.clone()))
        .collect();
    info!("found {} post(s)", uids.len());

    let posts: Vec<Post> = uids
        .par_iter()
        .map(|uid| {
            source
                .get_by_uid(doc_type, uid)
                .map_err(|err| FetchError::Detail {
                    uid: uid.clone(),
                    source: err,
                })
        })
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .filter_map(Post::from_document)
        .collect();

    for page in &listing.pages {
        for summary in &page.posts {
            if !seen.contains(&summary.uid) {
                warn!("listed post {} has no detail page", summary.uid);
            }
        }
    }

    let mut neighbors = neighbors::resolve_all(&posts);
    let wpm = config.reading.words_per_minute;
    let posts = posts
        .into_iter()
        .map(|post| {
            let word_count = reading::count_words(&post.content);
            PostEntry {
                read_time: reading::read_time_minutes(word_count, wpm),
                word_count,
                neighbors: neighbors.remove(&post.uid).unwrap_or_default(),
                post,
            }
        })
        .collect();

    Ok(Manifest {
        listing: listing.pages,
        listing_truncated: listing.truncated,
        posts,
        config: config.clone(),
    })
}
