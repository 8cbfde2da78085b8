//! # Space Traveling
//!
//! A static blog generator. Articles live in a headless content API
//! (Prismic REST v2); this crate fetches them and renders a paginated listing
//! plus one page per post, with reading time, prev/next links and an
//! utterances comment widget.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Fetch     content API  →  manifest.json   (API responses → structured data)
//! 2. Generate  manifest     →  dist/           (final HTML site)
//! ```
//!
//! The manifest is human-readable JSON: a build can be inspected, and
//! regenerated after a template change without touching the network.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`fetch`] | Stage 1: listing, static paths, post details, derived values |
//! | [`generate`] | Stage 2: renders the HTML site from the manifest using Maud |
//! | [`api`] | Content source trait, query builder, HTTP and fixture sources |
//! | [`pagination`] | Follows `next_page` cursors into numbered listing pages |
//! | [`reading`] | Word count and reading time |
//! | [`neighbors`] | Previous/next post resolution |
//! | [`dates`] | Timestamp parsing and localized formatting |
//! | [`comments`] | utterances widget markup |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`types`] | API response shapes and the post types serialized between stages |
//! | [`output`] | CLI output formatting for both stages |
//! | [`logging`] | `env_logger` setup |
//!
//! # Offline Builds
//!
//! `--fixtures <file>` swaps the live API for a JSON snapshot of documents
//! ([`api::FixtureSource`]). The snapshot answers the same queries, cursors
//! included, so the whole pipeline runs without network access.

pub mod api;
pub mod comments;
pub mod config;
pub mod dates;
pub mod fetch;
pub mod generate;
pub mod logging;
pub mod neighbors;
pub mod output;
pub mod pagination;
pub mod reading;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
