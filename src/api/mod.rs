//! Content API access.
//!
//! | Piece | Role |
//! |---|---|
//! | [`Query`] | search predicates, paging, `after` cursor, orderings |
//! | [`ContentSource`] | search / follow cursor / get by uid |
//! | [`HttpSource`] | live API over HTTP (ureq), pinned to the master ref |
//! | [`FixtureSource`] | JSON snapshot served from memory |

pub mod fixture_source;
pub mod http_source;
pub mod query;
pub mod source;

pub use fixture_source::FixtureSource;
pub use http_source::HttpSource;
pub use query::{Ordering, Predicate, Query};
pub use source::{ApiError, ContentSource};
