//! Shared test utilities for the space-traveling test suite.
//!
//! Provides fixture loading, a one-call fetch over the fixture snapshot, and
//! lookup helpers over the resulting [`Manifest`].
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let manifest = fetch_fixtures(&SiteConfig::default());
//! let post = find_post(&manifest, "como-utilizar-hooks");
//! assert_eq!(post.post.author, "Joseph Oliveira");
//! ```

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::api::FixtureSource;
use crate::config::SiteConfig;
use crate::fetch::{self, Manifest, PostEntry};
use crate::pagination::CursorPolicy;

// =========================================================================
// Fixture setup
// =========================================================================

/// Path of the API snapshot under `fixtures/api/`.
pub fn fixture_documents_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/api/documents.json")
}

/// Load the API snapshot as a content source.
pub fn fixture_source() -> FixtureSource {
    FixtureSource::load(&fixture_documents_path()).unwrap()
}

/// Run the fetch stage over the snapshot.
pub fn fetch_fixtures(config: &SiteConfig) -> Manifest {
    fetch::fetch(&fixture_source(), config, CursorPolicy::Strict).unwrap()
}

/// Copy `fixtures/site/` (config + assets) to a temp directory and return it.
pub fn setup_site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Manifest lookups (panic with the available uids on miss)
// =========================================================================

/// Find a post by uid. Panics if not found.
pub fn find_post<'a>(manifest: &'a Manifest, uid: &str) -> &'a PostEntry {
    manifest.find_post(uid).unwrap_or_else(|| {
        let uids = post_uids(manifest);
        panic!("post '{uid}' not found. Available: {uids:?}")
    })
}

/// All post uids in manifest order.
pub fn post_uids(manifest: &Manifest) -> Vec<&str> {
    manifest.posts.iter().map(|p| p.post.uid.as_str()).collect()
}

/// Uids on each listing page, in page order.
pub fn listing_uids(manifest: &Manifest) -> Vec<Vec<&str>> {
    manifest
        .listing
        .iter()
        .map(|page| page.posts.iter().map(|p| p.uid.as_str()).collect())
        .collect()
}
