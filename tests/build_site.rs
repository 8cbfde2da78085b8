//! End-to-end build over the fixture snapshot: fetch → manifest.json →
//! generate → dist/, through the public library API only.

use space_traveling::api::FixtureSource;
use space_traveling::config;
use space_traveling::fetch::{self, Manifest};
use space_traveling::generate;
use space_traveling::pagination::CursorPolicy;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

fn build(site: &Path, out: &Path) -> Manifest {
    let site_config = config::load_config(site).unwrap();
    let source = FixtureSource::load(&fixtures_dir().join("api/documents.json")).unwrap();
    let manifest = fetch::fetch(&source, &site_config, CursorPolicy::Strict).unwrap();

    let manifest_path = out.join("manifest.json");
    fs::write(
        &manifest_path,
        serde_json::to_string_pretty(&manifest).unwrap(),
    )
    .unwrap();
    generate::generate(&manifest_path, &out.join("dist"), site).unwrap();
    manifest
}

fn read(out: &Path, file: &str) -> String {
    fs::read_to_string(out.join("dist").join(file))
        .unwrap_or_else(|e| panic!("reading {file}: {e}"))
}

#[test]
fn builds_listing_and_post_pages() {
    let out = TempDir::new().unwrap();
    let manifest = build(&fixtures_dir().join("site"), out.path());

    assert_eq!(manifest.listing.len(), 3);
    assert_eq!(manifest.posts.len(), 3);

    let index = read(out.path(), "index.html");
    assert!(index.contains("Mapas com React usando Leaflet"));
    assert!(index.contains(r#"href="/page/2/""#));

    let last = read(out.path(), "page/3/index.html");
    assert!(last.contains("Como utilizar Hooks"));
    assert!(!last.contains(r#"class="load-more""#));

    assert!(out.path().join("dist/images/logo.svg").exists());
}

#[test]
fn post_page_carries_derived_values() {
    let out = TempDir::new().unwrap();
    let manifest = build(&fixtures_dir().join("site"), out.path());

    let entry = manifest.find_post("criando-um-app-cra-do-zero").unwrap();
    let html = read(out.path(), "post/criando-um-app-cra-do-zero/index.html");

    assert!(html.contains(&format!("{} min", entry.read_time)));
    assert!(html.contains("25 mar 2021"));
    assert!(html.contains("*editado em 26 mar 2021, às 10:02"));
    assert!(html.contains(r#"href="/post/como-utilizar-hooks/""#));
    assert!(html.contains(r#"href="/post/mapas-com-react-usando-leaflet/""#));
    assert!(html.contains(r#"repo="spacetraveling/comments""#));
}

#[test]
fn pages_outside_the_post_type_are_not_rendered() {
    let out = TempDir::new().unwrap();
    build(&fixtures_dir().join("site"), out.path());
    assert!(!out.path().join("dist/post/sobre").exists());
}

#[test]
fn site_without_config_uses_stock_defaults() {
    let site = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let manifest = build(site.path(), out.path());

    assert_eq!(manifest.config.api.page_size, 1);
    let html = read(out.path(), "post/como-utilizar-hooks/index.html");
    assert!(html.contains(r#"repo="justin1508/spaceTraveling""#));
    assert!(html.contains("<title>Como utilizar Hooks | spaceTraveling</title>"));
}
