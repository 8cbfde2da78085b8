//! HTML site generation.
//!
//! Stage 2 of the build pipeline. Takes the fetch manifest and generates the
//! final static HTML site.
//!
//! ## Generated Pages
//!
//! - **Listing pages** (`/index.html`, `/page/{n}/index.html`): post summaries
//!   with date and author, plus a "load more" link while more pages exist
//! - **Post pages** (`/post/{uid}/index.html`): banner, title, date, author,
//!   reading time, edit notice, content, prev/next suggestions, comments
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                       # Listing page 1
//! ├── page/
//! │   └── 2/index.html                 # Listing page 2, ...
//! ├── post/
//! │   └── como-utilizar-hooks/index.html
//! └── images/logo.svg                  # Copied from <site>/assets/
//! ```
//!
//! ## CSS
//!
//! `static/style.css` is embedded at compile time and inlined in every page,
//! prefixed with the color variables generated from config. The stylesheet
//! comes from the binary and the site owner's config, so it is written
//! unescaped.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Every API string is interpolated through maud and therefore escaped.

use crate::comments;
use crate::config::{self, ConfigError, SiteConfig};
use crate::dates;
use crate::fetch::{Manifest, PostEntry};
use crate::pagination::ListingPage;
use crate::types::{PostLink, PostSummary, is_safe_uid, post_path};
use chrono::Locale;
use log::{info, warn};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Asset copy failed: {0}")]
    Walk(#[from] walkdir::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Name of the directory under the site root copied verbatim to the output.
pub const ASSETS_DIR: &str = "assets";

/// Output file of listing page `number` (1-based).
pub fn listing_page_file(number: u32) -> String {
    if number <= 1 {
        "index.html".to_string()
    } else {
        format!("page/{number}/index.html")
    }
}

/// URL of listing page `number` (1-based).
pub fn listing_page_url(number: u32) -> String {
    if number <= 1 {
        "/".to_string()
    } else {
        format!("/page/{number}/")
    }
}

/// Output file of a post page.
pub fn post_page_file(uid: &str) -> String {
    format!("post/{uid}/index.html")
}

/// Everything pages share: config, resolved locale, and the inlined CSS.
pub struct Theme<'a> {
    pub config: &'a SiteConfig,
    pub locale: Locale,
    pub css: String,
}

impl<'a> Theme<'a> {
    pub fn new(config: &'a SiteConfig) -> Result<Self, ConfigError> {
        let color_css = config::generate_color_css(&config.colors);
        Ok(Self {
            config,
            locale: config.site.locale()?,
            css: format!("{}\n\n{}", color_css, CSS_STATIC),
        })
    }

    fn date(&self, raw: Option<&str>) -> Option<String> {
        dates::format_date(raw, &self.config.site.date_format, self.locale)
    }

    fn page_title(&self, title: &str) -> String {
        format!("{} | {}", title, self.config.site.title)
    }

    fn html_lang(&self) -> String {
        self.config.site.locale.replace('_', "-")
    }
}

/// Read the manifest at `manifest_path` and render it. Returns the manifest
/// for reporting.
pub fn generate(
    manifest_path: &Path,
    output_dir: &Path,
    site_dir: &Path,
) -> Result<Manifest, GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&manifest_content)?;
    generate_site(&manifest, output_dir, site_dir)?;
    Ok(manifest)
}

/// Render every page of `manifest` into `output_dir`.
pub fn generate_site(
    manifest: &Manifest,
    output_dir: &Path,
    site_dir: &Path,
) -> Result<(), GenerateError> {
    let theme = Theme::new(&manifest.config)?;
    fs::create_dir_all(output_dir)?;

    let assets = site_dir.join(ASSETS_DIR);
    if assets.is_dir() {
        copy_assets(&assets, output_dir)?;
    }

    for page in &manifest.listing {
        let file = listing_page_file(page.number);
        write_page(output_dir, &file, render_listing_page(page, &theme))?;
        info!("generated {file}");
    }

    for entry in &manifest.posts {
        // Manifests can be edited by hand between stages.
        if !is_safe_uid(&entry.post.uid) {
            warn!("skipping post with unusable uid {:?}", entry.post.uid);
            continue;
        }
        let file = post_page_file(&entry.post.uid);
        write_page(output_dir, &file, render_post_page(entry, &theme))?;
        info!("generated {file}");
    }

    Ok(())
}

fn write_page(output_dir: &Path, file: &str, markup: Markup) -> std::io::Result<()> {
    let path = output_dir.join(file);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, markup.into_string())
}

fn copy_assets(src: &Path, dst: &Path) -> Result<(), GenerateError> {
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, theme: &Theme, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(theme.html_lang()) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(&theme.css)) }
            }
            body {
                (site_header(&theme.config.site.logo))
                (content)
            }
        }
    }
}

/// Renders the site header: the logo linking home.
fn site_header(logo: &str) -> Markup {
    html! {
        header.header-container {
            div.header-content {
                nav {
                    a href="/" {
                        img src=(logo) alt="logo";
                    }
                }
            }
        }
    }
}

/// Date and author line shared by listing cards and post pages.
fn post_info(date: Option<String>, author: &str) -> Markup {
    html! {
        @if let Some(date) = date {
            span.info-date { time { (date) } }
        }
        @if !author.is_empty() {
            span.info-author { (author) }
        }
    }
}

fn post_card(post: &PostSummary, theme: &Theme) -> Markup {
    html! {
        a.post-card href=(post_path(&post.uid)) {
            strong { (post.title) }
            @if !post.subtitle.is_empty() {
                p { (post.subtitle) }
            }
            div.info {
                (post_info(theme.date(post.first_publication_date.as_deref()), &post.author))
            }
        }
    }
}

fn suggestion(link: &PostLink, label: &str, class: &str) -> Markup {
    html! {
        div class=(class) {
            p { (link.title) }
            a href=(post_path(&link.uid)) { (label) }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders one listing page of post summaries.
pub fn render_listing_page(page: &ListingPage, theme: &Theme) -> Markup {
    let site = &theme.config.site;
    let title = if page.number <= 1 {
        theme.page_title("Home")
    } else {
        theme.page_title(&format!("Home, page {}", page.number))
    };

    let content = html! {
        main.container {
            div.posts {
                @for post in &page.posts {
                    (post_card(post, theme))
                }
                @if page.has_next() {
                    a.load-more href=(listing_page_url(page.number + 1)) {
                        (site.load_more_label)
                    }
                }
            }
        }
    };

    base_document(&title, theme, content)
}

/// Renders a post page.
pub fn render_post_page(entry: &PostEntry, theme: &Theme) -> Markup {
    let post = &entry.post;
    let site = &theme.config.site;
    let edited = dates::is_edited(
        post.first_publication_date.as_deref(),
        post.last_publication_date.as_deref(),
    )
    .then(|| {
        dates::format_date(
            post.last_publication_date.as_deref(),
            &site.edited_format,
            theme.locale,
        )
    })
    .flatten();

    let content = html! {
        main.post-container {
            @if let Some(banner) = &post.banner_url {
                img.banner src=(banner) alt=(post.title);
            }
            article.post {
                h1 { (post.title) }
                section.info {
                    (post_info(theme.date(post.first_publication_date.as_deref()), &post.author))
                    span.info-read-time { (entry.read_time) " min" }
                }
                @if let Some(edited) = edited {
                    span.edited { (edited) }
                }
                @for block in &post.content {
                    div.post-content {
                        @if !block.heading.is_empty() {
                            h2 { (block.heading) }
                        }
                        @for span in &block.body {
                            p { (span.text) }
                        }
                    }
                }
            }
            @if entry.neighbors.prev.is_some() || entry.neighbors.next.is_some() {
                section.suggestions {
                    @if let Some(prev) = &entry.neighbors.prev {
                        (suggestion(prev, &site.prev_label, "suggestion-prev"))
                    }
                    @if let Some(next) = &entry.neighbors.next {
                        (suggestion(next, &site.next_label, "suggestion-next"))
                    }
                }
            }
            (comments::comments_widget(&theme.config.comments))
        }
    };

    base_document(&theme.page_title(&post.title), theme, content)
}

// ============================================================================
// Tests
// ============================================================================
