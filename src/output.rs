//! CLI output formatting for the pipeline stages.
//!
//! Output leads with what the reader cares about (post titles and their
//! position) and shows uids, dates and neighbors as indented context lines.
//!
//! # Output Format
//!
//! ## Fetch
//!
//! ```text
//! Listing
//! 001 Page 1 (1 post)
//!     001 Mapas com React usando Leaflet
//! 002 Page 2 (1 post)
//!     001 Criando um app CRA do zero
//!
//! Posts
//! 001 Mapas com React usando Leaflet (1 min)
//!     Uid: mapas-com-react-usando-leaflet
//!     Published: 2021-04-02T10:13:40+0000
//!     Prev: criando-um-app-cra-do-zero
//! ```
//!
//! ## Generate
//!
//! ```text
//! Page 1 → index.html
//! Page 2 → page/2/index.html
//!
//! Posts
//! 001 Mapas com React usando Leaflet → post/mapas-com-react-usando-leaflet/index.html
//!
//! Generated 2 listing pages, 1 post page
//! ```
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout.

use crate::fetch::Manifest;
use crate::generate::{listing_page_file, post_page_file};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Format fetch stage output: listing pages, then every post with context.
pub fn format_fetch_output(manifest: &Manifest) -> Vec<String> {
    let mut lines = vec!["Listing".to_string()];

    for page in &manifest.listing {
        lines.push(format!(
            "{} Page {} ({})",
            format_index(page.number as usize),
            page.number,
            plural(page.posts.len(), "post")
        ));
        for (i, post) in page.posts.iter().enumerate() {
            lines.push(format!("    {} {}", format_index(i + 1), post.title));
        }
    }
    if manifest.listing_truncated {
        lines.push("    (listing truncated: a page cursor failed)".to_string());
    }

    lines.push(String::new());
    lines.push("Posts".to_string());
    for (i, entry) in manifest.posts.iter().enumerate() {
        let post = &entry.post;
        lines.push(format!(
            "{} {} ({} min)",
            format_index(i + 1),
            post.title,
            entry.read_time
        ));
        lines.push(format!("    Uid: {}", post.uid));
        if let Some(date) = &post.first_publication_date {
            lines.push(format!("    Published: {}", date));
        }
        if let Some(prev) = &entry.neighbors.prev {
            lines.push(format!("    Prev: {}", prev.uid));
        }
        if let Some(next) = &entry.neighbors.next {
            lines.push(format!("    Next: {}", next.uid));
        }
    }

    lines
}

pub fn print_fetch_output(manifest: &Manifest) {
    for line in format_fetch_output(manifest) {
        println!("{}", line);
    }
}

/// Format generate stage output: each page with `→` and its output file.
pub fn format_generate_output(manifest: &Manifest) -> Vec<String> {
    let mut lines = Vec::new();

    for page in &manifest.listing {
        lines.push(format!(
            "Page {} \u{2192} {}",
            page.number,
            listing_page_file(page.number)
        ));
    }

    if !manifest.posts.is_empty() {
        lines.push(String::new());
        lines.push("Posts".to_string());
        for (i, entry) in manifest.posts.iter().enumerate() {
            lines.push(format!(
                "{} {} \u{2192} {}",
                format_index(i + 1),
                entry.post.title,
                post_page_file(&entry.post.uid)
            ));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}",
        plural(manifest.listing.len(), "listing page"),
        plural(manifest.posts.len(), "post page")
    ));

    lines
}

pub fn print_generate_output(manifest: &Manifest) {
    for line in format_generate_output(manifest) {
        println!("{}", line);
    }
}
