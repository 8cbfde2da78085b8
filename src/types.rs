//! Shared types passed between the fetch and generate stages.
//!
//! The API-facing types mirror the content API's JSON response shapes. Every
//! post field defaults when absent so drafts with empty fields still map.
//! The display-facing types ([`PostSummary`], [`Post`], [`Neighbors`]) are
//! what the manifest stores.

use serde::{Deserialize, Serialize};

// ============================================================================
// API response shapes
// ============================================================================

/// One page of a document search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    pub page: u32,
    pub results_per_page: u32,
    pub results_size: u32,
    pub total_results_size: u32,
    pub total_pages: u32,
    /// Cursor URL of the following page; `None` on the last page.
    pub next_page: Option<String>,
    pub prev_page: Option<String>,
    pub results: Vec<Document>,
}

/// A document as returned by the content API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(rename = "type", default)]
    pub doc_type: String,
    #[serde(default)]
    pub first_publication_date: Option<String>,
    #[serde(default)]
    pub last_publication_date: Option<String>,
    #[serde(default)]
    pub data: PostData,
}

/// Custom fields of a post document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostData {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub banner: Banner,
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Banner {
    pub url: Option<String>,
}

/// A section of a post: a heading followed by rich-text paragraphs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentBlock {
    pub heading: String,
    pub body: Vec<TextSpan>,
}

/// A rich-text element. Only the plain text is kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextSpan {
    pub text: String,
}

// ============================================================================
// Display types
// ============================================================================

/// A post as shown on the listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    pub uid: String,
    pub first_publication_date: Option<String>,
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

impl PostSummary {
    /// Map a listing document. Documents without a usable uid cannot be
    /// linked to and yield `None`.
    pub fn from_document(doc: &Document) -> Option<Self> {
        let uid = doc.uid.clone().filter(|u| is_safe_uid(u))?;
        Some(Self {
            uid,
            first_publication_date: doc.first_publication_date.clone(),
            title: doc.data.title.clone(),
            subtitle: doc.data.subtitle.clone(),
            author: doc.data.author.clone(),
        })
    }
}

/// A fully fetched post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub uid: String,
    pub first_publication_date: Option<String>,
    pub last_publication_date: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner_url: Option<String>,
    pub author: String,
    pub content: Vec<ContentBlock>,
}

impl Post {
    /// Map a detail document. `None` if the document has no usable uid.
    pub fn from_document(doc: Document) -> Option<Self> {
        let uid = doc.uid.filter(|u| is_safe_uid(u))?;
        Some(Self {
            id: doc.id,
            uid,
            first_publication_date: doc.first_publication_date,
            last_publication_date: doc.last_publication_date,
            title: doc.data.title,
            banner_url: doc.data.banner.url.filter(|u| !u.is_empty()),
            author: doc.data.author,
            content: doc.data.content,
        })
    }
}

/// Link target for a prev/next suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostLink {
    pub uid: String,
    pub title: String,
}

/// Posts published immediately before and after a given post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<PostLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<PostLink>,
}

/// Whether `uid` can name a post directory: non-empty, a single path
/// segment, and free of `..`.
pub fn is_safe_uid(uid: &str) -> bool {
    !uid.is_empty() && uid != "." && !uid.contains("..") && !uid.contains(['/', '\\'])
}

/// URL path of a post page.
pub fn post_path(uid: &str) -> String {
    format!("/post/{uid}/")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_JSON: &str = r#"{
        "page": 1,
        "results_per_page": 1,
        "results_size": 1,
        "total_results_size": 2,
        "total_pages": 2,
        "next_page": "https://example.cdn.prismic.io/api/v2/documents/search?page=2",
        "prev_page": null,
        "results": [{
            "id": "YFzA",
            "uid": "como-utilizar-hooks",
            "type": "post",
            "first_publication_date": "2021-03-15T19:25:28+0000",
            "last_publication_date": "2021-03-15T19:25:28+0000",
            "tags": [],
            "data": {
                "title": "Como utilizar Hooks",
                "subtitle": "Pensando em sincronização em vez de ciclos de vida",
                "author": "Joseph Oliveira"
            }
        }]
    }"#;

    #[test]
    fn search_response_parses_listing_shape() {
        let resp: SearchResponse = serde_json::from_str(SEARCH_JSON).unwrap();
        assert_eq!(resp.total_pages, 2);
        assert!(resp.next_page.is_some());
        assert!(resp.prev_page.is_none());
        let doc = &resp.results[0];
        assert_eq!(doc.doc_type, "post");
        assert_eq!(doc.data.author, "Joseph Oliveira");
        // Fields not requested by the listing default
        assert!(doc.data.content.is_empty());
        assert!(doc.data.banner.url.is_none());
    }

    #[test]
    fn summary_from_document() {
        let resp: SearchResponse = serde_json::from_str(SEARCH_JSON).unwrap();
        let summary = PostSummary::from_document(&resp.results[0]).unwrap();
        assert_eq!(summary.uid, "como-utilizar-hooks");
        assert_eq!(summary.title, "Como utilizar Hooks");
        assert_eq!(
            summary.first_publication_date.as_deref(),
            Some("2021-03-15T19:25:28+0000")
        );
    }

    #[test]
    fn summary_requires_uid() {
        let doc = Document {
            id: "x".to_string(),
            uid: None,
            ..Default::default()
        };
        assert!(PostSummary::from_document(&doc).is_none());

        let doc = Document {
            id: "x".to_string(),
            uid: Some(String::new()),
            ..Default::default()
        };
        assert!(PostSummary::from_document(&doc).is_none());
    }

    #[test]
    fn post_from_detail_document() {
        let json = r#"{
            "id": "YFzB",
            "uid": "criando-um-app-cra-do-zero",
            "type": "post",
            "first_publication_date": "2021-03-25T19:27:35+0000",
            "last_publication_date": "2021-03-26T10:02:00+0000",
            "data": {
                "title": "Criando um app CRA do zero",
                "banner": { "url": "https://images.prismic.io/banner.png", "alt": null },
                "author": "Danilo Vieira",
                "content": [
                    { "heading": "Proin et varius", "body": [ { "type": "paragraph", "text": "Lorem ipsum", "spans": [] } ] }
                ]
            }
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        let post = Post::from_document(doc).unwrap();
        assert_eq!(post.id, "YFzB");
        assert_eq!(
            post.banner_url.as_deref(),
            Some("https://images.prismic.io/banner.png")
        );
        assert_eq!(post.content[0].heading, "Proin et varius");
        assert_eq!(post.content[0].body[0].text, "Lorem ipsum");
    }

    #[test]
    fn empty_banner_url_is_none() {
        let mut doc = Document {
            id: "a".to_string(),
            uid: Some("a".to_string()),
            ..Default::default()
        };
        doc.data.banner.url = Some(String::new());
        assert!(Post::from_document(doc).unwrap().banner_url.is_none());
    }

    #[test]
    fn uid_must_be_a_single_path_segment() {
        assert!(is_safe_uid("como-utilizar-hooks"));
        assert!(is_safe_uid("v1.2-release"));
        for bad in ["", ".", "..", "../../escaped", "a/b", "a\\b", "/etc", "x..y"] {
            assert!(!is_safe_uid(bad), "{bad:?} accepted");
        }
    }

    #[test]
    fn traversal_uid_is_not_mapped() {
        let doc = Document {
            id: "x".to_string(),
            uid: Some("../../escaped".to_string()),
            doc_type: "post".to_string(),
            ..Default::default()
        };
        assert!(PostSummary::from_document(&doc).is_none());
        assert!(Post::from_document(doc).is_none());
    }

    #[test]
    fn post_path_format() {
        assert_eq!(post_path("hello"), "/post/hello/");
    }
}
