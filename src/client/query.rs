//! Query predicates and wire types for the content API

use serde::Deserialize;

/// A single query predicate
///
/// Predicates are rendered into the API's bracketed query syntax, e.g.
/// `[at(document.type, "posts")]`. Date comparisons are strict.
#[derive(Debug, Clone)]
pub enum Predicate {
    /// Exact match on a document path
    At { path: String, value: String },
    /// Publication date strictly after the given ISO timestamp
    DateAfter { path: String, value: String },
    /// Publication date strictly before the given ISO timestamp
    DateBefore { path: String, value: String },
}

impl Predicate {
    /// Match on the document type
    pub fn document_type(doc_type: &str) -> Self {
        Predicate::At {
            path: "document.type".to_string(),
            value: doc_type.to_string(),
        }
    }

    /// Match on a document's unique slug
    pub fn uid(doc_type: &str, uid: &str) -> Self {
        Predicate::At {
            path: format!("my.{}.uid", doc_type),
            value: uid.to_string(),
        }
    }

    /// First publication strictly after the anchor timestamp
    pub fn published_after(anchor: &str) -> Self {
        Predicate::DateAfter {
            path: "document.first_publication_date".to_string(),
            value: anchor.to_string(),
        }
    }

    /// First publication strictly before the anchor timestamp
    pub fn published_before(anchor: &str) -> Self {
        Predicate::DateBefore {
            path: "document.first_publication_date".to_string(),
            value: anchor.to_string(),
        }
    }

    fn render(&self) -> String {
        match self {
            Predicate::At { path, value } => format!(r#"[at({}, "{}")]"#, path, value),
            Predicate::DateAfter { path, value } => {
                format!(r#"[date.after({}, "{}")]"#, path, value)
            }
            Predicate::DateBefore { path, value } => {
                format!(r#"[date.before({}, "{}")]"#, path, value)
            }
        }
    }
}

/// Render a predicate list into a single `q` parameter
pub fn render_query(predicates: &[Predicate]) -> String {
    let inner: String = predicates.iter().map(|p| p.render()).collect();
    format!("[{}]", inner)
}

/// Options applied to a search query
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Maximum number of documents per page
    pub page_size: Option<usize>,
    /// Field projection, e.g. `posts.title`; empty means full documents
    pub fetch: Vec<String>,
    /// Explicit result ordering, e.g. `[document.first_publication_date]`
    pub orderings: Option<String>,
    /// Draft revision to query instead of the published one
    pub preview_ref: Option<String>,
}

/// One page of search results
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    pub page: u32,
    pub results_per_page: u32,
    pub total_results_size: u64,
    pub total_pages: u32,
    pub next_page: Option<String>,
    pub prev_page: Option<String>,
    pub results: Vec<Document>,
}

/// A raw document from the content API
///
/// `data` stays untyped here; the content layer projects it into
/// [`crate::content::PostSummary`] / [`crate::content::PostDetail`].
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub id: String,
    pub uid: Option<String>,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub first_publication_date: Option<String>,
    pub last_publication_date: Option<String>,
    pub data: serde_json::Value,
}

/// The API root, listing available revisions
#[derive(Debug, Deserialize)]
pub struct ApiRoot {
    pub refs: Vec<ApiRef>,
}

/// A content revision pointer
#[derive(Debug, Deserialize)]
pub struct ApiRef {
    pub id: String,
    #[serde(rename = "ref")]
    pub reference: String,
    #[serde(rename = "isMasterRef", default)]
    pub is_master_ref: bool,
}
