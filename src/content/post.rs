//! Post models
//!
//! Read-only projections of documents owned by the content API. They are
//! rebuilt on every generation cycle and never mutated locally.

use serde::{Deserialize, Serialize};

use crate::client::Document;
use crate::content::richtext::Block;
use crate::content::Adjacent;
use crate::error::Result;
use crate::helpers::reading_time;

/// Document identity
///
/// The upstream uid is optional; absence is an explicit variant rather
/// than a silent positional fallback, so an unidentified post can never
/// collide with a real one across reloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PostId {
    Identified(String),
    Unidentified,
}

impl PostId {
    pub fn from_uid(uid: Option<String>) -> Self {
        match uid {
            Some(uid) if !uid.is_empty() => PostId::Identified(uid),
            _ => PostId::Unidentified,
        }
    }

    /// The uid when one exists; unidentified posts cannot be linked to
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PostId::Identified(uid) => Some(uid.as_str()),
            PostId::Unidentified => None,
        }
    }
}

/// A post as it appears in the listing
#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    pub id: PostId,
    /// ISO timestamp as delivered by the API
    pub first_publication_date: Option<String>,
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

#[derive(Debug, Deserialize)]
struct SummaryData {
    #[serde(default)]
    title: String,
    #[serde(default)]
    subtitle: String,
    #[serde(default)]
    author: String,
}

impl PostSummary {
    /// Project a raw document into a listing entry
    pub fn from_document(doc: &Document) -> Result<Self> {
        let data: SummaryData = serde_json::from_value(doc.data.clone())?;
        Ok(Self {
            id: PostId::from_uid(doc.uid.clone()),
            first_publication_date: doc.first_publication_date.clone(),
            title: data.title,
            subtitle: data.subtitle,
            author: data.author,
        })
    }
}

/// A heading plus its rich-text body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentSection {
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub body: Vec<Block>,
}

/// Link to a chronologically adjacent post
#[derive(Debug, Clone, Serialize)]
pub struct AdjacentLink {
    pub uid: String,
    pub title: String,
}

/// A fully-fetched post
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    pub id: PostId,
    pub first_publication_date: Option<String>,
    pub last_publication_date: Option<String>,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub banner_url: String,
    pub content: Vec<ContentSection>,
    pub next_post: Option<AdjacentLink>,
    pub prev_post: Option<AdjacentLink>,
}

#[derive(Debug, Deserialize)]
struct DetailData {
    #[serde(default)]
    title: String,
    #[serde(default)]
    subtitle: String,
    #[serde(default)]
    author: String,
    banner: Option<BannerData>,
    #[serde(default)]
    content: Vec<ContentSection>,
}

#[derive(Debug, Deserialize)]
struct BannerData {
    #[serde(default)]
    url: String,
}

impl PostDetail {
    /// Project a raw document into a full post; adjacency starts empty
    pub fn from_document(doc: &Document) -> Result<Self> {
        let data: DetailData = serde_json::from_value(doc.data.clone())?;
        Ok(Self {
            id: PostId::from_uid(doc.uid.clone()),
            first_publication_date: doc.first_publication_date.clone(),
            last_publication_date: doc.last_publication_date.clone(),
            title: data.title,
            subtitle: data.subtitle,
            author: data.author,
            banner_url: data.banner.map(|b| b.url).unwrap_or_default(),
            content: data.content,
            next_post: None,
            prev_post: None,
        })
    }

    /// Attach resolved neighbors
    pub fn set_adjacent(&mut self, adjacent: Adjacent) {
        self.next_post = adjacent.next.map(|c| AdjacentLink {
            uid: c.uid,
            title: c.title,
        });
        self.prev_post = adjacent.prev.map(|c| AdjacentLink {
            uid: c.uid,
            title: c.title,
        });
    }

    /// Estimated reading time in minutes
    pub fn reading_minutes(&self) -> usize {
        reading_time::estimate_minutes(&self.content)
    }
}
