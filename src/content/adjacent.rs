//! Adjacent-post resolution
//!
//! Finds the chronologically nearest published posts on either side of an
//! anchor timestamp. Each side is one bounded query; the nearest entry is
//! picked by an explicit min/max scan over publication dates rather than
//! by position in the batch, so no upstream ordering assumption is
//! involved (the queries still request explicit orderings to keep the
//! window meaningful).

use chrono::{DateTime, FixedOffset};

use crate::client::{ContentClient, Document, Predicate, QueryOptions};
use crate::error::{Error, Result};
use crate::helpers::date;

/// A post eligible to be linked as previous/next
#[derive(Debug, Clone)]
pub struct Candidate {
    pub uid: String,
    pub title: String,
    pub first_publication_date: DateTime<FixedOffset>,
}

/// Resolution result; absence on either side is valid and distinct from
/// an error
#[derive(Debug, Clone, Default)]
pub struct Adjacent {
    /// Earliest post published strictly after the anchor
    pub next: Option<Candidate>,
    /// Latest post published strictly before the anchor
    pub prev: Option<Candidate>,
}

/// Resolves previous/next posts around an anchor date
pub struct AdjacencyResolver<'a> {
    client: &'a ContentClient,
    doc_type: String,
    /// Batch ceiling per side
    window: usize,
}

impl<'a> AdjacencyResolver<'a> {
    pub fn new(client: &'a ContentClient, doc_type: &str, window: usize) -> Self {
        Self {
            client,
            doc_type: doc_type.to_string(),
            window,
        }
    }

    /// Resolve both neighbors of the given anchor timestamp
    ///
    /// A malformed anchor fails with a validation error before any query
    /// is issued. The two side queries are independent reads and run
    /// concurrently.
    pub async fn resolve(&self, anchor: &str, preview_ref: Option<&str>) -> Result<Adjacent> {
        let anchor_date = date::parse_iso(anchor).map_err(|_| {
            Error::Validation(format!("malformed anchor date: {}", anchor))
        })?;

        let after = self.side_query(
            Predicate::published_after(anchor),
            "[document.first_publication_date]",
            preview_ref,
        );
        let before = self.side_query(
            Predicate::published_before(anchor),
            "[document.first_publication_date desc]",
            preview_ref,
        );
        let (after, before) = tokio::try_join!(after, before)?;

        // Strictness is part of the query predicates, but it is enforced
        // here as well so a misbehaving upstream can never hand back the
        // anchor post as its own neighbor
        let next = candidates(&after)?
            .into_iter()
            .filter(|c| c.first_publication_date > anchor_date)
            .min_by_key(|c| c.first_publication_date);
        let prev = candidates(&before)?
            .into_iter()
            .filter(|c| c.first_publication_date < anchor_date)
            .max_by_key(|c| c.first_publication_date);

        Ok(Adjacent { next, prev })
    }

    async fn side_query(
        &self,
        date_predicate: Predicate,
        orderings: &str,
        preview_ref: Option<&str>,
    ) -> Result<Vec<Document>> {
        let opts = QueryOptions {
            page_size: Some(self.window),
            fetch: vec![format!("{}.title", self.doc_type)],
            orderings: Some(orderings.to_string()),
            preview_ref: preview_ref.map(str::to_string),
        };
        let predicates = [Predicate::document_type(&self.doc_type), date_predicate];
        let response = self.client.query(&predicates, &opts).await?;
        Ok(response.results)
    }
}

/// Project documents into candidates, skipping entries that cannot be
/// linked (no uid or no publication date)
fn candidates(documents: &[Document]) -> Result<Vec<Candidate>> {
    let mut out = Vec::with_capacity(documents.len());
    for doc in documents {
        let uid = match &doc.uid {
            Some(uid) if !uid.is_empty() => uid.clone(),
            _ => continue,
        };
        let published = match &doc.first_publication_date {
            Some(iso) => date::parse_iso(iso)?,
            None => continue,
        };
        let title = doc
            .data
            .get("title")
            .and_then(|t| t.as_str())
            .unwrap_or_default()
            .to_string();
        out.push(Candidate {
            uid,
            title,
            first_publication_date: published,
        });
    }
    Ok(out)
}
