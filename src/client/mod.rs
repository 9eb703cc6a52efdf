//! Content API client
//!
//! Thin adapter over the hosted CMS search API: resolves the master ref,
//! runs predicate queries with optional field projection, fetches single
//! documents by slug, and follows opaque pagination cursors.

mod query;

pub use query::{render_query, ApiRef, ApiRoot, Document, Predicate, QueryOptions, QueryResponse};

use crate::config::SiteConfig;
use crate::error::{Error, Result};
use reqwest::Url;
use std::time::Duration;
use tokio::sync::Mutex;

/// Client for a single content repository
#[derive(Debug)]
pub struct ContentClient {
    http: reqwest::Client,
    endpoint: String,
    access_token: Option<String>,
    // Resolved once per process; preview refs bypass this cache
    master_ref: Mutex<Option<String>>,
}

impl ContentClient {
    /// Create a client from resolved configuration
    pub fn new(config: &SiteConfig) -> Result<Self> {
        if config.api_endpoint.is_empty() {
            return Err(Error::Validation(
                "api_endpoint is not configured".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.api_endpoint.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
            master_ref: Mutex::new(None),
        })
    }

    /// Run a search query against the given predicates
    pub async fn query(
        &self,
        predicates: &[Predicate],
        opts: &QueryOptions,
    ) -> Result<QueryResponse> {
        let reference = self.resolve_ref(opts.preview_ref.as_deref()).await?;

        let mut params: Vec<(&str, String)> = vec![
            ("ref", reference),
            ("q", render_query(predicates)),
            ("page", "1".to_string()),
        ];
        if let Some(size) = opts.page_size {
            params.push(("pageSize", size.to_string()));
        }
        if !opts.fetch.is_empty() {
            params.push(("fetch", opts.fetch.join(",")));
        }
        if let Some(orderings) = &opts.orderings {
            params.push(("orderings", orderings.clone()));
        }
        if let Some(token) = &self.access_token {
            params.push(("access_token", token.clone()));
        }

        let url = format!("{}/documents/search", self.endpoint);
        tracing::debug!("Querying content API: {}", url);

        let response = self.http.get(&url).query(&params).send().await?;
        Self::decode(response).await
    }

    /// Fetch a single document by its unique slug
    ///
    /// A missing document is `Ok(None)`, never an error; callers decide
    /// how to degrade (the generator redirects to the listing page).
    pub async fn get_by_uid(
        &self,
        doc_type: &str,
        uid: &str,
        preview_ref: Option<&str>,
    ) -> Result<Option<Document>> {
        let opts = QueryOptions {
            page_size: Some(1),
            preview_ref: preview_ref.map(str::to_string),
            ..Default::default()
        };
        let predicates = [
            Predicate::document_type(doc_type),
            Predicate::uid(doc_type, uid),
        ];

        let mut response = self.query(&predicates, &opts).await?;
        if response.results.is_empty() {
            tracing::debug!("Document not found: {}/{}", doc_type, uid);
            Ok(None)
        } else {
            Ok(Some(response.results.remove(0)))
        }
    }

    /// Follow an opaque pagination cursor returned by a previous query
    ///
    /// The cursor already encodes ref, predicates, and page; no further
    /// parameters are attached.
    pub async fn fetch_cursor(&self, cursor: &str) -> Result<QueryResponse> {
        let url = Url::parse(cursor)
            .map_err(|_| Error::Validation(format!("malformed cursor URL: {}", cursor)))?;

        tracing::debug!("Following pagination cursor: {}", url);
        let response = self.http.get(url).send().await?;
        Self::decode(response).await
    }

    /// Resolve the revision to query: a preview ref if supplied, the
    /// cached master ref otherwise
    async fn resolve_ref(&self, preview_ref: Option<&str>) -> Result<String> {
        if let Some(reference) = preview_ref {
            return Ok(reference.to_string());
        }

        let mut cached = self.master_ref.lock().await;
        if let Some(reference) = cached.as_ref() {
            return Ok(reference.clone());
        }

        let mut request = self.http.get(&self.endpoint);
        if let Some(token) = &self.access_token {
            request = request.query(&[("access_token", token)]);
        }

        let response = request.send().await?;
        let root: ApiRoot = Self::decode(response).await?;
        let master = root
            .refs
            .into_iter()
            .find(|r| r.is_master_ref)
            .ok_or(Error::MissingRef)?;

        tracing::debug!("Resolved master ref: {}", master.reference);
        *cached = Some(master.reference.clone());
        Ok(master.reference)
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch {
                status: Some(status.as_u16()),
                message: format!("content API returned {}", status),
            });
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
