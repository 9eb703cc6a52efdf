//! Post list pagination
//!
//! [`Paginator`] is stateless per call: it fetches one page and hands back
//! an opaque cursor for the next. [`Feed`] is the client-side accumulator
//! that appends pages and guards against overlapping load-more calls.

use tokio::sync::Mutex;

use crate::client::{ContentClient, Predicate, QueryOptions};
use crate::content::PostSummary;
use crate::error::{Error, Result};

/// Hard page-size ceiling of the content API
pub const MAX_PAGE_SIZE: usize = 100;

/// One page of post summaries
///
/// `next_cursor` is `None` exactly when no further pages exist. Results
/// keep the server-assigned order (newest first); they are never
/// re-sorted locally.
#[derive(Debug, Clone)]
pub struct Page {
    pub results: Vec<PostSummary>,
    pub next_cursor: Option<String>,
}

impl Page {
    fn from_response(response: crate::client::QueryResponse) -> Result<Self> {
        let results = response
            .results
            .iter()
            .map(PostSummary::from_document)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            results,
            next_cursor: response.next_page,
        })
    }
}

/// Fetches pages of post summaries
pub struct Paginator<'a> {
    client: &'a ContentClient,
    doc_type: String,
}

impl<'a> Paginator<'a> {
    pub fn new(client: &'a ContentClient, doc_type: &str) -> Self {
        Self {
            client,
            doc_type: doc_type.to_string(),
        }
    }

    /// Fetch the first page of the post listing
    ///
    /// The projection covers title, subtitle, and author only; content
    /// bodies stay out of list pages. A preview ref binds the query to a
    /// draft revision.
    pub async fn fetch_page(
        &self,
        page_size: usize,
        preview_ref: Option<&str>,
    ) -> Result<Page> {
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(Error::Validation(format!(
                "page_size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, page_size
            )));
        }

        let opts = QueryOptions {
            page_size: Some(page_size),
            fetch: vec![
                format!("{}.title", self.doc_type),
                format!("{}.subtitle", self.doc_type),
                format!("{}.author", self.doc_type),
            ],
            orderings: None,
            preview_ref: preview_ref.map(str::to_string),
        };

        let response = self
            .client
            .query(&[Predicate::document_type(&self.doc_type)], &opts)
            .await?;
        Page::from_response(response)
    }

    /// Fetch the page behind a previously returned cursor
    ///
    /// Returns `Ok(None)` without touching the network when the page has
    /// no cursor left.
    pub async fn load_more(&self, page: &Page) -> Result<Option<Page>> {
        match &page.next_cursor {
            None => Ok(None),
            Some(cursor) => Ok(Some(self.fetch_cursor(cursor).await?)),
        }
    }

    /// Direct fetch against a cursor URL
    pub async fn fetch_cursor(&self, cursor: &str) -> Result<Page> {
        let response = self.client.fetch_cursor(cursor).await?;
        Page::from_response(response)
    }
}

/// Outcome of a [`Feed::load_more`] attempt
#[derive(Debug, PartialEq, Eq)]
pub enum LoadMore {
    /// This many new posts were appended
    Appended(usize),
    /// No cursor left; nothing was fetched
    Exhausted,
    /// Another load is already in flight; nothing was fetched
    Busy,
}

struct FeedState {
    posts: Vec<PostSummary>,
    next_cursor: Option<String>,
}

/// Accumulated post list with single-flight load-more
///
/// The state lock is held across the fetch, so a second call while one is
/// in flight observes [`LoadMore::Busy`] instead of issuing a duplicate
/// request.
pub struct Feed {
    state: Mutex<FeedState>,
}

impl Feed {
    pub fn new(first: Page) -> Self {
        Self {
            state: Mutex::new(FeedState {
                posts: first.results,
                next_cursor: first.next_cursor,
            }),
        }
    }

    /// Append the next page, if any
    pub async fn load_more(&self, paginator: &Paginator<'_>) -> Result<LoadMore> {
        let mut state = match self.state.try_lock() {
            Ok(guard) => guard,
            Err(_) => return Ok(LoadMore::Busy),
        };

        let cursor = match state.next_cursor.clone() {
            Some(cursor) => cursor,
            None => return Ok(LoadMore::Exhausted),
        };

        let page = paginator.fetch_cursor(&cursor).await?;
        let appended = page.results.len();
        state.posts.extend(page.results);
        state.next_cursor = page.next_cursor;
        Ok(LoadMore::Appended(appended))
    }

    /// Snapshot of the accumulated posts
    pub async fn posts(&self) -> Vec<PostSummary> {
        self.state.lock().await.posts.clone()
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.posts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn next_cursor(&self) -> Option<String> {
        self.state.lock().await.next_cursor.clone()
    }
}
