//! Generator module - builds static HTML pages from CMS content
//!
//! One generation cycle: fetch the first listing page, render the index
//! with its load-more cursor, then per post fetch the full document,
//! resolve its chronological neighbors, and render the post page. Slugs
//! that no longer exist upstream get a redirect page to the listing.

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::content::richtext;
use crate::content::{AdjacencyResolver, Paginator, PostDetail, PostSummary};
use crate::helpers::date;
use crate::templates::{
    IndexData, LinkView, PostListItem, PostPageData, SectionView, TemplateRenderer,
};
use crate::Starlog;

/// What a generation cycle produced
#[derive(Debug, Default)]
pub struct GenerateSummary {
    /// Post pages written
    pub posts: usize,
    /// Redirect pages written for slugs missing upstream
    pub redirects: usize,
    /// Posts skipped because they carry no uid to link to
    pub skipped: usize,
}

/// Static site generator
pub struct Generator {
    app: Starlog,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(app: &Starlog) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        Ok(Self {
            app: app.clone(),
            renderer,
        })
    }

    /// Generate the entire site
    ///
    /// A preview ref binds every query to a draft revision and marks the
    /// generated pages as previews.
    pub async fn generate(&self, preview_ref: Option<&str>) -> Result<GenerateSummary> {
        let client = self.app.content_client()?;
        let config = &self.app.config;

        fs::create_dir_all(&self.app.public_dir)?;

        let paginator = Paginator::new(&client, &config.document_type);
        let page = paginator.fetch_page(config.page_size, preview_ref).await?;

        self.generate_index(&page.results, page.next_cursor.clone(), preview_ref)?;

        let resolver =
            AdjacencyResolver::new(&client, &config.document_type, config.adjacency_window);

        let mut summary = GenerateSummary::default();
        for post in &page.results {
            let uid = match post.id.as_str() {
                Some(uid) => uid,
                None => {
                    tracing::warn!("Skipping post without uid: {}", post.title);
                    summary.skipped += 1;
                    continue;
                }
            };

            match client
                .get_by_uid(&config.document_type, uid, preview_ref)
                .await?
            {
                Some(doc) => {
                    let mut detail = PostDetail::from_document(&doc)?;
                    if let Some(anchor) = detail.first_publication_date.clone() {
                        let adjacent = resolver.resolve(&anchor, preview_ref).await?;
                        detail.set_adjacent(adjacent);
                    }
                    self.generate_post(uid, &detail, preview_ref.is_some())?;
                    summary.posts += 1;
                }
                None => {
                    tracing::warn!("Post vanished upstream, redirecting: {}", uid);
                    self.generate_redirect(uid)?;
                    summary.redirects += 1;
                }
            }
        }

        self.write_manifest(&summary)?;
        Ok(summary)
    }

    fn generate_index(
        &self,
        posts: &[PostSummary],
        next_cursor: Option<String>,
        preview_ref: Option<&str>,
    ) -> Result<()> {
        let items = posts
            .iter()
            .map(|post| {
                Ok(PostListItem {
                    uid: post.id.as_str().map(str::to_string),
                    title: post.title.clone(),
                    subtitle: post.subtitle.clone(),
                    author: post.author.clone(),
                    date: display_date(post.first_publication_date.as_deref())?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let data = IndexData {
            site_title: self.app.config.title.clone(),
            language: self.app.config.language.clone(),
            preview: preview_ref.is_some(),
            posts: items,
            next_cursor,
        };

        let html = self.renderer.render_index(&data)?;
        self.write_page(&self.app.public_dir.join("index.html"), &html)
    }

    fn generate_post(&self, uid: &str, detail: &PostDetail, preview: bool) -> Result<()> {
        let sections = detail
            .content
            .iter()
            .map(|section| SectionView {
                heading: section.heading.clone(),
                body_html: richtext::as_html(&section.body),
            })
            .collect();

        let updated = match detail.last_publication_date.as_deref() {
            Some(iso) => Some(date::format_date_hour(iso)?),
            None => None,
        };

        let data = PostPageData {
            site_title: self.app.config.title.clone(),
            language: self.app.config.language.clone(),
            preview,
            title: detail.title.clone(),
            banner_url: detail.banner_url.clone(),
            author: detail.author.clone(),
            date: display_date(detail.first_publication_date.as_deref())?,
            updated,
            reading_minutes: detail.reading_minutes(),
            sections,
            prev_post: detail.prev_post.as_ref().map(link_view),
            next_post: detail.next_post.as_ref().map(link_view),
        };

        let html = self.renderer.render_post(&data)?;
        let path = self.app.public_dir.join("post").join(uid).join("index.html");
        self.write_page(&path, &html)
    }

    fn generate_redirect(&self, uid: &str) -> Result<()> {
        let html = self.renderer.render_redirect("/")?;
        let path = self.app.public_dir.join("post").join(uid).join("index.html");
        self.write_page(&path, &html)
    }

    fn write_manifest(&self, summary: &GenerateSummary) -> Result<()> {
        let manifest = serde_json::json!({
            "generated_at": chrono::Utc::now().to_rfc3339(),
            "revalidate_secs": self.app.config.revalidate_secs,
            "posts": summary.posts,
            "redirects": summary.redirects,
        });
        let path = self.app.public_dir.join("manifest.json");
        fs::write(&path, serde_json::to_string_pretty(&manifest)?)?;
        Ok(())
    }

    fn write_page(&self, path: &Path, html: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, html)?;
        tracing::debug!("Wrote {:?}", path);
        Ok(())
    }
}

fn link_view(link: &crate::content::AdjacentLink) -> LinkView {
    LinkView {
        uid: link.uid.clone(),
        title: link.title.clone(),
    }
}

/// Missing publication dates render as an empty string rather than
/// failing the whole build
fn display_date(iso: Option<&str>) -> Result<String> {
    match iso {
        Some(iso) => Ok(date::format_date(iso)?),
        None => Ok(String::new()),
    }
}
