//! Page templates rendered with the Tera template engine
//!
//! All templates are embedded directly in the binary; the generator hands
//! in pre-formatted view data (dates already localized, rich text already
//! rendered to HTML).

use anyhow::Result;
use serde::Serialize;
use tera::{Context, Tera};

/// Template renderer with embedded templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Disable autoescaping: section bodies arrive as already-escaped
        // HTML from the rich-text renderer
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("builtin/layout.html")),
            ("index.html", include_str!("builtin/index.html")),
            ("post.html", include_str!("builtin/post.html")),
            ("redirect.html", include_str!("builtin/redirect.html")),
        ])?;

        Ok(Self { tera })
    }

    /// Render the post listing page
    pub fn render_index(&self, data: &IndexData) -> Result<String> {
        let context = Context::from_serialize(data)?;
        Ok(self.tera.render("index.html", &context)?)
    }

    /// Render a single post page
    pub fn render_post(&self, data: &PostPageData) -> Result<String> {
        let context = Context::from_serialize(data)?;
        Ok(self.tera.render("post.html", &context)?)
    }

    /// Render a meta-refresh redirect to the given target
    pub fn render_redirect(&self, target: &str) -> Result<String> {
        let mut context = Context::new();
        context.insert("target", target);
        Ok(self.tera.render("redirect.html", &context)?)
    }
}

/// View data for the listing page
#[derive(Debug, Serialize)]
pub struct IndexData {
    pub site_title: String,
    pub language: String,
    pub preview: bool,
    pub posts: Vec<PostListItem>,
    pub next_cursor: Option<String>,
}

/// One entry in the listing
#[derive(Debug, Serialize)]
pub struct PostListItem {
    /// None for unidentified posts, which render without a link
    pub uid: Option<String>,
    pub title: String,
    pub subtitle: String,
    pub author: String,
    /// Already formatted for display
    pub date: String,
}

/// View data for a post page
#[derive(Debug, Serialize)]
pub struct PostPageData {
    pub site_title: String,
    pub language: String,
    pub preview: bool,
    pub title: String,
    pub banner_url: String,
    pub author: String,
    pub date: String,
    pub updated: Option<String>,
    pub reading_minutes: usize,
    pub sections: Vec<SectionView>,
    pub prev_post: Option<LinkView>,
    pub next_post: Option<LinkView>,
}

/// A rendered content section
#[derive(Debug, Serialize)]
pub struct SectionView {
    pub heading: String,
    pub body_html: String,
}

/// Link to an adjacent post
#[derive(Debug, Serialize)]
pub struct LinkView {
    pub uid: String,
    pub title: String,
}
