//! starlog: a statically-generated blog front-end for headless CMS content
//!
//! Fetches posts from a hosted content API, renders a paginated listing
//! and individual post pages with previous/next navigation, and supports
//! draft-revision previews.

pub mod client;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

/// The main starlog application
#[derive(Clone)]
pub struct Starlog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
}

impl Starlog {
    /// Create a new starlog instance from a directory
    ///
    /// Reads `_config.yml` when present; environment overrides for the
    /// API endpoint and access token are applied in either case.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::from_env()
        };

        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            public_dir,
        })
    }

    /// Build a content client from this instance's configuration
    pub fn content_client(&self) -> error::Result<client::ContentClient> {
        client::ContentClient::new(&self.config)
    }

    /// Generate the static site
    pub async fn generate(&self, preview_ref: Option<&str>) -> Result<()> {
        commands::generate::run(self, preview_ref).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
