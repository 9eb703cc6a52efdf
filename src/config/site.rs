//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable overriding the content API endpoint
pub const ENV_API_ENDPOINT: &str = "STARLOG_API_ENDPOINT";
/// Environment variable overriding the content API access token
pub const ENV_ACCESS_TOKEN: &str = "STARLOG_ACCESS_TOKEN";

/// Main site configuration
///
/// The API endpoint and access token may come from the environment, but
/// they are resolved exactly once in [`SiteConfig::load`]; everything
/// downstream receives this struct by reference and never touches
/// process globals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,
    pub language: String,

    // Content API
    pub api_endpoint: String,
    pub access_token: Option<String>,
    pub document_type: String,

    // Listing
    pub page_size: usize,
    pub adjacency_window: usize,

    // Regeneration cadence for the preview server, in seconds
    pub revalidate_secs: u64,

    // Directory
    pub public_dir: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "starlog".to_string(),
            author: String::new(),
            language: "pt-BR".to_string(),

            api_endpoint: String::new(),
            access_token: None,
            document_type: "posts".to_string(),

            page_size: 20,
            adjacency_window: 60,

            revalidate_secs: 3600,

            public_dir: "public".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file, then apply environment overrides
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let mut config: SiteConfig = serde_yaml::from_str(&content)?;
        config.apply_env();
        Ok(config)
    }

    /// Defaults plus environment overrides, for sites without a config file
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    fn apply_env(&mut self) {
        if let Ok(endpoint) = std::env::var(ENV_API_ENDPOINT) {
            self.api_endpoint = endpoint;
        }
        if let Ok(token) = std::env::var(ENV_ACCESS_TOKEN) {
            self.access_token = Some(token);
        }
    }
}
