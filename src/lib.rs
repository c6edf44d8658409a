//! postmd-rs: serve published HTML content items as Markdown documents
//!
//! Content items authored as rich-text HTML are exposed at a sibling URL
//! derived from their slug (`<site>/<slug>.md`). The core is an ordered
//! regex transformation pipeline that turns the HTML body into readable
//! Markdown on every request; the item's normal page advertises the
//! alternate representation with a discovery link tag.

pub mod config;
pub mod content;
pub mod convert;
pub mod helpers;
pub mod render;
pub mod server;

use anyhow::Result;
use std::path::Path;

/// The main application handle
#[derive(Clone)]
pub struct Postmd {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Content source directory
    pub source_dir: std::path::PathBuf,
}

impl Postmd {
    /// Create a new instance from a directory containing `_config.yml`
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let source_dir = base_dir.join(&config.source_dir);

        Ok(Self {
            config,
            base_dir,
            source_dir,
        })
    }

    /// Open the content store over the configured source directory
    pub fn store(&self) -> Result<content::SiteStore> {
        Ok(content::SiteStore::open(
            self.config.clone(),
            self.source_dir.clone(),
        )?)
    }
}
