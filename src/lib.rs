//! mdblog: a minimal file-based Markdown blog server
//!
//! Posts are plain Markdown files in a directory. Every request re-reads
//! them from disk, renders the Markdown to HTML and serves the result
//! through a small set of read-only routes.

pub mod config;
pub mod content;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::Path;

/// The main blog application
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::BlogConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Directory containing the Markdown posts
    pub posts_dir: std::path::PathBuf,
    /// Static assets (stylesheets, client scripts) served verbatim
    pub public_dir: std::path::PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("blog.yml");

        let config = if config_path.exists() {
            config::BlogConfig::load(&config_path)?
        } else {
            config::BlogConfig::default()
        };

        let posts_dir = base_dir.join(&config.posts_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            posts_dir,
            public_dir,
        })
    }
}
