//! Site configuration (blog.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default listen port when neither flag, environment nor config file set one
pub const DEFAULT_PORT: u16 = 3001;

/// Blog configuration, loaded from an optional blog.yml in the base directory
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    /// Site title shown in the page header and window title
    pub title: String,

    /// Listen port
    pub port: u16,

    /// Directory of Markdown posts, relative to the base directory
    pub posts_dir: String,

    /// Directory of static assets, relative to the base directory
    pub public_dir: String,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            port: DEFAULT_PORT,
            posts_dir: "posts".to_string(),
            public_dir: "public".to_string(),
        }
    }
}

impl BlogConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: BlogConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Resolve the listen port: a CLI flag wins, then the PORT environment
    /// variable, then the configured value.
    pub fn effective_port(&self, cli_port: Option<u16>) -> u16 {
        if let Some(port) = cli_port {
            return port;
        }
        if let Some(port) = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
        {
            return port;
        }
        self.port
    }
}
