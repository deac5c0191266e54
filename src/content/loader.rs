//! Post loader - reads Markdown posts from the posts directory

use chrono::{DateTime, Local};
use lazy_static::lazy_static;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;

use super::{MarkdownRenderer, Post};

lazy_static! {
    /// First top-level heading at the start of a line, e.g. `# Title`
    static ref TITLE_RE: Regex = Regex::new(r"(?m)^#[ \t]+(.+)$").unwrap();
}

/// Error reading a post file or listing the posts directory
#[derive(Debug, thiserror::Error)]
#[error("failed to read {path}: {source}")]
pub struct LoadError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

impl LoadError {
    fn new(path: &Path, source: std::io::Error) -> Self {
        Self {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Loads posts from the posts directory
///
/// The renderer is built once at startup and shared; the loader itself
/// keeps no state between requests.
pub struct PostLoader {
    posts_dir: PathBuf,
    renderer: Arc<MarkdownRenderer>,
}

impl PostLoader {
    /// Create a new post loader
    pub fn new(posts_dir: impl Into<PathBuf>, renderer: Arc<MarkdownRenderer>) -> Self {
        Self {
            posts_dir: posts_dir.into(),
            renderer,
        }
    }

    /// Load a single post by slug
    ///
    /// Returns `None` when the slug does not resolve to a readable
    /// Markdown file in the posts directory.
    pub async fn load_post(&self, slug: &str) -> Option<Post> {
        if !is_valid_slug(slug) {
            tracing::debug!("rejected slug: {:?}", slug);
            return None;
        }

        for ext in ["md", "markdown"] {
            let path = self.posts_dir.join(format!("{slug}.{ext}"));
            match read_post(&path, &self.renderer).await {
                Ok(post) => return Some(post),
                Err(e) if e.source.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => {
                    tracing::warn!("failed to load post: {}", e);
                    return None;
                }
            }
        }

        None
    }

    /// Load every post in the posts directory, newest first
    ///
    /// Files are read concurrently and joined before sorting. A file that
    /// fails to load is dropped from the collection rather than failing
    /// the whole listing; a missing posts directory yields an empty
    /// collection.
    pub async fn load_all(&self) -> Result<Vec<Post>, LoadError> {
        let mut entries = match tokio::fs::read_dir(&self.posts_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(LoadError::new(&self.posts_dir, e)),
        };

        let mut tasks = JoinSet::new();
        loop {
            let entry = entries
                .next_entry()
                .await
                .map_err(|e| LoadError::new(&self.posts_dir, e))?;
            let Some(entry) = entry else { break };

            let path = entry.path();
            if !is_markdown_file(&path) {
                continue;
            }

            let renderer = Arc::clone(&self.renderer);
            tasks.spawn(async move { read_post(&path, &renderer).await });
        }

        let mut posts = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(post)) => posts.push(post),
                Ok(Err(e)) => {
                    tracing::warn!("skipping unreadable post: {}", e);
                }
                Err(e) => {
                    tracing::warn!("post load task failed: {}", e);
                }
            }
        }

        posts.sort_by(|a, b| b.modified.cmp(&a.modified));

        Ok(posts)
    }
}

/// Read and render one post file
async fn read_post(path: &Path, renderer: &MarkdownRenderer) -> Result<Post, LoadError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| LoadError::new(path, e))?;

    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| LoadError::new(path, e))?;
    let modified = metadata
        .modified()
        .ok()
        .map(DateTime::<Local>::from)
        .unwrap_or_else(Local::now);

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("untitled")
        .to_string();

    // Title comes from the first `# ` heading, or the filename
    let title = TITLE_RE
        .captures(&raw)
        .map(|c| c[1].trim().to_string())
        .unwrap_or_else(|| stem.clone());

    // Strip that one heading so the rendered body does not repeat the title
    let body = TITLE_RE.replace(&raw, "");
    let content = renderer.render(&body);

    Ok(Post {
        title,
        slug: stem,
        content,
        raw,
        date: modified.format("%Y-%m-%d").to_string(),
        modified,
    })
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

/// Slugs are single path components; anything else never touches the
/// filesystem.
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && slug != ".." && !slug.contains('/') && !slug.contains('\\')
}
