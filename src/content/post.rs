//! Post model

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A blog post, derived 1:1 from one Markdown file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Post title: the first top-level heading, or the filename stem
    pub title: String,

    /// URL identifier, the filename without extension
    pub slug: String,

    /// Rendered HTML body, with the title heading removed
    pub content: String,

    /// Raw markdown source
    pub raw: String,

    /// Modification date formatted for display
    pub date: String,

    /// File modification time, newest-first ordering key
    pub modified: DateTime<Local>,
}
