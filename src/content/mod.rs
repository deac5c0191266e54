//! Content module - post model, loading and Markdown rendering

pub mod loader;
mod markdown;
mod post;

pub use loader::{LoadError, PostLoader};
pub use markdown::MarkdownRenderer;
pub use post::Post;
