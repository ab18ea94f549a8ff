//! Content module - markdown rendering for changelog bodies

mod markdown;

pub(crate) use markdown::html_escape;
pub use markdown::MarkdownRenderer;
