//! Changelog module - turns the plugin's CHANGELOG.md into blog posts

mod fetch;
mod parser;
mod post;
mod store;

pub use fetch::ChangelogClient;
pub use parser::{format_date, parse_changelog, FALLBACK_DESCRIPTION};
pub use post::Post;
pub use store::PostStore;
