//! Post store - the changelog parsed once and shared read-only

use std::path::Path;

use super::{parse_changelog, ChangelogClient, Post};
use crate::{Error, Result};

/// Parsed changelog posts in document order (newest first by convention)
#[derive(Debug, Clone, Default)]
pub struct PostStore {
    posts: Vec<Post>,
}

impl PostStore {
    /// Create a store from already parsed posts
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    /// Fetch and parse the remote changelog; empty when the fetch fails
    pub async fn load(client: &ChangelogClient) -> Self {
        Self::new(client.fetch_posts().await)
    }

    /// Parse a changelog from a local file
    pub fn from_file<P: AsRef<Path>>(path: P, author: &str) -> Result<Self> {
        let markdown = std::fs::read_to_string(path.as_ref())?;
        Ok(Self::new(parse_changelog(&markdown, author)))
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Find the post for `version`; with duplicates, the first one wins
    pub fn find(&self, version: &str) -> Result<&Post> {
        self.posts
            .iter()
            .find(|p| p.version == version)
            .ok_or_else(|| Error::PostNotFound(version.to_string()))
    }

    /// Serialize all posts as a pretty JSON array
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.posts)?)
    }
}
