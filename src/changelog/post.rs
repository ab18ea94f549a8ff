//! Changelog post model

use serde::{Deserialize, Serialize};

/// One version section of the changelog, presented as a blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// URL identifier, always equal to `version`
    pub id: String,

    /// Version string from the section heading, e.g. "1.2"
    pub version: String,

    /// Long-form release date ("February 15, 2025"), or the raw heading text
    pub date: String,

    /// Raw markdown body of the section
    pub changes: String,

    /// First line of free text after the heading
    pub description: String,

    pub author: String,
}

impl Post {
    /// Create a new post; `id` is derived from `version`
    pub fn new(
        version: impl Into<String>,
        date: impl Into<String>,
        description: impl Into<String>,
        changes: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        let version = version.into();
        Self {
            id: version.clone(),
            version,
            date: date.into(),
            changes: changes.into(),
            description: description.into(),
            author: author.into(),
        }
    }

    /// Site-relative URL of the post's detail page
    pub fn path(&self) -> String {
        format!("/blog/{}", self.id)
    }

    /// Get the newer neighbour (previous entry in document order)
    pub fn prev<'a>(&self, posts: &'a [Post]) -> Option<&'a Post> {
        let pos = posts.iter().position(|p| p.id == self.id)?;
        if pos > 0 {
            Some(&posts[pos - 1])
        } else {
            None
        }
    }

    /// Get the older neighbour (next entry in document order)
    pub fn next<'a>(&self, posts: &'a [Post]) -> Option<&'a Post> {
        let pos = posts.iter().position(|p| p.id == self.id)?;
        posts.get(pos + 1)
    }
}
