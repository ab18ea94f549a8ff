//! Error types shared by the library

use thiserror::Error;

/// Errors raised while fetching, looking up or rendering changelog posts
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure talking to a remote host
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote host answered with a non-success status
    #[error("{url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// No post carries the requested version
    #[error("no changelog entry for version {0}")]
    PostNotFound(String),

    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
