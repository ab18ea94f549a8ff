//! Remote changelog and release lookups
//!
//! Both lookups are best effort: a failed request is logged and replaced by
//! an empty post list or the configured fallback version, so a page render
//! never fails because GitHub is unreachable.

use serde::Deserialize;

use super::{parse_changelog, Post};
use crate::config::SiteConfig;
use crate::{Error, Result};

/// Subset of the GitHub "latest release" payload
#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
}

/// HTTP client for the plugin's changelog and release feed
#[derive(Debug, Clone)]
pub struct ChangelogClient {
    client: reqwest::Client,
    changelog_url: String,
    releases_url: String,
    fallback_version: String,
    author: String,
}

impl ChangelogClient {
    /// Create a client from the site configuration
    pub fn new(config: &SiteConfig) -> Result<Self> {
        // GitHub's API rejects requests without a user agent
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            changelog_url: config.changelog_url.clone(),
            releases_url: config.releases_url.clone(),
            fallback_version: config.fallback_version.clone(),
            author: config.author.clone(),
        })
    }

    /// Fetch the raw changelog markdown
    pub async fn fetch_markdown(&self) -> Result<String> {
        tracing::debug!("Fetching changelog from {}", self.changelog_url);

        let response = self.client.get(&self.changelog_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: self.changelog_url.clone(),
                status,
            });
        }

        Ok(response.text().await?)
    }

    /// Fetch and parse the changelog, or an empty list if the fetch fails
    pub async fn fetch_posts(&self) -> Vec<Post> {
        match self.fetch_markdown().await {
            Ok(markdown) => {
                let posts = parse_changelog(&markdown, &self.author);
                tracing::info!("Parsed {} changelog entries", posts.len());
                posts
            }
            Err(e) => {
                tracing::error!("Failed to fetch changelog: {}", e);
                Vec::new()
            }
        }
    }

    /// Latest released version without the `v` prefix
    pub async fn latest_version(&self) -> String {
        match self.fetch_release().await {
            Ok(release) => release_version(&release.tag_name).to_string(),
            Err(e) => {
                tracing::warn!(
                    "Failed to fetch latest version, using {}: {}",
                    self.fallback_version,
                    e
                );
                self.fallback_version.clone()
            }
        }
    }

    async fn fetch_release(&self) -> Result<Release> {
        let response = self.client.get(&self.releases_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: self.releases_url.clone(),
                status,
            });
        }

        Ok(response.json::<Release>().await?)
    }
}

/// Release tag without its `v` prefix ("v2.1.4" -> "2.1.4")
fn release_version(tag: &str) -> &str {
    tag.strip_prefix('v').unwrap_or(tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Json, Router};

    const CHANGELOG: &str = "# Changelog\n\n## [1.2] - 2025-02-15\n\nCombo update\n\n## [1.1] - 2025-01-10\n## Fixed\n\n- Typos\n";

    /// Serve `router` on an ephemeral local port and return its base URL
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    /// A URL nothing is listening on
    async fn dead_url() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}/CHANGELOG.md", addr)
    }

    fn client_for(changelog_url: String, releases_url: String) -> ChangelogClient {
        let config = SiteConfig {
            changelog_url,
            releases_url,
            ..SiteConfig::default()
        };
        ChangelogClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_posts() {
        let base = serve(Router::new().route("/CHANGELOG.md", get(|| async { CHANGELOG }))).await;
        let client = client_for(format!("{}/CHANGELOG.md", base), String::new());

        let posts = client.fetch_posts().await;
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].version, "1.2");
        assert_eq!(posts[0].date, "February 15, 2025");
        assert_eq!(posts[0].author, "Stawa");
    }

    #[tokio::test]
    async fn test_error_status_yields_empty_list() {
        let base = serve(Router::new().route(
            "/CHANGELOG.md",
            get(|| async { (StatusCode::NOT_FOUND, "404: Not Found") }),
        ))
        .await;
        let client = client_for(format!("{}/CHANGELOG.md", base), String::new());

        let err = client.fetch_markdown().await.unwrap_err();
        assert!(matches!(err, Error::Status { status, .. } if status == StatusCode::NOT_FOUND));
        assert!(client.fetch_posts().await.is_empty());
    }

    #[tokio::test]
    async fn test_network_error_yields_empty_list() {
        let client = client_for(dead_url().await, String::new());
        assert!(client.fetch_posts().await.is_empty());
    }

    #[tokio::test]
    async fn test_latest_version_strips_prefix() {
        let base = serve(Router::new().route(
            "/releases/latest",
            get(|| async { Json(serde_json::json!({ "tag_name": "v2.3.0", "name": "2.3.0" })) }),
        ))
        .await;
        let client = client_for(String::new(), format!("{}/releases/latest", base));
        assert_eq!(client.latest_version().await, "2.3.0");
    }

    #[test]
    fn test_release_version_strips_one_prefix() {
        assert_eq!(release_version("v2.1.4"), "2.1.4");
        assert_eq!(release_version("vv2.0"), "v2.0");
        assert_eq!(release_version("2.0"), "2.0");
    }

    #[tokio::test]
    async fn test_latest_version_falls_back() {
        let client = client_for(String::new(), dead_url().await);
        assert_eq!(client.latest_version().await, "2.1.4");

        let base = serve(Router::new().route(
            "/releases/latest",
            get(|| async { Json(serde_json::json!({ "message": "Not Found" })) }),
        ))
        .await;
        let client = client_for(String::new(), format!("{}/releases/latest", base));
        assert_eq!(client.latest_version().await, "2.1.4");
    }
}
