//! vitalstrike-site: documentation site and changelog blog for VitalStrike
//!
//! The changelog blog is built by parsing the plugin's `CHANGELOG.md` into
//! [`changelog::Post`] records; every other page is authored content
//! rendered from embedded Tera templates. The site can be written to disk
//! (`generate`) or served directly (`server`).

pub mod changelog;
pub mod commands;
pub mod config;
pub mod content;
pub mod docs;
pub mod generator;
pub mod pages;
pub mod server;
pub mod templates;

mod error;

pub use error::{Error, Result};

use std::path::{Path, PathBuf};

use changelog::{ChangelogClient, PostStore};

/// Where changelog posts come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangelogSource {
    /// Fetch the configured remote CHANGELOG.md
    Remote,
    /// Parse a local markdown file
    File(PathBuf),
    /// No changelog and no network access at all
    Offline,
}

/// The site being built or served
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Site {
    /// Create a new site from a directory, reading `_config.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> anyhow::Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            public_dir,
        })
    }

    /// HTTP client for the configured changelog and release endpoints
    pub fn client(&self) -> Result<ChangelogClient> {
        ChangelogClient::new(&self.config)
    }

    /// Load the post store once from the given source
    ///
    /// A remote fetch failure yields an empty store; a missing local file is
    /// an error since it was asked for explicitly.
    pub async fn load_store(&self, source: &ChangelogSource) -> Result<PostStore> {
        match source {
            ChangelogSource::Remote => Ok(PostStore::load(&self.client()?).await),
            ChangelogSource::File(path) => PostStore::from_file(path, &self.config.author),
            ChangelogSource::Offline => Ok(PostStore::default()),
        }
    }

    /// Latest released version, or the configured fallback when offline
    pub async fn latest_version(&self, source: &ChangelogSource) -> Result<String> {
        match source {
            ChangelogSource::Offline => Ok(self.config.fallback_version.clone()),
            _ => Ok(self.client()?.latest_version().await),
        }
    }

    /// Generate the static site
    pub async fn generate(&self, source: &ChangelogSource) -> anyhow::Result<()> {
        commands::generate::run(self, source).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> anyhow::Result<()> {
        commands::clean::run(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_site_defaults_without_config() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.config.title, "VitalStrike");
        assert_eq!(site.public_dir, dir.path().join("public"));
    }

    #[test]
    fn test_site_reads_config() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("_config.yml"), "public_dir: dist\n").unwrap();
        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.public_dir, dir.path().join("dist"));
    }

    #[tokio::test]
    async fn test_offline_source() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        let store = site.load_store(&ChangelogSource::Offline).await.unwrap();
        assert!(store.is_empty());
        assert_eq!(
            site.latest_version(&ChangelogSource::Offline).await.unwrap(),
            "2.1.4"
        );
    }

    #[tokio::test]
    async fn test_missing_local_changelog_is_an_error() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        let source = ChangelogSource::File(dir.path().join("CHANGELOG.md"));
        assert!(matches!(site.load_store(&source).await, Err(Error::Io(_))));
    }
}
