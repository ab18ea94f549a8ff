//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,

    // URL
    pub url: String,

    // Directory
    pub public_dir: String,

    // Remote sources
    pub changelog_url: String,
    pub releases_url: String,
    pub user_agent: String,

    /// Version shown when the releases endpoint cannot be reached
    pub fallback_version: String,

    // Links
    pub github_url: String,
    pub download_url: String,
    pub discord_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "VitalStrike".to_string(),
            description: "Dynamic damage indicators and combo tracking for Minecraft servers"
                .to_string(),
            author: "Stawa".to_string(),

            url: "http://localhost:4000".to_string(),

            public_dir: "public".to_string(),

            changelog_url: "https://raw.githubusercontent.com/Stawa/VitalStrike/main/CHANGELOG.md"
                .to_string(),
            releases_url: "https://api.github.com/repos/Stawa/VitalStrike/releases/latest"
                .to_string(),
            user_agent: format!("vitalstrike-site/{}", env!("CARGO_PKG_VERSION")),

            fallback_version: "2.1.4".to_string(),

            github_url: "https://github.com/Stawa/VitalStrike".to_string(),
            download_url: "https://github.com/Stawa/VitalStrike/releases".to_string(),
            discord_url: "https://discord.gg/b4nxvp8NcH".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Absolute URL for a site-relative path
    pub fn full_url(&self, path: &str) -> String {
        format!("{}{}", self.url.trim_end_matches('/'), path)
    }
}
