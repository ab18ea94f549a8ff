//! Generate static files

use anyhow::Result;

use crate::generator::Generator;
use crate::pages::SitePages;
use crate::{ChangelogSource, Site};

/// Fetch the changelog once and write the whole site to the public dir
pub async fn run(site: &Site, source: &ChangelogSource) -> Result<()> {
    let start = std::time::Instant::now();

    let store = site.load_store(source).await?;
    let latest_version = site.latest_version(source).await?;
    tracing::info!(
        "Loaded {} changelog entries (latest release {})",
        store.len(),
        latest_version
    );

    let pages = SitePages::new(&site.config, &latest_version)?;
    Generator::new(&site.public_dir, &pages).generate(&store)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_generate_from_local_changelog() {
        let dir = TempDir::new().unwrap();
        let changelog = dir.path().join("CHANGELOG.md");
        std::fs::write(&changelog, "## [2.0] - 2025-05-01\n\nBig update\n").unwrap();
        // nothing listens on port 1, so the release lookup falls back
        std::fs::write(
            dir.path().join("_config.yml"),
            "releases_url: http://127.0.0.1:1/releases/latest\nfallback_version: \"9.9.9\"\n",
        )
        .unwrap();

        let site = Site::new(dir.path()).unwrap();
        run(&site, &ChangelogSource::File(changelog)).await.unwrap();

        let post = std::fs::read_to_string(dir.path().join("public/blog/2.0/index.html")).unwrap();
        assert!(post.contains("May 1, 2025"));
        let home = std::fs::read_to_string(dir.path().join("public/index.html")).unwrap();
        assert!(home.contains("v9.9.9"));
    }

    #[tokio::test]
    async fn test_generate_offline() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        run(&site, &ChangelogSource::Offline).await.unwrap();

        assert!(dir.path().join("public/index.html").exists());
        assert!(dir.path().join("public/blog/index.html").exists());
    }
}
