//! Generator module - writes the whole site as static files

use anyhow::Result;
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

use crate::changelog::PostStore;
use crate::docs::DOC_PAGES;
use crate::pages::{SitePages, POST_NOT_FOUND};
use crate::templates::STYLESHEET;

/// Static site generator
pub struct Generator<'a> {
    public_dir: PathBuf,
    pages: &'a SitePages,
}

impl<'a> Generator<'a> {
    /// Create a generator writing into `public_dir`
    pub fn new<P: AsRef<Path>>(public_dir: P, pages: &'a SitePages) -> Self {
        Self {
            public_dir: public_dir.as_ref().to_path_buf(),
            pages,
        }
    }

    /// Generate the entire site
    pub fn generate(&self, store: &PostStore) -> Result<()> {
        fs::create_dir_all(&self.public_dir)?;

        self.write("index.html", &self.pages.home(store)?)?;
        self.write("css/style.css", STYLESHEET)?;

        self.generate_doc_pages()?;
        self.generate_blog_pages(store)?;

        self.write("posts.json", &store.to_json()?)?;
        self.write("sitemap.xml", &self.pages.sitemap(store, Utc::now()))?;
        self.write("robots.txt", &self.pages.robots())?;
        self.write("404.html", &self.pages.not_found("Page not found")?)?;

        Ok(())
    }

    /// Generate every documentation page
    fn generate_doc_pages(&self) -> Result<()> {
        for doc in DOC_PAGES {
            let html = self.pages.doc(doc)?;
            let path = doc.path();
            self.write_index(&path, &html)?;
        }
        tracing::info!("Generated {} docs pages", DOC_PAGES.len());
        Ok(())
    }

    /// Generate the changelog list and one page per entry
    fn generate_blog_pages(&self, store: &PostStore) -> Result<()> {
        self.write_index("/blog", &self.pages.blog_index(store)?)?;

        for post in store.posts() {
            if !is_safe_segment(&post.version) {
                tracing::warn!(
                    "Changelog version {:?} is not a valid page name, skipping page",
                    post.version
                );
                continue;
            }
            // A duplicated version keeps the page of its first entry, as lookups do
            let first = store.find(&post.version)?;
            if !std::ptr::eq(first, post) {
                tracing::warn!("Duplicate changelog version {}, skipping page", post.version);
                continue;
            }
            let html = self.pages.blog_post(store, post)?;
            self.write_index(&post.path(), &html)?;
        }

        if store.is_empty() {
            tracing::warn!("No changelog entries; blog renders its empty state");
        }
        // Served for /blog/<unknown> by static hosts that honour per-directory 404s
        self.write("blog/404.html", &self.pages.not_found(POST_NOT_FOUND)?)?;

        tracing::info!("Generated {} changelog pages", store.len());
        Ok(())
    }

    /// Write `<path>/index.html` for a site-relative URL path
    fn write_index(&self, url_path: &str, html: &str) -> Result<()> {
        let clean_path = url_path.trim_start_matches('/');
        let relative = if clean_path.is_empty() {
            PathBuf::from("index.html")
        } else {
            Path::new(clean_path).join("index.html")
        };
        self.write(relative, html)
    }

    fn write<P: AsRef<Path>>(&self, relative: P, content: &str) -> Result<()> {
        let output_path = self.public_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| anyhow::anyhow!("Failed to create dir {:?}: {}", parent, e))?;
        }
        fs::write(&output_path, content)
            .map_err(|e| anyhow::anyhow!("Failed to write {:?}: {}", output_path, e))?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(())
    }
}

/// Whether a version can be used as a single directory name under `blog/`
fn is_safe_segment(version: &str) -> bool {
    !version.is_empty()
        && !version.contains(['/', '\\'])
        && version != "."
        && !version.contains("..")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changelog::parse_changelog;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    const CHANGELOG: &str = "## [1.2] - 2025-02-15\n\nCombo update\n\n## Added\n\n- Holograms\n\n## [1.1] - 2025-01-10\n## Fixed\n\n- Typos\n";

    fn generate(store: &PostStore) -> TempDir {
        let dir = TempDir::new().unwrap();
        let pages = SitePages::new(&SiteConfig::default(), "2.1.4").unwrap();
        Generator::new(dir.path(), &pages).generate(store).unwrap();
        dir
    }

    #[test]
    fn test_generate_site() {
        let store = PostStore::new(parse_changelog(CHANGELOG, "Stawa"));
        let dir = generate(&store);
        let public = dir.path();

        for file in [
            "index.html",
            "css/style.css",
            "docs/index.html",
            "docs/getting-started/index.html",
            "docs/configuration/index.html",
            "docs/commands/index.html",
            "docs/permissions/index.html",
            "blog/index.html",
            "blog/1.2/index.html",
            "blog/1.1/index.html",
            "blog/404.html",
            "posts.json",
            "sitemap.xml",
            "robots.txt",
            "404.html",
        ] {
            assert!(public.join(file).exists(), "missing {}", file);
        }

        let post = fs::read_to_string(public.join("blog/1.2/index.html")).unwrap();
        assert!(post.contains("<li>Holograms</li>"));
        assert!(post.contains("February 15, 2025"));

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(public.join("posts.json")).unwrap()).unwrap();
        assert_eq!(json[1]["description"], "No description available");
    }

    #[test]
    fn test_generate_without_posts() {
        let dir = generate(&PostStore::default());
        let index = fs::read_to_string(dir.path().join("blog/index.html")).unwrap();
        assert!(index.contains("No changelog entries are available"));
        assert_eq!(
            fs::read_to_string(dir.path().join("posts.json")).unwrap(),
            "[]"
        );
    }

    #[test]
    fn test_duplicate_versions_keep_first_page() {
        let markdown = "## [1.0] - 2025-01-02\nSecond release notes\n\n## [1.0] - 2025-01-01\nFirst release notes\n";
        let store = PostStore::new(parse_changelog(markdown, "Stawa"));
        let dir = generate(&store);
        let page = fs::read_to_string(dir.path().join("blog/1.0/index.html")).unwrap();
        assert!(page.contains("Second release notes"));
        assert!(!page.contains("First release notes"));
    }

    #[test]
    fn test_unsafe_versions_get_no_page() {
        let dir = TempDir::new().unwrap();
        let public = dir.path().join("public");
        let markdown = "## [../../escaped] - 2025-01-01\nNope\n\n## [a\\b] - 2025-01-01\nNope\n\n## [] - 2025-01-01\nNope\n\n## [1.0] - 2025-01-01\nFine\n";
        let store = PostStore::new(parse_changelog(markdown, "Stawa"));
        let pages = SitePages::new(&SiteConfig::default(), "2.1.4").unwrap();

        Generator::new(&public, &pages).generate(&store).unwrap();

        assert!(!dir.path().join("escaped").exists());
        assert!(!public.join("escaped").exists());
        assert!(public.join("blog/1.0/index.html").exists());
        let blog_dirs: Vec<_> = fs::read_dir(public.join("blog"))
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_dir())
            .map(|entry| entry.file_name())
            .collect();
        assert_eq!(blog_dirs, vec![std::ffi::OsString::from("1.0")]);
    }

    #[test]
    fn test_is_safe_segment() {
        assert!(is_safe_segment("2.1.4"));
        assert!(is_safe_segment("Unreleased"));
        assert!(!is_safe_segment(""));
        assert!(!is_safe_segment("."));
        assert!(!is_safe_segment(".."));
        assert!(!is_safe_segment("../x"));
        assert!(!is_safe_segment("1/2"));
        assert!(!is_safe_segment("1\\2"));
    }
}
