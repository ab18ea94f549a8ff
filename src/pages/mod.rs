//! Page rendering shared by the static generator and the dev server

use chrono::{DateTime, Datelike, Utc};
use tera::Context;

use crate::changelog::{Post, PostStore};
use crate::config::SiteConfig;
use crate::content::MarkdownRenderer;
use crate::docs::{DocPage, DOC_PAGES};
use crate::templates::{DocData, NavPost, PostData, SiteData, TemplateRenderer};
use crate::Result;

/// Lines of raw changes shown on a changelog card
const PREVIEW_LINES: usize = 3;

/// Static pages listed in the sitemap ahead of docs and posts
const STATIC_PATHS: &[&str] = &["", "/blog", "/docs"];

/// Message shown when a changelog version does not exist
pub const POST_NOT_FOUND: &str = "Blog post not found";

/// Renders every page of the site from the configuration and post store
pub struct SitePages {
    config: SiteConfig,
    site: SiteData,
    renderer: TemplateRenderer,
    markdown: MarkdownRenderer,
    built_at: DateTime<Utc>,
}

impl SitePages {
    /// Create a page renderer; `latest_version` is shown in the header
    pub fn new(config: &SiteConfig, latest_version: &str) -> Result<Self> {
        Ok(Self {
            config: config.clone(),
            site: SiteData::new(config, latest_version),
            renderer: TemplateRenderer::new()?,
            markdown: MarkdownRenderer::new(),
            built_at: Utc::now(),
        })
    }

    fn base_context(&self, title: &str, description: &str) -> Context {
        let mut context = Context::new();
        context.insert("site", &self.site);
        context.insert(
            "docs",
            &DOC_PAGES.iter().map(DocData::from).collect::<Vec<_>>(),
        );
        context.insert("page_title", title);
        context.insert("page_description", description);
        context.insert("year", &self.built_at.year());
        context.insert("built_at", &self.built_at.format("%Y-%m-%d").to_string());
        context.insert("generator_version", env!("CARGO_PKG_VERSION"));
        context
    }

    /// Landing page
    pub fn home(&self, store: &PostStore) -> Result<String> {
        let mut context = self.base_context(&self.config.title, &self.config.description);
        context.insert(
            "latest_post",
            &store.posts().first().map(|p| self.post_card(p)),
        );
        self.renderer.render("home.html", &context)
    }

    /// One documentation page
    pub fn doc(&self, page: &DocPage) -> Result<String> {
        let title = format!("{} - {} Docs", page.title, self.config.title);
        let mut context = self.base_context(&title, page.description);
        context.insert("doc", &DocData::from(page));
        context.insert("current_doc", page.slug);
        self.renderer.render(page.template, &context)
    }

    /// Changelog list, in document order
    pub fn blog_index(&self, store: &PostStore) -> Result<String> {
        let title = format!("{} Changelog | Development Updates", self.config.title);
        let description = format!(
            "Stay up to date with the latest updates, features, and improvements to {}.",
            self.config.title
        );
        let mut context = self.base_context(&title, &description);
        let posts: Vec<PostData> = store.posts().iter().map(|p| self.post_card(p)).collect();
        context.insert("posts", &posts);
        self.renderer.render("blog_index.html", &context)
    }

    /// Detail page of a single changelog entry
    pub fn blog_post(&self, store: &PostStore, post: &Post) -> Result<String> {
        let title = format!("{} {}", self.config.title, post.version);
        let mut context = self.base_context(&title, &post.description);

        let mut data = self.post_card(post);
        data.content = self.markdown.render(&post.changes);
        context.insert("post", &data);
        context.insert("newer", &post.prev(store.posts()).map(|p| self.nav(p)));
        context.insert("older", &post.next(store.posts()).map(|p| self.nav(p)));

        self.renderer.render("blog_post.html", &context)
    }

    /// Not-found page with a custom message
    pub fn not_found(&self, message: &str) -> Result<String> {
        let title = format!("Not Found - {}", self.config.title);
        let mut context = self.base_context(&title, message);
        context.insert("message", message);
        self.renderer.render("not_found.html", &context)
    }

    /// sitemap.xml covering static pages, docs and every post
    pub fn sitemap(&self, store: &PostStore, now: DateTime<Utc>) -> String {
        let lastmod = now.to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let doc_paths = DOC_PAGES
            .iter()
            .map(DocPage::path)
            .filter(|path| !STATIC_PATHS.contains(&path.as_str()));
        let post_paths = store.posts().iter().map(Post::path);

        let paths: Vec<String> = STATIC_PATHS
            .iter()
            .map(|p| p.to_string())
            .chain(doc_paths)
            .chain(post_paths)
            .collect();

        let mut xml = String::new();
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
        xml.push('\n');
        for path in paths {
            xml.push_str("  <url>\n");
            xml.push_str(&format!(
                "    <loc>{}</loc>\n",
                escape_xml(&self.config.full_url(&path))
            ));
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", lastmod));
            xml.push_str("    <changefreq>weekly</changefreq>\n");
            xml.push_str("    <priority>0.8</priority>\n");
            xml.push_str("  </url>\n");
        }
        xml.push_str("</urlset>\n");
        xml
    }

    /// robots.txt allowing everything and pointing at the sitemap
    pub fn robots(&self) -> String {
        format!(
            "User-agent: *\nAllow: /\n\nSitemap: {}\n",
            self.config.full_url("/sitemap.xml")
        )
    }

    fn post_card(&self, post: &Post) -> PostData {
        PostData {
            id: post.id.clone(),
            version: post.version.clone(),
            date: post.date.clone(),
            description: post.description.clone(),
            author: post.author.clone(),
            path: post.path(),
            preview: post
                .changes
                .lines()
                .take(PREVIEW_LINES)
                .map(str::to_string)
                .collect(),
            content: String::new(),
        }
    }

    fn nav(&self, post: &Post) -> NavPost {
        NavPost {
            title: format!("{} {}", self.config.title, post.version),
            path: post.path(),
        }
    }
}

/// Escape XML special characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn store() -> PostStore {
        PostStore::new(vec![
            Post::new(
                "1.2",
                "February 15, 2025",
                "Combo update",
                "Combo update\n\n## Added\n\n- Combo holograms",
                "Stawa",
            ),
            Post::new(
                "1.1",
                "January 10, 2025",
                "Fixes & <tweaks>",
                "## Fixed\n\n- Typos",
                "Stawa",
            ),
        ])
    }

    fn pages() -> SitePages {
        let config = SiteConfig {
            url: "https://vitalstrike.example.com".to_string(),
            ..SiteConfig::default()
        };
        SitePages::new(&config, "2.1.4").unwrap()
    }

    #[test]
    fn test_home_shows_latest_post_and_version() {
        let html = pages().home(&store()).unwrap();
        assert!(html.contains("v2.1.4"));
        assert!(html.contains("/blog/1.2"));
    }

    #[test]
    fn test_blog_index_lists_posts_in_order() {
        let html = pages().blog_index(&store()).unwrap();
        let first = html.find("VitalStrike 1.2").unwrap();
        let second = html.find("VitalStrike 1.1").unwrap();
        assert!(first < second);
        assert!(html.contains("Combo update"));
    }

    #[test]
    fn test_blog_index_empty_state() {
        let html = pages().blog_index(&PostStore::default()).unwrap();
        assert!(html.contains("No changelog entries are available"));
    }

    #[test]
    fn test_blog_post_renders_markdown_and_navigation() {
        let store = store();
        let post = store.find("1.1").unwrap();
        let html = pages().blog_post(&store, post).unwrap();
        assert!(html.contains("<h2>Fixed</h2>"));
        assert!(html.contains("<li>Typos</li>"));
        assert!(html.contains(r#"href="/blog/1.2""#));
        assert!(html.contains("Plugin Developer"));
    }

    #[test]
    fn test_post_text_is_escaped() {
        let html = pages().blog_index(&store()).unwrap();
        assert!(html.contains("Fixes &amp; &lt;tweaks&gt;"));
        assert!(!html.contains("<tweaks>"));
    }

    #[test]
    fn test_quote_in_version_stays_inside_href() {
        let store = PostStore::new(vec![
            Post::new(r#"1.1" onmouseover="alert(1)"#, "", "Newer", "- a", "Stawa"),
            Post::new("1.0", "", "Older", "- b", "Stawa"),
        ]);
        let pages = pages();

        let index = pages.blog_index(&store).unwrap();
        assert!(index.contains(r#"href="/blog/1.1&quot; onmouseover=&quot;alert(1)""#));
        assert!(!index.contains(r#"onmouseover="alert(1)""#));

        let older = store.find("1.0").unwrap();
        let detail = pages.blog_post(&store, older).unwrap();
        assert!(!detail.contains(r#"onmouseover="alert(1)""#));
    }

    #[test]
    fn test_docs_pages_render() {
        let pages = pages();
        for doc in DOC_PAGES {
            let html = pages.doc(doc).unwrap();
            assert!(html.contains(doc.title), "missing title for {:?}", doc.slug);
        }
    }

    #[test]
    fn test_not_found() {
        let html = pages().not_found(POST_NOT_FOUND).unwrap();
        assert!(html.contains("Blog post not found"));
    }

    #[test]
    fn test_sitemap() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let xml = pages().sitemap(&store(), now);

        // "", /blog, /docs, four docs pages, two posts
        assert_eq!(xml.matches("<url>").count(), 3 + (DOC_PAGES.len() - 1) + 2);
        assert!(xml.contains("<loc>https://vitalstrike.example.com</loc>"));
        assert!(xml.contains("<loc>https://vitalstrike.example.com/docs/commands</loc>"));
        assert!(xml.contains("<loc>https://vitalstrike.example.com/blog/1.1</loc>"));
        assert!(xml.contains("<lastmod>2025-03-01T12:00:00.000Z</lastmod>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
    }

    #[test]
    fn test_robots() {
        assert_eq!(
            pages().robots(),
            "User-agent: *\nAllow: /\n\nSitemap: https://vitalstrike.example.com/sitemap.xml\n"
        );
    }
}
