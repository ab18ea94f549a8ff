//! Built-in site templates using the Tera template engine
//!
//! All templates are embedded directly in the binary so a generated site
//! only depends on the changelog it was built from.

use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::changelog::format_date;
use crate::config::SiteConfig;
use crate::content::html_escape;
use crate::docs::DocPage;
use crate::Result;

/// Stylesheet shared by every page
pub const STYLESHEET: &str = include_str!("site/style.css");

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Templates escape user text explicitly; rendered markdown goes in as-is
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("home.html", include_str!("site/home.html")),
            ("blog_index.html", include_str!("site/blog_index.html")),
            ("blog_post.html", include_str!("site/blog_post.html")),
            ("not_found.html", include_str!("site/not_found.html")),
            // Docs
            ("docs/layout.html", include_str!("site/docs/layout.html")),
            ("docs/index.html", include_str!("site/docs/index.html")),
            (
                "docs/getting-started.html",
                include_str!("site/docs/getting-started.html"),
            ),
            (
                "docs/configuration.html",
                include_str!("site/docs/configuration.html"),
            ),
            ("docs/commands.html", include_str!("site/docs/commands.html")),
            (
                "docs/permissions.html",
                include_str!("site/docs/permissions.html"),
            ),
            // Partials
            (
                "partials/head.html",
                include_str!("site/partials/head.html"),
            ),
            ("partials/nav.html", include_str!("site/partials/nav.html")),
            (
                "partials/footer.html",
                include_str!("site/partials/footer.html"),
            ),
            (
                "partials/docs_sidebar.html",
                include_str!("site/partials/docs_sidebar.html"),
            ),
            (
                "partials/post_card.html",
                include_str!("site/partials/post_card.html"),
            ),
        ])?;

        tera.register_filter("long_date", long_date_filter);
        tera.register_filter("escape_attr", escape_attr_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: reformat a raw date as "Month D, YYYY"
fn long_date_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("long_date", "value", String, value);
    Ok(tera::Value::String(format_date(&s)))
}

/// Tera filter: escape a value for a double-quoted attribute, keeping `/` readable
fn escape_attr_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("escape_attr", "value", String, value);
    Ok(tera::Value::String(html_escape(&s)))
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub author: String,
    pub url: String,
    pub github_url: String,
    pub download_url: String,
    pub discord_url: String,
    pub latest_version: String,
}

impl SiteData {
    pub fn new(config: &SiteConfig, latest_version: &str) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            url: config.url.clone(),
            github_url: config.github_url.clone(),
            download_url: config.download_url.clone(),
            discord_url: config.discord_url.clone(),
            latest_version: latest_version.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostData {
    pub id: String,
    pub version: String,
    pub date: String,
    pub description: String,
    pub author: String,
    pub path: String,
    /// First lines of the raw changes, shown on list cards
    pub preview: Vec<String>,
    /// Rendered HTML of the changes; empty on list pages
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavPost {
    pub title: String,
    pub path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocData {
    pub slug: String,
    pub title: String,
    pub description: String,
}

impl From<&DocPage> for DocData {
    fn from(page: &DocPage) -> Self {
        Self {
            slug: page.slug.to_string(),
            title: page.title.to_string(),
            description: page.description.to_string(),
        }
    }
}
