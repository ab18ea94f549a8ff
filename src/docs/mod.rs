//! Documentation catalogue
//!
//! The docs section is authored content: each page is a template under
//! `templates/site/docs/`, listed here with the metadata used for the
//! sidebar, page titles and the sitemap.

/// A static documentation page
#[derive(Debug, Clone, Copy)]
pub struct DocPage {
    /// Path below `/docs`, empty for the docs landing page
    pub slug: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Template used to render the page body
    pub template: &'static str,
}

impl DocPage {
    /// Site-relative URL of the page
    pub fn path(&self) -> String {
        if self.slug.is_empty() {
            "/docs".to_string()
        } else {
            format!("/docs/{}", self.slug)
        }
    }
}

/// All documentation pages in sidebar order
pub const DOC_PAGES: &[DocPage] = &[
    DocPage {
        slug: "",
        title: "Documentation",
        description: "Everything you need to install, configure and run VitalStrike.",
        template: "docs/index.html",
    },
    DocPage {
        slug: "getting-started",
        title: "Getting Started",
        description: "Requirements, download sources and first-run steps.",
        template: "docs/getting-started.html",
    },
    DocPage {
        slug: "configuration",
        title: "Configuration",
        description: "Damage indicators, combo system, display and message settings.",
        template: "docs/configuration.html",
    },
    DocPage {
        slug: "commands",
        title: "Commands",
        description: "Complete reference of player and admin commands.",
        template: "docs/commands.html",
    },
    DocPage {
        slug: "permissions",
        title: "Permissions",
        description: "Permission nodes and their defaults.",
        template: "docs/permissions.html",
    },
];

/// Look up a docs page by its slug
pub fn find(slug: &str) -> Option<&'static DocPage> {
    DOC_PAGES.iter().find(|page| page.slug == slug)
}
