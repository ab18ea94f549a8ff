//! Changelog markdown parser
//!
//! The changelog follows the "Keep a Changelog" layout: every release opens
//! with a level-2 heading `## [<version>] - <date>`, followed by a line of
//! free text and `## Added` / `## Changed` / `## Fixed` sub-sections. Each
//! release section becomes one [`Post`], in document order.

use chrono::{DateTime, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;

use super::Post;

/// Description used when a section has no leading free text
pub const FALLBACK_DESCRIPTION: &str = "No description available";

/// Date shapes accepted in release headings, tried in order
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
];

lazy_static! {
    static ref SECTION_RE: Regex =
        Regex::new(r"(?m)^## \[").expect("Failed to compile section regex");
}

/// Parse a changelog document into posts, one per release section
///
/// Anything before the first release heading is ignored. Malformed sections
/// never abort the parse; they fall back to placeholder values instead.
/// Duplicate versions are kept as separate posts.
pub fn parse_changelog(markdown: &str, author: &str) -> Vec<Post> {
    SECTION_RE
        .split(markdown)
        .skip(1)
        .map(|section| parse_section(section, author))
        .collect()
}

/// Parse one section; `section` starts right after the `## [` marker
fn parse_section(section: &str, author: &str) -> Post {
    let (version_line, body) = section.split_once('\n').unwrap_or((section, ""));
    let version_line = version_line.trim_end_matches('\r');

    let (version, raw_date) = match version_line.split_once("] - ") {
        Some((version, date)) => (version.trim(), date.trim()),
        // "## [Unreleased]" and friends carry no date
        None => (
            version_line
                .split_once(']')
                .map(|(version, _)| version)
                .unwrap_or(version_line)
                .trim(),
            "",
        ),
    };

    Post::new(
        version,
        format_date(raw_date),
        extract_description(body),
        body.trim(),
        author,
    )
}

/// First non-empty line of the body, if it is free text
///
/// A body that opens with a heading or a list item has no description.
fn extract_description(body: &str) -> String {
    match body.lines().map(str::trim).find(|line| !line.is_empty()) {
        Some(line) if !line.starts_with('#') && !is_list_item(line) => line.to_string(),
        _ => FALLBACK_DESCRIPTION.to_string(),
    }
}

fn is_list_item(line: &str) -> bool {
    ["- ", "* ", "+ "].iter().any(|marker| line.starts_with(marker)) || line == "-"
}

/// Format a heading date as "Month D, YYYY"
///
/// Text that is not a recognised date is returned trimmed but otherwise
/// untouched, so a typo in the changelog shows up verbatim on the page.
///
/// # Examples
/// ```
/// use vitalstrike_site::changelog::format_date;
/// assert_eq!(format_date("2025-02-15"), "February 15, 2025");
/// assert_eq!(format_date("soon"), "soon");
/// ```
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    match parse_date(raw) {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => {
            if !raw.is_empty() {
                tracing::debug!("Unrecognised changelog date: {:?}", raw);
            }
            raw.to_string()
        }
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
}
