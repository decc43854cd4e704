use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(feature = "pipeline")]
mod source;
#[cfg(feature = "pipeline")]
mod store;

#[cfg(feature = "pipeline")]
pub use source::{FsPostSource, PostSource};
#[cfg(feature = "pipeline")]
pub use store::{BlogStore, ALL_POSTS_KEY};

pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub title: String,
    pub slug: String,
    pub date: Option<NaiveDate>,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub category: String,
    /// Rendered HTML.
    pub content: String,
    /// Minutes, never below 1.
    pub reading_time: u32,
    pub published: bool,
}

impl BlogPost {
    pub fn display_date(&self) -> String {
        self.date
            .map(|d| d.format("%b %e, %Y").to_string())
            .unwrap_or_default()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    pub fn in_category(&self, category: &str) -> bool {
        self.category.eq_ignore_ascii_case(category)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlogError {
    #[error("Blog post not found")]
    NotFound,
    #[error("Couldn't read blog post: {0}")]
    Io(String),
    #[error("Invalid search pattern: {0}")]
    InvalidPattern(String),
    #[error("Couldn't parse blog posts")]
    ParseError,
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp.
pub fn parse_post_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|d| d.date_naive()))
}

/// Score other published posts against `current` and keep the best `limit`.
///
/// Same category is worth 3, every shared tag 2. Unrelated posts are dropped
/// and ties keep the incoming (newest first) order.
pub fn related_posts(current: &BlogPost, candidates: &[BlogPost], limit: usize) -> Vec<BlogPost> {
    let mut scored = candidates
        .iter()
        .filter(|p| p.published && p.slug != current.slug)
        .filter_map(|p| {
            let mut score = 0;
            if p.category == current.category {
                score += 3;
            }
            score += 2 * p.tags.iter().filter(|t| current.tags.contains(t)).count();
            (score > 0).then_some((score, p))
        })
        .collect::<Vec<_>>();
    // sort_by is stable, equal scores stay in date order
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored
        .into_iter()
        .take(limit)
        .map(|(_, p)| p.clone())
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn post(slug: &str, category: &str, tags: &[&str]) -> BlogPost {
        BlogPost {
            title: slug.to_string(),
            slug: slug.to_string(),
            date: None,
            excerpt: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            category: category.to_string(),
            content: String::new(),
            reading_time: 1,
            published: true,
        }
    }

    #[test]
    fn test_parse_post_date() {
        assert_eq!(
            parse_post_date("2024-03-02"),
            NaiveDate::from_ymd_opt(2024, 3, 2)
        );
        assert_eq!(
            parse_post_date("2024-03-02T10:30:00Z"),
            NaiveDate::from_ymd_opt(2024, 3, 2)
        );
        assert_eq!(parse_post_date("last tuesday"), None);
        assert_eq!(parse_post_date(""), None);
    }

    #[test]
    fn test_display_date() {
        let mut p = post("a", "x", &[]);
        assert_eq!(p.display_date(), "");
        p.date = NaiveDate::from_ymd_opt(2024, 3, 2);
        assert_eq!(p.display_date(), "Mar  2, 2024");
    }

    #[test]
    fn test_related_scoring() {
        let current = post("current", "Rust", &["wasm", "leptos"]);
        let candidates = vec![
            post("current", "Rust", &["wasm", "leptos"]),
            post("same_cat", "Rust", &[]),
            post("one_tag", "Go", &["wasm"]),
            post("both", "Rust", &["leptos", "wasm"]),
            post("unrelated", "Cooking", &["bread"]),
        ];
        let related = related_posts(&current, &candidates, 10);
        let slugs = related.iter().map(|p| p.slug.as_str()).collect::<Vec<_>>();
        assert_eq!(slugs, vec!["both", "same_cat", "one_tag"]);
    }

    #[test]
    fn test_related_ties_keep_order_and_limit() {
        let current = post("current", "Rust", &[]);
        let candidates = vec![
            post("newest", "Rust", &[]),
            post("middle", "Rust", &[]),
            post("oldest", "Rust", &[]),
        ];
        let related = related_posts(&current, &candidates, 2);
        let slugs = related.iter().map(|p| p.slug.as_str()).collect::<Vec<_>>();
        assert_eq!(slugs, vec!["newest", "middle"]);
    }

    #[test]
    fn test_related_skips_drafts() {
        let current = post("current", "Rust", &[]);
        let mut draft = post("draft", "Rust", &[]);
        draft.published = false;
        assert!(related_posts(&current, &[draft], 3).is_empty());
    }
}
