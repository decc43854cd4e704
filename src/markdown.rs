//! Markdown ingestion: frontmatter, HTML rendering and reading time.

use std::{collections::HashMap, sync::LazyLock};

use gray_matter::{engine::YAML, Matter, Pod};
use pulldown_cmark::{Event, Options, Parser};
use regex::Regex;
use serde::{de::DeserializeOwned, Deserialize};

use crate::highlight::highlight;

pub const WORDS_PER_MINUTE: usize = 200;

pub(crate) static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid html tag pattern"));
static MARKDOWN_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[#*_`~>|\[\]()!]").expect("valid markdown pattern"));

/// YAML header of a post. Every key is optional and unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub excerpt: Option<String>,
    pub tags: Option<Vec<String>>,
    pub category: Option<String>,
    pub reading_time: Option<u32>,
    pub published: Option<bool>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TagsRepr {
    List(Vec<String>),
    Csv(String),
}

impl From<TagsRepr> for Vec<String> {
    // `tags: rust, wasm` is common enough in hand-written posts to accept
    fn from(repr: TagsRepr) -> Self {
        match repr {
            TagsRepr::List(tags) => tags,
            TagsRepr::Csv(s) => s
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Decode one header key. A key of the wrong type is dropped on its own and
/// does not affect its neighbours.
fn field<T: DeserializeOwned>(header: &HashMap<String, Pod>, key: &str) -> Option<T> {
    let pod = header.get(key)?;
    if matches!(pod, Pod::Null) {
        return None;
    }
    match pod.deserialize() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(key, error = %e, "ignoring malformed frontmatter key");
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMarkdown {
    /// Rendered HTML of the body.
    pub content: String,
}

/// Parse only the YAML header. Files without one, or with a header that is
/// not a YAML mapping, yield an empty [`Frontmatter`].
pub fn extract_frontmatter(raw: &str) -> Frontmatter {
    let header = match Matter::<YAML>::new().parse(raw).data {
        Some(Pod::Hash(header)) => header,
        Some(_) => {
            tracing::debug!("frontmatter is not a mapping, using defaults");
            return Frontmatter::default();
        }
        None => return Frontmatter::default(),
    };

    Frontmatter {
        title: field(&header, "title"),
        date: field(&header, "date"),
        excerpt: field(&header, "excerpt"),
        tags: field::<TagsRepr>(&header, "tags").map(Vec::from),
        category: field(&header, "category"),
        reading_time: field(&header, "readingTime"),
        published: field(&header, "published"),
    }
}

/// Markdown body with the frontmatter block removed.
pub fn strip_frontmatter(raw: &str) -> String {
    Matter::<YAML>::new().parse(raw).content
}

/// Render a post body (frontmatter stripped) to HTML.
///
/// Tables, strikethrough, task lists and footnotes are enabled, soft line
/// breaks render as `<br />` and fenced code is syntax highlighted.
pub fn parse_markdown(raw: &str) -> ParsedMarkdown {
    let body = strip_frontmatter(raw);

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);

    let parser = Parser::new_ext(&body, options).map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        e => e,
    });
    let parser = highlight(parser);

    let mut content = String::new();
    pulldown_cmark::html::push_html(&mut content, parser);

    ParsedMarkdown { content }
}

/// Minutes needed to read `text` at [`WORDS_PER_MINUTE`], rounded up.
///
/// Accepts markdown or HTML. Empty text reads in zero minutes.
pub fn calculate_reading_time(text: &str) -> u32 {
    let without_tags = HTML_TAG.replace_all(text, " ");
    let plain = MARKDOWN_PUNCT.replace_all(&without_tags, "");
    let words = plain.split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    const POST: &str = "---
title: Building Offline-First Apps
date: 2024-03-02
excerpt: Notes on sync.
tags:
  - pwa
  - sync
category: Engineering
readingTime: 7
published: false
---
# Intro

Service workers are *neat*.
Second line.

| a | b |
|---|---|
| 1 | 2 |
";

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_extract_frontmatter_fields() {
        let fm = extract_frontmatter(POST);
        assert_eq!(fm.title.as_deref(), Some("Building Offline-First Apps"));
        assert_eq!(fm.date.as_deref(), Some("2024-03-02"));
        assert_eq!(fm.excerpt.as_deref(), Some("Notes on sync."));
        assert_eq!(fm.tags, Some(vec!["pwa".to_string(), "sync".to_string()]));
        assert_eq!(fm.category.as_deref(), Some("Engineering"));
        assert_eq!(fm.reading_time, Some(7));
        assert_eq!(fm.published, Some(false));
    }

    #[test]
    fn test_extract_frontmatter_missing_keys_are_absent() {
        let fm = extract_frontmatter("---\ntitle: Only a title\nextra: ignored\n---\nbody\n");
        assert_eq!(fm.title.as_deref(), Some("Only a title"));
        assert_eq!(fm.excerpt, None);
        assert_eq!(fm.tags, None);
        assert_eq!(fm.published, None);
    }

    #[test]
    fn test_extract_frontmatter_malformed_key_keeps_others() {
        let fm = extract_frontmatter(
            "---\ntitle: Real Title\nreadingTime: five\ncategory: Rust\npublished: false\n---\nbody\n",
        );
        assert_eq!(fm.title.as_deref(), Some("Real Title"));
        assert_eq!(fm.category.as_deref(), Some("Rust"));
        assert_eq!(fm.reading_time, None);
        assert_eq!(fm.published, Some(false));

        let fm = extract_frontmatter("---\ntitle: Draft\npublished: maybe\ntags: [a, b]\n---\n");
        assert_eq!(fm.title.as_deref(), Some("Draft"));
        assert_eq!(fm.published, None);
        assert_eq!(fm.tags, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[test]
    fn test_extract_frontmatter_empty_values_are_absent() {
        let fm = extract_frontmatter("---\ntitle:\ncategory: Notes\n---\n");
        assert_eq!(fm.title, None);
        assert_eq!(fm.category.as_deref(), Some("Notes"));
    }

    #[test]
    fn test_extract_frontmatter_without_header() {
        assert_eq!(extract_frontmatter("# Just markdown\n"), Frontmatter::default());
        assert_eq!(extract_frontmatter(""), Frontmatter::default());
    }

    #[test]
    fn test_tags_as_comma_separated_string() {
        let fm = extract_frontmatter("---\ntags: rust, wasm ,leptos\n---\n");
        assert_eq!(
            fm.tags,
            Some(vec![
                "rust".to_string(),
                "wasm".to_string(),
                "leptos".to_string()
            ])
        );
    }

    #[test]
    fn test_parse_markdown_strips_frontmatter() {
        let html = parse_markdown(POST).content;
        assert!(!html.contains("---"));
        for line in POST.lines().skip(1).take(9) {
            assert!(!html.contains(line), "frontmatter line leaked: {line}");
        }
        assert!(html.contains("<h1>Intro</h1>"));
    }

    #[test]
    fn test_parse_markdown_gfm() {
        let html = parse_markdown(POST).content;
        assert!(html.contains("<table>"));
        assert!(html.contains("<em>neat</em>.<br />"));
        let html = parse_markdown("~~gone~~\n\n- [x] done\n").content;
        assert!(html.contains("<del>gone</del>"));
        assert!(html.contains("checkbox"));
    }

    #[test]
    fn test_reading_time() {
        assert_eq!(calculate_reading_time(""), 0);
        assert_eq!(calculate_reading_time("   \n\t "), 0);
        assert_eq!(calculate_reading_time("one"), 1);
        assert_eq!(calculate_reading_time(&words(200)), 1);
        assert_eq!(calculate_reading_time(&words(201)), 2);
        assert_eq!(calculate_reading_time(&words(1000)), 5);
    }

    #[test]
    fn test_reading_time_ignores_markup() {
        let html = format!("<p>{}</p><div class=\"x\"></div>", words(200));
        assert_eq!(calculate_reading_time(&html), 1);
        // markup-only tokens are not words
        assert_eq!(calculate_reading_time("## ** __ `` [] ()"), 0);
    }
}
