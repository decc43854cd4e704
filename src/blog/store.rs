use std::{
    collections::{BTreeSet, HashSet},
    io,
    sync::Arc,
};

use base64::{prelude::BASE64_STANDARD, Engine};
use futures::future::join_all;
use regex::RegexBuilder;

use super::{
    parse_post_date, related_posts, BlogError, BlogPost, FsPostSource, PostSource,
    DEFAULT_CATEGORY, DEFAULT_TITLE,
};
use crate::{
    cache::{Clock, SystemClock, TtlCache},
    config::BlogConfig,
    markdown::{
        calculate_reading_time, extract_frontmatter, parse_markdown, Frontmatter, HTML_TAG,
    },
    slug::{generate_slug, is_slug},
};

/// Key of the cached, sorted listing of published posts.
pub const ALL_POSTS_KEY: &str = "all-posts";

/// Blog posts read from a [`PostSource`], with TTL caches in front of every
/// expensive step.
///
/// Frontmatter and rendered HTML are cached by the base64 of the raw file, so
/// identical files share one entry. Finished posts are cached by slug and the
/// published listing under [`ALL_POSTS_KEY`].
#[derive(Debug)]
pub struct BlogStore<S = FsPostSource> {
    source: S,
    read_batch_size: usize,
    frontmatter_cache: TtlCache<String, Frontmatter>,
    markdown_cache: TtlCache<String, Arc<str>>,
    post_cache: TtlCache<String, BlogPost>,
    listing_cache: TtlCache<&'static str, Arc<Vec<BlogPost>>>,
}

impl BlogStore<FsPostSource> {
    pub fn new(config: &BlogConfig) -> Self {
        Self::with_source(FsPostSource::new(config.content_dir.clone()), config)
    }
}

impl<S: PostSource> BlogStore<S> {
    pub fn with_source(source: S, config: &BlogConfig) -> Self {
        Self::with_clock(source, config, Arc::new(SystemClock))
    }

    pub fn with_clock(source: S, config: &BlogConfig, clock: Arc<dyn Clock>) -> Self {
        let ttl = config.cache_ttl;
        Self {
            source,
            read_batch_size: config.read_batch_size.max(1),
            frontmatter_cache: TtlCache::with_clock(ttl, clock.clone()),
            markdown_cache: TtlCache::with_clock(ttl, clock.clone()),
            post_cache: TtlCache::with_clock(ttl, clock.clone()),
            listing_cache: TtlCache::with_clock(ttl, clock),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Published posts, newest first. Undated posts sort last.
    ///
    /// Files are read `read_batch_size` at a time. A file that fails to read
    /// is logged and left out; if the directory itself can't be listed the
    /// result is empty.
    pub async fn get_all_blog_posts(&self) -> Arc<Vec<BlogPost>> {
        if let Some(posts) = self.listing_cache.get(&ALL_POSTS_KEY) {
            return posts;
        }

        let names = match self.source.list().await {
            Ok(names) => names,
            Err(e) => {
                tracing::error!(error = %e, "couldn't list blog posts");
                return Arc::new(Vec::new());
            }
        };

        let mut seen = HashSet::new();
        let mut posts = Vec::with_capacity(names.len());
        for batch in names.chunks(self.read_batch_size) {
            let reads = batch.iter().map(|name| async move {
                let res = self.source.read(name).await;
                (name, res)
            });
            for (name, res) in join_all(reads).await {
                let raw = match res {
                    Ok(raw) => raw,
                    Err(e) => {
                        tracing::warn!(file = %name, error = %e, "skipping unreadable blog post");
                        continue;
                    }
                };
                let Some(post) = self.build_post(name, &raw) else {
                    tracing::warn!(file = %name, "skipping blog post without a usable slug");
                    continue;
                };
                if !seen.insert(post.slug.clone()) {
                    tracing::warn!(file = %name, slug = %post.slug, "duplicate slug, skipping");
                    continue;
                }
                self.post_cache.set(post.slug.clone(), post.clone());
                if post.published {
                    posts.push(post);
                }
            }
        }

        posts.sort_by(|a, b| b.date.cmp(&a.date));
        tracing::debug!(count = posts.len(), "loaded blog posts");

        let posts = Arc::new(posts);
        self.listing_cache.set(ALL_POSTS_KEY, posts.clone());
        posts
    }

    /// A single published post.
    ///
    /// The file is found through the sorted listing, so file names that slug
    /// differently resolve and duplicate slugs pick the same file the
    /// listing keeps. If the directory can't be listed, `<slug>.md` is read
    /// directly.
    pub async fn get_blog_post_by_slug(&self, slug: &str) -> Result<BlogPost, BlogError> {
        if !is_slug(slug) {
            return Err(BlogError::NotFound);
        }
        if let Some(post) = self.post_cache.get(&slug.to_string()) {
            return visible(post);
        }

        let name = match self.source.list().await {
            Ok(names) => names
                .into_iter()
                .find(|name| file_slug(name) == slug)
                .ok_or(BlogError::NotFound)?,
            Err(e) => {
                tracing::warn!(error = %e, slug, "couldn't list blog posts, reading directly");
                format!("{slug}.md")
            }
        };

        match self.source.read(&name).await {
            Ok(raw) => {
                let post = self.build_post(&name, &raw).ok_or(BlogError::NotFound)?;
                self.post_cache.set(post.slug.clone(), post.clone());
                visible(post)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(BlogError::NotFound),
            Err(e) => {
                tracing::warn!(file = %name, error = %e, "couldn't read blog post");
                Err(BlogError::Io(e.to_string()))
            }
        }
    }

    pub async fn get_related_posts(&self, slug: &str, limit: usize) -> Result<Vec<BlogPost>, BlogError> {
        let current = self.get_blog_post_by_slug(slug).await?;
        let all = self.get_all_blog_posts().await;
        Ok(related_posts(&current, &all, limit))
    }

    pub async fn get_posts_by_category(&self, category: &str) -> Vec<BlogPost> {
        self.get_all_blog_posts()
            .await
            .iter()
            .filter(|p| p.in_category(category))
            .cloned()
            .collect()
    }

    pub async fn get_posts_by_tag(&self, tag: &str) -> Vec<BlogPost> {
        self.get_all_blog_posts()
            .await
            .iter()
            .filter(|p| p.has_tag(tag))
            .cloned()
            .collect()
    }

    pub async fn get_all_categories(&self) -> Vec<String> {
        self.get_all_blog_posts()
            .await
            .iter()
            .map(|p| p.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub async fn get_all_tags(&self) -> Vec<String> {
        self.get_all_blog_posts()
            .await
            .iter()
            .flat_map(|p| p.tags.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Published posts whose title, excerpt, category, tags or body match
    /// `pattern` (case-insensitive regex). An empty pattern matches everything.
    pub async fn search_posts(&self, pattern: &str) -> Result<Vec<BlogPost>, BlogError> {
        let all = self.get_all_blog_posts().await;
        if pattern.trim().is_empty() {
            return Ok(all.to_vec());
        }
        let re = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .multi_line(true)
            .build()
            .map_err(|e| BlogError::InvalidPattern(e.to_string()))?;
        Ok(all
            .iter()
            .filter(|p| {
                re.is_match(&p.title)
                    || re.is_match(&p.excerpt)
                    || re.is_match(&p.category)
                    || p.tags.iter().any(|t| re.is_match(t))
                    || re.is_match(&HTML_TAG.replace_all(&p.content, ""))
            })
            .cloned()
            .collect())
    }

    /// Drop every cached entry; the next call recomputes from disk.
    pub fn invalidate(&self) {
        self.frontmatter_cache.clear();
        self.markdown_cache.clear();
        self.post_cache.clear();
        self.listing_cache.clear();
    }

    fn build_post(&self, file_name: &str, raw: &str) -> Option<BlogPost> {
        let slug = file_slug(file_name);
        if slug.is_empty() {
            return None;
        }

        let key = BASE64_STANDARD.encode(raw);
        let frontmatter = self.frontmatter_cache.get(&key).unwrap_or_else(|| {
            let fm = extract_frontmatter(raw);
            self.frontmatter_cache.set(key.clone(), fm.clone());
            fm
        });
        let content = self.markdown_cache.get(&key).unwrap_or_else(|| {
            let html: Arc<str> = parse_markdown(raw).content.into();
            self.markdown_cache.set(key, html.clone());
            html
        });

        let reading_time = frontmatter
            .reading_time
            .unwrap_or_else(|| calculate_reading_time(&content))
            .max(1);

        Some(BlogPost {
            title: frontmatter
                .title
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            slug,
            date: frontmatter.date.as_deref().and_then(parse_post_date),
            excerpt: frontmatter.excerpt.unwrap_or_default(),
            tags: frontmatter.tags.unwrap_or_default(),
            category: frontmatter
                .category
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            content: content.to_string(),
            reading_time,
            published: frontmatter.published.unwrap_or(true),
        })
    }
}

fn file_slug(file_name: &str) -> String {
    generate_slug(file_name.strip_suffix(".md").unwrap_or(file_name))
}

fn visible(post: BlogPost) -> Result<BlogPost, BlogError> {
    if post.published {
        Ok(post)
    } else {
        Err(BlogError::NotFound)
    }
}
