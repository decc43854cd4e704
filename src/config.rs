use std::{path::PathBuf, str::FromStr, time::Duration};

pub const SITE_URL: &str = "https://jordanavery.dev";
pub const SITE_TITLE: &str = "Jordan Avery";
pub const BLOG_TITLE: &str = "Jordan Avery's Blog";
pub const BLOG_DESCRIPTION: &str =
    "Field notes on building fast, resilient software for the web and beyond.";
pub const CONTACT_EMAIL: &str = "hello@jordanavery.dev";

/// Time the binary was built, exported by `build.rs`.
pub const BUILD_TIME: &str = env!("BUILD_TIME");

pub const DEFAULT_CONTENT_DIR: &str = "content/blog";
pub const DEFAULT_CACHE_TTL_SECS: u64 = 5 * 60;
pub const DEFAULT_READ_BATCH_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogConfig {
    pub content_dir: PathBuf,
    pub cache_ttl: Duration,
    /// Maximum number of post files read concurrently.
    pub read_batch_size: usize,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from(DEFAULT_CONTENT_DIR),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            read_batch_size: DEFAULT_READ_BATCH_SIZE,
        }
    }
}

impl BlogConfig {
    /// Read `BLOG_CONTENT_DIR`, `BLOG_CACHE_TTL_SECS` and `BLOG_READ_BATCH_SIZE`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let content_dir = lookup("BLOG_CONTENT_DIR")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.content_dir);
        let cache_ttl = parse_or("BLOG_CACHE_TTL_SECS", lookup("BLOG_CACHE_TTL_SECS"))
            .map(Duration::from_secs)
            .unwrap_or(defaults.cache_ttl);
        let read_batch_size = parse_or("BLOG_READ_BATCH_SIZE", lookup("BLOG_READ_BATCH_SIZE"))
            .unwrap_or(defaults.read_batch_size)
            .max(1);
        Self {
            content_dir,
            cache_ttl,
            read_batch_size,
        }
    }

    pub fn with_content_dir(mut self, content_dir: impl Into<PathBuf>) -> Self {
        self.content_dir = content_dir.into();
        self
    }
}

fn parse_or<T: FromStr>(key: &str, value: Option<String>) -> Option<T> {
    let value = value?;
    match value.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("ignoring invalid {key}={value:?}, using default");
            None
        }
    }
}
