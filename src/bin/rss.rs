use std::{fs::File, process::ExitCode};

use portfolio_site::{
    blog::BlogStore,
    config::{BlogConfig, BUILD_TIME},
    rss::build_channel,
};
use tracing_subscriber::EnvFilter;

const OUTPUT: &str = "public/rss.xml";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = BlogConfig::from_env();
    let store = BlogStore::new(&config);
    let posts = store.get_all_blog_posts().await;
    if posts.is_empty() {
        tracing::warn!(dir = %config.content_dir.display(), "no published posts found");
    }

    let channel = build_channel(&posts, BUILD_TIME);
    let file = match File::create(OUTPUT) {
        Ok(file) => file,
        Err(e) => {
            tracing::error!(error = %e, "couldn't create {OUTPUT}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = channel.pretty_write_to(file, b' ', 2) {
        tracing::error!(error = %e, "couldn't write {OUTPUT}");
        return ExitCode::FAILURE;
    }

    tracing::info!(items = posts.len(), "wrote {OUTPUT}");
    ExitCode::SUCCESS
}
