use std::{
    future::Future,
    io,
    path::{Path, PathBuf},
};

/// Where post files come from.
pub trait PostSource: Send + Sync {
    /// File names (not paths) of every markdown post.
    fn list(&self) -> impl Future<Output = io::Result<Vec<String>>> + Send;

    fn read(&self, name: &str) -> impl Future<Output = io::Result<String>> + Send;
}

/// Markdown files in a single directory on disk.
#[derive(Debug, Clone)]
pub struct FsPostSource {
    dir: PathBuf,
}

impl FsPostSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl PostSource for FsPostSource {
    async fn list(&self) -> io::Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "md") {
                continue;
            }
            let is_file = entry
                .file_type()
                .await
                .map(|t| t.is_file())
                .unwrap_or(false);
            if !is_file {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    async fn read(&self, name: &str) -> io::Result<String> {
        // names come from `list` or from a validated slug, never from raw paths
        if name.contains('/') || name.contains('\\') {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a post file name: {name}"),
            ));
        }
        tokio::fs::read_to_string(self.dir.join(name)).await
    }
}
