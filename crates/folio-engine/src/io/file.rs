use super::{ContentSource, FetchError};
use async_trait::async_trait;
use relative_path::{Component, RelativePath};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Reads markdown from files under a content root directory.
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a site path such as `content/about.md` against the root.
    ///
    /// Returns `None` for paths that would climb out of the root.
    pub fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = RelativePath::new(path.trim_start_matches('/')).normalize();
        if relative
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return None;
        }
        Some(relative.to_path(&self.root))
    }
}

#[async_trait]
impl ContentSource for FileSource {
    async fn fetch(&self, path: &str) -> Result<String, FetchError> {
        let Some(absolute_path) = self.resolve(path) else {
            return Err(FetchError::NotFound(PathBuf::from(path)));
        };
        log::debug!("Reading markdown from {}", absolute_path.display());

        match tokio::fs::read_to_string(&absolute_path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(FetchError::NotFound(absolute_path)),
            Err(e) => Err(FetchError::Io(e)),
        }
    }
}
