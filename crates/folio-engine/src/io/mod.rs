mod file;
mod http;

pub use file::FileSource;
pub use http::HttpSource;

use crate::render::render;
use async_trait::async_trait;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Failed to load markdown file: {path} (Status: {status})")]
    Status { path: String, status: u16 },
    #[error("Failed to load markdown file: {path} ({source})")]
    Network {
        path: String,
        source: reqwest::Error,
    },
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid content URL {path}: {source}")]
    InvalidUrl {
        path: String,
        source: url::ParseError,
    },
}

/// Somewhere raw markdown can be fetched from by path.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<String, FetchError>;
}

/// Fetches markdown from a [`ContentSource`] and renders it.
pub struct Loader {
    source: Box<dyn ContentSource>,
}

impl Loader {
    pub fn new(source: impl ContentSource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// Fetch the raw markdown for `path` without rendering it
    pub async fn load(&self, path: &str) -> Result<String, FetchError> {
        self.source.fetch(path).await
    }

    /// Fetch and render `path`.
    ///
    /// Never fails: a fetch error is logged and rendered as an inline error
    /// fragment so the host page can show it in place of the content.
    pub async fn load_and_render(&self, path: &str) -> String {
        match self.load(path).await {
            Ok(markdown) => render(&markdown),
            Err(e) => {
                log::error!("Error loading or rendering markdown: {e}");
                error_fragment(&e)
            }
        }
    }
}

/// HTML shown in place of content that could not be fetched
pub fn error_fragment(error: &FetchError) -> String {
    format!(
        "<p>Error loading content: {}</p>",
        html_escape::encode_text(&error.to_string())
    )
}
