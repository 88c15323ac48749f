use super::{ContentSource, FetchError};
use async_trait::async_trait;
use url::Url;

/// Fetches markdown over HTTP.
///
/// Absolute `http(s)://` paths are fetched as given; anything else is joined
/// onto the base URL. No request timeout is set, callers that need one must
/// race the future themselves.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: Option<Url>,
}

impl HttpSource {
    /// Create a source that resolves relative paths against `base_url`
    pub fn new(base_url: Option<&str>) -> Result<Self, FetchError> {
        let base_url = base_url
            .map(|base| {
                // Without a trailing slash `join` would replace the last segment.
                let base = if base.ends_with('/') {
                    base.to_string()
                } else {
                    format!("{base}/")
                };
                Url::parse(&base).map_err(|source| FetchError::InvalidUrl { path: base, source })
            })
            .transpose()?;

        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    pub fn resolve(&self, path: &str) -> Result<Url, FetchError> {
        match (Url::parse(path), &self.base_url) {
            (Ok(url), _) => Ok(url),
            (Err(_), Some(base)) => base.join(path).map_err(|source| FetchError::InvalidUrl {
                path: path.to_string(),
                source,
            }),
            (Err(source), None) => Err(FetchError::InvalidUrl {
                path: path.to_string(),
                source,
            }),
        }
    }
}

#[async_trait]
impl ContentSource for HttpSource {
    async fn fetch(&self, path: &str) -> Result<String, FetchError> {
        let url = self.resolve(path)?;
        log::debug!("Fetching markdown from {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Network {
                path: path.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| FetchError::Network {
            path: path.to_string(),
            source,
        })
    }
}
