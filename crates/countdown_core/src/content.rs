use std::{io, path::PathBuf};

use async_trait::async_trait;
use reqwest::Client;
use shared::{domain::ContentPath, error::ContentError};
use tracing::debug;
use url::Url;
use view_integration::ContentSource;

/// Fetches fragments relative to a base URL.
#[derive(Debug, Clone)]
pub struct HttpContentSource {
    http: Client,
    base: Url,
}

impl HttpContentSource {
    pub fn new(base: &str) -> Result<Self, ContentError> {
        // Without a trailing slash `Url::join` would replace the last segment.
        let normalized = if base.ends_with('/') {
            base.to_string()
        } else {
            format!("{base}/")
        };
        let base = Url::parse(&normalized).map_err(|e| ContentError::InvalidLocation {
            path: base.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            http: Client::new(),
            base,
        })
    }

    fn url_for(&self, path: &ContentPath) -> Result<Url, ContentError> {
        self.base
            .join(path.as_str())
            .map_err(|e| ContentError::InvalidLocation {
                path: path.to_string(),
                message: e.to_string(),
            })
    }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    async fn fetch(&self, path: &ContentPath) -> Result<String, ContentError> {
        let url = self.url_for(path)?;
        debug!(%url, "fetching fragment");
        let transport = |e: reqwest::Error| ContentError::Transport {
            path: path.to_string(),
            message: e.to_string(),
        };

        let response = self.http.get(url).send().await.map_err(transport)?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ContentError::NotFound {
                path: path.to_string(),
            });
        }
        if !status.is_success() {
            return Err(ContentError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().await.map_err(transport)
    }
}

/// Reads fragments from files under a root directory.
#[derive(Debug, Clone)]
pub struct DirContentSource {
    root: PathBuf,
}

impl DirContentSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ContentSource for DirContentSource {
    async fn fetch(&self, path: &ContentPath) -> Result<String, ContentError> {
        if path.as_str().split('/').any(|segment| segment == "..") {
            return Err(ContentError::InvalidLocation {
                path: path.to_string(),
                message: "path escapes the content root".into(),
            });
        }
        let file = self.root.join(path.as_str());
        debug!(file = %file.display(), "reading fragment");
        tokio::fs::read_to_string(&file)
            .await
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => ContentError::NotFound {
                    path: path.to_string(),
                },
                _ => ContentError::Io {
                    path: path.to_string(),
                    message: e.to_string(),
                },
            })
    }
}

/// Picks an HTTP source for `http(s)://` locations and a directory source
/// for everything else.
pub fn source_for_location(location: &str) -> Result<Box<dyn ContentSource>, ContentError> {
    let lower = location.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Ok(Box::new(HttpContentSource::new(location)?))
    } else {
        Ok(Box::new(DirContentSource::new(location)))
    }
}

#[cfg(test)]
#[path = "tests/content_tests.rs"]
mod tests;
