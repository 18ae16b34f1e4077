//! HTTP download collaborator.
//!
//! [`HttpDownloader`] streams a response body straight into the destination
//! file. A non-2xx status is a failure, and a partially written file is
//! removed so a failed `DOWNLOAD` never leaves a truncated artifact behind.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::config::UpdateConfig;

/// Errors that can occur while downloading an artifact.
#[derive(Error, Debug)]
pub enum DownloadError {
    /// The HTTP client could not be constructed.
    #[error("HTTP client setup failed: {0}")]
    Client(#[source] reqwest::Error),

    /// The request could not be sent or the body could not be read.
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Writing the destination file failed.
    #[error("cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Fetches `url` into the file at `dest`.
#[async_trait]
pub trait Downloader: Send + Sync {
    /// Returns the number of bytes written on success.
    async fn download(&self, url: &str, dest: &Path) -> Result<u64, DownloadError>;
}

/// [`Downloader`] using a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpDownloader {
    client: reqwest::Client,
}

impl HttpDownloader {
    pub fn new(config: &UpdateConfig) -> Result<Self, DownloadError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.download_timeout())
            .build()
            .map_err(DownloadError::Client)?;
        Ok(Self { client })
    }

    async fn fetch_into(&self, url: &str, dest: &Path) -> Result<u64, DownloadError> {
        let request_err = |source| DownloadError::Request {
            url: url.to_string(),
            source,
        };
        let io_err = |source| DownloadError::Io {
            path: dest.to_path_buf(),
            source,
        };

        let mut response = self.client.get(url).send().await.map_err(request_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let mut file = tokio::fs::File::create(dest).await.map_err(io_err)?;
        let mut written = 0u64;
        while let Some(chunk) = response.chunk().await.map_err(request_err)? {
            file.write_all(&chunk).await.map_err(io_err)?;
            written += chunk.len() as u64;
        }
        file.flush().await.map_err(io_err)?;
        Ok(written)
    }
}

#[async_trait]
impl Downloader for HttpDownloader {
    async fn download(&self, url: &str, dest: &Path) -> Result<u64, DownloadError> {
        debug!(url, dest = %dest.display(), "download starting");
        match self.fetch_into(url, dest).await {
            Ok(bytes) => {
                info!(url, dest = %dest.display(), bytes, "download finished");
                Ok(bytes)
            }
            Err(e) => {
                if matches!(e, DownloadError::Request { .. } | DownloadError::Io { .. }) {
                    let _ = tokio::fs::remove_file(dest).await;
                }
                Err(e)
            }
        }
    }
}
