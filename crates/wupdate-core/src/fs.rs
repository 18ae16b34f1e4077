//! Filesystem collaborator.
//!
//! `MKDIR` and `MKFILE` both need missing ancestor directories created on the
//! way, and both must succeed when run a second time over the same tree. The
//! [`FileSystem`] trait captures exactly those two operations.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

/// Errors from directory or file creation.
#[derive(Error, Debug)]
pub enum FsError {
    #[error("cannot create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot create file {}: {source}", path.display())]
    CreateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Directory and file creation used by the script engine.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Create `path` and every missing ancestor. Existing directories are not an error.
    async fn create_dir_all(&self, path: &Path) -> Result<(), FsError>;

    /// Create missing ancestors of `path`, then create an empty file at
    /// `path`, truncating it if it already exists.
    async fn create_file(&self, path: &Path) -> Result<(), FsError>;
}

/// [`FileSystem`] backed by the local disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

#[async_trait]
impl FileSystem for LocalFileSystem {
    async fn create_dir_all(&self, path: &Path) -> Result<(), FsError> {
        debug!(path = %path.display(), "create_dir_all");
        tokio::fs::create_dir_all(path)
            .await
            .map_err(|source| FsError::CreateDir {
                path: path.to_path_buf(),
                source,
            })
    }

    async fn create_file(&self, path: &Path) -> Result<(), FsError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.create_dir_all(parent).await?;
        }
        debug!(path = %path.display(), "create_file");
        tokio::fs::File::create(path)
            .await
            .map(drop)
            .map_err(|source| FsError::CreateFile {
                path: path.to_path_buf(),
                source,
            })
    }
}
