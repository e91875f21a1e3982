use std::{future::Future, io, path::Path};

use crate::http::stream::{Stream, StreamError};

/// The file system operations an uploaded file needs
///
/// Tests swap in implementations which fail on demand.
pub trait FileSystem: Send + Sync {
    fn is_dir(&self, path: &Path) -> impl Future<Output = bool> + Send;

    fn is_file(&self, path: &Path) -> impl Future<Output = bool> + Send;

    fn is_writable(&self, path: &Path) -> impl Future<Output = bool> + Send;

    fn open(&self, path: &Path, mode: &str)
    -> impl Future<Output = Result<Stream, StreamError>> + Send;

    fn rename(&self, from: &Path, to: &Path) -> impl Future<Output = io::Result<()>> + Send;

    fn copy(&self, from: &Path, to: &Path) -> impl Future<Output = io::Result<u64>> + Send;

    fn remove_file(&self, path: &Path) -> impl Future<Output = io::Result<()>> + Send;
}

/// The real file system, through `tokio::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    async fn is_dir(&self, path: &Path) -> bool {
        tokio::fs::metadata(path)
            .await
            .is_ok_and(|meta| meta.is_dir())
    }

    async fn is_file(&self, path: &Path) -> bool {
        tokio::fs::metadata(path)
            .await
            .is_ok_and(|meta| meta.is_file())
    }

    async fn is_writable(&self, path: &Path) -> bool {
        tokio::fs::metadata(path)
            .await
            .is_ok_and(|meta| !meta.permissions().readonly())
    }

    async fn open(&self, path: &Path, mode: &str) -> Result<Stream, StreamError> {
        Stream::open(path, mode).await
    }

    async fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        tokio::fs::rename(from, to).await
    }

    async fn copy(&self, from: &Path, to: &Path) -> io::Result<u64> {
        tokio::fs::copy(from, to).await
    }

    async fn remove_file(&self, path: &Path) -> io::Result<()> {
        tokio::fs::remove_file(path).await
    }
}
