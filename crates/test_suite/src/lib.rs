//! Shared fixtures for the integration tests: logging, scratch directories and I/O which
//! fails on demand.

use std::{
    io::{self, Cursor, SeekFrom},
    path::{Path, PathBuf},
    pin::Pin,
    sync::atomic::{AtomicUsize, Ordering},
    task::{Context, Poll},
};

use carbon_http_message::http::{
    stream::{Mode, Stream, StreamError},
    upload::{FileSystem, OsFileSystem},
};
use tokio::io::{AsyncRead, AsyncSeek, AsyncWrite, ReadBuf};

/// Routes `log` output through the test harness, safe to call from every test
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A temporary directory removed again on drop
#[derive(Debug)]
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    pub fn new() -> io::Result<Self> {
        static NEXT: AtomicUsize = AtomicUsize::new(0);
        let path = std::env::temp_dir().join(format!(
            "carbon-http-{}-{}",
            std::process::id(),
            NEXT.fetch_add(1, Ordering::Relaxed)
        ));
        std::fs::create_dir_all(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn join(&self, name: impl AsRef<Path>) -> PathBuf {
        self.path.join(name)
    }

    /// Writes `contents` to `name` inside the directory and returns its path
    pub fn write(&self, name: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> io::Result<PathBuf> {
        let path = self.join(name);
        std::fs::write(&path, contents)?;
        Ok(path)
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if let Err(err) = std::fs::remove_dir_all(&self.path) {
            log::warn!("failed to remove {}: {err}", self.path.display());
        }
    }
}

fn injected(op: &str) -> io::Error {
    io::Error::other(format!("injected {op} failure"))
}

/// In-memory I/O whose reads, writes or seeks can be made to fail
#[derive(Debug, Default)]
pub struct FaultyIo {
    inner: Cursor<Vec<u8>>,
    pub fail_read: bool,
    pub fail_write: bool,
    pub fail_seek: bool,
    pub fail_shutdown: bool,
}

impl FaultyIo {
    pub fn new(contents: impl Into<Vec<u8>>) -> Self {
        Self {
            inner: Cursor::new(contents.into()),
            ..Default::default()
        }
    }

    /// Wraps the I/O in a seekable read/write stream
    pub fn into_stream(self) -> Stream {
        Stream::from_io(self, Mode::READ_WRITE, true)
    }
}

impl AsyncRead for FaultyIo {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        if this.fail_read {
            return Poll::Ready(Err(injected("read")));
        }
        Pin::new(&mut this.inner).poll_read(cx, buf)
    }
}

impl AsyncWrite for FaultyIo {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let this = self.get_mut();
        if this.fail_write {
            return Poll::Ready(Err(injected("write")));
        }
        Pin::new(&mut this.inner).poll_write(cx, buf)
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().inner).poll_flush(cx)
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        if this.fail_shutdown {
            return Poll::Ready(Err(injected("shutdown")));
        }
        Pin::new(&mut this.inner).poll_shutdown(cx)
    }
}

impl AsyncSeek for FaultyIo {
    fn start_seek(self: Pin<&mut Self>, position: SeekFrom) -> io::Result<()> {
        let this = self.get_mut();
        if this.fail_seek {
            return Err(injected("seek"));
        }
        Pin::new(&mut this.inner).start_seek(position)
    }

    fn poll_complete(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<u64>> {
        Pin::new(&mut self.get_mut().inner).poll_complete(cx)
    }
}

/// The real file system with individual operations switched to fail
#[derive(Debug, Clone, Copy, Default)]
pub struct FaultyFs {
    pub fail_open: bool,
    pub fail_rename: bool,
    pub fail_copy: bool,
    pub fail_remove: bool,
    pub deny_writable: bool,
    pub not_a_file: bool,
}

impl FileSystem for FaultyFs {
    async fn is_dir(&self, path: &Path) -> bool {
        OsFileSystem.is_dir(path).await
    }

    async fn is_file(&self, path: &Path) -> bool {
        !self.not_a_file && OsFileSystem.is_file(path).await
    }

    async fn is_writable(&self, path: &Path) -> bool {
        !self.deny_writable && OsFileSystem.is_writable(path).await
    }

    async fn open(&self, path: &Path, mode: &str) -> Result<Stream, StreamError> {
        if self.fail_open {
            return Err(injected("open").into());
        }
        OsFileSystem.open(path, mode).await
    }

    async fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        if self.fail_rename {
            return Err(injected("rename"));
        }
        OsFileSystem.rename(from, to).await
    }

    async fn copy(&self, from: &Path, to: &Path) -> io::Result<u64> {
        if self.fail_copy {
            return Err(injected("copy"));
        }
        OsFileSystem.copy(from, to).await
    }

    async fn remove_file(&self, path: &Path) -> io::Result<()> {
        if self.fail_remove {
            return Err(injected("remove"));
        }
        OsFileSystem.remove_file(path).await
    }
}
