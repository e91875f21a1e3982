//! Byte streams backing message bodies and uploaded files

use std::{fmt, io::SeekFrom, path::Path};

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeek, AsyncSeekExt, AsyncWrite, AsyncWriteExt};

mod mode;
pub use mode::Mode;

#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("the underlying resource is detached or closed")]
    Detached,
    #[error("the underlying resource is not seekable")]
    NotSeekable,
    #[error("the underlying resource is not readable")]
    NotReadable,
    #[error("the underlying resource is not writable")]
    NotWritable,
    #[error("invalid stream mode {0:?}")]
    InvalidMode(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Upper bound on the buffer reserved ahead of a read, larger reads grow as data arrives
const READ_RESERVE: usize = 64 * 1024;

/// The I/O a stream needs from its resource
pub trait StreamIo: AsyncRead + AsyncWrite + AsyncSeek + Send + Sync + Unpin {}

impl<T> StreamIo for T where T: AsyncRead + AsyncWrite + AsyncSeek + Send + Sync + Unpin {}

/// A stream over an optional resource
///
/// Once closed or detached the stream has no resource, most operations then fail with
/// [`StreamError::Detached`].
pub struct Stream {
    io: Option<Box<dyn StreamIo>>,
    mode: Mode,
    seekable: bool,
    eof: bool,
}

impl fmt::Debug for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream")
            .field("attached", &self.io.is_some())
            .field("mode", &self.mode)
            .field("seekable", &self.seekable)
            .field("eof", &self.eof)
            .finish()
    }
}

impl Default for Stream {
    fn default() -> Self {
        Self::null()
    }
}

impl Stream {
    /// A stream without a resource
    pub fn null() -> Self {
        Self {
            io: None,
            mode: Mode::READ,
            seekable: false,
            eof: true,
        }
    }

    pub fn from_io<T>(io: T, mode: Mode, seekable: bool) -> Self
    where
        T: StreamIo + 'static,
    {
        Self {
            io: Some(Box::new(io)),
            mode,
            seekable,
            eof: false,
        }
    }

    /// An in-memory read-write stream holding `contents`, positioned at its end
    pub fn from_contents(contents: impl Into<Vec<u8>>) -> Self {
        let contents = contents.into();
        let mut cursor = std::io::Cursor::new(contents);
        cursor.set_position(cursor.get_ref().len() as u64);
        Self::from_io(cursor, Mode::WRITE_READ, true)
    }

    /// Opens a file, `mode` is an fopen mode string such as `"r"` or `"w+b"`
    pub async fn open(path: impl AsRef<Path>, mode: &str) -> Result<Self, StreamError> {
        let mode: Mode = mode.parse()?;
        let path = path.as_ref();
        let file = mode.open_options().open(path).await.map_err(|err| {
            log::debug!("failed to open {} with mode {mode}: {err}", path.display());
            err
        })?;
        Ok(Self::from_io(file, mode, true))
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Flushes and drops the resource, closing a closed stream does nothing
    pub async fn close(&mut self) -> Result<(), StreamError> {
        match self.io.take() {
            Some(mut io) => {
                self.eof = true;
                io.shutdown().await?;
                Ok(())
            }
            None => Ok(()),
        }
    }

    /// Separates the resource from the stream, leaving the stream unusable
    pub fn detach(&mut self) -> Option<Box<dyn StreamIo>> {
        self.eof = true;
        self.io.take()
    }

    pub fn is_detached(&self) -> bool {
        self.io.is_none()
    }

    /// Size in bytes, `None` if detached or the size can not be found without seeking
    pub async fn size(&mut self) -> Result<Option<u64>, StreamError> {
        if !self.seekable {
            return Ok(None);
        }
        let Some(io) = self.io.as_mut() else {
            return Ok(None);
        };
        let position = io.stream_position().await?;
        let end = io.seek(SeekFrom::End(0)).await?;
        io.seek(SeekFrom::Start(position)).await?;
        Ok(Some(end))
    }

    pub async fn tell(&mut self) -> Result<u64, StreamError> {
        Ok(self.io()?.stream_position().await?)
    }

    /// True once a read came up short, and always for a detached stream
    pub fn eof(&self) -> bool {
        self.io.is_none() || self.eof
    }

    pub fn is_seekable(&self) -> bool {
        self.io.is_some() && self.seekable
    }

    pub async fn seek(&mut self, position: SeekFrom) -> Result<u64, StreamError> {
        let seekable = self.seekable;
        let io = self.io()?;
        if !seekable {
            return Err(StreamError::NotSeekable);
        }
        let offset = io.seek(position).await?;
        self.eof = false;
        Ok(offset)
    }

    pub async fn rewind(&mut self) -> Result<(), StreamError> {
        self.seek(SeekFrom::Start(0)).await.map(|_| ())
    }

    pub fn is_writable(&self) -> bool {
        self.io.is_some() && self.mode.is_writable()
    }

    /// Writes all of `data`, returning the number of bytes written
    pub async fn write(&mut self, data: &[u8]) -> Result<usize, StreamError> {
        let writable = self.mode.is_writable();
        let io = self.io()?;
        if !writable {
            return Err(StreamError::NotWritable);
        }
        io.write_all(data).await?;
        io.flush().await?;
        Ok(data.len())
    }

    pub fn is_readable(&self) -> bool {
        self.io.is_some() && self.mode.is_readable()
    }

    /// Reads up to `len` bytes, fewer only at the end of the stream
    pub async fn read(&mut self, len: usize) -> Result<Bytes, StreamError> {
        let io = self.readable_io()?;
        let mut buf = Vec::with_capacity(len.min(READ_RESERVE));
        (&mut **io).take(len as u64).read_to_end(&mut buf).await?;
        if buf.len() < len {
            self.eof = true;
        }
        Ok(Bytes::from(buf))
    }

    /// Everything from the start of the stream, or from the current position if it can not
    /// seek
    pub async fn contents(&mut self) -> Result<Bytes, StreamError> {
        let seekable = self.seekable;
        let io = self.readable_io()?;
        if seekable {
            io.seek(SeekFrom::Start(0)).await?;
        }
        let mut buf = Vec::new();
        io.read_to_end(&mut buf).await?;
        self.eof = true;
        Ok(Bytes::from(buf))
    }

    /// The whole stream as text, empty if it can not be read
    pub async fn to_string_lossy(&mut self) -> String {
        let contents = match self.rewind().await {
            Ok(()) => self.contents().await,
            Err(err) => Err(err),
        };
        match contents {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(err) => {
                log::warn!("unable to read stream contents: {err}");
                String::new()
            }
        }
    }

    fn io(&mut self) -> Result<&mut Box<dyn StreamIo>, StreamError> {
        self.io.as_mut().ok_or(StreamError::Detached)
    }

    fn readable_io(&mut self) -> Result<&mut Box<dyn StreamIo>, StreamError> {
        let readable = self.mode.is_readable();
        let io = self.io()?;
        if !readable {
            return Err(StreamError::NotReadable);
        }
        Ok(io)
    }
}

static_assertions::assert_impl_all!(Stream: Send, Sync);
