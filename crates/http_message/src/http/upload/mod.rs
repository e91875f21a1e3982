//! Files uploaded with a request

use std::{
    fmt,
    path::{Path, PathBuf},
};

use tokio::sync::{MappedMutexGuard, Mutex, MutexGuard};

use crate::http::stream::{Stream, StreamError};

mod fs;
pub use fs::{FileSystem, OsFileSystem};

/// Bytes copied per read when moving a stream-backed upload
pub const COPY_CHUNK_SIZE: usize = 100 * 1024;

/// The status of an upload, numbered like the common `UPLOAD_ERR_*` codes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum UploadErrorCode {
    #[default]
    Ok = 0,
    IniSize = 1,
    FormSize = 2,
    Partial = 3,
    NoFile = 4,
    NoTmpDir = 6,
    CantWrite = 7,
    Extension = 8,
}

impl UploadErrorCode {
    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn is_ok(&self) -> bool {
        *self == Self::Ok
    }
}

impl TryFrom<u8> for UploadErrorCode {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Ok(match code {
            0 => Self::Ok,
            1 => Self::IniSize,
            2 => Self::FormSize,
            3 => Self::Partial,
            4 => Self::NoFile,
            6 => Self::NoTmpDir,
            7 => Self::CantWrite,
            8 => Self::Extension,
            other => return Err(other),
        })
    }
}

impl fmt::Display for UploadErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ok => "UPLOAD_ERR_OK",
            Self::IniSize => "UPLOAD_ERR_INI_SIZE",
            Self::FormSize => "UPLOAD_ERR_FORM_SIZE",
            Self::Partial => "UPLOAD_ERR_PARTIAL",
            Self::NoFile => "UPLOAD_ERR_NO_FILE",
            Self::NoTmpDir => "UPLOAD_ERR_NO_TMP_DIR",
            Self::CantWrite => "UPLOAD_ERR_CANT_WRITE",
            Self::Extension => "UPLOAD_ERR_EXTENSION",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("the uploaded file failed with error {0}")]
    Upload(UploadErrorCode),
    #[error("the uploaded file has already been moved")]
    AlreadyMoved,
    #[error("the target {0:?} is an existing directory")]
    TargetIsDirectory(PathBuf),
    #[error("the target {0:?} is an existing file which is not writable")]
    TargetNotWritable(PathBuf),
    #[error("the uploaded stream must be readable and seekable to be moved")]
    StreamNotReadable,
    #[error("the uploaded file {0:?} is not a regular file")]
    NotAFile(PathBuf),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Stream(#[from] StreamError),
}

/// How a file-backed upload reaches its target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MoveStrategy {
    /// A plain rename, for uploads made from the command line
    #[default]
    Rename,
    /// Copy to the target then remove the source, for uploads received by a server. The source
    /// must be a regular file.
    CopyAndDelete,
}

enum Source {
    Path { path: PathBuf, stream: Option<Stream> },
    Stream(Stream),
    Moved,
}

/// A file received with a request, backed by a path or by a stream
///
/// The file can be moved exactly once, after which neither its stream nor another move is
/// available.
pub struct UploadedFile<F = OsFileSystem> {
    source: Mutex<Source>,
    size: Option<u64>,
    error: UploadErrorCode,
    client_filename: Option<String>,
    client_media_type: Option<String>,
    strategy: MoveStrategy,
    fs: F,
}

impl UploadedFile<OsFileSystem> {
    pub fn from_path(path: impl Into<PathBuf>, size: Option<u64>, error: UploadErrorCode) -> Self {
        Self::with_source(
            Source::Path {
                path: path.into(),
                stream: None,
            },
            size,
            error,
        )
    }

    pub fn from_stream(stream: Stream, size: Option<u64>, error: UploadErrorCode) -> Self {
        Self::with_source(Source::Stream(stream), size, error)
    }

    fn with_source(source: Source, size: Option<u64>, error: UploadErrorCode) -> Self {
        Self {
            source: Mutex::new(source),
            size,
            error,
            client_filename: None,
            client_media_type: None,
            strategy: MoveStrategy::default(),
            fs: OsFileSystem,
        }
    }
}

impl<F: FileSystem> UploadedFile<F> {
    pub fn with_client_filename(mut self, name: impl Into<String>) -> Self {
        self.client_filename = Some(name.into());
        self
    }

    pub fn with_client_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.client_media_type = Some(media_type.into());
        self
    }

    pub fn with_move_strategy(mut self, strategy: MoveStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Replaces the file system every operation goes through
    pub fn with_file_system<G: FileSystem>(self, fs: G) -> UploadedFile<G> {
        UploadedFile {
            source: self.source,
            size: self.size,
            error: self.error,
            client_filename: self.client_filename,
            client_media_type: self.client_media_type,
            strategy: self.strategy,
            fs,
        }
    }

    pub fn size(&self) -> Option<u64> {
        self.size
    }

    pub fn error(&self) -> UploadErrorCode {
        self.error
    }

    pub fn client_filename(&self) -> Option<&str> {
        self.client_filename.as_deref()
    }

    pub fn client_media_type(&self) -> Option<&str> {
        self.client_media_type.as_deref()
    }

    pub fn move_strategy(&self) -> MoveStrategy {
        self.strategy
    }

    /// The contents of the upload, opening a file-backed upload read-only on first use
    pub async fn stream(&self) -> Result<MappedMutexGuard<'_, Stream>, UploadError> {
        self.check_error()?;
        let mut source = self.source.lock().await;

        if let Source::Path { path, stream } = &mut *source {
            if stream.is_none() {
                *stream = Some(self.fs.open(path, "r").await?);
            }
        }

        MutexGuard::try_map(source, |source| match source {
            Source::Path {
                stream: Some(stream),
                ..
            } => Some(stream),
            Source::Stream(stream) => Some(stream),
            _ => None,
        })
        .map_err(|_| UploadError::AlreadyMoved)
    }

    pub async fn has_moved(&self) -> bool {
        matches!(*self.source.lock().await, Source::Moved)
    }

    /// Moves the upload to `target`, an existing file there is overwritten
    pub async fn move_to(&self, target: impl AsRef<Path>) -> Result<(), UploadError> {
        let target = target.as_ref();
        self.check_error()?;
        let mut source = self.source.lock().await;
        if matches!(*source, Source::Moved) {
            return Err(UploadError::AlreadyMoved);
        }

        if self.fs.is_dir(target).await {
            return Err(UploadError::TargetIsDirectory(target.to_path_buf()));
        }
        if self.fs.is_file(target).await && !self.fs.is_writable(target).await {
            return Err(UploadError::TargetNotWritable(target.to_path_buf()));
        }

        match &mut *source {
            Source::Path { path, stream } => {
                if let Some(mut stream) = stream.take() {
                    stream.close().await?;
                }
                self.move_file(path, target).await?;
            }
            Source::Stream(stream) => self.copy_stream(stream, target).await?,
            Source::Moved => return Err(UploadError::AlreadyMoved),
        }

        *source = Source::Moved;
        log::debug!("moved uploaded file to {}", target.display());
        Ok(())
    }

    async fn move_file(&self, path: &Path, target: &Path) -> Result<(), UploadError> {
        match self.strategy {
            MoveStrategy::Rename => self.fs.rename(path, target).await?,
            MoveStrategy::CopyAndDelete => {
                if !self.fs.is_file(path).await {
                    return Err(UploadError::NotAFile(path.to_path_buf()));
                }
                self.fs.copy(path, target).await?;
                self.fs.remove_file(path).await?;
            }
        }
        Ok(())
    }

    async fn copy_stream(&self, stream: &mut Stream, target: &Path) -> Result<(), UploadError> {
        if !stream.is_readable() || !stream.is_seekable() {
            return Err(UploadError::StreamNotReadable);
        }

        let mut dest = self.fs.open(target, "w").await?;
        stream.rewind().await?;
        while !stream.eof() {
            let chunk = stream.read(COPY_CHUNK_SIZE).await?;
            dest.write(&chunk).await?;
        }
        dest.close().await?;
        stream.close().await?;
        Ok(())
    }

    fn check_error(&self) -> Result<(), UploadError> {
        if self.error.is_ok() {
            Ok(())
        } else {
            Err(UploadError::Upload(self.error))
        }
    }
}

impl<F> fmt::Debug for UploadedFile<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("size", &self.size)
            .field("error", &self.error)
            .field("client_filename", &self.client_filename)
            .field("client_media_type", &self.client_media_type)
            .field("strategy", &self.strategy)
            .finish_non_exhaustive()
    }
}
