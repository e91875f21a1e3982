pub mod header;
pub mod message;
pub mod method;
pub mod request;
pub mod response;
pub mod stream;
pub mod upload;
pub mod uri;

mod version;
pub use version::{HttpVersion, ParseHttpVersionError};

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::http::stream::Stream;

/// The body of a message, shared between the copies a `with_*` call makes
#[derive(Debug, Clone, Default)]
pub struct Body(Arc<Mutex<Stream>>);

impl Body {
    /// A body without a resource
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(stream: Stream) -> Self {
        Self(Arc::new(Mutex::new(stream)))
    }

    pub async fn lock(&self) -> MutexGuard<'_, Stream> {
        self.0.lock().await
    }

    /// True if both bodies are the same stream
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Stream> for Body {
    fn from(stream: Stream) -> Self {
        Self::new(stream)
    }
}
