use std::borrow::Cow;

mod server;
mod target;
pub use server::{Params, ServerRequest, UploadedFiles};
pub use target::{
    RequestTargetClassifier, RequestTargetForm, RequestTargetForms, classify_request_target,
};

use crate::http::{
    message::{HttpMessage, Message, MessageError},
    method::{Method, UnsupportedMethodError},
    uri::{Uri, UriError},
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error(transparent)]
    UnsupportedMethod(#[from] UnsupportedMethodError),
    #[error(
        "the request target {0:?} is not in origin-form, absolute-form, authority-form or asterisk-form"
    )]
    UnrecognizedTarget(String),
    #[error(transparent)]
    Message(#[from] MessageError),
    #[error(transparent)]
    Uri(#[from] UriError),
}

/// An outgoing request: a message with a method, a URI and a request target
#[derive(Debug, Clone, Default)]
pub struct Request {
    message: Message,
    method: Method,
    target: Option<String>,
    uri: Uri,
}

impl Request {
    /// Builds a request, setting `Host` from the URI
    pub fn new(method: Method, uri: Uri) -> Self {
        Self {
            method,
            ..Self::default()
        }
        .with_uri(uri, false)
    }

    /// Builds a request from a method name and a URI string
    pub fn parse(method: &str, uri: &str) -> Result<Self, RequestError> {
        Ok(Self::new(method.parse()?, uri.parse()?))
    }
}

impl HttpMessage for Request {
    fn message(&self) -> &Message {
        &self.message
    }

    fn message_mut(&mut self) -> &mut Message {
        &mut self.message
    }
}

impl HttpRequest for Request {
    fn request(&self) -> &Request {
        self
    }

    fn request_mut(&mut self) -> &mut Request {
        self
    }
}

/// Read access and immutable updates for anything built around a [`Request`]
pub trait HttpRequest: HttpMessage {
    fn request(&self) -> &Request;

    fn request_mut(&mut self) -> &mut Request;

    fn method(&self) -> Method {
        self.request().method
    }

    /// Method names are case-sensitive, `"get"` is not `GET`
    fn with_method(&self, method: &str) -> Result<Self, RequestError> {
        let method = method.parse()?;
        let mut new = self.clone();
        new.request_mut().method = method;
        Ok(new)
    }

    /// The explicit request target if one was set, otherwise the origin-form of the URI
    fn request_target(&self) -> Cow<'_, str> {
        let request = self.request();
        if let Some(target) = &request.target {
            return Cow::Borrowed(target);
        }

        let path = match request.uri.path() {
            "" => "/",
            path => path,
        };
        match request.uri.query() {
            "" => Cow::Borrowed(path),
            query => Cow::Owned(format!("{path}?{query}")),
        }
    }

    /// Sets an explicit request target in any of the four RFC 7230 forms
    fn with_request_target(&self, target: &str) -> Result<Self, RequestError> {
        if !classify_request_target(target).any() {
            log::debug!("rejected request target {target:?}");
            return Err(RequestError::UnrecognizedTarget(target.to_owned()));
        }
        let mut new = self.clone();
        new.request_mut().target = Some(target.to_owned());
        Ok(new)
    }

    fn uri(&self) -> &Uri {
        &self.request().uri
    }

    /// Replaces the URI and sets `Host` to its host
    ///
    /// `Host` is left alone when the URI has no host, or when `preserve_host` is set and the
    /// request already has a non-empty `Host`.
    fn with_uri(&self, uri: Uri, preserve_host: bool) -> Self {
        let keep_host =
            uri.host().is_empty() || (preserve_host && !self.header_line("Host").is_empty());
        let mut new = self.clone();
        if !keep_host {
            // A valid URI host is always a valid header value
            new.message_mut()
                .headers_mut()
                .insert("Host", [uri.host().to_owned()]);
        }
        new.request_mut().uri = uri;
        new
    }
}
