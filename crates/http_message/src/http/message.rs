//! The parts every HTTP message has: a protocol version, headers and a body

use crate::http::{
    Body, HttpVersion,
    header::{HeaderMap, is_valid_header_name, is_valid_header_value},
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MessageError {
    #[error("the protocol version {0:?} is not supported")]
    UnsupportedProtocolVersion(String),
    #[error("{0:?} is not a valid header name")]
    InvalidHeaderName(String),
    #[error("a value of header {0:?} contains CR, LF or NUL")]
    InvalidHeaderValue(String),
}

#[derive(Debug, Clone, Default)]
pub struct Message {
    version: HttpVersion,
    headers: HeaderMap,
    body: Body,
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unchecked access for callers which only insert names and values known to be valid
    pub(crate) fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }
}

impl HttpMessage for Message {
    fn message(&self) -> &Message {
        self
    }

    fn message_mut(&mut self) -> &mut Message {
        self
    }
}

/// Read access and immutable updates for anything built around a [`Message`]
///
/// Every `with_*` and `without_*` method returns an updated copy and leaves `self` unchanged.
/// Copies share the body.
pub trait HttpMessage: Clone {
    fn message(&self) -> &Message;

    fn message_mut(&mut self) -> &mut Message;

    fn protocol_version(&self) -> HttpVersion {
        self.message().version
    }

    /// Accepts `"1.0"`, `"1.1"` and their `HTTP/` prefixed forms
    fn with_protocol_version(&self, version: &str) -> Result<Self, MessageError> {
        let parsed = version
            .parse::<HttpVersion>()
            .ok()
            .filter(HttpVersion::is_supported)
            .ok_or_else(|| MessageError::UnsupportedProtocolVersion(version.to_owned()))?;
        let mut new = self.clone();
        new.message_mut().version = parsed;
        Ok(new)
    }

    fn headers(&self) -> &HeaderMap {
        &self.message().headers
    }

    fn has_header(&self, name: &str) -> bool {
        self.message().headers.contains(name)
    }

    /// Values of the header, empty if it is not set
    fn header(&self, name: &str) -> &[String] {
        self.message().headers.get_all(name)
    }

    /// Values of the header joined with `,`
    fn header_line(&self, name: &str) -> String {
        self.header(name).join(",")
    }

    /// Replaces the values of a header
    fn with_header<I, V>(&self, name: &str, values: I) -> Result<Self, MessageError>
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let values = checked_header(name, values)?;
        let mut new = self.clone();
        new.message_mut().headers.insert(name, values);
        Ok(new)
    }

    /// Adds values after any existing values of a header
    fn with_added_header<I, V>(&self, name: &str, values: I) -> Result<Self, MessageError>
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let values = checked_header(name, values)?;
        let mut new = self.clone();
        new.message_mut().headers.append(name, values);
        Ok(new)
    }

    fn without_header(&self, name: &str) -> Self {
        let mut new = self.clone();
        new.message_mut().headers.remove(name);
        new
    }

    fn body(&self) -> &Body {
        &self.message().body
    }

    fn with_body(&self, body: impl Into<Body>) -> Self {
        let mut new = self.clone();
        new.message_mut().body = body.into();
        new
    }
}

fn checked_header<I, V>(name: &str, values: I) -> Result<Vec<String>, MessageError>
where
    I: IntoIterator<Item = V>,
    V: Into<String>,
{
    if !is_valid_header_name(name) {
        log::debug!("rejected header name {name:?}");
        return Err(MessageError::InvalidHeaderName(name.to_owned()));
    }
    values
        .into_iter()
        .map(|value| {
            let value = value.into();
            if is_valid_header_value(&value) {
                Ok(value)
            } else {
                log::debug!("rejected value {value:?} of header {name:?}");
                Err(MessageError::InvalidHeaderValue(name.to_owned()))
            }
        })
        .collect()
}
