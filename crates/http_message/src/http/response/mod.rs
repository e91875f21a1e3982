use std::{borrow::Cow, fmt::Display};

use crate::http::{
    header::is_valid_header_value,
    message::{HttpMessage, Message, MessageError},
};

/// A status code from the RFC 7231 registry
/// SPEC: RFC 7231 - 6. Response Status Codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusCode(u16);

impl StatusCode {
    pub const CONTINUE: Self = Self(100);
    pub const OK: Self = Self(200);
    pub const CREATED: Self = Self(201);
    pub const NO_CONTENT: Self = Self(204);
    pub const MOVED_PERMANENTLY: Self = Self(301);
    pub const FOUND: Self = Self(302);
    pub const BAD_REQUEST: Self = Self(400);
    pub const NOT_FOUND: Self = Self(404);
    pub const INTERNAL_SERVER_ERROR: Self = Self(500);

    /// Returns the status code if it is in the registry
    pub const fn from_u16(code: u16) -> Option<Self> {
        match Self(code).canonical_reason() {
            Some(_) => Some(Self(code)),
            None => None,
        }
    }

    pub const fn as_u16(&self) -> u16 {
        self.0
    }

    pub const fn canonical_reason(&self) -> Option<&'static str> {
        Some(match self.0 {
            100 => "Continue",
            101 => "Switching Protocols",
            200 => "OK",
            201 => "Created",
            202 => "Accepted",
            203 => "Non-Authoritative Information",
            204 => "No Content",
            205 => "Reset Content",
            206 => "Partial Content",
            300 => "Multiple Choices",
            301 => "Moved Permanently",
            302 => "Found",
            303 => "See Other",
            304 => "Not Modified",
            305 => "Use Proxy",
            307 => "Temporary Redirect",
            400 => "Bad Request",
            401 => "Unauthorized",
            402 => "Payment Required",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            406 => "Not Acceptable",
            407 => "Proxy Authentication Required",
            408 => "Request Timeout",
            409 => "Conflict",
            410 => "Gone",
            411 => "Length Required",
            412 => "Precondition Failed",
            413 => "Payload Too Large",
            414 => "URI Too Long",
            415 => "Unsupported Media Type",
            416 => "Range Not Satisfiable",
            417 => "Expectation Failed",
            426 => "Upgrade Required",
            500 => "Internal Server Error",
            501 => "Not Implemented",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            504 => "Gateway Timeout",
            505 => "HTTP Version Not Supported",
            _ => return None,
        })
    }
}

impl Default for StatusCode {
    fn default() -> Self {
        Self::OK
    }
}

impl Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl TryFrom<u16> for StatusCode {
    type Error = ResponseError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        Self::from_u16(code).ok_or(ResponseError::InvalidStatusCode(code))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResponseError {
    #[error("the status code {0} is not valid")]
    InvalidStatusCode(u16),
    #[error("the reason phrase {0:?} contains CR, LF or NUL")]
    InvalidReasonPhrase(String),
    #[error(transparent)]
    Message(#[from] MessageError),
}

#[derive(Debug, Clone, Default)]
pub struct Response {
    message: Message,
    status: StatusCode,
    reason: Option<String>,
}

impl Response {
    /// Builds a response, an empty reason phrase falls back to the canonical one
    pub fn new(code: u16, reason: &str) -> Result<Self, ResponseError> {
        Self::default().with_status(code, reason)
    }

    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    pub fn reason_phrase(&self) -> Cow<'_, str> {
        match &self.reason {
            Some(reason) => Cow::Borrowed(reason),
            None => Cow::Borrowed(self.status.canonical_reason().unwrap_or_default()),
        }
    }

    pub fn with_status(&self, code: u16, reason: &str) -> Result<Self, ResponseError> {
        let status = StatusCode::try_from(code)?;
        if !is_valid_header_value(reason) {
            return Err(ResponseError::InvalidReasonPhrase(reason.to_owned()));
        }
        Ok(Self {
            status,
            reason: (!reason.is_empty()).then(|| reason.to_owned()),
            ..self.clone()
        })
    }
}

impl HttpMessage for Response {
    fn message(&self) -> &Message {
        &self.message
    }

    fn message_mut(&mut self) -> &mut Message {
        &mut self.message
    }
}
