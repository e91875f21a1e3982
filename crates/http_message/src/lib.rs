//! Immutable HTTP message values with RFC 3986 URI handling
//!
//! Every `with_*` operation returns a modified copy and leaves the receiver untouched. Bodies
//! and uploaded files are shared between copies.

pub mod http;

pub use http::{
    Body, HttpVersion,
    message::{HttpMessage, Message, MessageError},
    method::Method,
    request::{HttpRequest, Request, RequestError, ServerRequest},
    response::{Response, ResponseError, StatusCode},
    stream::{Stream, StreamError},
    upload::{UploadError, UploadErrorCode, UploadedFile},
    uri::{Uri, UriError},
};
