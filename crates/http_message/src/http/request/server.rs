use std::{collections::HashMap, sync::Arc};

use crate::http::{
    message::{HttpMessage, Message},
    method::Method,
    upload::UploadedFile,
    uri::Uri,
};

use super::{HttpRequest, Request};

pub type Params = HashMap<String, String>;

/// Uploaded files keyed by the name of their form field
pub type UploadedFiles = HashMap<String, Arc<UploadedFile>>;

/// A request as received by a server, with the parameters the server extracted from it
#[derive(Debug, Clone, Default)]
pub struct ServerRequest {
    request: Request,
    server_params: Params,
    cookie_params: Params,
    query_params: Params,
    uploaded_files: UploadedFiles,
    parsed_body: Option<Params>,
    attributes: Params,
}

impl ServerRequest {
    pub fn new(method: Method, uri: Uri, server_params: Params) -> Self {
        Self {
            request: Request::new(method, uri),
            server_params,
            ..Self::default()
        }
    }

    pub fn server_params(&self) -> &Params {
        &self.server_params
    }

    pub fn with_server_params(&self, params: Params) -> Self {
        Self {
            server_params: params,
            ..self.clone()
        }
    }

    pub fn cookie_params(&self) -> &Params {
        &self.cookie_params
    }

    pub fn with_cookie_params(&self, params: Params) -> Self {
        Self {
            cookie_params: params,
            ..self.clone()
        }
    }

    pub fn query_params(&self) -> &Params {
        &self.query_params
    }

    pub fn with_query_params(&self, params: Params) -> Self {
        Self {
            query_params: params,
            ..self.clone()
        }
    }

    pub fn uploaded_files(&self) -> &UploadedFiles {
        &self.uploaded_files
    }

    pub fn with_uploaded_files(&self, files: UploadedFiles) -> Self {
        Self {
            uploaded_files: files,
            ..self.clone()
        }
    }

    pub fn parsed_body(&self) -> Option<&Params> {
        self.parsed_body.as_ref()
    }

    /// `None` removes the parsed body
    pub fn with_parsed_body(&self, body: Option<Params>) -> Self {
        Self {
            parsed_body: body,
            ..self.clone()
        }
    }

    pub fn attributes(&self) -> &Params {
        &self.attributes
    }

    pub fn attribute<'a>(&'a self, name: &str, default: Option<&'a str>) -> Option<&'a str> {
        self.attributes.get(name).map(String::as_str).or(default)
    }

    pub fn with_attribute(&self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut new = self.clone();
        new.attributes.insert(name.into(), value.into());
        new
    }

    pub fn without_attribute(&self, name: &str) -> Self {
        let mut new = self.clone();
        new.attributes.remove(name);
        new
    }
}

impl HttpMessage for ServerRequest {
    fn message(&self) -> &Message {
        self.request.message()
    }

    fn message_mut(&mut self) -> &mut Message {
        self.request.message_mut()
    }
}

impl HttpRequest for ServerRequest {
    fn request(&self) -> &Request {
        &self.request
    }

    fn request_mut(&mut self) -> &mut Request {
        &mut self.request
    }
}
