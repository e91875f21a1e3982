//! URIs as immutable values
//! SPEC: RFC 3986 - Uniform Resource Identifier (URI): Generic Syntax

use std::{borrow::Cow, fmt, str::FromStr};

pub mod chars;
pub mod encode;
pub mod parser;
pub mod validate;

pub use encode::{
    encode_fragment, encode_host, encode_path, encode_query, encode_scheme, encode_user,
    encode_user_info,
};
pub use parser::{
    AuthorityComponents, UriComponents, are_components_valid, parse_authority, parse_uri,
};
pub use validate::{is_port_in_range, is_valid_port};

/// Names a single URI component in errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Scheme,
    UserInfo,
    Host,
    Port,
    Path,
    Query,
    Fragment,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Scheme => "scheme",
            Self::UserInfo => "user info",
            Self::Host => "host",
            Self::Port => "port",
            Self::Path => "path",
            Self::Query => "query",
            Self::Fragment => "fragment",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UriError {
    #[error("input contains characters outside of US-ASCII")]
    NonAsciiInput,
    #[error("malformed percent-encoding {0:?}")]
    MalformedPercentEncoding(String),
    #[error("unable to parse {0:?} as a URI")]
    UnparseableUri(String),
    #[error("{value:?} is not a valid {component}")]
    InvalidComponent { component: Component, value: String },
    #[error("the port {0} must be in range [0,65535]")]
    PortOutOfRange(String),
    #[error("the components parsed from {0:?} are not valid, the URI is not well formed")]
    InvalidComponents(String),
}

pub type UriPort = u16;

/// An immutable, percent-encoded URI
///
/// Every `with_*` method leaves `self` untouched and returns a new value, or an error if the
/// component cannot be encoded or is not valid.
///
/// ```
/// use carbon_http_message::http::uri::Uri;
///
/// let uri: Uri = "HTTP://Example.com:80/a%20b?q=1".parse().unwrap();
/// assert_eq!(uri.to_string(), "http://example.com/a%20b?q=1");
/// assert_eq!(uri.port(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Uri {
    scheme: String,
    user: String,
    password: String,
    host: String,
    port: Option<UriPort>,
    path: String,
    query: String,
    fragment: String,
}

static_assertions::assert_impl_all!(Uri: Send, Sync, Clone);

impl Uri {
    /// Schemes with a well known port which is left out of the authority
    pub const DEFAULT_PORTS: &'static [(&'static str, UriPort)] = &[("http", 80), ("https", 443)];

    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the default port of a scheme, case-insensitively
    pub fn default_port(scheme: &str) -> Option<UriPort> {
        Self::DEFAULT_PORTS
            .iter()
            .find(|(s, _)| s.eq_ignore_ascii_case(scheme))
            .map(|(_, port)| *port)
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// `[ userinfo "@" ] host [ ":" port ]`, empty when there is no host
    pub fn authority(&self) -> String {
        if self.host.is_empty() {
            return String::new();
        }

        let mut authority = String::with_capacity(self.host.len() + 16);
        let user_info = self.user_info();
        if !user_info.is_empty() {
            authority.push_str(&user_info);
            authority.push('@');
        }
        authority.push_str(&self.host);
        if let Some(port) = self.port() {
            authority.push(':');
            authority.push_str(&port.to_string());
        }
        authority
    }

    /// `user[:password]`, the password only shows when both are set
    pub fn user_info(&self) -> Cow<'_, str> {
        if self.user.is_empty() || self.password.is_empty() {
            Cow::Borrowed(&self.user)
        } else {
            Cow::Owned(format!("{}:{}", self.user, self.password))
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// The port, or `None` if it is unset or the default port of the scheme
    pub fn port(&self) -> Option<UriPort> {
        match (self.port, Self::default_port(&self.scheme)) {
            (Some(port), Some(default)) if port == default => None,
            (port, _) => port,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Sets the scheme, lower-cased. An empty scheme removes it.
    pub fn with_scheme(&self, scheme: &str) -> Result<Self, UriError> {
        let scheme = if scheme.is_empty() {
            String::new()
        } else {
            encode_scheme(scheme)?
        };
        Ok(Self {
            scheme,
            ..self.clone()
        })
    }

    /// Sets the user info. An empty user removes both the user and the password.
    ///
    /// A `:` in the user is percent-encoded, so it reads back as part of the user.
    pub fn with_user_info(&self, user: &str, password: Option<&str>) -> Result<Self, UriError> {
        let (user, password) = if user.is_empty() {
            (String::new(), String::new())
        } else {
            let user = checked(Component::UserInfo, encode_user(user)?)?;
            let password = match password {
                Some(password) => checked(Component::UserInfo, encode_user_info(password)?)?,
                None => String::new(),
            };
            (user, password)
        };
        Ok(Self {
            user,
            password,
            ..self.clone()
        })
    }

    pub fn with_host(&self, host: &str) -> Result<Self, UriError> {
        let host = checked(Component::Host, encode_host(host)?)?;
        Ok(Self {
            host,
            ..self.clone()
        })
    }

    /// Sets the port from any integer, failing unless it is in `0..=65535`
    pub fn with_port<P>(&self, port: P) -> Result<Self, UriError>
    where
        P: TryInto<UriPort> + fmt::Display + Copy,
    {
        let port = port
            .try_into()
            .map_err(|_| UriError::PortOutOfRange(port.to_string()))?;
        Ok(Self {
            port: Some(port),
            ..self.clone()
        })
    }

    pub fn without_port(&self) -> Self {
        Self {
            port: None,
            ..self.clone()
        }
    }

    pub fn with_path(&self, path: &str) -> Result<Self, UriError> {
        let path = checked(Component::Path, encode_path(path)?)?;
        Ok(Self {
            path,
            ..self.clone()
        })
    }

    pub fn with_query(&self, query: &str) -> Result<Self, UriError> {
        let query = checked(Component::Query, encode_query(query)?)?;
        Ok(Self {
            query,
            ..self.clone()
        })
    }

    pub fn with_fragment(&self, fragment: &str) -> Result<Self, UriError> {
        let fragment = checked(Component::Fragment, encode_fragment(fragment)?)?;
        Ok(Self {
            fragment,
            ..self.clone()
        })
    }
}

/// Runs the validator of `component` over its freshly encoded value
fn checked(component: Component, value: String) -> Result<String, UriError> {
    let valid = match component {
        Component::Scheme => validate::is_valid_scheme(&value),
        Component::UserInfo => validate::is_valid_user_info(&value),
        Component::Host => validate::is_valid_host(&value),
        Component::Port => validate::is_valid_port(&value),
        Component::Path => validate::is_valid_path(&value),
        Component::Query => validate::is_valid_query(&value),
        Component::Fragment => validate::is_valid_fragment(&value),
    };
    if valid {
        Ok(value)
    } else {
        log::debug!("rejected {component} {value:?}");
        Err(UriError::InvalidComponent { component, value })
    }
}

impl FromStr for Uri {
    type Err = UriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let components = parse_uri(s)?;
        if !are_components_valid(&components) {
            return Err(UriError::InvalidComponents(s.to_owned()));
        }

        let mut uri = Uri::new();
        if let Some(scheme) = components.scheme {
            uri = uri.with_scheme(scheme)?;
        }
        if let Some(user) = components.user {
            uri = uri.with_user_info(user, components.password)?;
        }
        if let Some(host) = components.host {
            uri = uri.with_host(host)?;
        }
        if let Some(port) = components.port {
            let port: UriPort = port
                .parse()
                .map_err(|_| UriError::PortOutOfRange(port.to_owned()))?;
            uri = uri.with_port(port)?;
        }
        uri = uri.with_path(components.path)?;
        if let Some(query) = components.query {
            uri = uri.with_query(query)?;
        }
        if let Some(fragment) = components.fragment {
            uri = uri.with_fragment(fragment)?;
        }
        Ok(uri)
    }
}

impl TryFrom<&str> for Uri {
    type Error = UriError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// SPEC: RFC 3986 - 4.2. Relative Reference
fn first_segment_has_colon(path: &str) -> bool {
    let segment = path.split('/').next().unwrap_or_default();
    segment.contains(':')
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.scheme.is_empty() {
            write!(f, "{}:", self.scheme)?;
        }

        let authority = self.authority();
        if !authority.is_empty() {
            write!(f, "//{authority}")?;
            if !self.path.is_empty() && !self.path.starts_with('/') {
                f.write_str("/")?;
            }
            f.write_str(&self.path)?;
        } else if self.path.starts_with("//") {
            // Would otherwise read back as an authority
            write!(f, "/{}", self.path.trim_start_matches('/'))?;
        } else if self.scheme.is_empty() && first_segment_has_colon(&self.path) {
            // Would otherwise read back as a scheme
            write!(f, "./{}", self.path)?;
        } else {
            f.write_str(&self.path)?;
        }

        if !self.query.is_empty() {
            write!(f, "?{}", self.query)?;
        }
        if !self.fragment.is_empty() {
            write!(f, "#{}", self.fragment)?;
        }
        Ok(())
    }
}
