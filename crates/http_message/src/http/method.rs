use std::{
    fmt::{self, Display},
    str::FromStr,
};

/// An HTTP Method
/// SPEC: RFC 9110 - 9. Methods
///
/// Only the methods registered by RFC 9110 and RFC 5789 (`PATCH`) are supported, matched
/// case-sensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Method(Builtin);

static_assertions::assert_eq_size!(Method, u8);

impl Method {
    pub const GET: Self = Self(Builtin::GET);
    pub const HEAD: Self = Self(Builtin::HEAD);
    pub const POST: Self = Self(Builtin::POST);
    pub const PUT: Self = Self(Builtin::PUT);
    pub const PATCH: Self = Self(Builtin::PATCH);
    pub const DELETE: Self = Self(Builtin::DELETE);
    pub const CONNECT: Self = Self(Builtin::CONNECT);
    pub const OPTIONS: Self = Self(Builtin::OPTIONS);
    pub const TRACE: Self = Self(Builtin::TRACE);

    pub const SUPPORTED: &'static [Self] = &[
        Self::GET,
        Self::HEAD,
        Self::POST,
        Self::PUT,
        Self::PATCH,
        Self::DELETE,
        Self::CONNECT,
        Self::OPTIONS,
        Self::TRACE,
    ];

    pub fn as_str(&self) -> &'static str {
        self.0.as_str()
    }

    /// Safe Methods are methods which can be cached by
    /// SPEC: [RFC 9110 9.2.1 Safe Methods](https://httpwg.org/specs/rfc9110.html#safe.methods)
    pub fn is_safe(&self) -> bool {
        matches!(
            self.0,
            Builtin::GET | Builtin::HEAD | Builtin::OPTIONS | Builtin::TRACE
        )
    }

    /// Idempotent Methods are requests where the side effects are the same if multiple identical
    /// requests are sent
    /// SPEC: [RFC 9110 9.2.2 Idempotent Methods](https://httpwg.org/specs/rfc9110.html#idempotent.methods)
    pub fn is_idempotent(&self) -> bool {
        match self.0 {
            Builtin::PUT | Builtin::DELETE => true,
            _ => self.is_safe(),
        }
    }
}

impl Default for Method {
    fn default() -> Self {
        Self::GET
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("the method {0:?} is not supported")]
pub struct UnsupportedMethodError(pub String);

impl FromStr for Method {
    type Err = UnsupportedMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(match s {
            "GET" => Builtin::GET,
            "HEAD" => Builtin::HEAD,
            "POST" => Builtin::POST,
            "PUT" => Builtin::PUT,
            "PATCH" => Builtin::PATCH,
            "DELETE" => Builtin::DELETE,
            "CONNECT" => Builtin::CONNECT,
            "OPTIONS" => Builtin::OPTIONS,
            "TRACE" => Builtin::TRACE,
            _ => return Err(UnsupportedMethodError(s.to_owned())),
        }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::upper_case_acronyms)]
enum Builtin {
    GET,
    HEAD,
    POST,
    PUT,
    PATCH,
    DELETE,
    CONNECT,
    OPTIONS,
    TRACE,
}

impl Builtin {
    fn as_str(&self) -> &'static str {
        match self {
            Self::GET => "GET",
            Self::HEAD => "HEAD",
            Self::POST => "POST",
            Self::PUT => "PUT",
            Self::PATCH => "PATCH",
            Self::DELETE => "DELETE",
            Self::CONNECT => "CONNECT",
            Self::OPTIONS => "OPTIONS",
            Self::TRACE => "TRACE",
        }
    }
}
