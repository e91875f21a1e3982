use std::str::FromStr;

/// HTTP Version
/// SPEC: RFC 9110 - 2.5. Protocol Version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HttpVersion {
    pub major: u8,
    pub minor: u8,
}

impl HttpVersion {
    pub const HTTP_1_0: Self = Self { major: 1, minor: 0 };
    pub const HTTP_1_1: Self = Self { major: 1, minor: 1 };

    /// Versions a message may carry
    pub const SUPPORTED: &'static [Self] = &[Self::HTTP_1_0, Self::HTTP_1_1];

    pub fn is_supported(&self) -> bool {
        Self::SUPPORTED.contains(self)
    }
}

impl Default for HttpVersion {
    fn default() -> Self {
        Self::HTTP_1_1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseHttpVersionError;

impl std::fmt::Display for ParseHttpVersionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("invalid HTTP version")
    }
}

impl std::error::Error for ParseHttpVersionError {}

impl FromStr for HttpVersion {
    type Err = ParseHttpVersionError;

    /// Accepts both the bare `1.1` form and the `HTTP/1.1` form of the request line
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix("HTTP/").unwrap_or(s);
        let (major, minor) = s.split_once('.').ok_or(ParseHttpVersionError)?;
        let is_number = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !is_number(major) || !is_number(minor) {
            return Err(ParseHttpVersionError);
        }
        let major = major.parse::<u8>().map_err(|_| ParseHttpVersionError)?;
        let minor = minor.parse::<u8>().map_err(|_| ParseHttpVersionError)?;
        Ok(HttpVersion { major, minor })
    }
}

impl std::fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HTTP/{}.{}", self.major, self.minor)
    }
}
