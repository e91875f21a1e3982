//! Grammar checks for already percent-encoded URI components
//!
//! Validators never mutate and never fail: anything unusable as the component is `false`,
//! including non-ASCII input and malformed percent-encoding.

use lazy_static::lazy_static;
use regex::Regex;

use super::chars::{self, AsciiSet, PATH, QUERY, REG_NAME, USER_INFO};

/// SPEC: RFC 3986 - 3.1. Scheme
/// ABNF: scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
///
/// Only the lower-case form is valid, callers lower-case before asking.
#[inline]
pub fn is_valid_scheme(scheme: &str) -> bool {
    SCHEME_REGEX.is_match(scheme)
}

/// SPEC: RFC 3986 - 3.2.1. User Information
#[inline]
pub fn is_valid_user_info(user_info: &str) -> bool {
    is_encoded_in(user_info, USER_INFO)
}

/// SPEC: RFC 3986 - 3.2.2. Host
/// ABNF: host = IP-literal / IPv4address / reg-name
///
/// IPv4 addresses are a subset of reg-name, the empty host is a valid reg-name.
pub fn is_valid_host(host: &str) -> bool {
    is_ip_literal(host) || is_encoded_in(host, REG_NAME)
}

/// SPEC: RFC 3986 - 3.2.3. Port
/// ABNF: port = *DIGIT
///
/// The empty port is handled by the parser as an absent port, so at least one digit is required
#[inline]
pub fn is_valid_port(port: &str) -> bool {
    !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit())
}

/// Returns true if `port` fits in the 16 bits a TCP or UDP port has
#[inline]
pub fn is_port_in_range(port: i64) -> bool {
    (0..=i64::from(u16::MAX)).contains(&port)
}

/// SPEC: RFC 3986 - 3.3. Path
#[inline]
pub fn is_valid_path(path: &str) -> bool {
    is_encoded_in(path, PATH)
}

/// A non-empty path starting with exactly one `/`
/// ABNF: absolute-path = 1*( "/" segment )
pub fn is_valid_absolute_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && is_valid_path(path)
}

/// SPEC: RFC 3986 - 3.4. Query
#[inline]
pub fn is_valid_query(query: &str) -> bool {
    is_encoded_in(query, QUERY)
}

/// SPEC: RFC 3986 - 3.5. Fragment
#[inline]
pub fn is_valid_fragment(fragment: &str) -> bool {
    is_encoded_in(fragment, QUERY)
}

/// ABNF: IP-literal = "[" ( IPv6address / IPvFuture  ) "]"
pub fn is_ip_literal(host: &str) -> bool {
    match host.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
        Some(inner) => is_ipv6_address(inner) || is_ipvfuture_address(inner),
        None => false,
    }
}

/// Checks the interior of an IP-literal (without brackets) against every `IPv6address`
/// alternative of the RFC 3986 grammar
#[inline]
pub fn is_ipv6_address(address: &str) -> bool {
    IPV6_REGEX.is_match(address)
}

/// ABNF: IPvFuture = "v" 1*HEXDIG "." 1*( unreserved / sub-delims / ":" )
#[inline]
pub fn is_ipvfuture_address(address: &str) -> bool {
    IPVFUTURE_REGEX.is_match(address)
}

fn is_encoded_in(s: &str, set: AsciiSet) -> bool {
    set.contains_all(s) && chars::is_well_formed_percent_encoding(s)
}

lazy_static! {
    static ref SCHEME_REGEX: Regex = Regex::new(r"^[a-z][a-z0-9+\-.]*$").unwrap();

    static ref IPVFUTURE_REGEX: Regex =
        Regex::new(r"^v[0-9a-fA-F]+\.[a-zA-Z0-9\-._~!$&'()*+,;=:]+$").unwrap();

    /// h16 is 1 to 4 hex digits, ls32 is two h16 or a dotted IPv4 address
    static ref IPV6_REGEX: Regex = Regex::new(r#"(?x)^
        (?:
            # 6( h16 ":" ) ls32
            (?:[0-9a-fA-F]{1,4}:){6}
            (?:[0-9a-fA-F]{1,4}:[0-9a-fA-F]{1,4}|(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])(?:\.(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])){3})
          |
            # "::" 5( h16 ":" ) ls32
            ::
            (?:[0-9a-fA-F]{1,4}:){5}
            (?:[0-9a-fA-F]{1,4}:[0-9a-fA-F]{1,4}|(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])(?:\.(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])){3})
          |
            # [ h16 ] "::" 4( h16 ":" ) ls32
            (?:[0-9a-fA-F]{1,4})?
            ::
            (?:[0-9a-fA-F]{1,4}:){4}
            (?:[0-9a-fA-F]{1,4}:[0-9a-fA-F]{1,4}|(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])(?:\.(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])){3})
          |
            # [ *1( h16 ":" ) h16 ] "::" 3( h16 ":" ) ls32
            (?:(?:[0-9a-fA-F]{1,4}:){0,1}[0-9a-fA-F]{1,4})?
            ::
            (?:[0-9a-fA-F]{1,4}:){3}
            (?:[0-9a-fA-F]{1,4}:[0-9a-fA-F]{1,4}|(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])(?:\.(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])){3})
          |
            # [ *2( h16 ":" ) h16 ] "::" 2( h16 ":" ) ls32
            (?:(?:[0-9a-fA-F]{1,4}:){0,2}[0-9a-fA-F]{1,4})?
            ::
            (?:[0-9a-fA-F]{1,4}:){2}
            (?:[0-9a-fA-F]{1,4}:[0-9a-fA-F]{1,4}|(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])(?:\.(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])){3})
          |
            # [ *3( h16 ":" ) h16 ] "::" h16 ":" ls32
            (?:(?:[0-9a-fA-F]{1,4}:){0,3}[0-9a-fA-F]{1,4})?
            ::
            [0-9a-fA-F]{1,4}:
            (?:[0-9a-fA-F]{1,4}:[0-9a-fA-F]{1,4}|(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])(?:\.(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])){3})
          |
            # [ *4( h16 ":" ) h16 ] "::" ls32
            (?:(?:[0-9a-fA-F]{1,4}:){0,4}[0-9a-fA-F]{1,4})?
            ::
            (?:[0-9a-fA-F]{1,4}:[0-9a-fA-F]{1,4}|(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])(?:\.(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])){3})
          |
            # [ *5( h16 ":" ) h16 ] "::" h16
            (?:(?:[0-9a-fA-F]{1,4}:){0,5}[0-9a-fA-F]{1,4})?
            ::
            [0-9a-fA-F]{1,4}
          |
            # [ *6( h16 ":" ) h16 ] "::"
            (?:(?:[0-9a-fA-F]{1,4}:){0,6}[0-9a-fA-F]{1,4})?
            ::
        )
        $"#).unwrap();
}
