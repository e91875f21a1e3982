//! Percent-encoding of URI components
//! SPEC: RFC 3986 - 2.1. Percent-Encoding
//!
//! Every `%` in the input is taken to already start a percent-encoded triplet, so encoding
//! never produces `%25` and an encoded string can be encoded again without changing.

use super::{
    Component, UriError,
    chars::{self, AsciiSet, ENCODABLE, SUB_DELIMS, UNRESERVED},
    validate,
};

const HEX_CHARS_UPPER: &[u8] = b"0123456789ABCDEF";

/// Left alone in the user info component
/// ABNF: userinfo = *( unreserved / pct-encoded / sub-delims / ":" )
pub const USER_INFO_EXCLUDED: AsciiSet = UNRESERVED
    .union(SUB_DELIMS)
    .union(AsciiSet::from_bytes(b":"));

/// Left alone in the user part of the user info, where a `:` would start the password
pub const USER_EXCLUDED: AsciiSet = USER_INFO_EXCLUDED.difference(AsciiSet::from_bytes(b":"));

/// Left alone in a registered name host
/// ABNF: reg-name = *( unreserved / pct-encoded / sub-delims )
pub const HOST_EXCLUDED: AsciiSet = UNRESERVED.union(SUB_DELIMS);

/// Left alone in the path component
/// ABNF: pchar = unreserved / pct-encoded / sub-delims / ":" / "@"
pub const PATH_EXCLUDED: AsciiSet = UNRESERVED
    .union(SUB_DELIMS)
    .union(AsciiSet::from_bytes(b":@/"));

/// Left alone in the query and fragment components
/// ABNF: query = *( pchar / "/" / "?" )
pub const QUERY_EXCLUDED: AsciiSet = PATH_EXCLUDED.union(AsciiSet::from_bytes(b"?"));

/// Fails with [`UriError::NonAsciiInput`] unless every byte of `s` is US-ASCII
pub fn validate_is_ascii(s: &str) -> Result<(), UriError> {
    if chars::is_ascii(s) {
        Ok(())
    } else {
        Err(UriError::NonAsciiInput)
    }
}

/// Fails with [`UriError::MalformedPercentEncoding`] on the first `%` that does not start a
/// `%` HEXDIG HEXDIG triplet
pub fn validate_percent_encoding(s: &str) -> Result<(), UriError> {
    match chars::first_malformed_triplet(s.as_bytes()) {
        None => Ok(()),
        Some(idx) => {
            let end = (idx + 3).min(s.len());
            Err(UriError::MalformedPercentEncoding(
                String::from_utf8_lossy(&s.as_bytes()[idx..end]).into_owned(),
            ))
        }
    }
}

/// Percent-encodes every reserved character (and space) of `input` which is not in `excluded`
///
/// Existing triplets are kept and their hex digits upper-cased.
pub fn encode(input: &str, excluded: AsciiSet) -> Result<String, UriError> {
    validate_is_ascii(input)?;
    validate_percent_encoding(input)?;

    let to_encode = ENCODABLE.difference(excluded);
    let bytes = input.as_bytes();
    let mut encoded = Vec::with_capacity(input.len());

    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'%' {
            // Well formed, checked above
            encoded.push(b'%');
            encoded.push(bytes[i + 1].to_ascii_uppercase());
            encoded.push(bytes[i + 2].to_ascii_uppercase());
            i += 3;
            continue;
        }
        if to_encode.contains(b) {
            encoded.push(b'%');
            encoded.push(HEX_CHARS_UPPER[(b >> 4) as usize]);
            encoded.push(HEX_CHARS_UPPER[(b & 0xF) as usize]);
        } else {
            encoded.push(b);
        }
        i += 1;
    }

    // Only ASCII went in and only ASCII was pushed
    String::from_utf8(encoded).map_err(|_| UriError::NonAsciiInput)
}

/// Lower-cases and validates a scheme, schemes are never percent-encoded
/// SPEC: RFC 3986 - 3.1. Scheme
pub fn encode_scheme(scheme: &str) -> Result<String, UriError> {
    validate_is_ascii(scheme)?;
    let scheme = scheme.to_ascii_lowercase();
    if !validate::is_valid_scheme(&scheme) {
        return Err(UriError::InvalidComponent {
            component: Component::Scheme,
            value: scheme,
        });
    }
    Ok(scheme)
}

/// SPEC: RFC 3986 - 3.2.1. User Information
pub fn encode_user_info(user_info: &str) -> Result<String, UriError> {
    encode(user_info, USER_INFO_EXCLUDED)
}

/// Encodes the user alone, unlike [`encode_user_info`] a `:` is encoded too
pub fn encode_user(user: &str) -> Result<String, UriError> {
    encode(user, USER_EXCLUDED)
}

/// Lower-cases and encodes a host, IP literals are only lower-cased
/// SPEC: RFC 3986 - 3.2.2. Host
pub fn encode_host(host: &str) -> Result<String, UriError> {
    validate_is_ascii(host)?;
    if validate::is_ip_literal(host) {
        return Ok(host.to_ascii_lowercase());
    }
    encode(&host.to_ascii_lowercase(), HOST_EXCLUDED)
}

/// SPEC: RFC 3986 - 3.3. Path
pub fn encode_path(path: &str) -> Result<String, UriError> {
    encode(path, PATH_EXCLUDED)
}

/// SPEC: RFC 3986 - 3.4. Query
pub fn encode_query(query: &str) -> Result<String, UriError> {
    encode(query, QUERY_EXCLUDED)
}

/// SPEC: RFC 3986 - 3.5. Fragment
pub fn encode_fragment(fragment: &str) -> Result<String, UriError> {
    encode(fragment, QUERY_EXCLUDED)
}
