//! Header names and values
//! SPEC: RFC 7230 - 3.2. Header Fields

mod map;
pub use map::*;

/// ABNF: tchar = "!" / "#" / "$" / "%" / "&" / "'" / "*" / "+" / "-" / "." / "^" / "_" / "`" / "|" / "~" / DIGIT / ALPHA
pub fn is_tchar(b: u8) -> bool {
    (b'A'..=b'Z').contains(&b)
        || (b'a'..=b'z').contains(&b)
        || (b'0'..=b'9').contains(&b)
        || matches!(
            b,
            b'!' | b'#'
                | b'$'
                | b'%'
                | b'&'
                | b'\''
                | b'*'
                | b'+'
                | b'-'
                | b'.'
                | b'^'
                | b'_'
                | b'`'
                | b'|'
                | b'~'
        )
}

/// ABNF: field-name = token, token = 1*tchar
pub fn is_valid_header_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(is_tchar)
}

/// A value may not break out of its header line
///
/// CR, LF and NUL are rejected, everything else including obs-text is kept as is.
pub fn is_valid_header_value(value: &str) -> bool {
    memchr::memchr3(b'\r', b'\n', b'\0', value.as_bytes()).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_names() {
        for name in ["Host", "content-type", "X-Custom_Header", "!#$%&'*+-.^_`|~09"] {
            assert!(is_valid_header_name(name), "{name:?}");
        }
        for name in ["", "Content Type", "Host:", "X(1)", "Na\u{ef}ve", "a\r\n"] {
            assert!(!is_valid_header_name(name), "{name:?}");
        }
    }

    #[test]
    fn test_header_values() {
        assert!(is_valid_header_value(""));
        assert!(is_valid_header_value("text/html; charset=utf-8"));
        assert!(is_valid_header_value("tab\tseparated"));
        assert!(!is_valid_header_value("a\r\nInjected: yes"));
        assert!(!is_valid_header_value("a\nb"));
        assert!(!is_valid_header_value("a\0b"));
    }
}
