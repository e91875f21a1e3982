//! Character classes of the generic URI syntax
//! SPEC: RFC 3986 - 2. Characters

use memchr::memchr_iter;

/// A set of US-ASCII bytes, stored as a 128 bit mask so membership is a shift and a mask.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AsciiSet(u128);

impl AsciiSet {
    pub const EMPTY: Self = Self(0);

    /// Builds a set from a list of ASCII bytes
    ///
    /// Evaluating this in a const context with a non-ASCII byte fails to compile.
    pub const fn from_bytes(bytes: &[u8]) -> Self {
        let mut mask = 0u128;
        let mut i = 0;
        while i < bytes.len() {
            mask |= 1u128 << bytes[i];
            i += 1;
        }
        Self(mask)
    }

    /// Builds the set of every byte in `lo..=hi`
    pub const fn range(lo: u8, hi: u8) -> Self {
        let mut mask = 0u128;
        let mut b = lo;
        while b <= hi {
            mask |= 1u128 << b;
            b += 1;
        }
        Self(mask)
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    pub const fn contains(&self, b: u8) -> bool {
        b < 128 && self.0 & (1u128 << b) != 0
    }

    /// Returns true if every byte of `s` is in the set (vacuously true for `""`)
    pub fn contains_all(&self, s: &str) -> bool {
        s.bytes().all(|b| self.contains(b))
    }
}

impl std::fmt::Debug for AsciiSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let members: String = (0u8..128)
            .filter(|b| self.contains(*b))
            .map(char::from)
            .collect();
        f.debug_tuple("AsciiSet").field(&members).finish()
    }
}

pub const ALPHA: AsciiSet = AsciiSet::range(b'a', b'z').union(AsciiSet::range(b'A', b'Z'));
pub const DIGIT: AsciiSet = AsciiSet::range(b'0', b'9');

/// SPEC: RFC 3986 - 2.3. Unreserved Characters
/// ABNF: unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"
pub const UNRESERVED: AsciiSet = ALPHA.union(DIGIT).union(AsciiSet::from_bytes(b"-._~"));

/// SPEC: RFC 3986 - 2.2. Reserved Characters
/// ABNF: gen-delims = ":" / "/" / "?" / "#" / "[" / "]" / "@"
pub const GEN_DELIMS: AsciiSet = AsciiSet::from_bytes(b":/?#[]@");

/// SPEC: RFC 3986 - 2.2. Reserved Characters
/// ABNF: sub-delims = "!" / "$" / "&" / "'" / "(" / ")" / "*" / "+" / "," / ";" / "="
pub const SUB_DELIMS: AsciiSet = AsciiSet::from_bytes(b"!$&'()*+,;=");

/// Not reserved by RFC 3986, but a literal space is always encoded.
pub const WHITE_SPACE: AsciiSet = AsciiSet::from_bytes(b" ");

/// Everything the percent encoder may replace, before exclusions are removed
pub const ENCODABLE: AsciiSet = GEN_DELIMS.union(SUB_DELIMS).union(WHITE_SPACE);

/// ABNF: pchar = unreserved / pct-encoded / sub-delims / ":" / "@"
/// (the `%` of pct-encoded is included, triplets are checked separately)
pub const PCHAR: AsciiSet = UNRESERVED
    .union(SUB_DELIMS)
    .union(AsciiSet::from_bytes(b"%:@"));

/// ABNF: userinfo = *( unreserved / pct-encoded / sub-delims / ":" )
pub const USER_INFO: AsciiSet = UNRESERVED
    .union(SUB_DELIMS)
    .union(AsciiSet::from_bytes(b"%:"));

/// ABNF: reg-name = *( unreserved / pct-encoded / sub-delims )
pub const REG_NAME: AsciiSet = UNRESERVED.union(SUB_DELIMS).union(AsciiSet::from_bytes(b"%"));

/// ABNF: path-abempty etc. are all sequences of pchar and "/"
pub const PATH: AsciiSet = PCHAR.union(AsciiSet::from_bytes(b"/"));

/// ABNF: query = *( pchar / "/" / "?" ), fragment shares the same grammar
pub const QUERY: AsciiSet = PATH.union(AsciiSet::from_bytes(b"?"));

pub fn is_unreserved(b: u8) -> bool {
    UNRESERVED.contains(b)
}

pub fn is_gen_delim(b: u8) -> bool {
    GEN_DELIMS.contains(b)
}

pub fn is_sub_delim(b: u8) -> bool {
    SUB_DELIMS.contains(b)
}

/// Returns true if every byte of `s` is US-ASCII
pub fn is_ascii(s: &str) -> bool {
    s.is_ascii()
}

/// Returns true if every `%` in `s` starts a `%` HEXDIG HEXDIG triplet
/// SPEC: RFC 3986 - 2.1. Percent-Encoding
/// ABNF: pct-encoded = "%" HEXDIG HEXDIG
pub fn is_well_formed_percent_encoding(s: &str) -> bool {
    first_malformed_triplet(s.as_bytes()).is_none()
}

/// Returns the byte offset of the first `%` which is not followed by two hex digits
pub(crate) fn first_malformed_triplet(bytes: &[u8]) -> Option<usize> {
    memchr_iter(b'%', bytes).find(|&idx| {
        !matches!(
            bytes.get(idx + 1..idx + 3),
            Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit()
        )
    })
}
