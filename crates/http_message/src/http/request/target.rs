use crate::http::uri::{parse_authority, parse_uri, validate};

/// The shape of a HTTP request target
/// SPEC: RFC 7230 - 5.3. Request Target
/// ABNF: request-target = origin-form / absolute-form / authority-form / asterisk-form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestTargetForm {
    /// SPEC: RFC 7230 - 5.3.1. origin-form
    /// ABNF: origin-form = absolute-path [ "?" query ]
    Origin,
    /// SPEC: RFC 7230 - 5.3.2. absolute-form
    /// ABNF: absolute-form = absolute-URI
    Absolute,
    /// SPEC: RFC 7230 - 5.3.3. authority-form
    /// ABNF: authority-form = authority
    Authority,
    /// SPEC: RFC 7230 - 5.3.4. asterisk-form
    /// ABNF: asterisk-form = "*"
    Asterisk,
    /// Matches none of the forms above
    Unrecognized,
}

/// Answers for each form independently
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestTargetForms {
    pub origin: bool,
    pub absolute: bool,
    pub authority: bool,
    pub asterisk: bool,
}

impl RequestTargetForms {
    pub fn any(&self) -> bool {
        self.origin || self.absolute || self.authority || self.asterisk
    }
}

/// Classifies request targets
///
/// RFC 7230 leaves two details open which are configurable here. [`Self::STRICT`] is the
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTargetClassifier {
    /// Accept an origin-form target with a `?` but nothing after it, such as `/path?`
    pub allow_empty_query: bool,
    /// Only accept an authority-form target with an explicit port, such as `host:443`
    pub require_authority_port: bool,
}

impl RequestTargetClassifier {
    pub const STRICT: Self = Self {
        allow_empty_query: false,
        require_authority_port: true,
    };

    pub const LENIENT: Self = Self {
        allow_empty_query: true,
        require_authority_port: false,
    };

    pub fn is_origin_form(&self, target: &str) -> bool {
        let Ok(uri) = parse_uri(target) else {
            return false;
        };

        let query_ok = match uri.query {
            None => true,
            Some("") => self.allow_empty_query,
            Some(query) => validate::is_valid_query(query),
        };

        uri.scheme.is_none()
            && uri.authority.is_none()
            && validate::is_valid_absolute_path(uri.path)
            && query_ok
            && uri.fragment.is_none()
    }

    /// Only the scheme, path, query and fragment are checked, the authority is not
    pub fn is_absolute_form(&self, target: &str) -> bool {
        let Ok(uri) = parse_uri(target) else {
            return false;
        };

        uri.scheme
            .is_some_and(|s| validate::is_valid_scheme(&s.to_ascii_lowercase()))
            && validate::is_valid_path(uri.path)
            && uri.query.is_none_or(validate::is_valid_query)
            && uri.fragment.is_none()
    }

    /// `*` is a valid reg-name but is only ever asterisk-form
    pub fn is_authority_form(&self, target: &str) -> bool {
        if self.is_asterisk_form(target)
            || !target.is_ascii()
            || target.contains(['/', '?', '#'])
        {
            return false;
        }

        let Ok(authority) = parse_authority(target) else {
            return false;
        };
        let port_ok = match authority.port {
            Some(port) => validate::is_valid_port(port),
            None => !self.require_authority_port && !target.ends_with(':'),
        };

        authority.user.is_none()
            && authority.password.is_none()
            && !authority.host.is_empty()
            && validate::is_valid_host(authority.host)
            && port_ok
    }

    pub fn is_asterisk_form(&self, target: &str) -> bool {
        target == "*"
    }

    /// Evaluates every form, `target` may satisfy more than one
    pub fn classify(&self, target: &str) -> RequestTargetForms {
        let forms = RequestTargetForms {
            origin: self.is_origin_form(target),
            absolute: self.is_absolute_form(target),
            authority: self.is_authority_form(target),
            asterisk: self.is_asterisk_form(target),
        };
        log::trace!("classified request target {target:?} as {forms:?}");
        forms
    }

    /// The single form a request should be treated as
    ///
    /// `host:port` is also a valid absolute URI with `host` as its scheme, so authority-form
    /// is preferred over absolute-form.
    pub fn form(&self, target: &str) -> RequestTargetForm {
        let forms = self.classify(target);
        if forms.asterisk {
            RequestTargetForm::Asterisk
        } else if forms.origin {
            RequestTargetForm::Origin
        } else if forms.authority {
            RequestTargetForm::Authority
        } else if forms.absolute {
            RequestTargetForm::Absolute
        } else {
            log::debug!("unrecognized request target {target:?}");
            RequestTargetForm::Unrecognized
        }
    }
}

impl Default for RequestTargetClassifier {
    fn default() -> Self {
        Self::STRICT
    }
}

/// Classifies `target` with the strict classifier
pub fn classify_request_target(target: &str) -> RequestTargetForms {
    RequestTargetClassifier::STRICT.classify(target)
}
