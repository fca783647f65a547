use crate::cookies::attributes::{AttributeValue, Attributes};
use crate::cookies::cookiedate::{format_cookie_date, parse_cookie_date};
use std::fmt;
use std::net::IpAddr;
use time::{Duration, OffsetDateTime, PrimitiveDateTime};
use url::Url;

/// Metadata about how a cookie entered the jar. Never sent on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookieFlags {
    /// Only the exact host that set the cookie may receive it.
    pub host_only: bool,
    pub creation_time: OffsetDateTime,
    pub last_access_time: OffsetDateTime,
    /// The cookie carries an `Expires` or `Max-Age` it can be judged by.
    pub persistent: bool,
    /// The cookie has been taken out of its jar.
    pub removed: bool,
}

impl CookieFlags {
    pub fn new(creation_time: OffsetDateTime) -> Self {
        Self {
            host_only: true,
            creation_time,
            last_access_time: creation_time,
            persistent: false,
            removed: false,
        }
    }

    /// Set the host-only flag.
    pub fn host_only(mut self, host_only: bool) -> Self {
        self.host_only = host_only;
        self
    }
}

/// A single cookie: name, value, wire attributes and jar metadata.
///
/// Expiry is judged against `reference_time`, which defaults to the moment the
/// cookie was built and can be pinned for deterministic checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub attributes: Attributes,
    pub flags: CookieFlags,
    pub reference_time: OffsetDateTime,
}

/// What normalization does with one attribute.
enum Coercion {
    Keep,
    Replace(AttributeValue),
    Drop,
}

impl Cookie {
    /// Build a cookie with no attributes and default flags.
    ///
    /// Such a cookie has no domain or path, so it matches every origin.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        let now = OffsetDateTime::now_utc();
        Self::with_attributes(name, value, Attributes::new(), CookieFlags::new(now), now)
    }

    /// Build a cookie from its parts. Attributes are normalized right away.
    pub fn with_attributes(
        name: impl Into<String>,
        value: impl Into<String>,
        attributes: Attributes,
        flags: CookieFlags,
        reference_time: OffsetDateTime,
    ) -> Self {
        let mut cookie = Self {
            name: name.into(),
            value: value.into(),
            attributes,
            flags,
            reference_time,
        };
        cookie.normalize();
        cookie
    }

    /// Split one `Set-Cookie` value into a cookie without applying any origin.
    ///
    /// `name=value; attr; attr=val`. A first pair without `=` is a value with
    /// an empty name.
    pub fn parse_fragment(raw: &str, reference_time: OffsetDateTime) -> Self {
        let mut parts = raw.split(';');
        let pair = parts.next().unwrap_or_default();
        let (name, value) = match pair.split_once('=') {
            Some((name, value)) => (name.trim(), value.trim()),
            None => ("", pair.trim()),
        };

        let mut attributes = Attributes::new();
        for part in parts {
            match part.split_once('=') {
                Some((key, val)) => {
                    let key = key.trim();
                    if !key.is_empty() {
                        attributes.insert(key, val.trim());
                    }
                }
                None => {
                    let key = part.trim();
                    if !key.is_empty() {
                        attributes.insert_flag(key);
                    }
                }
            }
        }

        Self::with_attributes(
            name,
            value,
            attributes,
            CookieFlags::new(reference_time),
            reference_time,
        )
    }

    /// Parse one `Set-Cookie` value, scoping it to `origin` when given.
    ///
    /// With an origin, a missing domain defaults to the origin host (host-only)
    /// and a missing or relative path defaults to the origin's directory. A
    /// declared domain the origin host does not fall under rejects the whole
    /// cookie (`None`).
    pub fn parse(
        raw: &str,
        origin: Option<&Url>,
        reference_time: OffsetDateTime,
    ) -> Option<Self> {
        let mut cookie = Self::parse_fragment(raw, reference_time);
        match origin {
            Some(origin) => cookie.scope_to(origin).then_some(cookie),
            None => {
                cookie.flags.host_only = false;
                Some(cookie)
            }
        }
    }

    /// Apply origin defaults; false if the declared domain is foreign.
    fn scope_to(&mut self, origin: &Url) -> bool {
        let host = origin.host_str().unwrap_or_default();

        if self.attributes.text("domain").is_some() {
            self.flags.host_only = false;
        } else {
            self.attributes.insert("domain", host);
            self.flags.host_only = true;
        }

        let path_is_valid = self
            .attributes
            .text("path")
            .is_some_and(|p| p.starts_with('/'));
        if !path_is_valid {
            self.attributes.insert("path", default_path(origin.path()));
        }

        if !self.domain_matches(host) {
            tracing::debug!(
                name = %self.name,
                domain = self.domain().unwrap_or_default(),
                host = %host,
                "rejecting cookie for foreign domain"
            );
            return false;
        }
        true
    }

    /// Re-apply attribute coercion. Running it on a normalized cookie changes nothing.
    pub fn normalize(&mut self) {
        for key in self.attributes.keys() {
            let coercion = match self.attributes.get(&key) {
                Some(value) => coerce_attribute(&key, value, self.reference_time),
                None => continue,
            };
            match coercion {
                Coercion::Keep => {}
                Coercion::Replace(value) => self.attributes.insert(&key, value),
                Coercion::Drop => {
                    self.attributes.remove(&key);
                }
            }
        }

        self.flags.persistent =
            self.attributes.contains("max-age") || self.attributes.contains("expires");
    }

    /// Effective expiry: `Max-Age` wins over `Expires`.
    ///
    /// A non-positive `Max-Age` reports the Unix epoch.
    pub fn expiry_time(&self) -> Option<OffsetDateTime> {
        match self.attributes.get("max-age") {
            Some(AttributeValue::Expired) => return Some(OffsetDateTime::UNIX_EPOCH),
            Some(AttributeValue::Time(t)) => return Some(*t),
            _ => {}
        }
        self.attributes.get("expires").and_then(AttributeValue::as_time)
    }

    /// Expired relative to the cookie's own reference time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(self.reference_time)
    }

    /// Expired relative to `now`. A session cookie never expires here.
    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        if let Some(AttributeValue::Expired) = self.attributes.get("max-age") {
            return true;
        }
        self.expiry_time().is_some_and(|expiry| expiry <= now)
    }

    pub fn domain(&self) -> Option<&str> {
        self.attributes.text("domain")
    }

    pub fn path(&self) -> Option<&str> {
        self.attributes.text("path")
    }

    pub fn is_secure(&self) -> bool {
        self.attributes.contains("secure")
    }

    pub fn is_http_only(&self) -> bool {
        self.attributes.contains("httponly")
    }

    /// Check whether the cookie may be sent to `host`.
    ///
    /// A cookie without a domain matches everything.
    pub fn domain_matches(&self, host: &str) -> bool {
        match self.domain() {
            Some(cookie_domain) => domain_matches(cookie_domain, host, self.flags.host_only),
            None => true,
        }
    }

    /// Check whether the cookie may be sent for `request_path`.
    pub fn path_matches(&self, request_path: &str) -> bool {
        let request_path = if request_path.is_empty() {
            "/"
        } else {
            request_path
        };
        match self.path() {
            Some(cookie_path) => path_matches(cookie_path, request_path),
            None => true,
        }
    }

    /// Domain, path and (for `Secure` cookies) scheme check against a url.
    pub fn uri_matches(&self, url: &Url) -> bool {
        if !self.domain_matches(url.host_str().unwrap_or_default()) {
            return false;
        }
        if !self.path_matches(url.path()) {
            return false;
        }
        !self.is_secure() || is_secure_scheme(url.scheme())
    }

    /// `name=value`, as sent in a `Cookie` request header.
    pub fn format_for_header(&self) -> String {
        if self.name.is_empty() {
            self.value.clone()
        } else {
            format!("{}={}", self.name, self.value)
        }
    }

    /// `name=value; attr; attr=val`, as a server would send it.
    pub fn format_for_set_cookie(&self) -> String {
        let mut line = self.format_for_header();
        for (key, value) in self.attributes.iter() {
            line.push_str("; ");
            line.push_str(key);
            match value {
                AttributeValue::Flag => {}
                AttributeValue::Text(text) => {
                    line.push('=');
                    line.push_str(text);
                }
                AttributeValue::Expired => line.push_str("=0"),
                AttributeValue::Time(instant) if key == "max-age" => {
                    let delta = (*instant - self.reference_time).whole_seconds();
                    line.push('=');
                    line.push_str(&delta.to_string());
                }
                AttributeValue::Time(instant) => {
                    let formatted = format_cookie_date(*instant)
                        .unwrap_or_else(|| instant.unix_timestamp().to_string());
                    line.push('=');
                    line.push_str(&formatted);
                }
            }
        }
        line
    }

    /// Same wire identity: name, value, attributes and host-only flag.
    pub fn same_cookie(&self, other: &Cookie) -> bool {
        self.name == other.name
            && self.value == other.value
            && self.attributes == other.attributes
            && self.flags.host_only == other.flags.host_only
    }
}

impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

fn coerce_attribute(key: &str, value: &AttributeValue, reference_time: OffsetDateTime) -> Coercion {
    match (key, value) {
        ("expires", AttributeValue::Time(_)) => Coercion::Keep,
        ("expires", AttributeValue::Text(raw)) => match parse_cookie_date(raw) {
            Some(instant) => Coercion::Replace(AttributeValue::Time(instant)),
            None => {
                tracing::debug!(value = %raw, "ignoring unparsable cookie Expires");
                Coercion::Drop
            }
        },
        ("expires", _) => Coercion::Drop,

        ("max-age", AttributeValue::Time(_) | AttributeValue::Expired) => Coercion::Keep,
        ("max-age", AttributeValue::Text(raw)) => match max_age_deadline(raw, reference_time) {
            Some(deadline) => Coercion::Replace(deadline),
            None => {
                tracing::debug!(value = %raw, "ignoring non-numeric cookie Max-Age");
                Coercion::Drop
            }
        },
        ("max-age", _) => Coercion::Drop,

        ("domain", AttributeValue::Text(raw)) => {
            let trimmed = raw.trim_start_matches('.');
            if trimmed.is_empty() {
                Coercion::Drop
            } else if trimmed.len() != raw.len() {
                Coercion::Replace(AttributeValue::Text(trimmed.to_string()))
            } else {
                Coercion::Keep
            }
        }
        ("domain", _) => Coercion::Drop,

        ("path", AttributeValue::Text(_)) => Coercion::Keep,
        ("path", _) => Coercion::Drop,

        ("secure" | "httponly", AttributeValue::Flag) => Coercion::Keep,
        ("secure" | "httponly", _) => Coercion::Replace(AttributeValue::Flag),

        _ => Coercion::Keep,
    }
}

/// Resolve a `Max-Age` delta into an absolute deadline.
///
/// Only `-?[0-9]+` is accepted. Zero or negative gives the expired sentinel;
/// deltas past the representable range clamp to the latest instant.
fn max_age_deadline(raw: &str, reference_time: OffsetDateTime) -> Option<AttributeValue> {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if raw.starts_with('-') {
        return Some(AttributeValue::Expired);
    }

    let deadline = match digits.parse::<i64>() {
        Ok(0) => return Some(AttributeValue::Expired),
        Ok(seconds) => reference_time.checked_add(Duration::seconds(seconds)),
        Err(_) => None,
    };
    Some(AttributeValue::Time(
        deadline.unwrap_or_else(|| PrimitiveDateTime::MAX.assume_utc()),
    ))
}

/// Default cookie path: the request path up to (not including) its last `/`.
pub(crate) fn default_path(request_path: &str) -> String {
    if !request_path.starts_with('/') {
        return "/".to_string();
    }
    match request_path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => request_path[..idx].to_string(),
    }
}

/// Domain matching.
///
/// Exact (case-insensitive) equality always matches. Otherwise a host-only
/// cookie fails, and a domain cookie matches when `host` ends with
/// `.` + domain on a label boundary. IP literals never suffix-match.
fn domain_matches(cookie_domain: &str, host: &str, host_only: bool) -> bool {
    let cookie_domain = cookie_domain.trim_start_matches('.');

    if cookie_domain.eq_ignore_ascii_case(host) {
        return true;
    }

    if host_only || cookie_domain.is_empty() || host.len() <= cookie_domain.len() {
        return false;
    }

    let split = host.len() - cookie_domain.len();
    let (Some(prefix), Some(suffix)) = (host.get(..split), host.get(split..)) else {
        return false;
    };
    if !suffix.eq_ignore_ascii_case(cookie_domain) || !prefix.ends_with('.') {
        return false;
    }

    !is_ip_literal(host) && !is_ip_literal(cookie_domain)
}

/// IP address, or a name ending in a dotted quad such as `abc.127.0.0.1`.
fn is_ip_literal(host: &str) -> bool {
    let bare = host.trim_start_matches('[').trim_end_matches(']');
    if bare.parse::<IpAddr>().is_ok() {
        return true;
    }

    let mut labels = 0;
    for label in host.rsplit('.').take(4) {
        if label.is_empty() || label.len() > 3 || !label.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        labels += 1;
    }
    labels == 4
}

/// Path matching: `/test` covers `/test`, `/test/` and `/test/ing`, not `/testing`.
fn path_matches(cookie_path: &str, request_path: &str) -> bool {
    if request_path == cookie_path {
        return true;
    }

    if request_path.len() > cookie_path.len() && request_path.starts_with(cookie_path) {
        if cookie_path.ends_with('/') {
            return true;
        }
        // Next byte after the prefix must start a new segment
        return request_path.as_bytes()[cookie_path.len()] == b'/';
    }

    false
}

fn is_secure_scheme(scheme: &str) -> bool {
    scheme.eq_ignore_ascii_case("https") || scheme.eq_ignore_ascii_case("wss")
}
