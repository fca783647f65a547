use crate::base::neterror::NetError;
use crate::cookies::config::{JarConfig, MatchPolicy};
use crate::cookies::cookie::Cookie;
use crate::cookies::headers::parse_from_headers;
use http::header::COOKIE;
use http::{HeaderMap, HeaderValue};
use indexmap::IndexMap;
use time::OffsetDateTime;
use url::Url;

/// Anything that can be stored in a [`CookieJar`] under a name.
///
/// Plain strings become a cookie with default attributes; a [`Cookie`] is
/// stored as-is.
pub trait IntoCookie {
    fn into_cookie(self, name: &str) -> Cookie;
}

impl IntoCookie for Cookie {
    fn into_cookie(self, _name: &str) -> Cookie {
        self
    }
}

impl IntoCookie for &str {
    fn into_cookie(self, name: &str) -> Cookie {
        Cookie::new(name, self)
    }
}

impl IntoCookie for String {
    fn into_cookie(self, name: &str) -> Cookie {
        Cookie::new(name, self)
    }
}

impl IntoCookie for &String {
    fn into_cookie(self, name: &str) -> Cookie {
        Cookie::new(name, self.as_str())
    }
}

/// Named, insertion-ordered cookie collection.
///
/// The jar is a dictionary: every entry has a name, and there is no positional
/// insertion. Names are case-sensitive.
#[derive(Debug, Clone, Default)]
pub struct CookieJar {
    cookies: IndexMap<String, Cookie>,
    config: JarConfig,
}

impl PartialEq for CookieJar {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config
            && self.cookies.len() == other.cookies.len()
            && self
                .cookies
                .iter()
                .zip(other.cookies.iter())
                .all(|((a_name, a), (b_name, b))| a_name == b_name && a.same_cookie(b))
    }
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: JarConfig) -> Self {
        Self {
            cookies: IndexMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &JarConfig {
        &self.config
    }

    /// Build a jar from cookies, each stored under its own name.
    pub fn from_cookies<I: IntoIterator<Item = Cookie>>(cookies: I) -> Self {
        let mut jar = Self::new();
        for cookie in cookies {
            jar.insert_cookie(cookie);
        }
        jar
    }

    /// Cookie stored under `name`, or `None`.
    pub fn get(&self, name: &str) -> Option<&Cookie> {
        self.cookies.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Cookie> {
        self.cookies.get_mut(name)
    }

    /// Value of the cookie stored under `name`.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).map(|c| c.value.as_str())
    }

    /// Store a cookie under `name`, returning the one it replaced.
    ///
    /// Replacing keeps the name's original position.
    pub fn set(&mut self, name: impl Into<String>, cookie: impl IntoCookie) -> Option<Cookie> {
        let name = name.into();
        let cookie = cookie.into_cookie(&name);
        self.cookies.insert(name, cookie)
    }

    /// Store a cookie under its own name.
    pub fn insert_cookie(&mut self, cookie: Cookie) -> Option<Cookie> {
        self.cookies.insert(cookie.name.clone(), cookie)
    }

    /// Remove the cookie stored under `name`. The returned cookie is flagged removed.
    pub fn unset(&mut self, name: &str) -> Option<Cookie> {
        self.cookies.shift_remove(name).map(|mut cookie| {
            cookie.flags.removed = true;
            cookie
        })
    }

    pub fn has(&self, name: &str) -> bool {
        self.cookies.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    pub fn clear(&mut self) {
        self.cookies.clear();
    }

    /// `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cookies
            .iter()
            .map(|(name, cookie)| (name.as_str(), cookie.value.as_str()))
    }

    /// Stored cookies in insertion order.
    pub fn cookies(&self) -> impl Iterator<Item = &Cookie> {
        self.cookies.values()
    }

    /// Cookies that should accompany a request to `url` at `now`.
    pub fn matching(&self, url: &Url, now: OffsetDateTime) -> Vec<&Cookie> {
        let host = url.host_str().unwrap_or_default();
        self.cookies
            .values()
            .filter(|cookie| {
                if self.config.skip_expired && cookie.is_expired_at(now) {
                    tracing::debug!(name = %cookie.name, "skipping expired cookie");
                    return false;
                }
                match self.config.match_policy {
                    MatchPolicy::Uri => cookie.uri_matches(url),
                    MatchPolicy::DomainOnly => cookie.domain_matches(host),
                }
            })
            .collect()
    }

    /// Value of the `Cookie` request header for `url`, or `None` if no cookie applies.
    pub fn header_for(&self, url: &Url, now: OffsetDateTime) -> Option<String> {
        let cookies = self.matching(url, now);
        if cookies.is_empty() {
            return None;
        }
        Some(
            cookies
                .iter()
                .map(|c| c.format_for_header())
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    /// [`header_for`](Self::header_for) at the current time.
    pub fn header_for_now(&self, url: &Url) -> Option<String> {
        self.header_for(url, OffsetDateTime::now_utc())
    }

    /// Insert the `Cookie` header for `url` into `headers`.
    ///
    /// Returns whether a header was set.
    pub fn apply_to(
        &self,
        headers: &mut HeaderMap,
        url: &Url,
        now: OffsetDateTime,
    ) -> Result<bool, NetError> {
        let Some(line) = self.header_for(url, now) else {
            return Ok(false);
        };
        let value = HeaderValue::from_str(&line).map_err(|_| NetError::CookieInvalidData)?;
        headers.insert(COOKIE, value);
        Ok(true)
    }

    /// Store the cookies a response to `url` sets. Later same-name cookies win.
    ///
    /// Returns how many cookies were accepted.
    pub fn absorb_response(
        &mut self,
        headers: &HeaderMap,
        url: &Url,
        now: OffsetDateTime,
    ) -> usize {
        let cookies = parse_from_headers(headers, Some(url), now);
        let count = cookies.len();
        for cookie in cookies {
            self.insert_cookie(cookie);
        }
        count
    }

    /// Drop every cookie expired at `now`. Returns how many were dropped.
    pub fn purge_expired(&mut self, now: OffsetDateTime) -> usize {
        let before = self.cookies.len();
        self.cookies.retain(|_, cookie| !cookie.is_expired_at(now));
        before - self.cookies.len()
    }

    /// Build a jar from dynamic data.
    ///
    /// Accepts an object mapping names to string values or cookie objects, or
    /// an array of named cookie objects (`{"name": .., "value": ..}`). Array
    /// entries without a name are positional and fail with
    /// [`NetError::CookieJarNotAList`].
    #[cfg(feature = "json")]
    pub fn from_json(data: &serde_json::Value) -> Result<Self, NetError> {
        use serde_json::Value;

        let mut jar = Self::new();
        match data {
            Value::Object(map) => {
                for (name, entry) in map {
                    match entry {
                        Value::String(value) => {
                            jar.set(name.as_str(), value.as_str());
                        }
                        Value::Object(_) => {
                            let cookie = cookie_from_json(entry, Some(name.as_str()))?;
                            jar.set(name.as_str(), cookie);
                        }
                        _ => return Err(NetError::CookieInvalidData),
                    }
                }
            }
            Value::Array(items) => {
                for item in items {
                    if !item.is_object() {
                        return Err(NetError::CookieJarNotAList);
                    }
                    jar.insert_cookie(cookie_from_json(item, None)?);
                }
            }
            _ => return Err(NetError::CookieInvalidData),
        }
        Ok(jar)
    }
}

/// `{"name": .., "value": .., "attributes": {..}}`. `name` falls back to `key`.
#[cfg(feature = "json")]
fn cookie_from_json(entry: &serde_json::Value, key: Option<&str>) -> Result<Cookie, NetError> {
    use crate::cookies::attributes::Attributes;
    use crate::cookies::cookie::CookieFlags;
    use serde_json::Value;

    let name = match (entry.get("name"), key) {
        (Some(Value::String(name)), _) => name.as_str(),
        (None, Some(key)) => key,
        (None, None) => return Err(NetError::CookieJarNotAList),
        (Some(_), _) => return Err(NetError::CookieInvalidData),
    };
    let value = entry
        .get("value")
        .and_then(Value::as_str)
        .ok_or(NetError::CookieInvalidData)?;

    let mut attributes = Attributes::new();
    if let Some(attrs) = entry.get("attributes") {
        let attrs = attrs.as_object().ok_or(NetError::CookieInvalidData)?;
        for (attr, attr_value) in attrs {
            match attr_value {
                Value::String(text) => attributes.insert(attr, text.as_str()),
                Value::Bool(true) => attributes.insert_flag(attr),
                Value::Bool(false) => {}
                Value::Number(n) => attributes.insert(attr, n.to_string()),
                _ => return Err(NetError::CookieInvalidData),
            }
        }
    }

    let now = OffsetDateTime::now_utc();
    Ok(Cookie::with_attributes(
        name,
        value,
        attributes,
        CookieFlags::new(now),
        now,
    ))
}

impl<K: Into<String>, V: IntoCookie> FromIterator<(K, V)> for CookieJar {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut jar = Self::new();
        jar.extend(iter);
        jar
    }
}

impl<K: Into<String>, V: IntoCookie> Extend<(K, V)> for CookieJar {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, cookie) in iter {
            self.set(name, cookie);
        }
    }
}
