//! Cookie attribute storage.
//!
//! Attribute names are matched case-insensitively: keys are stored
//! lower-cased, values keep whatever case they arrived in. Insertion order is
//! preserved so a cookie can be written back the way the server sent it.

use indexmap::IndexMap;
use time::OffsetDateTime;

/// Value held by a single cookie attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// Presence-only attribute such as `Secure` or `HttpOnly`.
    Flag,
    /// Raw string value, before or without coercion.
    Text(String),
    /// Absolute instant resolved from `Expires` or `Max-Age`.
    Time(OffsetDateTime),
    /// `Max-Age` of zero or less: the cookie is already expired.
    Expired,
}

impl AttributeValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<OffsetDateTime> {
        match self {
            AttributeValue::Time(t) => Some(*t),
            _ => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<OffsetDateTime> for AttributeValue {
    fn from(value: OffsetDateTime) -> Self {
        AttributeValue::Time(value)
    }
}

/// Case-insensitive, insertion-ordered attribute map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: IndexMap<String, AttributeValue>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an attribute. Replacing keeps the original position.
    pub fn insert(&mut self, name: &str, value: impl Into<AttributeValue>) {
        self.entries.insert(name.to_ascii_lowercase(), value.into());
    }

    /// Insert a presence-only attribute.
    pub fn insert_flag(&mut self, name: &str) {
        self.insert(name, AttributeValue::Flag);
    }

    /// Chaining form of [`insert`](Self::insert).
    pub fn with(mut self, name: &str, value: impl Into<AttributeValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Chaining form of [`insert_flag`](Self::insert_flag).
    pub fn with_flag(mut self, name: &str) -> Self {
        self.insert_flag(name);
        self
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.entries.get(name.to_ascii_lowercase().as_str())
    }

    /// String value of an attribute, if it holds one.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(AttributeValue::as_text)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Remove an attribute, keeping the order of the rest.
    pub fn remove(&mut self, name: &str) -> Option<AttributeValue> {
        self.entries.shift_remove(name.to_ascii_lowercase().as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(lower-cased name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

impl<K: AsRef<str>, V: Into<AttributeValue>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Attributes::new();
        for (name, value) in iter {
            attributes.insert(name.as_ref(), value);
        }
        attributes
    }
}
