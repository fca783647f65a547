//! Cookie parsing, matching and storage.
//!
//! This module provides the client side of RFC 6265:
//!
//! - **Parsing**: `Set-Cookie` values into [`Cookie`](cookie::Cookie) records
//! - **Dates**: the three legacy `Expires` layouts ([`cookiedate`])
//! - **Matching**: domain, path and secure-scheme checks against a request url
//! - **Storage**: a named, ordered [`CookieJar`](jar::CookieJar)
//! - **Extraction**: every `Set-Cookie` of a response ([`headers`])
//!
//! # Architecture
//!
//! | Type | Responsibility |
//! |------|----------------|
//! | [`Cookie`](cookie::Cookie) | Single cookie, attribute coercion, matching, formatting |
//! | [`Attributes`](attributes::Attributes) | Case-insensitive ordered attribute map |
//! | [`CookieJar`](jar::CookieJar) | Name-keyed collection, `Cookie` header assembly |
//! | [`JarConfig`](config::JarConfig) | Which cookies a jar sends |
//!
//! Domain matching is label-based and does not consult the
//! Public Suffix List.
//!
//! # Receiving and sending
//!
//! ```rust
//! use cookienet::cookies::jar::CookieJar;
//! use http::header::SET_COOKIE;
//! use http::{HeaderMap, HeaderValue};
//! use time::OffsetDateTime;
//! use url::Url;
//!
//! let url = Url::parse("https://example.com/login").unwrap();
//! let mut response = HeaderMap::new();
//! response.append(SET_COOKIE, HeaderValue::from_static("session=abc123; Path=/; Secure"));
//!
//! let now = OffsetDateTime::now_utc();
//! let mut jar = CookieJar::new();
//! jar.absorb_response(&response, &url, now);
//!
//! let next = Url::parse("https://example.com/account").unwrap();
//! assert_eq!(jar.header_for(&next, now).as_deref(), Some("session=abc123"));
//! ```

pub mod attributes;
pub mod config;
pub mod cookie;
pub mod cookiedate;
pub mod headers;
pub mod jar;

pub use attributes::{AttributeValue, Attributes};
pub use config::{JarConfig, MatchPolicy};
pub use cookie::{Cookie, CookieFlags};
pub use headers::{parse_from_headers, parse_set_cookie_values};
pub use jar::{CookieJar, IntoCookie};
