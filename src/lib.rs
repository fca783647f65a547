//! # cookienet
//!
//! RFC 6265 cookie handling.
//!
//! `cookienet` turns `Set-Cookie` response headers into structured cookies,
//! decides which cookies belong on an outgoing request, and keeps them in a
//! named jar. It does no I/O: the transport hands it header values and a
//! request url, and gets header values back.
//!
//! ## Features
//!
//! - **Parsing**: `name=value; attr; attr=val` with case-insensitive attributes
//! - **Expiry**: RFC 1123, RFC 850 and `asctime()` dates; `Max-Age` precedence
//! - **Matching**: host-only and domain cookies, path prefixes, `Secure`
//! - **Origin checks**: cookies claiming a foreign domain are dropped
//! - **Jar**: ordered name-keyed storage and `Cookie` header assembly
//!
//! ## Quick Start
//!
//! ```rust
//! use cookienet::cookies::cookie::Cookie;
//! use time::OffsetDateTime;
//! use url::Url;
//!
//! let origin = Url::parse("http://example.com/test/").unwrap();
//! let cookie = Cookie::parse("name=value", Some(&origin), OffsetDateTime::now_utc()).unwrap();
//!
//! assert_eq!(cookie.path(), Some("/test"));
//! assert!(cookie.flags.host_only);
//! assert!(cookie.uri_matches(&Url::parse("http://example.com/test/page").unwrap()));
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error definitions
//! - [`cookies`] - Cookie parsing, matching and the cookie jar
//!
//! ## Security
//!
//! - Cookies declaring a domain the origin host does not belong to are rejected
//! - IP-address hosts never match a cookie by domain suffix

pub mod base;
pub mod cookies;
