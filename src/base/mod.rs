//! Base types and error handling.
//!
//! Provides foundational types mirroring Chromium's `net/base/`:
//! - [`NetError`](neterror::NetError): error codes, including the cookie jar's usage errors

pub mod neterror;
