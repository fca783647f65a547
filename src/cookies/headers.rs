//! `Set-Cookie` extraction from response headers.

use crate::cookies::cookie::Cookie;
use http::header::SET_COOKIE;
use http::HeaderMap;
use time::OffsetDateTime;
use url::Url;

/// Parse every `Set-Cookie` value in `headers`.
///
/// Cookies rejected for their origin are dropped one by one; the rest of the
/// batch is still returned, in header order.
pub fn parse_from_headers(
    headers: &HeaderMap,
    origin: Option<&Url>,
    reference_time: OffsetDateTime,
) -> Vec<Cookie> {
    let values = headers.get_all(SET_COOKIE).iter().map(|value| {
        if value.to_str().is_err() {
            tracing::debug!("decoding non-ASCII Set-Cookie value lossily");
        }
        String::from_utf8_lossy(value.as_bytes())
    });
    parse_set_cookie_values(values, origin, reference_time)
}

/// Parse raw `Set-Cookie` values from any header container.
pub fn parse_set_cookie_values<I>(
    values: I,
    origin: Option<&Url>,
    reference_time: OffsetDateTime,
) -> Vec<Cookie>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    values
        .into_iter()
        .filter_map(|value| Cookie::parse(value.as_ref(), origin, reference_time))
        .collect()
}
