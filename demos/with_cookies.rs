//! Cookie management example.
//!
//! This example demonstrates using CookieJar for session management.

use cookienet::cookies::jar::CookieJar;
use http::header::SET_COOKIE;
use http::{HeaderMap, HeaderValue};
use time::OffsetDateTime;
use url::Url;

fn main() {
    // Create a cookie jar
    let mut jar = CookieJar::new();
    let now = OffsetDateTime::now_utc();

    // Simulate receiving Set-Cookie headers from a server
    let url = Url::parse("https://example.com/login").unwrap();
    let mut response = HeaderMap::new();
    response.append(
        SET_COOKIE,
        HeaderValue::from_static("session_id=abc123; Path=/; Secure; HttpOnly"),
    );
    response.append(
        SET_COOKIE,
        HeaderValue::from_static("user_pref=dark_mode; Path=/; Max-Age=86400"),
    );
    let stored = jar.absorb_response(&response, &url, now);
    println!("Stored {} cookies from {}", stored, url);

    // Attach cookies to a subsequent request
    let next = Url::parse("https://example.com/dashboard").unwrap();
    let mut request = HeaderMap::new();
    match jar.apply_to(&mut request, &next, now) {
        Ok(true) => println!("Cookie: {:?}", request.get(http::header::COOKIE)),
        Ok(false) => println!("No cookies for {}", next),
        Err(e) => eprintln!("Failed to build Cookie header: {}", e),
    }

    // Secure cookies stay off plain-text connections
    let insecure = Url::parse("http://example.com/dashboard").unwrap();
    println!(
        "\nCookies for {}: {:?}",
        insecure,
        jar.header_for(&insecure, now)
    );

    // A cookie scoped to an unrelated domain is rejected
    let mut hostile = HeaderMap::new();
    hostile.append(
        SET_COOKIE,
        HeaderValue::from_static("evil=supercookie; Domain=other.org"),
    );
    let stored = jar.absorb_response(&hostile, &url, now);
    println!("Cross-domain cookies stored (should be 0): {}", stored);
}
