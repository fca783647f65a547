use cookienet::cookies::attributes::{AttributeValue, Attributes};
use cookienet::cookies::cookie::{Cookie, CookieFlags};
use cookienet::cookies::headers::parse_from_headers;
use http::header::SET_COOKIE;
use http::{HeaderMap, HeaderValue};
use time::macros::datetime;
use time::OffsetDateTime;
use url::Url;

const REFERENCE: OffsetDateTime = datetime!(2014-01-01 00:00:00 UTC);

fn cookie_with(attributes: Attributes, host_only: bool) -> Cookie {
    Cookie::with_attributes(
        "requests-testcookie",
        "testvalue",
        attributes,
        CookieFlags::new(REFERENCE).host_only(host_only),
        REFERENCE,
    )
}

fn headers_with(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.append(SET_COOKIE, HeaderValue::from_str(value).unwrap());
    headers
}

// (cookie domain, host, host-only result, domain-cookie result)
const DOMAIN_CASES: &[(&str, &str, bool, bool)] = &[
    ("example.com", "example.com", true, true),
    ("example.com", "www.example.com", false, true),
    ("example.com", "example.net", false, false),
    // Leading period
    (".example.com", "example.com", true, true),
    (".example.com", "www.example.com", false, true),
    (".example.com", "example.net", false, false),
    // Prefix, but not subdomain
    ("example.com", "notexample.com", false, false),
    ("example.com", "notexample.net", false, false),
    // IP addresses have no parent domains
    ("127.0.0.1", "127.0.0.1", true, true),
    ("127.0.0.1", "abc.127.0.0.1", false, false),
    ("127.0.0.1", "example.com", false, false),
    // Full label, not raw substring
    ("127.com", "test.127.com", false, true),
];

#[test]
fn test_domain_exact_match() {
    for &(domain, host, exact, _) in DOMAIN_CASES {
        let cookie = cookie_with(Attributes::new().with("domain", domain), true);
        assert_eq!(cookie.domain_matches(host), exact, "{domain} vs {host}");
    }
}

#[test]
fn test_domain_match() {
    for &(domain, host, _, suffix) in DOMAIN_CASES {
        let cookie = cookie_with(Attributes::new().with("domain", domain), false);
        assert_eq!(cookie.domain_matches(host), suffix, "{domain} vs {host}");
    }
}

#[test]
fn test_path_match() {
    let cases = [
        ("/", "", true),
        ("/", "/", true),
        ("/", "/test", true),
        ("/", "/test/", true),
        ("/test", "/", false),
        ("/test", "/test", true),
        ("/test", "/testing", false),
        ("/test", "/test/", true),
        ("/test", "/test/ing", true),
        ("/test", "/test/ing/", true),
        ("/test/", "/test/", true),
        ("/test/", "/", false),
    ];
    for (path, check, expected) in cases {
        let cookie = cookie_with(Attributes::new().with("path", path), true);
        assert_eq!(cookie.path_matches(check), expected, "{path} vs {check}");
    }
}

// (domain, path, url, host-only result, domain-cookie result)
const URL_CASES: &[(&str, &str, &str, bool, bool)] = &[
    ("example.com", "/", "http://example.com/", true, true),
    ("example.com", "/", "http://www.example.com/", false, true),
    ("example.com", "/", "http://example.net/", false, false),
    ("example.com", "/", "http://www.example.net/", false, false),
    ("example.com", "/test", "http://example.com/", false, false),
    ("example.com", "/test", "http://www.example.com/", false, false),
    ("example.com", "/test", "http://example.com/test", true, true),
    ("example.com", "/test", "http://www.example.com/test", false, true),
    ("example.com", "/test", "http://example.com/testing", false, false),
    ("example.com", "/test", "http://www.example.com/testing", false, false),
    ("example.com", "/test", "http://example.com/test/", true, true),
    ("example.com", "/test", "http://www.example.com/test/", false, true),
    ("example.com", "/test/", "http://example.com/", false, false),
    ("example.com", "/test/", "http://www.example.com/", false, false),
];

#[test]
fn test_url_exact_match() {
    for &(domain, path, url, exact, _) in URL_CASES {
        let attributes = Attributes::new().with("domain", domain).with("path", path);
        let cookie = cookie_with(attributes, true);
        let url = Url::parse(url).unwrap();
        assert_eq!(cookie.uri_matches(&url), exact, "{domain}{path} vs {url}");
    }
}

#[test]
fn test_url_match() {
    for &(domain, path, url, _, suffix) in URL_CASES {
        let attributes = Attributes::new().with("domain", domain).with("path", path);
        let cookie = cookie_with(attributes, false);
        let url = Url::parse(url).unwrap();
        assert_eq!(cookie.uri_matches(&url), suffix, "{domain}{path} vs {url}");
    }
}

#[test]
fn test_url_match_secure() {
    let attributes = Attributes::new()
        .with("domain", "example.com")
        .with("path", "/")
        .with_flag("secure");
    let cookie = cookie_with(attributes, false);

    assert!(cookie.uri_matches(&Url::parse("https://example.com/").unwrap()));
    assert!(!cookie.uri_matches(&Url::parse("http://example.com/").unwrap()));

    // Subdomains follow the same scheme rule
    assert!(cookie.uri_matches(&Url::parse("https://www.example.com/").unwrap()));
    assert!(!cookie.uri_matches(&Url::parse("http://www.example.com/").unwrap()));
}

#[test]
fn test_url_match_manually_set() {
    let cookie = Cookie::new("requests-testcookie", "testvalue");
    assert!(cookie.domain_matches("example.com"));
    assert!(cookie.domain_matches("example.net"));
    assert!(cookie.path_matches("/"));
    assert!(cookie.path_matches("/test"));
    assert!(cookie.path_matches("/test/"));
    for url in [
        "http://example.com/",
        "http://example.com/test",
        "http://example.com/test/",
        "http://example.net/",
        "http://example.net/test",
        "http://example.net/test/",
    ] {
        assert!(cookie.uri_matches(&Url::parse(url).unwrap()), "{url}");
    }
}

/// Expected outcome of parsing one header at [`REFERENCE`].
struct ParseCase {
    header: &'static str,
    expired: Option<bool>,
    attribute: Option<(&'static str, Option<AttributeValue>)>,
}

fn parse_cases() -> Vec<ParseCase> {
    let time = |t: OffsetDateTime| Some(AttributeValue::Time(t));
    vec![
        // RFC 822, updated by RFC 1123
        ParseCase {
            header: "foo=bar; Expires=Thu, 5-Dec-2013 04:50:12 GMT",
            expired: Some(true),
            attribute: Some(("expires", time(datetime!(2013-12-05 04:50:12 UTC)))),
        },
        ParseCase {
            header: "foo=bar; Expires=Fri, 5-Dec-2014 04:50:12 GMT",
            expired: Some(false),
            attribute: Some(("expires", time(datetime!(2014-12-05 04:50:12 UTC)))),
        },
        // RFC 850, obsoleted by RFC 1036
        ParseCase {
            header: "foo=bar; Expires=Thursday, 5-Dec-2013 04:50:12 GMT",
            expired: Some(true),
            attribute: Some(("expires", time(datetime!(2013-12-05 04:50:12 UTC)))),
        },
        ParseCase {
            header: "foo=bar; Expires=Friday, 5-Dec-2014 04:50:12 GMT",
            expired: Some(false),
            attribute: Some(("expires", time(datetime!(2014-12-05 04:50:12 UTC)))),
        },
        // asctime()
        ParseCase {
            header: "foo=bar; Expires=Thu Dec  5 04:50:12 2013",
            expired: Some(true),
            attribute: Some(("expires", time(datetime!(2013-12-05 04:50:12 UTC)))),
        },
        ParseCase {
            header: "foo=bar; Expires=Fri Dec  5 04:50:12 2014",
            expired: Some(false),
            attribute: Some(("expires", time(datetime!(2014-12-05 04:50:12 UTC)))),
        },
        ParseCase {
            header: "foo=bar; Expires=never",
            expired: Some(false),
            attribute: Some(("expires", None)),
        },
        // Max-Age
        ParseCase {
            header: "foo=bar; Max-Age=10",
            expired: Some(false),
            attribute: Some(("max-age", time(datetime!(2014-01-01 00:00:10 UTC)))),
        },
        ParseCase {
            header: "foo=bar; Max-Age=3660",
            expired: Some(false),
            attribute: Some(("max-age", time(datetime!(2014-01-01 01:01:00 UTC)))),
        },
        ParseCase {
            header: "foo=bar; Max-Age=0",
            expired: Some(true),
            attribute: Some(("max-age", Some(AttributeValue::Expired))),
        },
        ParseCase {
            header: "foo=bar; Max-Age=-1000",
            expired: Some(true),
            attribute: Some(("max-age", Some(AttributeValue::Expired))),
        },
        ParseCase {
            header: "foo=bar; Max-Age=1e6",
            expired: Some(false),
            attribute: Some(("max-age", None)),
        },
        // Basic parsing
        ParseCase {
            header: "foo=bar",
            expired: Some(false),
            attribute: None,
        },
        ParseCase {
            header: "bar",
            expired: None,
            attribute: None,
        },
    ]
}

fn check_parsed_cookie(cookie: &Cookie, case: &ParseCase) {
    if let Some(expired) = case.expired {
        assert_eq!(cookie.is_expired(), expired, "{}", case.header);
    }
    if let Some((key, expected)) = &case.attribute {
        assert_eq!(
            cookie.attributes.get(key),
            expected.as_ref(),
            "{key} of {}",
            case.header
        );
    }
}

#[test]
fn test_parse_names() {
    let cookie = Cookie::parse("foo=bar", None, REFERENCE).unwrap();
    assert_eq!((cookie.name.as_str(), cookie.value.as_str()), ("foo", "bar"));
    assert_eq!(cookie.format_for_header(), "foo=bar");

    let cookie = Cookie::parse("bar", None, REFERENCE).unwrap();
    assert_eq!((cookie.name.as_str(), cookie.value.as_str()), ("", "bar"));
}

#[test]
fn test_parsing_header() {
    for case in parse_cases() {
        let cookie = Cookie::parse(case.header, None, REFERENCE).unwrap();
        check_parsed_cookie(&cookie, &case);
    }
}

#[test]
fn test_parsing_header_double() {
    for case in parse_cases() {
        let mut cookie = Cookie::parse(case.header, None, REFERENCE).unwrap();
        let once = cookie.clone();
        cookie.normalize();

        assert_eq!(cookie, once, "{}", case.header);
        check_parsed_cookie(&cookie, &case);
    }
}

#[test]
fn test_parsing_header_object() {
    for case in parse_cases() {
        let parsed = parse_from_headers(&headers_with(case.header), None, REFERENCE);
        assert_eq!(parsed.len(), 1, "{}", case.header);
        check_parsed_cookie(&parsed[0], &case);
    }
}

/// `None` for `path`/`domain`/`host_only` means "not checked".
struct OriginCase {
    header: &'static str,
    origin: &'static str,
    accepted: bool,
    path: Option<&'static str>,
    domain: Option<&'static str>,
    host_only: Option<bool>,
}

const fn accepted(
    header: &'static str,
    origin: &'static str,
    path: Option<&'static str>,
    domain: Option<&'static str>,
    host_only: Option<bool>,
) -> OriginCase {
    OriginCase {
        header,
        origin,
        accepted: true,
        path,
        domain,
        host_only,
    }
}

const ORIGIN_CASES: &[OriginCase] = &[
    // Varying origin path
    accepted("name=value", "http://example.com/", Some("/"), None, Some(true)),
    accepted("name=value", "http://example.com/test", Some("/"), None, Some(true)),
    accepted("name=value", "http://example.com/test/", Some("/test"), None, Some(true)),
    accepted("name=value", "http://example.com/test/abc", Some("/test"), None, Some(true)),
    accepted("name=value", "http://example.com/test/abc/", Some("/test/abc"), None, Some(true)),
    // With specified path
    accepted("name=value; path=/", "http://example.com/", Some("/"), None, Some(true)),
    accepted("name=value; path=/test", "http://example.com/", Some("/test"), None, Some(true)),
    accepted("name=value; path=/test/", "http://example.com/", Some("/test/"), None, Some(true)),
    // Invalid path
    accepted("name=value; path=yolo", "http://example.com/", Some("/"), None, Some(true)),
    accepted("name=value; path=yolo", "http://example.com/test/", Some("/test"), None, Some(true)),
    // Cross-origin cookies, reject!
    OriginCase {
        header: "name=value; domain=example.org",
        origin: "http://example.com/",
        accepted: false,
        path: None,
        domain: None,
        host_only: None,
    },
    // Empty domain
    accepted("name=value; domain=", "http://example.com/test/", None, Some("example.com"), Some(true)),
    // Subdomain cookies
    accepted(
        "name=value; domain=test.example.com",
        "http://test.example.com/",
        None,
        Some("test.example.com"),
        Some(false),
    ),
    accepted(
        "name=value; domain=example.com",
        "http://test.example.com/",
        None,
        Some("example.com"),
        Some(false),
    ),
];

#[test]
fn test_parsing_header_with_origin() {
    for case in ORIGIN_CASES {
        let origin = Url::parse(case.origin).unwrap();
        let parsed = parse_from_headers(&headers_with(case.header), Some(&origin), REFERENCE);

        if !case.accepted {
            assert!(parsed.is_empty(), "{} from {}", case.header, case.origin);
            continue;
        }
        assert_eq!(parsed.len(), 1, "{} from {}", case.header, case.origin);

        let cookie = &parsed[0];
        if let Some(path) = case.path {
            assert_eq!(cookie.path(), Some(path), "{} from {}", case.header, case.origin);
        }
        if let Some(domain) = case.domain {
            assert_eq!(cookie.domain(), Some(domain), "{} from {}", case.header, case.origin);
        }
        if let Some(host_only) = case.host_only {
            assert_eq!(cookie.flags.host_only, host_only, "{} from {}", case.header, case.origin);
        }
    }
}

#[test]
fn test_origin_defaults_domain_to_host() {
    let origin = Url::parse("http://example.com/a/b").unwrap();
    let cookie = Cookie::parse("name=value", Some(&origin), REFERENCE).unwrap();

    assert_eq!(cookie.domain(), Some("example.com"));
    assert!(cookie.uri_matches(&Url::parse("http://example.com/a/c").unwrap()));
    assert!(!cookie.uri_matches(&Url::parse("http://www.example.com/a/c").unwrap()));
    assert!(!cookie.uri_matches(&Url::parse("http://example.com/b").unwrap()));
}

#[test]
fn test_parse_without_origin_is_not_host_only() {
    let cookie = Cookie::parse("name=value; domain=example.com", None, REFERENCE).unwrap();
    assert!(!cookie.flags.host_only);
    assert!(cookie.domain_matches("www.example.com"));
}

#[test]
fn test_set_cookie_format_keeps_order() {
    let cookie = Cookie::parse(
        "id=1; HttpOnly; Path=/app; SameSite=Lax; Domain=.example.com",
        None,
        REFERENCE,
    )
    .unwrap();
    assert_eq!(
        cookie.format_for_set_cookie(),
        "id=1; httponly; path=/app; samesite=Lax; domain=example.com"
    );
}
