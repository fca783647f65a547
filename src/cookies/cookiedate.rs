//! Cookie expiry date parsing.
//!
//! `Expires` values in the wild come in three legacy shapes:
//!
//! | Layout | Example |
//! |--------|---------|
//! | RFC 822 / 1123 | `Thu, 5-Dec-2013 04:50:12 GMT`, `Thu, 05 Dec 2013 04:50:12 GMT` |
//! | RFC 850 / 1036 | `Thursday, 5-Dec-2013 04:50:12 GMT` |
//! | ANSI C `asctime()` | `Thu Dec  5 04:50:12 2013` |
//!
//! Layouts are tried in that order and the first success wins. Every value is
//! read as UTC whatever zone abbreviation it carries. A value that fits no
//! layout yields `None`, which callers treat as "no expiry" (a session cookie).

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

const WEEKDAYS: [(&str, &str); 7] = [
    ("Mon", "Monday"),
    ("Tue", "Tuesday"),
    ("Wed", "Wednesday"),
    ("Thu", "Thursday"),
    ("Fri", "Friday"),
    ("Sat", "Saturday"),
    ("Sun", "Sunday"),
];

const DASHED_BODY: &[BorrowedFormatItem<'static>] = format_description!(
    "[day padding:none]-[month repr:short case_sensitive:false]-[year] [hour]:[minute]:[second]"
);

const SPACED_BODY: &[BorrowedFormatItem<'static>] = format_description!(
    "[day padding:none] [month repr:short case_sensitive:false] [year] [hour]:[minute]:[second]"
);

const ASCTIME_BODY: &[BorrowedFormatItem<'static>] = format_description!(
    "[month repr:short case_sensitive:false] [day padding:space] [hour]:[minute]:[second] [year]"
);

const IMF_FIXDATE: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

#[derive(Debug, Clone, Copy)]
enum WeekdayStyle {
    Short,
    Long,
}

impl WeekdayStyle {
    fn matches(self, token: &str) -> bool {
        WEEKDAYS.iter().any(|(short, long)| match self {
            WeekdayStyle::Short => token.eq_ignore_ascii_case(short),
            WeekdayStyle::Long => token.eq_ignore_ascii_case(long),
        })
    }
}

/// One accepted date shape: a weekday name, a delimiter, the date/time body
/// and (optionally) a trailing zone abbreviation.
struct DateLayout {
    name: &'static str,
    weekday: WeekdayStyle,
    delimiter: &'static str,
    body: &'static [BorrowedFormatItem<'static>],
    zoned: bool,
}

const LAYOUTS: [DateLayout; 4] = [
    DateLayout {
        name: "rfc1123",
        weekday: WeekdayStyle::Short,
        delimiter: ", ",
        body: DASHED_BODY,
        zoned: true,
    },
    DateLayout {
        name: "rfc1123-spaced",
        weekday: WeekdayStyle::Short,
        delimiter: ", ",
        body: SPACED_BODY,
        zoned: true,
    },
    DateLayout {
        name: "rfc850",
        weekday: WeekdayStyle::Long,
        delimiter: ", ",
        body: DASHED_BODY,
        zoned: true,
    },
    DateLayout {
        name: "asctime",
        weekday: WeekdayStyle::Short,
        delimiter: " ",
        body: ASCTIME_BODY,
        zoned: false,
    },
];

impl DateLayout {
    fn parse(&self, input: &str) -> Option<OffsetDateTime> {
        let (weekday, rest) = input.split_once(self.delimiter)?;
        if !self.weekday.matches(weekday) {
            return None;
        }

        let body = if self.zoned {
            let (body, zone) = rest.rsplit_once(' ')?;
            if zone.is_empty() || !zone.bytes().all(|b| b.is_ascii_alphabetic()) {
                return None;
            }
            if !zone.eq_ignore_ascii_case("GMT") && !zone.eq_ignore_ascii_case("UTC") {
                tracing::debug!(zone = %zone, layout = self.name, "treating cookie date zone as UTC");
            }
            body
        } else {
            rest
        };

        PrimitiveDateTime::parse(body, self.body)
            .ok()
            .map(PrimitiveDateTime::assume_utc)
    }
}

/// Parse a cookie `Expires` value into an absolute UTC instant.
///
/// Returns `None` when the value fits none of the accepted layouts, including
/// values that look right but name an impossible date (bad month, day 31 of
/// a 30-day month, second 60).
pub fn parse_cookie_date(input: &str) -> Option<OffsetDateTime> {
    let input = input.trim();
    LAYOUTS.iter().find_map(|layout| layout.parse(input))
}

/// Format an instant as an IMF-fixdate (`Thu, 05 Dec 2013 04:50:12 GMT`).
///
/// The output is always accepted by [`parse_cookie_date`].
pub fn format_cookie_date(instant: OffsetDateTime) -> Option<String> {
    instant
        .to_offset(time::UtcOffset::UTC)
        .format(IMF_FIXDATE)
        .ok()
}
