//! Date utilities: lenient due-date parsing and the boundary "today".

use anyhow::{Result, anyhow, bail};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

const DATE_FORMATS: &[&str] = &[
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
];

/// Parse a due date from text.
///
/// ISO dates are the common case; RFC 3339 stamps keep the date in their
/// own offset. A handful of human formats are accepted after that.
pub fn parse_due_date(text: &str) -> Result<NaiveDate> {
    let s = text.trim();
    if s.is_empty() {
        bail!("empty date");
    }

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(ndt.date());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }

    Err(anyhow!("unrecognized date '{s}'"))
}

/// Whole calendar days from `reference` to `due`; negative when past due.
pub fn days_until(reference: NaiveDate, due: NaiveDate) -> i64 {
    (due - reference).num_days()
}

/// Current calendar date in an IANA time zone like "America/Chicago".
///
/// Only boundary layers call this; the core always takes the reference
/// date as a parameter.
pub fn today_in(tz: &str) -> Result<NaiveDate> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| anyhow!("invalid timezone: {tz}"))?;
    Ok(Utc::now().with_timezone(&tz).date_naive())
}
