//! Date truncation helpers shared by every provider.
//!
//! Vendors hand back a mix of RFC-3339 instants (Alpaca stamps daily bars at
//! midnight New York time, i.e. 04:00Z or 05:00Z) and bare `YYYY-MM-DD` strings.
//! Everything is reduced to the UTC calendar date so that bars and
//! announcements compare on the same key.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Truncates an instant in any offset to its UTC calendar date.
pub fn utc_trading_date<Tz: TimeZone>(ts: &DateTime<Tz>) -> NaiveDate {
    ts.with_timezone(&Utc).date_naive()
}

/// Parses either a bare `YYYY-MM-DD` date or an RFC-3339 timestamp into a UTC date.
///
/// Returns `None` for anything else (vendors use `"None"` for missing fields).
pub fn parse_provider_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|ts| utc_trading_date(&ts))
}
