//! Parsing of `--since` cutoffs into unix seconds
//!
//! Accepted forms, tried in order:
//! - `@<seconds>`
//! - RFC 3339 (`2024-03-01T12:00:00+02:00`)
//! - RFC 2822 (`Fri, 1 Mar 2024 12:00:00 +0200`)
//! - `YYYY-MM-DD HH:MM:SS ±hhmm`
//! - `YYYY-MM-DD HH:MM:SS`, taken as UTC
//! - `YYYY-MM-DD`, midnight UTC

use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub fn parse_since(input: &str) -> anyhow::Result<i64> {
    let input = input.trim();

    if let Some(seconds) = input.strip_prefix('@') {
        return seconds
            .parse::<i64>()
            .map_err(|_| anyhow::anyhow!("invalid timestamp '{input}'"));
    }

    if let Ok(date) = DateTime::parse_from_rfc3339(input) {
        return Ok(date.timestamp());
    }
    if let Ok(date) = DateTime::parse_from_rfc2822(input) {
        return Ok(date.timestamp());
    }
    if let Ok(date) = DateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S %z") {
        return Ok(date.timestamp());
    }
    if let Ok(date) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S") {
        return Ok(date.and_utc().timestamp());
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        && let Some(midnight) = date.and_hms_opt(0, 0, 0)
    {
        return Ok(midnight.and_utc().timestamp());
    }

    Err(anyhow::anyhow!("unrecognized date '{input}'"))
}
