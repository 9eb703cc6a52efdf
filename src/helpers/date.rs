//! Date formatting helpers
//!
//! Display formatting is pinned to pt-BR; the locale is part of the
//! contract, not a configuration knob.

use chrono::{DateTime, Datelike, FixedOffset, Timelike};

use crate::error::{Error, Result};

/// pt-BR month abbreviations as rendered by "dd MMM yyyy"
const MONTHS: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// Parse an ISO-8601 timestamp
///
/// Accepts both `+00:00` and the API's compact `+0000` offset form.
pub fn parse_iso(iso: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(iso)
        .or_else(|_| DateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S%z"))
        .map_err(|_| Error::InvalidDate(iso.to_string()))
}

/// Render "dd MMM yyyy", e.g. "15 mar 2021"
pub fn format_date(iso: &str) -> Result<String> {
    let date = parse_iso(iso)?;
    Ok(format!(
        "{:02} {} {}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    ))
}

/// Render "dd MMM yyyy, às HH:mm", e.g. "15 mar 2021, às 10:30"
pub fn format_date_hour(iso: &str) -> Result<String> {
    let date = parse_iso(iso)?;
    Ok(format!(
        "{:02} {} {}, às {:02}:{:02}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year(),
        date.hour(),
        date.minute()
    ))
}
