use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::errors::RowRejection;

pub(crate) fn parse_flag(value: &str) -> bool {
    value.trim() == "1"
}

pub(crate) fn parse_seconds(value: &str) -> Result<f64, RowRejection> {
    let trimmed = value.trim();
    match trimmed.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => Ok(parsed),
        _ => Err(RowRejection::InvalidTime(trimmed.to_string())),
    }
}

/// Integer columns are diagnostic only, so anything unreadable becomes `None` instead of
/// rejecting the row. Decimal values are truncated toward zero.
pub(crate) fn parse_optional_i64(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        return None;
    }
    if let Ok(parsed) = trimmed.parse::<i64>() {
        return Some(parsed);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
        .map(|parsed| parsed.trunc() as i64)
}

pub(crate) fn parse_utc_timestamp(value: &str) -> Option<DateTime<Utc>> {
    static FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
    ];
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
