use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::error::ApiError;

pub const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Strict `YYYY-MM-DD` parse; anything else is a validation error.
pub fn parse_date(s: &str) -> Result<Date, ApiError> {
    Date::parse(s, DATE_FORMAT)
        .map_err(|_| ApiError::Validation(format!("invalid date '{s}', expected YYYY-MM-DD")))
}

pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Parse and re-format, so stored dates are always zero-padded canonical form.
pub fn canonicalize(s: &str) -> Result<String, ApiError> {
    parse_date(s).map(format_date)
}

/// Wall-clock date. Consulted only at the HTTP edge to default optional
/// parameters; engine code always receives explicit dates.
pub fn today() -> Date {
    OffsetDateTime::now_utc().date()
}
