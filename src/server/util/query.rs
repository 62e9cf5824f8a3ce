//! Lenient parsing of listing filter parameters.
//!
//! Filters that are missing, blank or malformed are treated as absent so a bad query string
//! widens the listing instead of failing the request.

use chrono::{Local, NaiveDate};
use sea_orm::ActiveEnum;

use crate::server::form::DATE_FORMAT;

fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|r| !r.is_empty())
}

pub fn filter_id(raw: Option<&str>) -> Option<i32> {
    present(raw)?.parse().ok()
}

pub fn filter_date(raw: Option<&str>) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(present(raw)?, DATE_FORMAT).ok()
}

pub fn filter_text(raw: Option<&str>) -> Option<String> {
    present(raw).map(str::to_string)
}

/// Parses an enum filter by its stored value
pub fn filter_enum<E>(raw: Option<&str>) -> Option<E>
where
    E: ActiveEnum<Value = String>,
{
    E::try_from_value(&present(raw)?.to_string()).ok()
}

/// Today's date in the server's local time zone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
