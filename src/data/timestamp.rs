//! Crash timestamp parsing.
//! Merges the separate crash date and crash time fields into one instant.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

// Two-digit years come first; `%Y` would otherwise accept "19" as year 19.
const DATE_FORMATS: [&str; 5] = ["%m/%d/%y", "%m/%d/%Y", "%Y-%m-%d", "%Y/%m/%d", "%d-%b-%Y"];

const TIME_FORMATS: [&str; 5] = ["%H:%M", "%H:%M:%S", "%H:%M:%S%.f", "%I:%M %p", "%I:%M:%S %p"];

/// Parse a crash date and crash time pair into a single timestamp.
///
/// Socrata exports carry a midnight time part on the date field
/// (`2019-07-13T00:00:00.000`); it is ignored in favour of the time field.
pub fn parse_crash_timestamp(date: &str, time: &str) -> Option<NaiveDateTime> {
    let date = parse_date(date)?;
    let time = parse_time(time)?;
    Some(date.and_time(time))
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let raw = raw.split_once('T').map_or(raw, |(day, _)| day);
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(raw, format).ok())
}
