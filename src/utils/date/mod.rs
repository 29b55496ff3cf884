// Date utility functions
// Weekday indexing, ISO keys and Japanese labels shared by models and services

use chrono::{Datelike, Days, NaiveDate};

/// Short Japanese weekday names, Sunday first.
pub const DAYS_JP: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];

/// Weekday index with 0 = Sunday .. 6 = Saturday.
pub fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// `YYYY-MM-DD`, the key format used by the holiday endpoint.
pub fn iso_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn parse_iso_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, "%Y-%m-%d").ok()
}

pub fn weekday_label_jp(date: NaiveDate) -> &'static str {
    DAYS_JP[weekday_index(date) as usize]
}

/// Cell label such as `3/1（金）`: month and day without padding, weekday in
/// full-width parentheses.
pub fn day_label(date: NaiveDate) -> String {
    format!(
        "{}/{}（{}）",
        date.month(),
        date.day(),
        weekday_label_jp(date)
    )
}

/// Sunday on or before `date`, `None` when that falls before `NaiveDate::MIN`.
pub fn start_of_week(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(weekday_index(date) as u64))
}
