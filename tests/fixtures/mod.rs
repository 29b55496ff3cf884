// Test fixtures - reusable test data
// Provides consistent dates, holiday payloads and stub sources across test files

#![allow(dead_code)]

use chrono::NaiveDate;
use fortnight_calendar::models::holiday::HolidaySet;
use fortnight_calendar::services::holiday::{HolidayError, HolidaySource};

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Friday, March 1 2024: the grid crosses the leap day
    pub fn leap_friday_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    /// Thursday, January 2 2025: the grid crosses the year boundary
    pub fn new_year_2025() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()
    }

    /// Saturday, May 4 2024 (みどりの日)
    pub fn saturday_holiday_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 4).unwrap()
    }
}

/// Holiday payloads in the endpoint's format
pub mod holidays {
    use super::*;

    pub const PAYLOAD_2024: &str = r#"{
        "2024-01-01": "元日",
        "2024-01-08": "成人の日",
        "2024-02-11": "建国記念の日",
        "2024-02-12": "建国記念の日 振替休日",
        "2024-02-23": "天皇誕生日",
        "2024-03-20": "春分の日",
        "2024-05-03": "憲法記念日",
        "2024-05-04": "みどりの日",
        "2024-05-05": "こどもの日",
        "2024-05-06": "こどもの日 振替休日"
    }"#;

    pub fn set_2024() -> HolidaySet {
        fortnight_calendar::services::holiday::parse_holidays(PAYLOAD_2024).unwrap()
    }
}

/// Holiday source that hands out a fixed set or a fixed failure
pub enum StubSource {
    Holidays(HolidaySet),
    Unavailable,
}

impl HolidaySource for StubSource {
    fn fetch_holidays(&self) -> Result<HolidaySet, HolidayError> {
        match self {
            StubSource::Holidays(set) => Ok(set.clone()),
            StubSource::Unavailable => Err(HolidayError::Status(503)),
        }
    }
}
