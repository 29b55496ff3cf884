// Calendar module
// Dates, week rows and the grid handed to the renderer

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::holiday::HolidaySet;
use crate::utils::date::{day_label, iso_key, weekday_index, weekday_label_jp};

/// Days per week row.
pub const DAYS_PER_WEEK: usize = 7;

/// A single day in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CalendarDate {
    date: NaiveDate,
}

impl CalendarDate {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    /// 0 = Sunday .. 6 = Saturday
    pub fn weekday_index(&self) -> u32 {
        weekday_index(self.date)
    }

    pub fn iso_key(&self) -> String {
        iso_key(self.date)
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self::new(date)
    }
}

/// Display category of a day, used to pick the label color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayKind {
    SundayOrHoliday,
    Saturday,
    Plain,
}

impl DayKind {
    /// Sunday-or-holiday is checked before Saturday, so a holiday falling on
    /// a Saturday is classified as a holiday.
    pub fn classify(date: CalendarDate, holidays: &HolidaySet) -> Self {
        let weekday = date.weekday_index();
        if weekday == 0 || holidays.contains_key(&date.iso_key()) {
            DayKind::SundayOrHoliday
        } else if weekday == 6 {
            DayKind::Saturday
        } else {
            DayKind::Plain
        }
    }
}

/// A date resolved against a holiday set, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date: CalendarDate,
    pub kind: DayKind,
    /// Label such as `3/1（金）`
    pub label: String,
    /// Short Japanese weekday name
    pub weekday_label: &'static str,
    pub holiday_name: Option<String>,
}

impl DayCell {
    pub fn resolve(date: CalendarDate, holidays: &HolidaySet) -> Self {
        Self {
            date,
            kind: DayKind::classify(date, holidays),
            label: day_label(date.date()),
            weekday_label: weekday_label_jp(date.date()),
            holiday_name: holidays.name_for(date.date()).map(str::to_string),
        }
    }
}

/// Seven consecutive dates, Sunday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekRow {
    days: [CalendarDate; DAYS_PER_WEEK],
}

impl WeekRow {
    /// Row starting at `sunday`. The caller guarantees the weekday.
    /// `None` when the row would run past `NaiveDate::MAX`.
    pub(crate) fn starting_at(sunday: NaiveDate) -> Option<Self> {
        let mut days = [CalendarDate::new(sunday); DAYS_PER_WEEK];
        for (col, slot) in days.iter_mut().enumerate().skip(1) {
            *slot = CalendarDate::new(sunday.checked_add_days(Days::new(col as u64))?);
        }
        Some(Self { days })
    }

    pub fn days(&self) -> &[CalendarDate; DAYS_PER_WEEK] {
        &self.days
    }

    pub fn first(&self) -> CalendarDate {
        self.days[0]
    }

    pub fn last(&self) -> CalendarDate {
        self.days[DAYS_PER_WEEK - 1]
    }
}

/// Week rows ordered oldest to newest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGrid {
    rows: Vec<WeekRow>,
}

impl CalendarGrid {
    pub(crate) fn from_rows(rows: Vec<WeekRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[WeekRow] {
        &self.rows
    }

    pub fn week_count(&self) -> usize {
        self.rows.len()
    }

    /// All dates, row by row.
    pub fn dates(&self) -> impl Iterator<Item = CalendarDate> + '_ {
        self.rows.iter().flat_map(|row| row.days().iter().copied())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates().any(|d| d.date() == date)
    }

    /// Resolve every date against `holidays`, keeping the row structure.
    pub fn cells(&self, holidays: &HolidaySet) -> Vec<Vec<DayCell>> {
        self.rows
            .iter()
            .map(|row| {
                row.days()
                    .iter()
                    .map(|&date| DayCell::resolve(date, holidays))
                    .collect()
            })
            .collect()
    }
}
