//! Grid computation: which dates appear, in which row and column.

use chrono::{Duration, NaiveDate};
use std::num::NonZeroU32;

use crate::models::calendar::{CalendarGrid, WeekRow};
use crate::utils::date::start_of_week;

/// Number of week rows in the exported image.
pub const WEEKS: NonZeroU32 = match NonZeroU32::new(2) {
    Some(weeks) => weeks,
    None => unreachable!(),
};

/// Compute `weeks` Sunday-first rows ending with the week containing
/// `reference`.
///
/// Row `w` starts at `reference - weekday + 7 * (w - (weeks - 1))`, so with
/// two weeks the grid is the previous week followed by the current one.
/// Returns `None` when any row falls outside chrono's representable dates.
pub fn compute_grid(reference: NaiveDate, weeks: NonZeroU32) -> Option<CalendarGrid> {
    let weeks = weeks.get() as i64;
    let current_sunday = start_of_week(reference)?;

    let rows = (0..weeks)
        .map(|w| {
            let shift = Duration::try_weeks(w - (weeks - 1))?;
            WeekRow::starting_at(current_sunday.checked_add_signed(shift)?)
        })
        .collect::<Option<Vec<_>>>()?;

    Some(CalendarGrid::from_rows(rows))
}

/// The fixed two-week grid used by the exporter.
pub fn compute_fortnight(reference: NaiveDate) -> Option<CalendarGrid> {
    compute_grid(reference, WEEKS)
}
