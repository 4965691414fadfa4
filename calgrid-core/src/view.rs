//! View granularities and focus-date navigation.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::window::{WindowSpec, days_in_month};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    Month,
    Week,
    Day,
}

impl CalendarView {
    /// Focus date one step back (previous month, week or day).
    pub fn previous(self, focus: NaiveDate) -> NaiveDate {
        self.step(focus, -1)
    }

    /// Focus date one step forward.
    pub fn next(self, focus: NaiveDate) -> NaiveDate {
        self.step(focus, 1)
    }

    fn step(self, focus: NaiveDate, delta: i32) -> NaiveDate {
        match self {
            CalendarView::Month => shift_month(focus, delta),
            CalendarView::Week => focus + Duration::weeks(delta as i64),
            CalendarView::Day => focus + Duration::days(delta as i64),
        }
    }

    /// Visible window for this view. Day views use the week window so the
    /// header strip still shows the surrounding days.
    pub fn window(self, focus: NaiveDate) -> WindowSpec {
        match self {
            CalendarView::Month => WindowSpec::month_grid(focus),
            CalendarView::Week | CalendarView::Day => WindowSpec::week(focus),
        }
    }
}

/// Move by whole months, keeping the day of month when the target month has it.
pub fn shift_month(date: NaiveDate, delta: i32) -> NaiveDate {
    let total = date.year() * 12 + date.month0() as i32 + delta;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_navigation_clamps_day() {
        assert_eq!(CalendarView::Month.next(date(2024, 1, 31)), date(2024, 2, 29));
        assert_eq!(CalendarView::Month.previous(date(2024, 3, 31)), date(2024, 2, 29));
        assert_eq!(CalendarView::Month.next(date(2024, 12, 15)), date(2025, 1, 15));
        assert_eq!(CalendarView::Month.previous(date(2024, 1, 15)), date(2023, 12, 15));
    }

    #[test]
    fn test_week_and_day_navigation() {
        assert_eq!(CalendarView::Week.next(date(2024, 3, 13)), date(2024, 3, 20));
        assert_eq!(CalendarView::Day.previous(date(2024, 3, 1)), date(2024, 2, 29));
    }

    #[test]
    fn test_view_windows() {
        assert_eq!(CalendarView::Month.window(date(2024, 3, 13)).len(), 42);
        assert_eq!(CalendarView::Week.window(date(2024, 3, 13)).len(), 7);
    }
}
