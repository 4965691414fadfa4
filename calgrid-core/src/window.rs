//! Visible date windows for month and week views.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::date_range::DateRange;

pub const DAYS_PER_WEEK: usize = 7;

/// The month view always renders six weeks.
pub const MONTH_GRID_DAYS: usize = 6 * DAYS_PER_WEEK;

/// An ordered, week-aligned run of dates starting on a Sunday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowSpec {
    /// The date the window was built around.
    pub focus: NaiveDate,
    pub days: Vec<NaiveDate>,
}

impl WindowSpec {
    /// Minimal week-aligned window covering the focus month (28 to 42 days).
    /// Used by the mini calendar.
    pub fn month_span(focus: NaiveDate) -> Self {
        let (month_start, month_end) = month_bounds(focus);

        let leading = month_start.weekday().num_days_from_sunday() as i64;
        let trailing = 6 - month_end.weekday().num_days_from_sunday() as i64;

        let first = month_start - Duration::days(leading);
        let last = month_end + Duration::days(trailing);

        WindowSpec {
            focus,
            days: DateRange::new(first, last).days().collect(),
        }
    }

    /// Six full weeks covering the focus month, padded at the end when the
    /// month needs fewer rows.
    pub fn month_grid(focus: NaiveDate) -> Self {
        let mut window = Self::month_span(focus);
        while window.days.len() < MONTH_GRID_DAYS {
            let next = window.last() + Duration::days(1);
            window.days.push(next);
        }
        window
    }

    /// The Sunday..Saturday week containing `focus`.
    pub fn week(focus: NaiveDate) -> Self {
        let first = focus - Duration::days(focus.weekday().num_days_from_sunday() as i64);
        WindowSpec {
            focus,
            days: first.iter_days().take(DAYS_PER_WEEK).collect(),
        }
    }

    pub fn first(&self) -> NaiveDate {
        self.days[0]
    }

    pub fn last(&self) -> NaiveDate {
        self.days[self.days.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn range(&self) -> DateRange {
        DateRange::new(self.first(), self.last())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.range().contains(date)
    }

    /// Cell index of `date`, if it is inside the window.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        if !self.contains(date) {
            return None;
        }
        Some((date - self.first()).num_days() as usize)
    }

    /// Whether `date` belongs to the month the window was built for.
    /// Padding days from neighbouring months return false.
    pub fn in_focus_month(&self, date: NaiveDate) -> bool {
        date.year() == self.focus.year() && date.month() == self.focus.month()
    }

    /// Whether `date` is a visible day of this window and falls on `reference`.
    pub fn is_today(&self, date: NaiveDate, reference: NaiveDateTime) -> bool {
        date == reference.date() && self.contains(date)
    }

    /// Days grouped into rows of seven.
    pub fn weeks(&self) -> impl Iterator<Item = &[NaiveDate]> + '_ {
        self.days.chunks(DAYS_PER_WEEK)
    }
}

/// First and last day of the month containing `date`.
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = date.with_day(1).unwrap_or(date);
    let last_day = days_in_month(date.year(), date.month());
    let end = date.with_day(last_day).unwrap_or(date);
    (start, end)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map_or(28, |last| last.day())
}
