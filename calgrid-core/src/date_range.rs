//! Inclusive date ranges and day-boundary helpers.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{CalGridError, CalGridResult};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Inclusive range of calendar dates used to clip items to a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    /// Build a range, swapping the bounds if they arrive reversed.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        if from <= to {
            DateRange { from, to }
        } else {
            DateRange { from: to, to: from }
        }
    }

    pub fn single(date: NaiveDate) -> Self {
        DateRange {
            from: date,
            to: date,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    /// Number of days in the range, counting both ends.
    pub fn len_days(&self) -> usize {
        (self.to - self.from).num_days() as usize + 1
    }

    /// Intersect `[first, last]` with this range.
    /// Returns None when the two do not share any day.
    pub fn clip(&self, first: NaiveDate, last: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        if last < self.from || first > self.to {
            return None;
        }
        Some((first.max(self.from), last.min(self.to)))
    }

    /// Iterate every date in the range in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.from.iter_days().take_while(move |d| *d <= self.to)
    }
}

/// `00:00:00` on the given date.
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// `23:59:59.999` on the given date, the inclusive end-of-day convention.
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(end_of_day_time())
}

pub fn is_end_of_day(instant: NaiveDateTime) -> bool {
    instant.time() == end_of_day_time()
}

/// Move an instant to the end of its calendar day unless it is already there.
pub fn normalize_to_end_of_day(instant: NaiveDateTime) -> NaiveDateTime {
    if is_end_of_day(instant) {
        instant
    } else {
        end_of_day(instant.date())
    }
}

/// Minute of day, rounding any seconds down.
pub fn minute_of_day_floor(instant: NaiveDateTime) -> u32 {
    instant.hour() * 60 + instant.minute()
}

/// Minute of day, rounding any leftover seconds up so `23:59:59.999` maps to 1440.
pub fn minute_of_day_ceil(instant: NaiveDateTime) -> u32 {
    let time = instant.time();
    let partial = time.second() > 0 || time.nanosecond() > 0;
    minute_of_day_floor(instant) + u32::from(partial)
}

/// Parse YYYY-MM-DD
pub fn parse_date(s: &str) -> CalGridResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        CalGridError::InvalidDate(format!("'{}'. Expected YYYY-MM-DD", s))
    })
}

fn end_of_day_time() -> NaiveTime {
    NaiveTime::MIN + TimeDelta::milliseconds(MILLIS_PER_DAY - 1)
}
