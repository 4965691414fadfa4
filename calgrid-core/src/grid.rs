//! Time-grid column assignment for day and week views.
//!
//! Each item touching a date is reduced to a `[start_minute, end_minute)`
//! interval on that date. Overlapping items get different columns, and every
//! item in an overlap component reports the same column total so the renderer
//! can size them consistently.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::classify::{DateMap, MappedItem};
use crate::config::LayoutConfig;
use crate::date_range::{DateRange, minute_of_day_ceil, minute_of_day_floor};
use crate::item::{CalendarItem, ItemKind};
use crate::lanes::{Span, SweepOrder, assign_lanes};
use crate::view::CalendarView;
use crate::window::WindowSpec;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// An item placed in a time-grid column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedGridItem {
    #[serde(flatten)]
    pub item: CalendarItem,
    pub date: NaiveDate,
    pub start_minute: u32,
    pub end_minute: u32,
    pub column: usize,
    /// Columns used by this item's overlap component, always > `column`.
    pub total_columns: usize,
}

impl PlacedGridItem {
    pub fn duration_minutes(&self) -> u32 {
        self.end_minute - self.start_minute
    }

    pub fn overlaps(&self, other: &PlacedGridItem) -> bool {
        self.start_minute < other.end_minute && self.end_minute > other.start_minute
    }
}

/// Minutes of `date` covered by a mapped item.
///
/// Deadlines and holidays become a short marker at the top of the day, events
/// without a start fill the whole day, and events crossing midnight are cut at
/// the day boundary. Empty or inverted results are widened to
/// `min_grid_minutes`.
pub fn minute_span(mapped: &MappedItem, date: NaiveDate, config: &LayoutConfig) -> (u32, u32) {
    let interval = &mapped.interval;

    let (start, end) = match mapped.item.kind {
        ItemKind::Deadline | ItemKind::Holiday => (0, config.marker_minutes),
        ItemKind::ScheduledEvent if !interval.explicit_start => (0, MINUTES_PER_DAY),
        ItemKind::ScheduledEvent => {
            let start = if interval.start.date() < date {
                0
            } else {
                minute_of_day_floor(interval.start)
            };
            let end = if interval.due.date() > date {
                MINUTES_PER_DAY
            } else {
                minute_of_day_ceil(interval.due)
            };
            (start, end)
        }
    };

    let end = end.min(MINUTES_PER_DAY);
    if end > start {
        return (start, end);
    }

    tracing::debug!(id = %mapped.item.id, start, end, "widening degenerate grid interval");
    let width = config.min_grid_minutes.clamp(1, MINUTES_PER_DAY);
    let start = start.min(MINUTES_PER_DAY - width);
    (start, start + width)
}

/// Assign columns to mapped items that all touch `date`. Output follows input order.
pub fn assign_columns<'a>(
    mapped: impl IntoIterator<Item = &'a MappedItem>,
    date: NaiveDate,
    config: &LayoutConfig,
) -> Vec<PlacedGridItem> {
    let entries: Vec<(&MappedItem, (u32, u32))> = mapped
        .into_iter()
        .map(|m| (m, minute_span(m, date, config)))
        .collect();

    let spans: Vec<Span> = entries
        .iter()
        .map(|(_, (start, end))| Span::new(*start as i64, *end as i64))
        .collect();
    let assignment = assign_lanes(&spans, SweepOrder::StartThenEnd);

    entries
        .into_iter()
        .enumerate()
        .map(|(i, (m, (start_minute, end_minute)))| PlacedGridItem {
            item: m.item.clone(),
            date,
            start_minute,
            end_minute,
            column: assignment.lanes[i],
            total_columns: assignment.total_for(i),
        })
        .collect()
}

/// Lay out a single day.
pub fn layout_day(items: &[CalendarItem], date: NaiveDate, config: &LayoutConfig) -> Vec<PlacedGridItem> {
    let dates = DateMap::build(items, DateRange::single(date));
    let placed = assign_columns(dates.mapped(), date, config);
    tracing::debug!(
        date = %date,
        placed = placed.len(),
        columns = placed.iter().map(|p| p.total_columns).max().unwrap_or(0),
        "built day layout"
    );
    placed
}

/// One day of a week layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub items: Vec<PlacedGridItem>,
}

impl DayColumn {
    /// Widest overlap component of the day.
    pub fn max_columns(&self) -> usize {
        self.items.iter().map(|p| p.total_columns).max().unwrap_or(0)
    }
}

/// Week view output: seven independently laid out days.
#[derive(Debug, Clone, Serialize)]
pub struct WeekLayout {
    pub window: WindowSpec,
    pub days: Vec<DayColumn>,
}

impl WeekLayout {
    /// Lay out the Sunday..Saturday week containing `focus`.
    pub fn build(items: &[CalendarItem], focus: NaiveDate, config: &LayoutConfig) -> Self {
        let window = CalendarView::Week.window(focus);
        let dates = DateMap::build(items, window.range());

        let days = window
            .days
            .iter()
            .map(|&date| DayColumn {
                date,
                items: assign_columns(dates.items_on(date), date, config),
            })
            .collect();

        WeekLayout { window, days }
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayColumn> {
        self.days.iter().find(|d| d.date == date)
    }
}

/// Minute of day for the current-time indicator, when `reference` falls on `date`.
pub fn now_marker(reference: NaiveDateTime, date: NaiveDate) -> Option<u32> {
    (reference.date() == date).then(|| minute_of_day_floor(reference))
}
