//! Month view row assignment.
//!
//! Items are placed on the 42-cell month grid; overlapping items (sharing at
//! least one day) are pushed onto different rows.

use chrono::NaiveDate;
use serde::Serialize;

use crate::classify::{DateMap, MappedItem};
use crate::item::CalendarItem;
use crate::lanes::{Span, SweepOrder, assign_lanes};
use crate::view::CalendarView;
use crate::window::{DAYS_PER_WEEK, WindowSpec};

/// An item placed on the month grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedMonthItem {
    #[serde(flatten)]
    pub item: CalendarItem,
    /// Index into `WindowSpec::days` of the first visible day.
    pub start_cell: usize,
    /// Visible days, at least 1.
    pub span: usize,
    pub row: usize,
    /// The item started before the window's first day.
    pub continues_before: bool,
    /// The item ends after the window's last day.
    pub continues_after: bool,
}

impl PlacedMonthItem {
    /// One past the last covered cell.
    pub fn end_cell(&self) -> usize {
        self.start_cell + self.span
    }

    pub fn covers(&self, cell: usize) -> bool {
        self.start_cell <= cell && cell < self.end_cell()
    }

    /// Split the placement into one bar per calendar week it crosses.
    pub fn week_segments(&self) -> Vec<WeekSegment> {
        let mut segments = Vec::new();
        let mut cell = self.start_cell;
        let end = self.end_cell();

        while cell < end {
            let week = cell / DAYS_PER_WEEK;
            let week_end = ((week + 1) * DAYS_PER_WEEK).min(end);
            segments.push(WeekSegment {
                week,
                column: cell % DAYS_PER_WEEK,
                len: week_end - cell,
                continues_before: cell > self.start_cell || self.continues_before,
                continues_after: week_end < end || self.continues_after,
            });
            cell = week_end;
        }

        segments
    }
}

/// The part of a month placement that falls in one week row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekSegment {
    /// Week row of the grid (0..6).
    pub week: usize,
    /// Day column within the week (0 = Sunday).
    pub column: usize,
    pub len: usize,
    pub continues_before: bool,
    pub continues_after: bool,
}

/// Assign a row to every mapped item; output follows input order.
///
/// Items must already be clipped to `window` (see `DateMap::build`).
pub fn assign_rows(mapped: &[MappedItem], window: &WindowSpec) -> Vec<PlacedMonthItem> {
    let cells: Vec<(usize, usize)> = mapped
        .iter()
        .map(|m| {
            let start_cell = window.index_of(m.first_day).unwrap_or(0);
            let span = if m.item.kind.spans_days() {
                m.visible_days()
            } else {
                1
            };
            (start_cell, span)
        })
        .collect();

    let spans: Vec<Span> = cells
        .iter()
        .map(|&(start, span)| Span::new(start as i64, (start + span) as i64))
        .collect();
    let assignment = assign_lanes(&spans, SweepOrder::Start);

    mapped
        .iter()
        .zip(cells)
        .zip(assignment.lanes)
        .map(|((m, (start_cell, span)), row)| PlacedMonthItem {
            item: m.item.clone(),
            start_cell,
            span,
            row,
            continues_before: m.interval.first_day() < m.first_day,
            continues_after: m.interval.last_day() > m.last_day,
        })
        .collect()
}

/// Month view output: the 6×7 window, date buckets and row placements.
#[derive(Debug, Clone, Serialize)]
pub struct MonthLayout {
    pub window: WindowSpec,
    pub dates: DateMap,
    pub items: Vec<PlacedMonthItem>,
}

impl MonthLayout {
    /// Lay out `items` on the month grid around `focus`.
    pub fn build(items: &[CalendarItem], focus: NaiveDate) -> Self {
        let window = CalendarView::Month.window(focus);
        let dates = DateMap::build(items, window.range());
        let placed = assign_rows(dates.mapped(), &window);

        let layout = MonthLayout {
            window,
            dates,
            items: placed,
        };
        tracing::debug!(
            focus = %focus,
            placed = layout.items.len(),
            rows = layout.row_count(),
            "built month layout"
        );
        layout
    }

    /// Rows needed to show everything at `cell` without overlap.
    pub fn rows_on(&self, cell: usize) -> usize {
        self.items
            .iter()
            .filter(|p| p.covers(cell))
            .map(|p| p.row + 1)
            .max()
            .unwrap_or(0)
    }

    /// Rows needed anywhere in the grid.
    pub fn row_count(&self) -> usize {
        self.items.iter().map(|p| p.row + 1).max().unwrap_or(0)
    }

    /// Placements covering `cell`, top row first.
    pub fn items_in_cell(&self, cell: usize) -> Vec<&PlacedMonthItem> {
        let mut covering: Vec<&PlacedMonthItem> =
            self.items.iter().filter(|p| p.covers(cell)).collect();
        covering.sort_by_key(|p| p.row);
        covering
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemKind;
    use chrono::NaiveDateTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, 0, 0).unwrap()
    }

    fn event(id: &str, from: NaiveDate, to: NaiveDate) -> CalendarItem {
        CalendarItem::new(id, ItemKind::ScheduledEvent)
            .with_start(from.and_hms_opt(9, 0, 0).unwrap())
            .with_due(to.and_hms_opt(17, 0, 0).unwrap())
    }

    fn placed<'a>(layout: &'a MonthLayout, id: &str) -> &'a PlacedMonthItem {
        layout.items.iter().find(|p| p.item.id == id).unwrap()
    }

    fn assert_no_overlap(items: &[PlacedMonthItem]) {
        for (i, a) in items.iter().enumerate() {
            for b in &items[i + 1..] {
                let intersect = a.start_cell < b.end_cell() && b.start_cell < a.end_cell();
                if intersect {
                    assert_ne!(a.row, b.row, "{} and {} share row {}", a.item.id, b.item.id, a.row);
                }
            }
        }
    }

    #[test]
    fn test_overlapping_events_get_separate_rows() {
        let items = vec![
            event("A", date(2024, 3, 3), date(2024, 3, 5)),
            event("B", date(2024, 3, 4), date(2024, 3, 6)),
            event("C", date(2024, 3, 6), date(2024, 3, 7)),
        ];
        let layout = MonthLayout::build(&items, date(2024, 3, 1));

        let a = placed(&layout, "A");
        assert_eq!(a.start_cell, 7);
        assert_eq!(a.span, 3);
        assert_eq!(a.row, 0);
        assert_eq!(placed(&layout, "B").row, 1);
        assert_eq!(placed(&layout, "C").row, 0);

        assert_eq!(layout.rows_on(layout.window.index_of(date(2024, 3, 4)).unwrap()), 2);
        assert_eq!(layout.rows_on(layout.window.index_of(date(2024, 3, 7)).unwrap()), 1);
        assert_eq!(layout.row_count(), 2);
        assert_no_overlap(&layout.items);
    }

    #[test]
    fn test_single_day_kinds_span_one_cell() {
        let items = vec![
            CalendarItem::new("deadline", ItemKind::Deadline)
                .with_start(at(2024, 3, 1, 9))
                .with_due(at(2024, 3, 12, 17)),
            CalendarItem::new("holiday", ItemKind::Holiday).with_due(at(2024, 3, 12, 0)),
            event("E", date(2024, 3, 11), date(2024, 3, 13)),
        ];
        let layout = MonthLayout::build(&items, date(2024, 3, 12));

        let deadline = placed(&layout, "deadline");
        assert_eq!(deadline.span, 1);
        assert_eq!(layout.window.days[deadline.start_cell], date(2024, 3, 12));
        assert_eq!(placed(&layout, "holiday").span, 1);

        let cell = layout.window.index_of(date(2024, 3, 12)).unwrap();
        let rows: Vec<_> = layout
            .items_in_cell(cell)
            .iter()
            .map(|p| (p.item.id.as_str(), p.row))
            .collect();
        assert_eq!(rows, vec![("E", 0), ("deadline", 1), ("holiday", 2)]);
    }

    #[test]
    fn test_items_outside_grid_are_dropped_and_edges_clipped() {
        let items = vec![
            event("before", date(2024, 1, 1), date(2024, 1, 3)),
            event("spill", date(2024, 2, 20), date(2024, 2, 27)),
            event("tail", date(2024, 4, 5), date(2024, 4, 20)),
        ];
        let layout = MonthLayout::build(&items, date(2024, 3, 1));

        assert!(layout.items.iter().all(|p| p.item.id != "before"));

        let spill = placed(&layout, "spill");
        assert_eq!(spill.start_cell, 0);
        assert_eq!(spill.span, 3);
        assert!(spill.continues_before);
        assert!(!spill.continues_after);

        let tail = placed(&layout, "tail");
        assert_eq!(tail.end_cell(), 42);
        assert_eq!(tail.span, 2);
        assert!(tail.continues_after);
    }

    #[test]
    fn test_week_segments_split_at_saturday() {
        let items = vec![event("long", date(2024, 3, 7), date(2024, 3, 19))];
        let layout = MonthLayout::build(&items, date(2024, 3, 1));

        let segments = placed(&layout, "long").week_segments();
        assert_eq!(segments.len(), 3);
        assert_eq!((segments[0].week, segments[0].column, segments[0].len), (1, 4, 3));
        assert_eq!((segments[1].week, segments[1].column, segments[1].len), (2, 0, 7));
        assert_eq!((segments[2].week, segments[2].column, segments[2].len), (3, 0, 3));
        assert!(!segments[0].continues_before);
        assert!(segments[0].continues_after);
        assert!(segments[2].continues_before);
        assert!(!segments[2].continues_after);
    }

    #[test]
    fn test_rows_are_minimal_and_deterministic() {
        let mut items = Vec::new();
        for i in 0..20u32 {
            let from = date(2024, 3, 1 + (i * 5) % 27);
            let to = from + chrono::Duration::days((i % 4) as i64);
            items.push(event(&format!("e{}", i), from, to));
        }

        let first = MonthLayout::build(&items, date(2024, 3, 1));
        let second = MonthLayout::build(&items, date(2024, 3, 1));
        assert_eq!(first.items, second.items);
        assert_no_overlap(&first.items);

        let busiest = (0..first.window.len())
            .map(|cell| first.items.iter().filter(|p| p.covers(cell)).count())
            .max()
            .unwrap();
        assert_eq!(first.row_count(), busiest);
    }
}
