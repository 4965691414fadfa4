//! Item classification and date mapping.
//!
//! Normalizes every item into a display interval according to its kind,
//! clips it to the active window and records which dates it touches.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::date_range::{DateRange, normalize_to_end_of_day};
use crate::item::{CalendarItem, ItemKind};

/// The span of time an item occupies once its kind's display rules are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayInterval {
    pub start: NaiveDateTime,
    /// Last instant shown on a day grid. Scheduled events always run to the end of this day.
    pub end: NaiveDateTime,
    /// `due` after the all-day hint is applied. Time grids read the real end from here.
    pub due: NaiveDateTime,
    /// False when `start` is a fallback rather than the item's own start.
    pub explicit_start: bool,
}

impl DisplayInterval {
    pub fn first_day(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn last_day(&self) -> NaiveDate {
        self.end.date()
    }
}

/// Compute the display interval for an item, or None if it cannot be placed.
pub fn display_interval(item: &CalendarItem) -> Option<DisplayInterval> {
    let Some(due) = item.due else {
        tracing::warn!(id = %item.id, kind = %item.kind, "item has no due date, excluding it from layout");
        return None;
    };
    let due = if item.all_day_hint {
        normalize_to_end_of_day(due)
    } else {
        due
    };

    let interval = match item.kind {
        ItemKind::ScheduledEvent => {
            let end = normalize_to_end_of_day(due);
            match item.start {
                Some(start) if start <= due => DisplayInterval {
                    start,
                    end,
                    due,
                    explicit_start: true,
                },
                other => {
                    if other.is_some() {
                        tracing::debug!(id = %item.id, "start is after due, showing event on its due day only");
                    }
                    DisplayInterval {
                        start: due,
                        end,
                        due,
                        explicit_start: false,
                    }
                }
            }
        }
        ItemKind::Deadline | ItemKind::Holiday => DisplayInterval {
            start: due,
            end: due,
            due,
            explicit_start: false,
        },
    };

    Some(interval)
}

/// An item that survived classification and clipping for one window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappedItem {
    pub item: CalendarItem,
    /// Position in the caller's input, used as the final tie-break.
    pub order: usize,
    pub interval: DisplayInterval,
    /// First visible day after clipping.
    pub first_day: NaiveDate,
    /// Last visible day after clipping.
    pub last_day: NaiveDate,
}

impl MappedItem {
    pub fn touches(&self, date: NaiveDate) -> bool {
        self.first_day <= date && date <= self.last_day
    }

    /// Visible days, counting both ends.
    pub fn visible_days(&self) -> usize {
        (self.last_day - self.first_day).num_days() as usize + 1
    }
}

/// Items clipped to a window plus a date → items multimap.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DateMap {
    items: Vec<MappedItem>,
    by_date: BTreeMap<NaiveDate, Vec<usize>>,
}

impl DateMap {
    /// Classify `items`, drop what falls outside `range` and bucket the rest by date.
    pub fn build(items: &[CalendarItem], range: DateRange) -> Self {
        let mut map = DateMap::default();

        for (order, item) in items.iter().enumerate() {
            let Some(interval) = display_interval(item) else {
                continue;
            };
            let Some((first_day, last_day)) = range.clip(interval.first_day(), interval.last_day())
            else {
                continue;
            };

            let index = map.items.len();
            for date in DateRange::new(first_day, last_day).days() {
                map.by_date.entry(date).or_default().push(index);
            }
            map.items.push(MappedItem {
                item: item.clone(),
                order,
                interval,
                first_day,
                last_day,
            });
        }

        tracing::debug!(
            input = items.len(),
            mapped = map.items.len(),
            from = %range.from,
            to = %range.to,
            "mapped items to window"
        );
        map
    }

    /// Every item that survived clipping, in input order.
    pub fn mapped(&self) -> &[MappedItem] {
        &self.items
    }

    pub fn items_on(&self, date: NaiveDate) -> impl Iterator<Item = &MappedItem> + '_ {
        self.by_date
            .get(&date)
            .into_iter()
            .flatten()
            .map(|&i| &self.items[i])
    }

    pub fn has_items(&self, date: NaiveDate) -> bool {
        self.by_date.contains_key(&date)
    }

    pub fn count_on(&self, date: NaiveDate) -> usize {
        self.by_date.get(&date).map_or(0, Vec::len)
    }

    /// Dates with at least one item, ascending.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.by_date.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_range::{end_of_day, is_end_of_day};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, min, 0).unwrap()
    }

    fn march() -> DateRange {
        DateRange::new(date(2024, 3, 1), date(2024, 3, 31))
    }

    #[test]
    fn test_event_end_runs_to_end_of_day() {
        let item = CalendarItem::new("e", ItemKind::ScheduledEvent)
            .with_start(at(2024, 3, 3, 9, 0))
            .with_due(at(2024, 3, 5, 10, 0));

        let interval = display_interval(&item).unwrap();
        assert_eq!(interval.start, at(2024, 3, 3, 9, 0));
        assert_eq!(interval.end, end_of_day(date(2024, 3, 5)));
        assert_eq!(interval.due, at(2024, 3, 5, 10, 0));
        assert!(interval.explicit_start);
    }

    #[test]
    fn test_deadline_ignores_start() {
        let item = CalendarItem::new("t", ItemKind::Deadline)
            .with_start(at(2024, 3, 1, 9, 0))
            .with_due(at(2024, 3, 10, 17, 0));

        let interval = display_interval(&item).unwrap();
        assert_eq!(interval.first_day(), date(2024, 3, 10));
        assert_eq!(interval.last_day(), date(2024, 3, 10));
    }

    #[test]
    fn test_event_without_start_falls_back_to_due_day() {
        let item =
            CalendarItem::new("e", ItemKind::ScheduledEvent).with_due(at(2024, 3, 7, 15, 0));

        let interval = display_interval(&item).unwrap();
        assert_eq!(interval.first_day(), date(2024, 3, 7));
        assert_eq!(interval.last_day(), date(2024, 3, 7));
        assert!(!interval.explicit_start);
    }

    #[test]
    fn test_event_with_start_after_due_is_single_day() {
        let item = CalendarItem::new("e", ItemKind::ScheduledEvent)
            .with_start(at(2024, 3, 9, 9, 0))
            .with_due(at(2024, 3, 7, 15, 0));

        let interval = display_interval(&item).unwrap();
        assert_eq!(interval.first_day(), date(2024, 3, 7));
        assert_eq!(interval.last_day(), date(2024, 3, 7));
    }

    #[test]
    fn test_same_day_start_after_due_falls_back() {
        let item = CalendarItem::new("e", ItemKind::ScheduledEvent)
            .with_start(at(2024, 3, 11, 15, 0))
            .with_due(at(2024, 3, 11, 10, 0));

        let interval = display_interval(&item).unwrap();
        assert!(!interval.explicit_start);
        assert_eq!(interval.start, at(2024, 3, 11, 10, 0));
        assert_eq!(interval.first_day(), date(2024, 3, 11));
    }

    #[test]
    fn test_all_day_hint_normalizes_due() {
        let item = CalendarItem::new("e", ItemKind::ScheduledEvent)
            .with_start(at(2024, 3, 7, 0, 0))
            .with_due(at(2024, 3, 7, 0, 0))
            .all_day();

        let interval = display_interval(&item).unwrap();
        assert!(is_end_of_day(interval.due));
    }

    #[test]
    fn test_item_without_due_is_excluded() {
        let item = CalendarItem::new("e", ItemKind::ScheduledEvent).with_start(at(2024, 3, 7, 9, 0));
        assert!(display_interval(&item).is_none());

        let map = DateMap::build(&[item], march());
        assert!(map.is_empty());
    }

    #[test]
    fn test_date_map_clips_to_window() {
        let items = vec![
            CalendarItem::new("spill", ItemKind::ScheduledEvent)
                .with_start(at(2024, 2, 28, 9, 0))
                .with_due(at(2024, 3, 2, 9, 0)),
            CalendarItem::new("outside", ItemKind::Deadline).with_due(at(2024, 4, 2, 9, 0)),
            CalendarItem::new("holiday", ItemKind::Holiday).with_due(at(2024, 3, 17, 0, 0)),
        ];

        let map = DateMap::build(&items, march());
        assert_eq!(map.len(), 2);

        let spill = &map.mapped()[0];
        assert_eq!(spill.first_day, date(2024, 3, 1));
        assert_eq!(spill.last_day, date(2024, 3, 2));
        assert_eq!(spill.visible_days(), 2);

        assert!(map.has_items(date(2024, 3, 1)));
        assert!(map.has_items(date(2024, 3, 2)));
        assert!(!map.has_items(date(2024, 3, 3)));
        assert_eq!(map.count_on(date(2024, 3, 17)), 1);
        assert_eq!(
            map.dates().collect::<Vec<_>>(),
            vec![date(2024, 3, 1), date(2024, 3, 2), date(2024, 3, 17)]
        );
    }

    #[test]
    fn test_date_map_keeps_input_order() {
        let items = vec![
            CalendarItem::new("bad", ItemKind::Deadline),
            CalendarItem::new("a", ItemKind::Deadline).with_due(at(2024, 3, 5, 9, 0)),
            CalendarItem::new("b", ItemKind::Holiday).with_due(at(2024, 3, 5, 0, 0)),
        ];

        let map = DateMap::build(&items, march());
        let on_fifth: Vec<_> = map
            .items_on(date(2024, 3, 5))
            .map(|m| (m.item.id.as_str(), m.order))
            .collect();
        assert_eq!(on_fifth, vec![("a", 1), ("b", 2)]);
    }
}
