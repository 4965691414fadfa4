//! Layout engine for calendar views.
//!
//! Takes a heterogeneous set of calendar items (scheduled events, task
//! deadlines, holidays) and computes non-overlapping placements for three
//! presentation granularities:
//! - `month` assigns rows over the 6×7 day grid
//! - `grid` assigns columns over the minute-of-day axis for day and week views
//! - `reschedule` decides which endpoint a drag-and-drop moves
//!
//! Every entry point is a pure function of its inputs.

pub mod classify;
pub mod config;
pub mod date_range;
pub mod error;
pub mod grid;
pub mod item;
pub mod lanes;
pub mod month;
pub mod reschedule;
pub mod view;
pub mod window;

pub use classify::{DateMap, DisplayInterval, MappedItem};
pub use config::LayoutConfig;
pub use date_range::DateRange;
pub use error::{CalGridError, CalGridResult};
pub use grid::{DayColumn, PlacedGridItem, WeekLayout};
pub use item::{CalendarItem, ItemId, ItemKind};
pub use month::{MonthLayout, PlacedMonthItem, WeekSegment};
pub use reschedule::{MovedEndpoint, Rescheduled, reschedule};
pub use view::CalendarView;
pub use window::WindowSpec;
