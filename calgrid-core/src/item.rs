//! Calendar items as handed to the engine.
//!
//! The item source maps scheduled events, tasks with a due date and the
//! holiday feed into `CalendarItem` before layout. The engine only reads them.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Opaque identifier, unique within one layout computation.
pub type ItemId = String;

/// Which display rules apply to an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// User-created event covering every day from start to due.
    ScheduledEvent,
    /// Task deadline, shown on its due day only.
    Deadline,
    /// Read-only holiday, shown on a single day.
    Holiday,
}

impl ItemKind {
    /// Holidays come from a read-only feed and cannot be moved.
    pub fn is_draggable(self) -> bool {
        !matches!(self, ItemKind::Holiday)
    }

    /// Whether the item covers a range of days rather than a single one.
    pub fn spans_days(self) -> bool {
        matches!(self, ItemKind::ScheduledEvent)
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ItemKind::ScheduledEvent => "Event",
            ItemKind::Deadline => "Deadline",
            ItemKind::Holiday => "Holiday",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarItem {
    pub id: ItemId,
    pub kind: ItemKind,
    #[serde(default)]
    pub title: String,
    /// Optional for deadlines; falls back to `due` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDateTime>,
    /// Authoritative end of interest. Items without one are never placed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<NaiveDateTime>,
    /// When set, `due` is treated as running to the end of its day.
    #[serde(default)]
    pub all_day_hint: bool,
}

impl CalendarItem {
    pub fn new(id: impl Into<ItemId>, kind: ItemKind) -> Self {
        CalendarItem {
            id: id.into(),
            kind,
            title: String::new(),
            start: None,
            due: None,
            all_day_hint: false,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_start(mut self, start: NaiveDateTime) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_due(mut self, due: NaiveDateTime) -> Self {
        self.due = Some(due);
        self
    }

    pub fn all_day(mut self) -> Self {
        self.all_day_hint = true;
        self
    }
}

impl fmt::Display for CalendarItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.title.is_empty() {
            write!(f, "{}", self.id)
        } else {
            write!(f, "{}", self.title)
        }
    }
}
