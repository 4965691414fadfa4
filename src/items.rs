//! Item source: maps events, tasks and holidays from a file into calendar items.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use calgrid_core::date_range::end_of_day;
use calgrid_core::{CalendarItem, ItemKind};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

/// A user-created event
#[derive(Debug, Deserialize)]
pub struct EventRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    #[serde(default)]
    pub all_day: bool,
}

/// A task from the kanban board; only tasks with a due date show up
#[derive(Debug, Deserialize)]
pub struct TaskRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub start: Option<NaiveDateTime>,
    pub due: Option<NaiveDateTime>,
}

#[derive(Debug, Deserialize)]
pub struct HolidayRecord {
    pub id: Option<String>,
    pub name: String,
    pub date: NaiveDate,
}

/// Contents of an items file (JSON or TOML)
#[derive(Debug, Default, Deserialize)]
pub struct ItemsFile {
    #[serde(default)]
    pub events: Vec<EventRecord>,
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
    #[serde(default)]
    pub holidays: Vec<HolidayRecord>,
}

impl ItemsFile {
    /// Load from disk, picking the format from the file extension.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read items file: {}", path.display()))?;

        let is_toml = path.extension().is_some_and(|ext| ext == "toml");
        let file = if is_toml {
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse items file: {}", path.display()))?
        } else {
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse items file: {}", path.display()))?
        };

        Ok(file)
    }

    /// Map every record into the engine's item shape: events first, then tasks, then holidays.
    pub fn into_items(self) -> Vec<CalendarItem> {
        let mut items = Vec::with_capacity(self.events.len() + self.tasks.len() + self.holidays.len());

        for event in self.events {
            items.push(CalendarItem {
                id: event.id,
                kind: ItemKind::ScheduledEvent,
                title: event.title,
                start: event.start,
                due: event.end,
                all_day_hint: event.all_day,
            });
        }

        for task in self.tasks {
            if task.due.is_none() {
                tracing::debug!(id = %task.id, "task has no due date, not shown on calendar");
                continue;
            }
            items.push(CalendarItem {
                id: task.id,
                kind: ItemKind::Deadline,
                title: task.title,
                start: task.start,
                due: task.due,
                all_day_hint: false,
            });
        }

        for holiday in self.holidays {
            let id = holiday
                .id
                .unwrap_or_else(|| format!("holiday-{}", holiday.date.format("%Y-%m-%d")));
            items.push(
                CalendarItem::new(id, ItemKind::Holiday)
                    .with_title(holiday.name)
                    .with_due(end_of_day(holiday.date))
                    .all_day(),
            );
        }

        items
    }
}

/// Expand `~` in configured paths
pub fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

/// Collect items from the items file and the holiday feed, either of which may be absent.
pub fn load_items(items_file: Option<&Path>, holiday_feed: Option<&Path>) -> Result<Vec<CalendarItem>> {
    let mut items = match items_file {
        Some(path) => ItemsFile::load(&expand_path(path))?.into_items(),
        None => Vec::new(),
    };

    if let Some(feed) = holiday_feed {
        let feed = expand_path(feed);
        let contents = std::fs::read_to_string(&feed)
            .with_context(|| format!("Failed to read holiday feed: {}", feed.display()))?;
        items.extend(crate::ics::parse_holiday_feed(&contents)?);
    }

    tracing::debug!(count = items.len(), "loaded calendar items");
    Ok(items)
}
