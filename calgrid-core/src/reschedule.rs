//! Drop-date resolution for drag-and-drop rescheduling.
//!
//! The dragged item and the drop date are passed in explicitly; the resolver
//! decides which endpoint moves and returns the updated item.

use chrono::NaiveDate;
use serde::Serialize;

use crate::date_range::{end_of_day, start_of_day};
use crate::error::{CalGridError, CalGridResult};
use crate::item::{CalendarItem, ItemKind};

/// Which part of the item a drop changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MovedEndpoint {
    Start,
    End,
    /// Single-point items move as a whole.
    Both,
}

/// A successful reschedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rescheduled {
    pub item: CalendarItem,
    pub moved: MovedEndpoint,
}

/// Resolve a drop of `item` onto `drop_date`.
///
/// - Deadlines: `due` moves to the end of the drop day, `start` is kept.
/// - Scheduled events: a drop before the start moves the start, a drop after
///   the due moves the due, and a drop inside moves whichever endpoint is
///   nearer in days (start on a tie). Starts land at the beginning of the
///   drop day, dues at its end.
/// - Holidays: rejected with `CalGridError::NotDraggable`.
pub fn reschedule(item: &CalendarItem, drop_date: NaiveDate) -> CalGridResult<Rescheduled> {
    let mut updated = item.clone();

    let moved = match item.kind {
        ItemKind::Holiday => {
            return Err(CalGridError::NotDraggable {
                id: item.id.clone(),
                kind: item.kind,
            });
        }
        ItemKind::Deadline => {
            updated.due = Some(end_of_day(drop_date));
            MovedEndpoint::End
        }
        ItemKind::ScheduledEvent => match (item.start, item.due) {
            (Some(start), Some(due)) if start <= due => {
                let start_day = start.date();
                let due_day = due.date();

                let move_start = if drop_date < start_day {
                    true
                } else if drop_date > due_day {
                    false
                } else {
                    (drop_date - start_day).num_days() <= (due_day - drop_date).num_days()
                };

                if move_start {
                    updated.start = Some(start_of_day(drop_date));
                    MovedEndpoint::Start
                } else {
                    updated.due = Some(end_of_day(drop_date));
                    MovedEndpoint::End
                }
            }
            (_, Some(_)) => {
                // No usable start: the event is a single point on its due day
                updated.start = None;
                updated.due = Some(end_of_day(drop_date));
                MovedEndpoint::Both
            }
            (_, None) => {
                updated.start = Some(start_of_day(drop_date));
                updated.due = Some(end_of_day(drop_date));
                MovedEndpoint::Both
            }
        },
    };

    tracing::debug!(id = %item.id, drop = %drop_date, ?moved, "rescheduled item");
    Ok(Rescheduled {
        item: updated,
        moved,
    })
}
