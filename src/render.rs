//! Text rendering for layout results.
//!
//! Everything here is presentation: cell widths, truncation to a fixed number
//! of visible rows and "+N more" summaries live in the CLI, not the engine.

use calgrid_core::grid::{DayColumn, PlacedGridItem, now_marker};
use calgrid_core::{DateMap, ItemKind, MonthLayout, WindowSpec};
use chrono::{NaiveDate, NaiveDateTime};
use owo_colors::OwoColorize;

/// Width of one month-grid cell in characters
const CELL_WIDTH: usize = 14;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for ItemKind {
    fn render(&self) -> String {
        match self {
            ItemKind::ScheduledEvent => "●".cyan().to_string(),
            ItemKind::Deadline => "◆".yellow().to_string(),
            ItemKind::Holiday => "★".red().to_string(),
        }
    }
}

impl Render for PlacedGridItem {
    fn render(&self) -> String {
        let time = format!(
            "{}-{}",
            format_minute(self.start_minute),
            format_minute(self.end_minute)
        );
        let lane = format!("[{}/{}]", self.column + 1, self.total_columns);
        format!(
            "{} {} {} {}",
            time,
            lane.dimmed(),
            self.item.kind.render(),
            self.item
        )
    }
}

/// Format a minute of day as HH:MM (1440 renders as 24:00)
pub fn format_minute(minute: u32) -> String {
    format!("{:02}:{:02}", minute / 60, minute % 60)
}

/// Render the 6×7 month grid, showing at most `visible_rows` rows per cell.
pub fn render_month(layout: &MonthLayout, visible_rows: usize, reference: NaiveDateTime) -> String {
    let window = &layout.window;
    let mut lines = Vec::new();

    lines.push(window.focus.format("%B %Y").bold().to_string());
    lines.push(
        ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
            .iter()
            .map(|d| pad(d, CELL_WIDTH))
            .collect::<String>()
            .dimmed()
            .to_string(),
    );

    for (week, days) in window.weeks().enumerate() {
        let first_cell = week * days.len();

        let header: String = days
            .iter()
            .map(|&date| render_day_number(window, date, reference))
            .collect();
        lines.push(header);

        for row in 0..visible_rows {
            let line: String = (first_cell..first_cell + days.len())
                .map(|cell| {
                    let label = layout
                        .items_in_cell(cell)
                        .into_iter()
                        .find(|p| p.row == row)
                        .map(|p| {
                            let title = if p.start_cell == cell || cell % days.len() == 0 {
                                p.item.to_string()
                            } else {
                                "…".to_string()
                            };
                            format!("{} {}", p.item.kind.render(), pad(&title, CELL_WIDTH - 2))
                        });
                    label.unwrap_or_else(|| " ".repeat(CELL_WIDTH))
                })
                .collect();
            lines.push(line);
        }

        let overflow: String = (first_cell..first_cell + days.len())
            .map(|cell| {
                let hidden = layout
                    .items_in_cell(cell)
                    .iter()
                    .filter(|p| p.row >= visible_rows)
                    .count();
                if hidden > 0 {
                    pad(&format!("+{} more", hidden), CELL_WIDTH).dimmed().to_string()
                } else {
                    " ".repeat(CELL_WIDTH)
                }
            })
            .collect();
        if !overflow.trim().is_empty() {
            lines.push(overflow);
        }
    }

    lines.join("\n")
}

/// Render one day of a time grid, with the current-time marker if it falls on this day.
pub fn render_day(day: &DayColumn, reference: NaiveDateTime) -> String {
    let mut lines = Vec::new();
    lines.push(format_date_label(day.date, reference).bold().to_string());

    if day.items.is_empty() {
        lines.push(format!("  {}", "No items".dimmed()));
    }

    let mut items: Vec<&PlacedGridItem> = day.items.iter().collect();
    items.sort_by_key(|p| (p.start_minute, p.column));

    let mut marker = now_marker(reference, day.date);
    for item in items {
        if let Some(now) = marker
            && now < item.start_minute
        {
            lines.push(render_now_line(now));
            marker = None;
        }
        lines.push(format!("  {}", item.render()));
    }
    if let Some(now) = marker {
        lines.push(render_now_line(now));
    }

    lines.join("\n")
}

/// Render the minimal week-aligned mini calendar, highlighting days that have items.
pub fn render_mini(window: &WindowSpec, dates: &DateMap, reference: NaiveDateTime) -> String {
    let mut lines = Vec::new();
    lines.push(format!("{:^21}", window.focus.format("%B %Y").to_string()).bold().to_string());
    lines.push("Su Mo Tu We Th Fr Sa".dimmed().to_string());

    for days in window.weeks() {
        let row: Vec<String> = days
            .iter()
            .map(|&date| {
                let day = date.format("%e").to_string();
                let day = if window.is_today(date, reference) {
                    day.reversed().to_string()
                } else if !window.in_focus_month(date) {
                    day.dimmed().to_string()
                } else if dates.has_items(date) {
                    day.green().bold().to_string()
                } else {
                    day
                };
                format!("{} ", day)
            })
            .collect();
        lines.push(row.concat().trim_end().to_string());
    }

    lines.join("\n")
}

fn render_day_number(window: &WindowSpec, date: NaiveDate, reference: NaiveDateTime) -> String {
    let label = pad(&date.format("%e").to_string(), CELL_WIDTH);
    if window.is_today(date, reference) {
        label.reversed().to_string()
    } else if window.in_focus_month(date) {
        label.bold().to_string()
    } else {
        label.dimmed().to_string()
    }
}

fn render_now_line(minute: u32) -> String {
    format!("  {} {}", format_minute(minute).red(), "── now".red())
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Wed Feb 25")
fn format_date_label(date: NaiveDate, reference: NaiveDateTime) -> String {
    let diff = (date - reference.date()).num_days();
    match diff {
        0 => format!("Today, {}", date.format("%a %b %-d")),
        1 => format!("Tomorrow, {}", date.format("%a %b %-d")),
        -1 => format!("Yesterday, {}", date.format("%a %b %-d")),
        _ => date.format("%a %b %-d").to_string(),
    }
}

/// Truncate or right-pad to exactly `width` characters
fn pad(text: &str, width: usize) -> String {
    let count = text.chars().count();
    if count > width {
        let mut truncated: String = text.chars().take(width.saturating_sub(2)).collect();
        truncated.push_str("… ");
        truncated
    } else {
        format!("{}{}", text, " ".repeat(width - count))
    }
}
