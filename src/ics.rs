//! Holiday feed parsing using the icalendar crate's parser.

use anyhow::Result;
use calgrid_core::date_range::end_of_day;
use calgrid_core::{CalendarItem, ItemKind};
use chrono::NaiveDate;
use icalendar::{
    CalendarDateTime, DatePerhapsTime,
    parser::{Component, read_calendar, unfold},
};

/// Parse every VEVENT of an ICS feed into a holiday item on its start day.
///
/// Entries without a usable DTSTART are skipped.
pub fn parse_holiday_feed(content: &str) -> Result<Vec<CalendarItem>> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded)
        .map_err(|e| anyhow::anyhow!("Failed to parse holiday feed: {}", e))?;

    let holidays = calendar
        .components
        .iter()
        .filter(|c| c.name == "VEVENT")
        .filter_map(|vevent| {
            let holiday = parse_holiday(vevent);
            if holiday.is_none() {
                tracing::warn!("skipping holiday feed entry without a usable DTSTART");
            }
            holiday
        })
        .collect();

    Ok(holidays)
}

fn parse_holiday(vevent: &Component<'_>) -> Option<CalendarItem> {
    let start = DatePerhapsTime::try_from(vevent.find_prop("DTSTART")?).ok()?;
    let day = to_date(start);

    let id = vevent
        .find_prop("UID")
        .map(|p| p.val.to_string())
        .unwrap_or_else(|| format!("holiday-{}", uuid::Uuid::new_v4()));
    let title = vevent
        .find_prop("SUMMARY")
        .map(|p| p.val.to_string())
        .unwrap_or_else(|| "(Holiday)".to_string());

    Some(
        CalendarItem::new(id, ItemKind::Holiday)
            .with_title(title)
            .with_due(end_of_day(day))
            .all_day(),
    )
}

/// Calendar day of a DTSTART, ignoring any time of day
fn to_date(dpt: DatePerhapsTime) -> NaiveDate {
    match dpt {
        DatePerhapsTime::Date(d) => d,
        DatePerhapsTime::DateTime(cal_dt) => match cal_dt {
            CalendarDateTime::Utc(dt) => dt.date_naive(),
            CalendarDateTime::Floating(naive) => naive.date(),
            CalendarDateTime::WithTimezone { date_time, .. } => date_time.date(),
        },
    }
}
