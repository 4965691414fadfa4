pub mod config;
pub mod day;
pub mod mini;
pub mod month;
pub mod reschedule;
pub mod week;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use calgrid_core::date_range::parse_date;
use calgrid_core::{CalendarItem, CalendarView};
use chrono::{NaiveDate, NaiveDateTime};

use crate::config::{Config, load_config};
use crate::items::load_items;

/// Everything a view command needs, loaded once per invocation.
pub struct Context {
    pub config: Config,
    pub items: Vec<CalendarItem>,
    /// The "now" that today markers and the default focus date use
    pub reference: NaiveDateTime,
    pub json: bool,
}

impl Context {
    /// Load config and items. Command-line paths take precedence over config.
    pub fn load(
        items: Option<PathBuf>,
        holidays: Option<PathBuf>,
        now: Option<&str>,
        json: bool,
    ) -> Result<Self> {
        let config = load_config()?;

        let items_file = items.or_else(|| config.items_file.clone());
        let holiday_feed = holidays.or_else(|| config.holiday_feed.clone());
        let items = load_items(items_file.as_deref(), holiday_feed.as_deref())?;

        let reference = match now {
            Some(s) => parse_reference(s)?,
            None => chrono::Local::now().naive_local(),
        };

        Ok(Context {
            config,
            items,
            reference,
            json,
        })
    }

    /// Resolve the focus date: `--date` (or today), then `step` view-sized moves.
    pub fn focus(&self, view: CalendarView, date: Option<&str>, step: i32) -> Result<NaiveDate> {
        let mut focus = match date {
            Some(s) => parse_date(s)?,
            None => self.reference.date(),
        };

        for _ in 0..step.unsigned_abs() {
            focus = if step < 0 {
                view.previous(focus)
            } else {
                view.next(focus)
            };
        }

        Ok(focus)
    }
}

/// Parse "YYYY-MM-DDTHH:MM[:SS]" or a bare date (midnight)
fn parse_reference(s: &str) -> Result<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M") {
        return Ok(dt);
    }
    let date = parse_date(s).with_context(|| format!("Invalid --now value: {}", s))?;
    Ok(calgrid_core::date_range::start_of_day(date))
}

/// Print a serializable layout as pretty JSON
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(reference: NaiveDateTime) -> Context {
        Context {
            config: Config::default(),
            items: Vec::new(),
            reference,
            json: false,
        }
    }

    #[test]
    fn test_parse_reference_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 11)
            .unwrap()
            .and_hms_opt(14, 25, 0)
            .unwrap();
        assert_eq!(parse_reference("2024-03-11T14:25:00").unwrap(), expected);
        assert_eq!(parse_reference("2024-03-11T14:25").unwrap(), expected);
        assert_eq!(
            parse_reference("2024-03-11").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 11).unwrap().and_hms_opt(0, 0, 0).unwrap()
        );
        assert!(parse_reference("next tuesday").is_err());
    }

    #[test]
    fn test_focus_defaults_to_reference_and_steps() {
        let ctx = context(parse_reference("2024-01-31T09:00").unwrap());

        let today = ctx.focus(CalendarView::Month, None, 0).unwrap();
        assert_eq!(today, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());

        let next_month = ctx.focus(CalendarView::Month, None, 1).unwrap();
        assert_eq!(next_month, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        let two_weeks_back = ctx.focus(CalendarView::Week, Some("2024-03-20"), -2).unwrap();
        assert_eq!(two_weeks_back, NaiveDate::from_ymd_opt(2024, 3, 6).unwrap());
    }
}
