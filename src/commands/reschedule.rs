use anyhow::Result;
use calgrid_core::date_range::parse_date;
use calgrid_core::{CalGridError, MovedEndpoint, reschedule};
use owo_colors::OwoColorize;

use super::{Context, print_json};

pub fn run(ctx: &Context, id: &str, to: &str) -> Result<()> {
    let drop_date = parse_date(to)?;

    let Some(item) = ctx.items.iter().find(|item| item.id == id) else {
        anyhow::bail!("No item with id '{}'", id);
    };

    let result = match reschedule(item, drop_date) {
        Ok(result) => result,
        Err(CalGridError::NotDraggable { id, kind }) => {
            println!("{} {} '{}' cannot be moved", "Rejected:".red(), kind, id);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if ctx.json {
        return print_json(&result);
    }

    let what = match result.moved {
        MovedEndpoint::Start => "start",
        MovedEndpoint::End => "due",
        MovedEndpoint::Both => "whole item",
    };
    println!("{} {} ({})", "Moved".green(), result.item, what);
    if let Some(start) = result.item.start {
        println!("  Start: {}", start.format("%a %b %-d %Y %H:%M"));
    }
    if let Some(due) = result.item.due {
        println!("  Due:   {}", due.format("%a %b %-d %Y %H:%M"));
    }

    Ok(())
}
