use anyhow::Result;
use calgrid_core::WeekLayout;
use chrono::NaiveDate;

use super::{Context, print_json};
use crate::render::render_day;

pub fn run(ctx: &Context, focus: NaiveDate) -> Result<()> {
    let layout = WeekLayout::build(&ctx.items, focus, &ctx.config.layout);

    if ctx.json {
        return print_json(&layout);
    }

    let days: Vec<String> = layout
        .days
        .iter()
        .map(|day| render_day(day, ctx.reference))
        .collect();
    println!("{}", days.join("\n\n"));
    Ok(())
}
