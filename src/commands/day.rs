use anyhow::Result;
use calgrid_core::grid::{DayColumn, layout_day};
use chrono::NaiveDate;

use super::{Context, print_json};
use crate::render::render_day;

pub fn run(ctx: &Context, date: NaiveDate) -> Result<()> {
    let day = DayColumn {
        date,
        items: layout_day(&ctx.items, date, &ctx.config.layout),
    };

    if ctx.json {
        return print_json(&day);
    }

    println!("{}", render_day(&day, ctx.reference));
    Ok(())
}
