use anyhow::Result;
use calgrid_core::MonthLayout;
use chrono::NaiveDate;

use super::{Context, print_json};
use crate::render::render_month;

pub fn run(ctx: &Context, focus: NaiveDate) -> Result<()> {
    let layout = MonthLayout::build(&ctx.items, focus);

    if ctx.json {
        return print_json(&layout);
    }

    println!("{}", render_month(&layout, ctx.config.visible_rows, ctx.reference));
    Ok(())
}
