use anyhow::Result;
use calgrid_core::{DateMap, WindowSpec};
use chrono::NaiveDate;
use serde::Serialize;

use super::{Context, print_json};
use crate::render::render_mini;

#[derive(Serialize)]
struct MiniMonth<'a> {
    window: &'a WindowSpec,
    /// Dates in the window with at least one item, and how many
    busy: Vec<(NaiveDate, usize)>,
}

pub fn run(ctx: &Context, focus: NaiveDate) -> Result<()> {
    let window = WindowSpec::month_span(focus);
    let dates = DateMap::build(&ctx.items, window.range());

    if ctx.json {
        let busy = dates.dates().map(|d| (d, dates.count_on(d))).collect();
        return print_json(&MiniMonth {
            window: &window,
            busy,
        });
    }

    println!("{}", render_mini(&window, &dates, ctx.reference));
    Ok(())
}
