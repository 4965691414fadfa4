use anyhow::Result;
use owo_colors::OwoColorize;

use crate::config::{config_path, create_default_config, load_config};

pub fn run() -> Result<()> {
    let path = config_path()?;

    if !path.exists() {
        create_default_config(&path)?;
        println!("{} {}", "Created".green(), path.display());
    }

    let config = load_config()?;

    println!("{}", "Paths".bold());
    println!("  Config:    {}", path.display());
    println!("  Items:     {}", display_or_unset(config.items_file.as_deref()));
    println!("  Holidays:  {}", display_or_unset(config.holiday_feed.as_deref()));
    println!();
    println!("{}", "Layout".bold());
    println!("  Visible rows per month cell:  {}", config.visible_rows);
    println!("  Marker length (minutes):      {}", config.layout.marker_minutes);
    println!("  Minimum event (minutes):      {}", config.layout.min_grid_minutes);

    Ok(())
}

fn display_or_unset(path: Option<&std::path::Path>) -> String {
    match path {
        Some(p) => p.display().to_string(),
        None => "(not set)".dimmed().to_string(),
    }
}
