mod commands;
mod config;
mod ics;
mod items;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use calgrid_core::CalendarView;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::Context;

#[derive(Parser)]
#[command(name = "calgrid")]
#[command(about = "Lay out calendar events, deadlines and holidays on month, week and day grids")]
struct Cli {
    /// Items file (JSON or TOML); defaults to items_file from config
    #[arg(short, long, global = true)]
    items: Option<PathBuf>,

    /// Holiday feed (.ics); defaults to holiday_feed from config
    #[arg(long, global = true)]
    holidays: Option<PathBuf>,

    /// Reference time for today markers (e.g. "2025-03-20T15:00:00"); defaults to the local clock
    #[arg(long, global = true)]
    now: Option<String>,

    /// Print the layout as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Show debug logs from the layout engine
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the 6-week month grid
    Month {
        /// Any date in the month to show (YYYY-MM-DD); defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Months to move from the focus date (negative goes back)
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        step: i32,
    },
    /// Show the Sunday-to-Saturday week time grid
    Week {
        /// Any date in the week to show (YYYY-MM-DD); defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Weeks to move from the focus date (negative goes back)
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        step: i32,
    },
    /// Show a single day's time grid
    Day {
        /// Day to show (YYYY-MM-DD); defaults to today
        #[arg(short, long)]
        date: Option<String>,

        /// Days to move from the focus date (negative goes back)
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        step: i32,
    },
    /// Show a compact month calendar highlighting days that have items
    Mini {
        /// Any date in the month to show (YYYY-MM-DD); defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Move an item by dropping it onto a date
    Reschedule {
        /// Item id
        id: String,

        /// Drop date (YYYY-MM-DD)
        #[arg(long)]
        to: String,
    },
    /// Show config path and create a default config file if none exists
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let (items, holidays, json) = (cli.items, cli.holidays, cli.json);
    let now = cli.now;
    let load = || Context::load(items, holidays, now.as_deref(), json);

    match cli.command {
        Commands::Month { date, step } => {
            let ctx = load()?;
            let focus = ctx.focus(CalendarView::Month, date.as_deref(), step)?;
            commands::month::run(&ctx, focus)
        }
        Commands::Week { date, step } => {
            let ctx = load()?;
            let focus = ctx.focus(CalendarView::Week, date.as_deref(), step)?;
            commands::week::run(&ctx, focus)
        }
        Commands::Day { date, step } => {
            let ctx = load()?;
            let focus = ctx.focus(CalendarView::Day, date.as_deref(), step)?;
            commands::day::run(&ctx, focus)
        }
        Commands::Mini { date } => {
            let ctx = load()?;
            let focus = ctx.focus(CalendarView::Month, date.as_deref(), 0)?;
            commands::mini::run(&ctx, focus)
        }
        Commands::Reschedule { id, to } => {
            let ctx = load()?;
            commands::reschedule::run(&ctx, &id, &to)
        }
        Commands::Config => commands::config::run(),
    }
}

/// Logs go to stderr so `--json` output on stdout stays clean.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "warn,calgrid=debug,calgrid_core=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
