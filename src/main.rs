use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use u_timetable::config::load_config;
use u_timetable::engine::{regenerate, Timetable};
use u_timetable::logging;
use u_timetable::grid::GridCell;
use u_timetable::models::{format_hour, Resource};
use u_timetable::validation::validate_input;

/// Weekly timetable generator: rooms, cohorts and their weekly hours in,
/// a clash-free timetable out.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log placement decisions
    #[arg(short = 'v', long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a timetable and print it
    Generate {
        /// Path to config file
        #[arg(short = 'c', long, default_value = "timetable.toml")]
        config: PathBuf,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },

    /// Validate a config file without scheduling
    Check {
        /// Path to config file
        #[arg(short = 'c', long, default_value = "timetable.toml")]
        config: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Full timetable as JSON
    Json,
    /// KPIs, shortfalls and per-group slots as plain text
    Summary,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match &cli.command {
        Command::Generate { config, format } => {
            let (input, params) = load_config(config)
                .with_context(|| format!("Failed to load {}", config.display()))?
                .into_parts();

            let timetable = regenerate(&input, &params)
                .with_context(|| format!("Cannot schedule {}", config.display()))?;

            let output = match format {
                Format::Json => serde_json::to_string_pretty(&timetable)
                    .context("Failed to serialize timetable")?,
                Format::Summary => render_summary(&timetable),
            };
            println!("{output}");
        }
        Command::Check { config } => {
            let (input, params) = load_config(config)
                .with_context(|| format!("Failed to load {}", config.display()))?
                .into_parts();

            if let Err(errors) = validate_input(&input.facility, &input.week, &input.groups, &params)
            {
                for e in &errors {
                    eprintln!("  - {e}");
                }
                bail!("{}: {} problem(s) found", config.display(), errors.len());
            }

            info!(
                groups = input.groups.len(),
                activities = input.activity_count(),
                "config is valid"
            );
            println!("{}: OK", config.display());
        }
    }

    Ok(())
}

/// Plain-text report of a timetable.
fn render_summary(tt: &Timetable) -> String {
    let kpi = &tt.kpi;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Rooms: {} ordinary, {} specialized",
        kpi.ordinary_count, kpi.specialized_count
    );
    let _ = writeln!(out, "Weekly capacity: {} room-hours", kpi.weekly_capacity_hours);
    if !kpi.demand_within_capacity() {
        let _ = writeln!(out, "Warning: demand exceeds weekly capacity");
    }
    let _ = writeln!(
        out,
        "Placed: {}/{} hours ({:.1}%)",
        kpi.placed_hours,
        kpi.required_hours,
        kpi.fill_rate * 100.0
    );
    let _ = writeln!(out, "Average utilization: {:.1}%", kpi.avg_utilization * 100.0);

    if kpi.meets_thresholds(1.0, 0) {
        let _ = writeln!(out, "Shortfalls: none");
    } else {
        let _ = writeln!(out, "Shortfalls: {}", tt.schedule.shortfalls.len());
        for sf in &tt.schedule.shortfalls {
            let _ = writeln!(out, "  - {sf}");
        }
    }

    let rooms: HashMap<&str, &Resource> =
        tt.resources.iter().map(|r| (r.id.as_str(), r)).collect();

    for grid in &tt.grids {
        let _ = writeln!(out);
        let _ = writeln!(out, "[{}]", grid.group_id);
        for (day, row) in grid.rows() {
            let booked: Vec<String> = row
                .iter()
                .filter_map(GridCell::slot)
                .map(|s| {
                    let room = rooms
                        .get(s.resource_id.as_str())
                        .map_or(s.resource_id.as_str(), |r| r.display_name());
                    format!(
                        "{}-{} {} @ {}",
                        format_hour(s.hour),
                        format_hour(s.end_hour()),
                        s.activity_id,
                        room
                    )
                })
                .collect();
            if !booked.is_empty() {
                let _ = writeln!(out, "  {day}: {}", booked.join(", "));
            }
        }
    }

    out
}
