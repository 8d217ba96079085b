//! fc-report: headless report runner over a fuel-cycle simulation output.
//!
//! Usage:
//!   fc-report --db output.sqlite
//!   fc-report --db output.sqlite --sim-id 2 --config analytics.json --format json

use anyhow::{bail, Result};
use fuelcycle_core::{types::SimId, Analytics, AnalyticsConfig, OutputStore};
use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let Some(db) = flag_value(&args, "--db") else {
        bail!("usage: fc-report --db <path> [--sim-id N] [--config file.json] [--format text|json]");
    };
    let format = match flag_value(&args, "--format").unwrap_or("text") {
        "text" => OutputFormat::Text,
        "json" => OutputFormat::Json,
        other => bail!("Unknown format '{other}': expected text or json"),
    };

    let mut config = match flag_value(&args, "--config") {
        Some(path) => AnalyticsConfig::load(path)?,
        None => AnalyticsConfig::default(),
    };
    if let Some(raw) = flag_value(&args, "--sim-id") {
        config.default_sim_id = parse_sim_id(raw)?;
    }

    log::info!("Opening {db} (sim {})", config.default_sim_id);
    let store = OutputStore::open(db)?;
    let analytics = Analytics::new(&store, config);
    let report = analytics.simulation_report(None)?;

    match format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_sim_id(raw: &str) -> Result<SimId> {
    match raw.parse::<SimId>() {
        Ok(sim_id) => Ok(sim_id),
        Err(e) => bail!("Invalid --sim-id '{raw}': {e}"),
    }
}
