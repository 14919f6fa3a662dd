use std::io::Read;
use std::path::PathBuf;

use beacon_core::{telemetry, Engine, EngineConfig, EventRecord};
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "insight_report")]
#[command(about = "Summarize an event batch and propose insight widgets")]
struct Args {
    /// JSON file holding an array of events (stdin when omitted)
    input: Option<PathBuf>,

    /// TOML config overlay; defaults to $BEACON_CONFIG or ./beacon.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pretty-print the report
    #[arg(short, long)]
    pretty: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init_tracing(Some("warn,beacon_core=info,insight_report=info"));
    let args = Args::parse();

    // Defaults + env, then the explicit overlay if one was given
    let config = match &args.config {
        Some(path) => EngineConfig::load_file(path, EngineConfig::from_env())?,
        None => EngineConfig::load(),
    };

    let raw = match &args.input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let events: Vec<EventRecord> = serde_json::from_str(&raw)?;
    info!(target: "insight_report", events = events.len(), "Loaded event batch");

    let engine = Engine::new(config)?;
    let report = engine.insights.generate_report(&events);
    info!(
        target: "insight_report",
        metrics = report.summary.len(),
        widgets = report.widgets.len(),
        "Report ready"
    );

    let out = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{out}");
    Ok(())
}
