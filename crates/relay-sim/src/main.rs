//! Relay Fleet Simulation CLI
//!
//! Runs the per-tick link-state update over a scenario fleet and prints
//! each vessel's connection summary and hop chain.
//!
//! Usage:
//!   relay-sim --scenario data/scenarios/relay_fleet.json --ticks 10 \
//!             --output /tmp/relay_report.json

use anyhow::Result;
use clap::Parser;
use relay_comms::{walk, CommsSettings};
use relay_sim::{loader, Fleet};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(
    name = "relay-sim",
    about = "Tick-driven link-state simulation for a relay fleet"
)]
struct Args {
    /// Path to scenario JSON file
    #[arg(short, long, default_value = "data/scenarios/relay_fleet.json")]
    scenario: PathBuf,

    /// Number of simulation ticks to run
    #[arg(short, long, default_value_t = 10)]
    ticks: u64,

    /// Simulated seconds per tick
    #[arg(long, default_value_t = 60.0)]
    tick_seconds: f64,

    /// Override the rate damping exponent
    #[arg(long)]
    damping_exponent: Option<f64>,

    /// Write the final fleet report JSON here
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let scenario = loader::load_scenario(&args.scenario)?;
    let network = scenario.build_graph()?;

    let mut settings = CommsSettings::default();
    if let Some(exponent) = args.damping_exponent {
        settings.damping_exponent = exponent;
    }

    let mut fleet = Fleet::from_scenario(&scenario, settings)?;
    for _ in 0..args.ticks {
        fleet.tick(&network, args.tick_seconds);
    }

    info!("{}", "=".repeat(60));
    info!("FLEET AFTER {} TICKS", fleet.ticks());
    info!("{}", "=".repeat(60));

    for vessel in fleet.vessels() {
        info!(
            "{:24} {:20} {:>9.3} MB/s  sent {:>8.1} MB",
            vessel.name,
            format!("{:?}", vessel.link.status),
            vessel.link.rate_mb_s,
            vessel.science_sent_mb
        );
    }

    info!("");
    info!("CONTROL PATHS");
    for vessel in fleet.vessels() {
        if vessel.link.linked {
            for hop in walk(&vessel.id, &fleet) {
                info!(
                    "  {} \u{27a1} {}  {:.3} MB/s (strength {:.2}, {:.0} km of max {:.0} km)",
                    hop.from_name,
                    hop.to_name,
                    hop.rate_mb_s,
                    hop.strength,
                    hop.distance_m / 1000.0,
                    hop.max_distance_m / 1000.0
                );
            }
        } else {
            info!("  {}: no connection", vessel.name);
        }
    }

    if let Some(path) = &args.output {
        info!("Writing report to {:?}", path);
        let report = fleet.report(&scenario.name, args.tick_seconds);
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &report)?;
    }

    Ok(())
}
