//! # autopark
//!
//! Headless runner for the parking environment.
//!
//! Builds the reference lot, wires it into a [`parking::ParkingEnv`] with the
//! kinematic integrator and a baseline policy, and plays a number of
//! episodes. Logs go to stderr; `--summary-json` prints the episode results
//! to stdout.

mod app;

use anyhow::Result;
use autopark::policies::PolicyKind;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Run parking episodes against the reference lot
#[derive(Parser, Debug)]
#[command(name = "autopark", version, about)]
pub struct Args {
    /// JSON environment config; defaults apply to anything it leaves out
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of episodes to play
    #[arg(short, long, default_value_t = 1)]
    pub episodes: usize,

    /// Override the episode length cap (0 = unlimited)
    #[arg(long)]
    pub max_steps: Option<u32>,

    /// Seed for spawn offsets, slot shuffles and the random policy
    #[arg(long)]
    pub seed: Option<u64>,

    /// Policy that drives once a slot is spotted
    #[arg(short, long, value_enum, default_value_t = PolicyKind::Cruise)]
    pub policy: PolicyKind,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    pub summary_json: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let summary = app::run(&args)?;
    if args.summary_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}
