// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Find the multiplexer selections of a clock tree closest to a required clock.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use clock_solver::state::Counters;
use clock_solver::{ClockTreeConfig, StageConfig};

#[derive(Parser, Debug)]
#[command(name = "clocksolve")]
#[command(about = "Search a chain of clock-divider multiplexers for the closest achievable frequency")]
struct Args {
    /// JSON clock-tree description (defaults to the built-in 16 -> 1 example)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Bus (input) frequency, overrides the config file
    #[arg(long)]
    bus: Option<f64>,

    /// Required (target) frequency, overrides the config file
    #[arg(long)]
    required: Option<f64>,

    /// Multiplexer stage as <rule>:<inputs>, e.g. exp:5 or increment_one:4.
    /// Repeat for each stage, in chain order; replaces the config file's stages.
    #[arg(long = "stage")]
    stages: Vec<StageConfig>,

    /// Also list the N closest configurations
    #[arg(long)]
    top: Option<usize>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &args.config {
        Some(path) => ClockTreeConfig::load(path)?,
        None => ClockTreeConfig::default(),
    };
    if let Some(bus) = args.bus {
        config.bus_frequency = bus;
    }
    if let Some(required) = args.required {
        config.required_clock = required;
    }
    if !args.stages.is_empty() {
        config.stages = args.stages.clone();
    }

    let mut solver = config
        .build_solver()
        .context("could not build the multiplexer chain")?;
    let best = solver.solve().context("search failed")?;

    print!("{best}");

    if let Some(n) = args.top {
        println!();
        for (rank, eval) in solver.ranked().into_iter().take(n).enumerate() {
            println!(
                "{:>3}. {} -> {} (delta {})",
                rank + 1,
                eval.configuration(),
                eval.output(),
                eval.delta(config.required_clock)
            );
        }
    }

    tracing::debug!(
        evaluated = solver.statistics().get(Counters::ConfigurationsEvaluated),
        exact = solver.statistics().get(Counters::ExactMatches),
        "done"
    );
    Ok(())
}
