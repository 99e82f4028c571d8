//! powgen entry point: CLI wiring and config-driven engine construction.

mod cli;

use std::io;

use anyhow::{Context, bail};
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};

use powgen::config::ScenarioConfig;
use powgen::io::export::{export_csv, write_csv};
use powgen::sim::engine::Engine;

use cli::{Args, parse_log_level};

fn load_scenario(args: &Args) -> anyhow::Result<ScenarioConfig> {
    let mut scenario = match &args.scenario {
        Some(path) => ScenarioConfig::from_toml_file(path)
            .with_context(|| format!("failed to load scenario {}", path.display()))?,
        None => ScenarioConfig::from_preset(args.preset_name())?,
    };

    if let Some(days) = args.days {
        scenario.simulation.days = days as usize;
    }
    if let Some(seed) = args.seed {
        scenario.simulation.seed = Some(seed);
    }

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            tracing::error!("{e}");
        }
        bail!("scenario has {} invalid setting(s)", errors.len());
    }
    Ok(scenario)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(parse_log_level(&args.log_level))
        .with_writer(io::stderr)
        .init();

    let scenario = load_scenario(&args)?;
    let entries = scenario.build_schedule()?;
    if entries.is_empty() {
        tracing::warn!("scenario has no devices, output is the ambient baseline only");
    }

    let seed = scenario.simulation.seed.unwrap_or_else(rand::random);
    let devices = entries.len();
    let mut engine = Engine::new(
        scenario.sim_config(seed),
        entries,
        scenario.ambient(),
        StdRng::seed_from_u64(seed),
    );

    let config = engine.config();
    tracing::info!(
        days = config.days,
        minutes = config.total_minutes(),
        seed = config.seed,
        devices,
        start_date = %config.start_date,
        "starting simulation"
    );

    let summary = match &args.output {
        Some(path) => export_csv(&mut engine, path)
            .with_context(|| format!("failed to write CSV to {}", path.display()))?,
        None => write_csv(&mut engine, io::stdout().lock()).context("failed to write CSV")?,
    };

    tracing::info!(
        minutes = summary.minutes,
        energy_kwh = summary.energy_kwh,
        peak_power_w = summary.peak_power_w,
        "simulation finished"
    );
    eprintln!("{summary}");

    Ok(())
}
