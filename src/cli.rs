use std::path::PathBuf;

use clap::Parser;

/// Synthetic household power time-series generator.
///
/// Writes one CSV row per simulated minute: timestamp, aggregate power, and
/// the on flag of every device. Without `--scenario` or `--preset` the
/// household preset is used.
#[derive(Debug, Parser)]
#[command(name = "powgen", author, version, about)]
pub struct Args {
    /// Load the scenario from a TOML file.
    #[clap(long, value_name = "PATH", conflicts_with = "preset")]
    pub scenario: Option<PathBuf>,

    /// Use a built-in preset.
    #[clap(long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Override the number of simulated days.
    #[clap(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub days: Option<u32>,

    /// Override the random seed.
    #[clap(long)]
    pub seed: Option<u64>,

    /// Write the CSV to a file instead of stdout.
    #[clap(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Log verbosity on stderr: trace, debug, info, warn or error.
    #[clap(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Preset used when no scenario file is given.
    pub fn preset_name(&self) -> &str {
        self.preset.as_deref().unwrap_or("household")
    }
}

pub fn parse_log_level(level: &str) -> tracing::Level {
    match level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" | "warning" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => {
            eprintln!("Invalid log level '{level}', defaulting to INFO");
            tracing::Level::INFO
        }
    }
}
