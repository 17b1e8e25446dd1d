//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// WeatherPoll - concurrent weather poller with CSV aggregation
///
/// Polls a configured set of weather APIs concurrently, averages the
/// temperatures they report, and appends one row per cycle to a CSV file.
///
/// Examples:
///   weatherpoll
///   weatherpoll --times 10 --interval 30
///   weatherpoll --sources ./my_sources.yaml --output /tmp/weather.csv
///   weatherpoll --dry-run
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to the run settings YAML file
    ///
    /// Expects `times_to_check` and `check_interval_in_seconds`.
    #[arg(long, default_value = "config/settings.yaml", value_name = "FILE")]
    pub settings: PathBuf,

    /// Path to the weather sources YAML file
    ///
    /// Expects a `weather_resources` list of {name, url, params, headers,
    /// result_keys} entries.
    #[arg(long, default_value = "config/sources.yaml", value_name = "FILE")]
    pub sources: PathBuf,

    /// Output CSV file path
    ///
    /// Any file left over from a previous run is discarded at startup.
    #[arg(
        short,
        long,
        default_value = "weather_results.csv",
        env = "WEATHERPOLL_OUTPUT",
        value_name = "FILE"
    )]
    pub output: PathBuf,

    /// Override the number of polling cycles from the settings file
    #[arg(short = 'n', long, value_name = "COUNT")]
    pub times: Option<u64>,

    /// Override the delay between cycles, in seconds (fractions allowed)
    #[arg(short, long, value_name = "SECS")]
    pub interval: Option<f64>,

    /// Per-request timeout in seconds
    ///
    /// A source that does not answer in time contributes a missing reading
    /// for that cycle; the other sources are unaffected.
    #[arg(long, default_value = "10", value_name = "SECS")]
    pub timeout: u64,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Dry run: load and validate configuration, list the sources, and exit
    /// without making any requests
    #[arg(long)]
    pub dry_run: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.timeout == 0 {
            return Err("Timeout must be at least 1 second".to_string());
        }

        if let Some(interval) = self.interval {
            if !interval.is_finite() || interval < 0.0 {
                return Err("Interval must be a non-negative number".to_string());
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
