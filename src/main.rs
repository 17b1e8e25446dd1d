//! WeatherPoll - Concurrent Weather Polling & CSV Aggregation
//!
//! A CLI tool that polls multiple weather APIs concurrently, averages
//! the temperatures they report, and appends one row per cycle to a
//! CSV results file.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (config, IO, etc.)

mod aggregate;
mod checker;
mod cli;
mod config;
mod diagnostics;
mod extract;
mod models;
mod poll;
mod sink;

use anyhow::Result;
use checker::WeatherChecker;
use cli::Args;
use config::Config;
use diagnostics::TracingDiagnostics;
use poll::HttpFetcher;
use sink::ResultsFile;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Initialize logging
    init_logging(&args);

    info!("WeatherPoll v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Run the poller
    match run_poller(args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Polling failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level())
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete polling workflow.
async fn run_poller(args: Args) -> Result<()> {
    // Load and validate configuration, then apply CLI overrides
    let mut config = Config::load(&args.settings, &args.sources)?;
    config.merge_with_args(&args);

    // Handle --dry-run: show the plan and exit
    if args.dry_run {
        return handle_dry_run(&config);
    }

    println!("📡 Polling {} weather sources", config.sources.len());
    println!("   Cycles: {}", config.settings.times_to_check);
    println!(
        "   Interval: {}s",
        config.settings.check_interval_in_seconds
    );
    println!("   Output: {}", args.output.display());

    let fetcher = HttpFetcher::new(Duration::from_secs(args.timeout))?;
    let sink = ResultsFile::new(args.output.clone());

    let checker = WeatherChecker::new(config, fetcher, sink, Arc::new(TracingDiagnostics));
    checker.run().await?;

    println!("\n✅ Done! Results saved to: {}", args.output.display());
    Ok(())
}

/// Handle --dry-run: print the configured sources without polling.
fn handle_dry_run(config: &Config) -> Result<()> {
    println!("\n🔍 Dry run: configuration is valid (no requests made).\n");
    println!(
        "   {} sources, {} cycles, {}s interval\n",
        config.sources.len(),
        config.settings.times_to_check,
        config.settings.check_interval_in_seconds
    );

    for name in config.sorted_source_names() {
        // Registry lookups by name cannot miss: the names came from it.
        if let Some(source) = config.sources.iter().find(|s| s.name == name) {
            println!("     🌐 {} -> {}", source.name, source.url);
            println!("        field path: [{}]", source.result_keys.join(" -> "));
        }
    }

    println!("\n✅ Dry run complete.");
    Ok(())
}
