//! The cycle scheduler: drives poll → reconcile → aggregate → append.
//!
//! Cycles run strictly sequentially; a cycle always completes and always
//! appends exactly one row, however many sources failed.

use crate::aggregate::{average, reconcile};
use crate::config::Config;
use crate::diagnostics::Diagnostics;
use crate::models::CycleRow;
use crate::poll::{poll_sources, Fetch};
use crate::sink::ResultsFile;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// The weather checker: configuration plus its injected collaborators.
pub struct WeatherChecker<F: Fetch> {
    config: Config,
    fetcher: F,
    sink: ResultsFile,
    diagnostics: Arc<dyn Diagnostics>,
}

impl<F: Fetch> WeatherChecker<F> {
    pub fn new(
        config: Config,
        fetcher: F,
        sink: ResultsFile,
        diagnostics: Arc<dyn Diagnostics>,
    ) -> Self {
        Self {
            config,
            fetcher,
            sink,
            diagnostics,
        }
    }

    /// Runs the full check: discard the previous results file, write the
    /// header, then poll `times_to_check` times with the configured delay
    /// between cycles (and after the last one).
    pub async fn run(&self) -> Result<()> {
        self.sink.reset()?;
        self.sink.write_header(&self.config.sorted_source_names())?;

        let interval = Duration::from_secs_f64(self.config.settings.check_interval_in_seconds);
        info!(
            "Polling {} sources {} times, every {:?}",
            self.config.sources.len(),
            self.config.settings.times_to_check,
            interval
        );

        let mut cycle: u64 = 0;
        while cycle < self.config.settings.times_to_check {
            self.run_cycle(cycle).await?;
            cycle += 1;
            tokio::time::sleep(interval).await;
        }

        Ok(())
    }

    /// One full cycle. Source failures surface as missing readings, never
    /// as an error from here.
    async fn run_cycle(&self, cycle: u64) -> Result<()> {
        let readings =
            poll_sources(&self.fetcher, &self.config.sources, self.diagnostics.as_ref()).await;

        let readings = reconcile(readings);
        let avg = average(&readings);
        debug!("Cycle {}: average {} over {} sources", cycle, avg, readings.len());

        self.sink.append_row(&CycleRow {
            readings,
            average: avg,
        })
    }
}
