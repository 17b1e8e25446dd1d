//! Diagnostics sink for per-source failures.
//!
//! The pipeline reports every source failure as a structured event and
//! carries on; the sink is injected rather than imported as a global so
//! tests can observe failures directly.

use crate::poll::FetchError;
use tracing::error;

/// Receives `{source, error}` failure events. Must never block the pipeline.
pub trait Diagnostics: Send + Sync {
    fn source_failure(&self, source_name: &str, error: &FetchError);
}

/// Production sink: logs failures through `tracing`.
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn source_failure(&self, source_name: &str, error: &FetchError) {
        error!("Failed to get weather from {}: {}", source_name, error);
    }
}

/// Test sink that records every failure event.
#[cfg(test)]
pub struct CollectingDiagnostics {
    events: std::sync::Mutex<Vec<(String, String)>>,
}

#[cfg(test)]
impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self {
            events: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<(String, String)> {
        self.events.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl Diagnostics for CollectingDiagnostics {
    fn source_failure(&self, source_name: &str, error: &FetchError) {
        self.events
            .lock()
            .unwrap()
            .push((source_name.to_string(), error.to_string()));
    }
}
