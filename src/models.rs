//! Data models for the weather poller.
//!
//! This module contains the core data structures that flow through a
//! polling cycle: per-source readings and the row that ends up in the
//! results file.

use std::fmt;

/// The literal written to the results file when a source produced no value.
///
/// This is an external contract: downstream parsers of the results file rely
/// on it staying stable across runs.
pub const MISSING_LITERAL: &str = "None";

/// A single temperature reading from one source.
///
/// `Missing` is a tagged variant rather than a null-like value so that a
/// legitimate reading of `0.0` is never confused with "the source failed".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    /// A numeric temperature extracted from a response.
    Value(f64),
    /// The source failed or the field path did not resolve to a number.
    Missing,
}

impl Reading {
    /// Returns the numeric value, if any.
    pub fn value(&self) -> Option<f64> {
        match self {
            Reading::Value(v) => Some(*v),
            Reading::Missing => None,
        }
    }

    /// True when this reading carries no value.
    pub fn is_missing(&self) -> bool {
        matches!(self, Reading::Missing)
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // f64's Display already renders integral values bare ("10").
            Reading::Value(v) => write!(f, "{}", v),
            Reading::Missing => write!(f, "{}", MISSING_LITERAL),
        }
    }
}

/// One source's result for one cycle: the source name plus its reading.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceReading {
    /// Name of the source the reading came from.
    pub name: String,
    /// The extracted reading (or `Missing`).
    pub reading: Reading,
}

impl SourceReading {
    pub fn new(name: impl Into<String>, reading: Reading) -> Self {
        Self {
            name: name.into(),
            reading,
        }
    }

    /// Shorthand for a failed/unresolved source.
    pub fn missing(name: impl Into<String>) -> Self {
        Self::new(name, Reading::Missing)
    }
}

/// The row appended to the results file for one cycle.
///
/// Invariant: `readings` is sorted by source name in the same order as the
/// file header, so `fields()` always yields `|sources| + 1` columns in
/// header order.
#[derive(Debug, Clone)]
pub struct CycleRow {
    /// Per-source readings, sorted by source name.
    pub readings: Vec<SourceReading>,
    /// Average over the available readings (0 when none were available).
    pub average: f64,
}

impl CycleRow {
    /// Renders the row as file fields: one per reading, then the average.
    pub fn fields(&self) -> Vec<String> {
        let mut fields: Vec<String> = self
            .readings
            .iter()
            .map(|r| r.reading.to_string())
            .collect();
        fields.push(format_average(self.average));
        fields
    }
}

/// Formats an average with at least one decimal place.
///
/// Raw readings render bare when integral (`10`), but the computed average
/// always shows a decimal (`10.0`, `0.0`), matching the format readers of
/// the results file expect.
pub fn format_average(value: f64) -> String {
    let rendered = format!("{}", value);
    if rendered.contains('.') {
        rendered
    } else {
        format!("{:.1}", value)
    }
}
