//! Reconciliation and aggregation of per-cycle readings.
//!
//! `reconcile` pins the row order to the header order; `average` folds the
//! available readings into the summary column.

use crate::models::{Reading, SourceReading};

/// Decimal places the average is rounded to.
pub const AVERAGE_DECIMAL_PLACES: i32 = 2;

/// Sorts readings by source name, ascending byte-wise.
///
/// This must match the order the header was written in, every cycle,
/// regardless of which request finished first. Source names are unique by
/// configuration, so ties cannot occur.
pub fn reconcile(mut readings: Vec<SourceReading>) -> Vec<SourceReading> {
    readings.sort_by(|a, b| a.name.cmp(&b.name));
    readings
}

/// Arithmetic mean of the available readings, rounded to
/// [`AVERAGE_DECIMAL_PLACES`].
///
/// Missing readings are skipped, not counted as zero; an actual zero reading
/// is included. With no available readings the average is 0, not an error.
pub fn average(readings: &[SourceReading]) -> f64 {
    let mut sum = 0.0;
    let mut count: u32 = 0;

    for reading in readings {
        if let Reading::Value(v) = reading.reading {
            sum += v;
            count += 1;
        }
    }

    if count == 0 {
        return 0.0;
    }

    round_to(sum / f64::from(count), AVERAGE_DECIMAL_PLACES)
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
