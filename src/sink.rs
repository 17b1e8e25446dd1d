//! The append-only results file.
//!
//! One header row per run, one data row per cycle, comma-delimited,
//! newline-terminated. The file is opened and closed per operation so no
//! handle is held across the inter-cycle sleep.

use crate::models::CycleRow;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Field delimiter of the results file.
pub const DELIMITER: &str = ",";

/// Row terminator of the results file.
pub const LINE_TERMINATOR: &str = "\n";

/// Header label of the aggregate column, always the last column.
pub const AVERAGE_HEADER: &str = "Average";

/// Handle to the results file on disk.
///
/// Column count and order are fixed once the header is written; every
/// appended row must come from the same source configuration.
pub struct ResultsFile {
    path: PathBuf,
}

impl ResultsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Removes the previous run's file. A missing file is the normal
    /// first-run case, not an error.
    pub fn reset(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to remove results file: {}", self.path.display())),
        }
    }

    /// Writes the header row: sorted source names plus the aggregate column.
    pub fn write_header(&self, sorted_names: &[String]) -> Result<()> {
        let mut columns: Vec<&str> = sorted_names.iter().map(String::as_str).collect();
        columns.push(AVERAGE_HEADER);
        self.append_line(&columns.join(DELIMITER))
    }

    /// Appends one cycle's row in header order.
    pub fn append_row(&self, row: &CycleRow) -> Result<()> {
        self.append_line(&row.fields().join(DELIMITER))
    }

    fn append_line(&self, line: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open results file: {}", self.path.display()))?;

        file.write_all(line.as_bytes())
            .and_then(|_| file.write_all(LINE_TERMINATOR.as_bytes()))
            .with_context(|| format!("Failed to write to results file: {}", self.path.display()))
    }
}
