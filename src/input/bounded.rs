//! One-shot bounded input reader.

use std::path::PathBuf;

use log::info;

use crate::errors::Result;

use super::{describe_inputs, scan_inputs, InputSource};

/// Scans the configured inputs once and serves the result as a single batch.
///
/// `next_batch` is idempotent: calling it again returns the same batch, not
/// an empty follow-up, so callers must poll it exactly once per run for
/// correct semantics.
pub struct BoundedReader {
    input_directories: Vec<PathBuf>,
    input_files: Vec<PathBuf>,
    task_batch: Vec<PathBuf>,
}

impl BoundedReader {
    /// Creates a reader over the given directories and explicit files.
    #[must_use]
    pub fn new(input_directories: Vec<PathBuf>, input_files: Vec<PathBuf>) -> Self {
        Self { input_directories, input_files, task_batch: Vec::new() }
    }
}

impl InputSource for BoundedReader {
    fn initialize(&mut self) -> Result<()> {
        let (batch, _) = scan_inputs(&self.input_directories, &self.input_files)?;
        info!(
            "Scanned {} into a batch of {} container files",
            describe_inputs(&self.input_directories, &self.input_files),
            batch.len()
        );
        self.task_batch = batch;
        Ok(())
    }

    fn next_batch(&mut self) -> Result<Vec<PathBuf>> {
        Ok(self.task_batch.clone())
    }
}
