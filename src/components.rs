//! Factories wiring library components from plain configuration values.
//!
//! Integrators typically resolve these parameters from their own CLI or
//! configuration layer and receive components ready for the pull-execute
//! loop; input sources come back already initialized.

use std::path::PathBuf;
use std::sync::Arc;

use crate::errors::Result;
use crate::executor::{ParallelTaskExecutor, SequentialTaskExecutor, TaskExecutor};
use crate::fast5::Fast5Source;
use crate::input::{BoundedReader, DirectoryWatcher, InputSource};

/// Creates and initializes an input source.
///
/// With `watch` set, the source is a blocking [`DirectoryWatcher`] and may
/// be polled forever; otherwise it is a one-shot [`BoundedReader`] that
/// should be polled exactly once.
///
/// # Errors
/// Fails when the platform has no watch backend (`watch` only) or when
/// scanning the configured directories fails.
pub fn create_input_source(
    directories: Vec<PathBuf>,
    files: Vec<PathBuf>,
    watch: bool,
) -> Result<Box<dyn InputSource>> {
    let mut source: Box<dyn InputSource> = if watch {
        Box::new(DirectoryWatcher::new(directories, files)?)
    } else {
        Box::new(BoundedReader::new(directories, files))
    };
    source.initialize()?;
    Ok(source)
}

/// Creates a task executor for the given worker count.
///
/// One worker (or zero) selects the sequential strategy; anything more
/// builds a [`ParallelTaskExecutor`] owning a pool of that size. The caller
/// must still inject a basecaller before executing batches.
#[must_use]
pub fn create_task_executor(
    source: Arc<dyn Fast5Source>,
    workers: usize,
) -> Box<dyn TaskExecutor> {
    if workers <= 1 {
        Box::new(SequentialTaskExecutor::new(source))
    } else {
        Box::new(ParallelTaskExecutor::new(source, workers))
    }
}
