//! Task executors: consumers of container path batches.
//!
//! An executor turns one batch of container paths into decoded
//! [`OutputRecord`]s by building a [`crate::record::CallInput`] per read and
//! running it through the injected basecaller. Two strategies implement the
//! same contract: [`SequentialTaskExecutor`] runs fully synchronously,
//! [`ParallelTaskExecutor`] owns a bounded worker pool and dispatches reads
//! in chunks.
//!
//! Container I/O failures are recovered at batch granularity: the batch is
//! aborted, a warning is logged, and every record already produced is
//! returned in a [`BatchOutcome`] whose `failure` field carries the cause.
//! Configuration errors (executing before a caller is injected) surface as
//! `Err` instead and never yield partial output.

mod parallel;
mod sequential;

use std::path::PathBuf;
use std::sync::Arc;

use crate::caller::Basecaller;
use crate::errors::{PorecallError, Result};
use crate::record::OutputRecord;

pub use parallel::ParallelTaskExecutor;
pub use sequential::SequentialTaskExecutor;

/// Number of call inputs grouped into one unit of pool work.
pub const DEFAULT_CHUNK_SIZE: usize = 100;

/// The result of executing one task batch.
///
/// Distinguishes complete success (`failure` is `None`) from partial
/// success, where an I/O failure aborted the batch and `records` holds
/// everything decoded up to that point. Record order across reads is
/// unspecified for the parallel executor; consumers should treat the list
/// as a set keyed by `read_id`.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Records decoded before the batch finished or was aborted.
    pub records: Vec<OutputRecord>,
    /// The container error that aborted the batch, if any.
    pub failure: Option<PorecallError>,
}

impl BatchOutcome {
    /// True when every read in the batch was decoded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }

    /// Records the error that aborted this batch and logs the diagnostic.
    pub(crate) fn abort(&mut self, error: PorecallError) {
        log::warn!("{error}");
        log::warn!("task execution aborted; batch output may be incomplete");
        self.failure = Some(error);
    }
}

/// A consumer of task batches, fed by an input source.
///
/// A basecaller must be injected with `set_caller` before the first batch;
/// executing without one is a contract violation and fails fast with
/// [`PorecallError::CallerNotSet`].
pub trait TaskExecutor: Send {
    /// Injects the decoding capability used for every subsequent batch.
    fn set_caller(&mut self, caller: Arc<dyn Basecaller>);

    /// Decodes every read of every container in `tasks`.
    ///
    /// Returns `Err` only for configuration errors; container I/O failures
    /// are reported inside the [`BatchOutcome`].
    fn execute_task_batch(&self, tasks: &[PathBuf]) -> Result<BatchOutcome>;
}
