//! Single-threaded task execution.

use std::path::PathBuf;
use std::sync::Arc;

use crate::caller::Basecaller;
use crate::errors::{PorecallError, Result};
use crate::fast5::Fast5Source;
use crate::logging::OperationTimer;
use crate::record::{call_read, CallInput};

use super::{BatchOutcome, TaskExecutor};

/// Decodes a batch synchronously, one container and one read at a time.
///
/// Reads go through the same reopen-by-path code path the pool workers use
/// ([`call_read`]), so both executors produce identical records for a given
/// batch and caller.
pub struct SequentialTaskExecutor {
    source: Arc<dyn Fast5Source>,
    caller: Option<Arc<dyn Basecaller>>,
}

impl SequentialTaskExecutor {
    /// Creates an executor reading containers through `source`.
    #[must_use]
    pub fn new(source: Arc<dyn Fast5Source>) -> Self {
        Self { source, caller: None }
    }
}

impl TaskExecutor for SequentialTaskExecutor {
    fn set_caller(&mut self, caller: Arc<dyn Basecaller>) {
        self.caller = Some(caller);
    }

    fn execute_task_batch(&self, tasks: &[PathBuf]) -> Result<BatchOutcome> {
        let caller = self.caller.clone().ok_or(PorecallError::CallerNotSet)?;

        let timer = OperationTimer::new("Basecalling task batch (sequential)");
        let mut outcome = BatchOutcome::default();

        'batch: for task in tasks {
            let read_ids = match self.source.open(task).and_then(|container| container.read_ids())
            {
                Ok(read_ids) => read_ids,
                Err(error) => {
                    outcome.abort(error);
                    break 'batch;
                }
            };

            for read_id in read_ids {
                let input = CallInput::new(read_id, task.clone(), Arc::clone(&caller));
                match call_read(self.source.as_ref(), &input) {
                    Ok(record) => outcome.records.push(record),
                    Err(error) => {
                        outcome.abort(error);
                        break 'batch;
                    }
                }
            }
        }

        timer.log_completion(outcome.records.len() as u64);
        Ok(outcome)
    }
}
