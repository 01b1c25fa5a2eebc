//! Pooled parallel task execution.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::caller::Basecaller;
use crate::errors::{PorecallError, Result};
use crate::fast5::{ContainerKind, Fast5Source};
use crate::logging::OperationTimer;
use crate::record::{call_read, CallInput};

use super::{BatchOutcome, TaskExecutor, DEFAULT_CHUNK_SIZE};

/// Decodes a batch on a bounded worker pool with read-type-aware chunking.
///
/// Multi-read containers amortize open cost across many reads, so each one
/// is dispatched on its own with its read ids chunked into pool work units.
/// Single-read containers amortize open cost by accumulating across the
/// whole batch instead; the accumulated list is chunked and dispatched once,
/// after every multi-read container has finished. The two phases do not
/// overlap.
///
/// Workers receive only [`CallInput`]s and reopen containers by path; record
/// collection is order-agnostic, so the output carries no read ordering
/// guarantee, even within one container.
///
/// The pool is owned by this instance: created at construction, joined when
/// the executor is dropped, and never shared with another executor.
pub struct ParallelTaskExecutor {
    source: Arc<dyn Fast5Source>,
    caller: Option<Arc<dyn Basecaller>>,
    pool: rayon::ThreadPool,
    chunk_size: usize,
}

impl ParallelTaskExecutor {
    /// Creates an executor with a pool of `workers` threads.
    ///
    /// # Panics
    /// Panics if the rayon thread pool cannot be created.
    #[must_use]
    pub fn new(source: Arc<dyn Fast5Source>, workers: usize) -> Self {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers.max(1))
            .build()
            .expect("Failed to build rayon thread pool");
        Self { source, caller: None, pool, chunk_size: DEFAULT_CHUNK_SIZE }
    }

    /// Overrides the dispatch chunk size (default [`DEFAULT_CHUNK_SIZE`]).
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "chunk size must be positive");
        self.chunk_size = chunk_size;
        self
    }

    /// Submits `inputs` to the pool in chunks and collects results as they
    /// complete. Blocks until every submitted chunk has finished.
    ///
    /// On a worker error the abort flag stops chunks that have not started
    /// yet; records already decoded are kept and the first error is recorded
    /// on the outcome. Returns false when the dispatch aborted.
    fn dispatch(&self, inputs: &[CallInput], outcome: &mut BatchOutcome) -> bool {
        if inputs.is_empty() {
            return true;
        }

        let (sender, receiver) = crossbeam_channel::unbounded();
        let abort = AtomicBool::new(false);

        self.pool.scope(|scope| {
            for chunk in inputs.chunks(self.chunk_size) {
                let sender = sender.clone();
                let abort = &abort;
                let source = Arc::clone(&self.source);
                scope.spawn(move |_| {
                    if abort.load(Ordering::Acquire) {
                        return;
                    }
                    for input in chunk {
                        match call_read(source.as_ref(), input) {
                            Ok(record) => {
                                let _ = sender.send(Ok(record));
                            }
                            Err(error) => {
                                abort.store(true, Ordering::Release);
                                let _ = sender.send(Err(error));
                                return;
                            }
                        }
                    }
                });
            }
        });
        drop(sender);

        let mut completed = true;
        for result in receiver {
            match result {
                Ok(record) => outcome.records.push(record),
                Err(error) => {
                    if completed {
                        outcome.abort(error);
                        completed = false;
                    }
                }
            }
        }
        completed
    }
}

impl TaskExecutor for ParallelTaskExecutor {
    fn set_caller(&mut self, caller: Arc<dyn Basecaller>) {
        self.caller = Some(caller);
    }

    fn execute_task_batch(&self, tasks: &[PathBuf]) -> Result<BatchOutcome> {
        let caller = self.caller.clone().ok_or(PorecallError::CallerNotSet)?;

        let timer = OperationTimer::new("Basecalling task batch (parallel)");
        let mut outcome = BatchOutcome::default();
        let mut single_read_inputs: Vec<CallInput> = Vec::new();

        // Phase one: classify each container, dispatching multi-read
        // archives immediately and accumulating single-read files.
        for task in tasks {
            let scan = self
                .source
                .open(task)
                .and_then(|container| Ok((container.kind()?, container.read_ids()?)));
            let (kind, read_ids) = match scan {
                Ok(scan) => scan,
                Err(error) => {
                    // A failed sub-type scan aborts the whole batch; the
                    // single-read phase below never runs.
                    outcome.abort(error);
                    timer.log_completion(outcome.records.len() as u64);
                    return Ok(outcome);
                }
            };

            let inputs: Vec<CallInput> = read_ids
                .into_iter()
                .map(|read_id| CallInput::new(read_id, task.clone(), Arc::clone(&caller)))
                .collect();

            match kind {
                ContainerKind::MultiRead => {
                    if !self.dispatch(&inputs, &mut outcome) {
                        timer.log_completion(outcome.records.len() as u64);
                        return Ok(outcome);
                    }
                }
                ContainerKind::SingleRead => single_read_inputs.extend(inputs),
            }
        }

        // Phase two: the accumulated single-read files, chunked as one list.
        self.dispatch(&single_read_inputs, &mut outcome);

        timer.log_completion(outcome.records.len() as u64);
        Ok(outcome)
    }
}
