#![deny(unsafe_code)]
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions
)]

//! # porecall - nanopore basecalling ingestion and dispatch
//!
//! This library turns directories of `.fast5` signal container files into
//! decoded output records. It owns the input side (bounded directory scans and
//! live directory watching) and the dispatch side (sequential or pooled
//! parallel execution of per-read basecalls); the basecalling algorithm
//! itself, the container file format, and output serialization are supplied
//! by the integrator through traits.
//!
//! ## Overview
//!
//! - **[`input`]** - batch producers: [`BoundedReader`] for one-shot scans,
//!   [`DirectoryWatcher`] for blocking live watches with per-platform backends
//! - **[`executor`]** - batch consumers: [`SequentialTaskExecutor`] and the
//!   pool-owning [`ParallelTaskExecutor`]
//! - **[`signal`]** - median/MAD signal normalization
//! - **[`record`]** - the per-read unit of work and the decoded output record
//! - **[`fast5`]** - the container-adapter boundary (traits only)
//! - **[`caller`]** - the injected decoding capability contract
//! - **[`output`]** - the downstream writer boundary (trait only)
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use porecall::{create_input_source, create_task_executor};
//! use porecall::testutil::{MemoryFast5Source, MockBasecaller};
//!
//! # fn main() -> porecall::Result<()> {
//! let source = Arc::new(MemoryFast5Source::new());
//! let mut input = create_input_source(vec!["/data/reads".into()], vec![], false)?;
//! let mut executor = create_task_executor(source, 4);
//! executor.set_caller(Arc::new(MockBasecaller::default()));
//!
//! let batch = input.next_batch()?;
//! let outcome = executor.execute_task_batch(&batch)?;
//! println!("decoded {} reads", outcome.records.len());
//! # Ok(())
//! # }
//! ```
//!
//! The integrator drives the loop: pull a batch, execute it, hand the records
//! to an [`OutputWriter`] - repeating forever when the input source is a
//! watcher.

pub mod caller;
pub mod components;
pub mod errors;
pub mod executor;
pub mod fast5;
pub mod input;
pub mod logging;
pub mod output;
pub mod record;
pub mod signal;
pub mod testutil;

pub use caller::{Basecall, Basecaller};
pub use components::{create_input_source, create_task_executor};
pub use errors::{PorecallError, Result};
pub use executor::{
    BatchOutcome, ParallelTaskExecutor, SequentialTaskExecutor, TaskExecutor, DEFAULT_CHUNK_SIZE,
};
pub use fast5::{is_fast5_path, ContainerKind, Fast5Container, Fast5Source, RawRead};
pub use input::{BoundedReader, DirectoryWatcher, InputSource};
pub use output::OutputWriter;
pub use record::{CallInput, OutputRecord};
