//! Call input records and decoded output records.
//!
//! [`CallInput`] is the unit of work handed to pool workers. It deliberately
//! carries only a read identifier, a container path, and a caller reference,
//! never an open container handle: each worker reopens the container by path
//! and looks the read up by identifier. The repeated opens are the accepted
//! price for a unit of work that can cross the worker boundary freely.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Duration, NaiveDateTime};

use crate::caller::Basecaller;
use crate::errors::{PorecallError, Result};
use crate::fast5::Fast5Source;
use crate::signal;

/// Timestamp format used by fast5 tracking metadata and output records.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// The minimal, transferable description of one basecall task.
#[derive(Clone)]
pub struct CallInput {
    /// Read identifier, unique within its container.
    pub read_id: String,
    /// Path of the container file holding the read.
    pub path: PathBuf,
    /// The injected decoding capability.
    pub caller: Arc<dyn Basecaller>,
}

impl CallInput {
    /// Creates a call input for one read of one container.
    #[must_use]
    pub fn new(read_id: impl Into<String>, path: impl Into<PathBuf>, caller: Arc<dyn Basecaller>) -> Self {
        Self { read_id: read_id.into(), path: path.into(), caller }
    }
}

impl std::fmt::Debug for CallInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallInput")
            .field("read_id", &self.read_id)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// One successfully decoded read, ready for output formatting.
///
/// All fields are mandatory and filled by this library so that
/// MinKNOW-style output headers can be produced downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    /// Read identifier.
    pub read_id: String,
    /// Run identifier.
    pub run_id: String,
    /// Sequential read number within the channel.
    pub read_number: u32,
    /// Channel the read was captured on.
    pub channel_number: String,
    /// Absolute read start time, formatted `%Y-%m-%dT%H:%M:%SZ`.
    pub start_time: String,
    /// Called base sequence, possibly empty.
    pub sequence: String,
    /// FASTQ-style quality scores.
    pub quality: String,
}

/// Executes one basecall task: reopen, fetch, normalize, call, assemble.
///
/// This is the single code path used by both executors and every pool
/// worker, so sequential and parallel execution produce identical records.
pub fn call_read(source: &dyn Fast5Source, input: &CallInput) -> Result<OutputRecord> {
    let container = source.open(&input.path)?;
    let read = container.fetch(&input.read_id)?;

    let start_time = read_start_time(&read, &input.read_id)?;
    let normalized = signal::normalize(&read.signal);
    let call = input.caller.call_raw_signal(&normalized);

    Ok(OutputRecord {
        read_id: input.read_id.clone(),
        run_id: read.run_id,
        read_number: read.read_number,
        channel_number: read.channel_number,
        start_time,
        sequence: call.sequence,
        quality: call.quality,
    })
}

/// Computes a read's absolute start time.
///
/// The raw offset is in samples; dividing by the channel sampling rate gives
/// seconds past the experiment start. Fractional seconds are truncated to
/// match the second-precision output format.
fn read_start_time(read: &crate::fast5::RawRead, read_id: &str) -> Result<String> {
    if !(read.sampling_rate.is_finite() && read.sampling_rate > 0.0) {
        return Err(PorecallError::InvalidSamplingRate {
            rate: read.sampling_rate,
            read_id: read_id.to_string(),
        });
    }

    let base = NaiveDateTime::parse_from_str(&read.exp_start_time, TIMESTAMP_FORMAT)
        .map_err(|_| PorecallError::InvalidTimestamp { value: read.exp_start_time.clone() })?
        .and_utc();

    let offset_seconds = (read.start_sample as f64 / read.sampling_rate) as i64;
    let start = base + Duration::seconds(offset_seconds);
    Ok(start.format(TIMESTAMP_FORMAT).to_string())
}
