//! The container-adapter boundary.
//!
//! A fast5 container holds one or more raw-signal reads plus metadata. The
//! on-disk format is outside this crate: implementations of [`Fast5Source`]
//! and [`Fast5Container`] are supplied by the integrator (or, for tests, by
//! [`crate::testutil::MemoryFast5Source`]). The executors only rely on the
//! contract below: open a container by path, enumerate its read ids,
//! classify it as single- or multi-read, and fetch one read's signal and
//! metadata.
//!
//! Handle release is deterministic: a container is closed when the boxed
//! [`Fast5Container`] is dropped, on every exit path.

use std::ffi::OsStr;
use std::path::Path;

use crate::errors::Result;

/// Recognized container file extension. Matching is case-sensitive.
pub const FAST5_EXTENSION: &str = ".fast5";

/// Returns true if the path names a candidate container file.
#[must_use]
pub fn is_fast5_path(path: &Path) -> bool {
    path.file_name()
        .and_then(OsStr::to_str)
        .is_some_and(|name| name.ends_with(FAST5_EXTENSION))
}

/// Container sub-type: one read per file, or a multi-read archive.
///
/// The distinction drives executor batching policy: multi-read containers
/// are chunked internally, single-read containers are batched whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// Exactly one read in the container.
    SingleRead,
    /// Many reads in one archive file.
    MultiRead,
}

/// One raw read and the metadata needed to build an output record.
#[derive(Debug, Clone)]
pub struct RawRead {
    /// Raw DAC signal values.
    pub signal: Vec<i16>,
    /// Run identifier from the tracking metadata.
    pub run_id: String,
    /// Sequential read number within the channel.
    pub read_number: u32,
    /// Channel the read was captured on.
    pub channel_number: String,
    /// Read start offset from the experiment start, in samples.
    pub start_sample: u64,
    /// Channel sampling rate in Hz.
    pub sampling_rate: f64,
    /// Absolute experiment start, formatted `%Y-%m-%dT%H:%M:%SZ`.
    pub exp_start_time: String,
}

/// An open container handle. Closed on drop.
pub trait Fast5Container {
    /// Enumerates the read identifiers stored in this container.
    fn read_ids(&self) -> Result<Vec<String>>;

    /// Classifies the container as single- or multi-read.
    fn kind(&self) -> Result<ContainerKind>;

    /// Retrieves one read's raw signal and metadata by identifier.
    fn fetch(&self, read_id: &str) -> Result<RawRead>;
}

/// Opens containers by path.
///
/// Sources are shared across worker threads, so implementations must be
/// `Send + Sync`; each worker opens its own container handle and never
/// shares it.
pub trait Fast5Source: Send + Sync {
    /// Opens the container at `path` for reading.
    fn open(&self, path: &Path) -> Result<Box<dyn Fast5Container + '_>>;
}
