//! Test support: an in-memory container source and a deterministic caller.
//!
//! These implementations back the crate's own tests and are exported so
//! integrators can exercise their pipelines without real fast5 files on
//! disk. `MemoryFast5Source` maps paths to prebuilt containers and can be
//! told to fail specific paths with an I/O error, which is how the
//! partial-batch contract is tested.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::caller::{Basecall, Basecaller};
use crate::errors::{PorecallError, Result};
use crate::fast5::{ContainerKind, Fast5Container, Fast5Source, RawRead};

/// Builds a `RawRead` with plausible channel metadata and a short signal.
#[must_use]
pub fn raw_read(run_id: &str, read_number: u32, channel_number: &str) -> RawRead {
    RawRead {
        signal: vec![480, 520, 500, 510, 470, 505, 495, 515],
        run_id: run_id.to_string(),
        read_number,
        channel_number: channel_number.to_string(),
        start_sample: 4000,
        sampling_rate: 4000.0,
        exp_start_time: "2019-05-22T14:04:58Z".to_string(),
    }
}

/// An in-memory container: a kind plus ordered (read id, read) pairs.
#[derive(Debug, Clone)]
pub struct MemoryContainer {
    kind: ContainerKind,
    reads: Vec<(String, RawRead)>,
    phantom_reads: Vec<String>,
}

impl MemoryContainer {
    /// A single-read container holding one read.
    #[must_use]
    pub fn single(read_id: impl Into<String>, read: RawRead) -> Self {
        Self {
            kind: ContainerKind::SingleRead,
            reads: vec![(read_id.into(), read)],
            phantom_reads: Vec::new(),
        }
    }

    /// A multi-read archive holding the given reads.
    #[must_use]
    pub fn multi(reads: Vec<(String, RawRead)>) -> Self {
        Self { kind: ContainerKind::MultiRead, reads, phantom_reads: Vec::new() }
    }

    /// Lists `read_id` in `read_ids()` without backing data, so fetching it
    /// fails; simulates a container truncated after its index was written.
    #[must_use]
    pub fn with_phantom_read(mut self, read_id: impl Into<String>) -> Self {
        self.phantom_reads.push(read_id.into());
        self
    }
}

/// An opened in-memory container, carrying its path for error reporting.
pub struct MemoryHandle {
    path: PathBuf,
    container: MemoryContainer,
}

impl Fast5Container for MemoryHandle {
    fn read_ids(&self) -> Result<Vec<String>> {
        Ok(self
            .container
            .reads
            .iter()
            .map(|(id, _)| id.clone())
            .chain(self.container.phantom_reads.iter().cloned())
            .collect())
    }

    fn kind(&self) -> Result<ContainerKind> {
        Ok(self.container.kind)
    }

    fn fetch(&self, read_id: &str) -> Result<RawRead> {
        self.container
            .reads
            .iter()
            .find(|(id, _)| id == read_id)
            .map(|(_, read)| read.clone())
            .ok_or_else(|| {
                PorecallError::container_io(
                    &self.path,
                    std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        format!("read '{read_id}' not present"),
                    ),
                )
            })
    }
}

/// In-memory [`Fast5Source`] keyed by path, with per-path fault injection.
#[derive(Debug, Default, Clone)]
pub struct MemoryFast5Source {
    containers: HashMap<PathBuf, MemoryContainer>,
    failing: HashSet<PathBuf>,
}

impl MemoryFast5Source {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a container under `path`.
    pub fn insert(&mut self, path: impl Into<PathBuf>, container: MemoryContainer) {
        self.containers.insert(path.into(), container);
    }

    /// Makes every subsequent `open` of `path` fail with an I/O error.
    pub fn fail_on(&mut self, path: impl Into<PathBuf>) {
        self.failing.insert(path.into());
    }
}

impl Fast5Source for MemoryFast5Source {
    fn open(&self, path: &Path) -> Result<Box<dyn Fast5Container + '_>> {
        if self.failing.contains(path) {
            return Err(PorecallError::container_io(
                path,
                std::io::Error::new(std::io::ErrorKind::Other, "injected container failure"),
            ));
        }
        let container = self.containers.get(path).cloned().ok_or_else(|| {
            PorecallError::container_io(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such container"),
            )
        })?;
        Ok(Box::new(MemoryHandle { path: path.to_path_buf(), container }))
    }
}

/// Deterministic caller returning the same sequence + quality for every read.
#[derive(Debug, Clone)]
pub struct MockBasecaller {
    sequence: String,
    quality: String,
}

impl MockBasecaller {
    /// Creates a mock caller with a fixed result.
    #[must_use]
    pub fn new(sequence: &str, quality: &str) -> Self {
        Self { sequence: sequence.to_string(), quality: quality.to_string() }
    }
}

impl Default for MockBasecaller {
    fn default() -> Self {
        Self::new("ACGT", "!!!!")
    }
}

impl Basecaller for MockBasecaller {
    fn call_raw_signal(&self, _signal: &[f32]) -> Basecall {
        Basecall { sequence: self.sequence.clone(), quality: self.quality.clone() }
    }
}
