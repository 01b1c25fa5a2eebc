//! Input sources: producers of container path batches.
//!
//! Two families implement [`InputSource`]: [`BoundedReader`] performs a
//! one-shot scan of configured directories and files, while
//! [`DirectoryWatcher`] performs the same scan to seed an initial batch and
//! then blocks on the platform's native change notification mechanism for
//! new files. Both filter candidates with the case-sensitive `.fast5`
//! check in [`crate::fast5::is_fast5_path`].

mod bounded;
mod watch;

use std::path::PathBuf;

use crate::errors::Result;
use crate::fast5::is_fast5_path;

pub use bounded::BoundedReader;
pub use watch::DirectoryWatcher;

/// A producer of task batches for the executors.
///
/// Implementations are constructed from a set of input directories and a
/// set of explicit input files; `initialize` resolves those into a first
/// batch (and, for watchers, registers OS-level watches). The factory in
/// [`crate::components::create_input_source`] calls `initialize` before
/// handing the source to the integrator.
pub trait InputSource: Send {
    /// Resolves configured inputs and acquires any watch resources.
    fn initialize(&mut self) -> Result<()>;

    /// Returns the next batch of container paths.
    ///
    /// Bounded readers return the same scanned batch on every call and
    /// should be polled exactly once per run; watchers block until at least
    /// one new qualifying file appears and may be polled forever.
    fn next_batch(&mut self) -> Result<Vec<PathBuf>>;
}

/// Resolves configured inputs into (task batch, existing directories).
///
/// Explicit files must exist as files and pass the container filter;
/// directories must exist as directories and are listed one level deep,
/// keeping entries whose names pass the container filter. Listing order is
/// explicit files first, then per-directory entries in directory order.
pub(crate) fn scan_inputs(
    directories: &[PathBuf],
    files: &[PathBuf],
) -> Result<(Vec<PathBuf>, Vec<PathBuf>)> {
    let mut batch: Vec<PathBuf> = files
        .iter()
        .filter(|path| path.is_file() && is_fast5_path(path))
        .cloned()
        .collect();

    let directories: Vec<PathBuf> =
        directories.iter().filter(|path| path.is_dir()).cloned().collect();

    for directory in &directories {
        for entry in std::fs::read_dir(directory)? {
            let path = entry?.path();
            if is_fast5_path(&path) {
                batch.push(path);
            }
        }
    }

    Ok((batch, directories))
}

/// Debug-friendly summary of what a source was configured with.
pub(crate) fn describe_inputs(directories: &[PathBuf], files: &[PathBuf]) -> String {
    format!("{} directories, {} explicit files", directories.len(), files.len())
}
