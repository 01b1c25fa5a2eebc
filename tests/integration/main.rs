//! Integration tests for the porecall library.
//!
//! These tests exercise end-to-end contracts that span modules: input
//! scanning against a real filesystem, the blocking watcher contract,
//! executor strategy equivalence, and the integrator's pull-execute-write
//! loop.

mod helpers;
mod test_bounded_reader;
#[cfg(target_os = "linux")]
mod test_directory_watcher;
mod test_pipeline;
