//! Helper utilities for integration tests.

use std::fs::File;
use std::path::{Path, PathBuf};

use porecall::testutil::{raw_read, MemoryContainer, MemoryFast5Source};
use porecall::{OutputRecord, OutputWriter};

/// Initializes test logging; safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates an empty container file on disk and returns its path.
pub fn touch_fast5(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    File::create(&path).expect("failed to create fixture file");
    path
}

/// An in-memory source backing one multi-read archive (`r1`, `r2`) and two
/// single-read files, registered under the given paths.
pub fn fixture_source(multi: &Path, single_a: &Path, single_b: &Path) -> MemoryFast5Source {
    let mut source = MemoryFast5Source::new();
    source.insert(
        multi,
        MemoryContainer::multi(vec![
            ("r1".to_string(), raw_read("run-1", 1, "101")),
            ("r2".to_string(), raw_read("run-1", 2, "101")),
        ]),
    );
    source.insert(single_a, MemoryContainer::single("sa", raw_read("run-1", 3, "102")));
    source.insert(single_b, MemoryContainer::single("sb", raw_read("run-1", 4, "103")));
    source
}

/// Output writer that keeps every batch in memory for assertions.
#[derive(Default)]
pub struct CollectingWriter {
    pub records: Vec<OutputRecord>,
    pub batches: usize,
}

impl OutputWriter for CollectingWriter {
    fn write_batch(&mut self, records: &[OutputRecord]) -> std::io::Result<()> {
        self.records.extend_from_slice(records);
        self.batches += 1;
        Ok(())
    }
}

/// Sorted read ids of a record list, for order-independent comparison.
pub fn read_ids(records: &[OutputRecord]) -> Vec<String> {
    let mut ids: Vec<String> = records.iter().map(|record| record.read_id.clone()).collect();
    ids.sort();
    ids
}
