//! Bounded reader scan properties against a real filesystem.

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Result;
use tempfile::TempDir;

use porecall::create_input_source;

use crate::helpers::touch_fast5;

#[test]
fn test_first_batch_is_exact_filtered_union() -> Result<()> {
    let dir = TempDir::new()?;
    let a = touch_fast5(dir.path(), "a.fast5");
    let b = touch_fast5(dir.path(), "b.fast5");
    touch_fast5(dir.path(), "summary.txt");

    let extra_dir = TempDir::new()?;
    let explicit = touch_fast5(extra_dir.path(), "explicit.fast5");
    let wrong_ext = touch_fast5(extra_dir.path(), "explicit.pod5");
    let missing = extra_dir.path().join("never_written.fast5");

    let mut source = create_input_source(
        vec![dir.path().to_path_buf(), PathBuf::from("/no/such/directory")],
        vec![explicit.clone(), wrong_ext, missing],
        false,
    )?;

    let batch = source.next_batch()?;
    let expected: BTreeSet<PathBuf> = [a, b, explicit].into_iter().collect();
    let actual: BTreeSet<PathBuf> = batch.iter().cloned().collect();

    assert_eq!(actual, expected);
    assert_eq!(batch.len(), expected.len(), "no duplicate paths");
    Ok(())
}

#[test]
fn test_repeat_retrieval_is_idempotent() -> Result<()> {
    let dir = TempDir::new()?;
    touch_fast5(dir.path(), "a.fast5");

    let mut source = create_input_source(vec![dir.path().to_path_buf()], vec![], false)?;

    let first = source.next_batch()?;
    let second = source.next_batch()?;
    assert_eq!(first.len(), 1);
    assert_eq!(first, second, "second retrieval returns the same batch, not an empty one");
    Ok(())
}
