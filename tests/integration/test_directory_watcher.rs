//! Blocking watcher contract, driven by real inotify events.

use std::fs;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use tempfile::TempDir;

use porecall::create_input_source;

use crate::helpers::touch_fast5;

#[test]
fn test_seeded_batch_is_returned_before_blocking() -> Result<()> {
    let dir = TempDir::new()?;
    let seed = touch_fast5(dir.path(), "seed.fast5");
    touch_fast5(dir.path(), "ignored.txt");

    let mut source = create_input_source(vec![dir.path().to_path_buf()], vec![], true)?;

    // First call: exactly the seed, no blocking.
    assert_eq!(source.next_batch()?, vec![seed]);

    // Second call blocks until a qualifying file arrives.
    let watched = dir.path().to_path_buf();
    let writer = thread::spawn(move || {
        thread::sleep(Duration::from_millis(200));
        touch_fast5(&watched, "noise.txt");
        touch_fast5(&watched, "fresh.fast5");
    });

    let batch = source.next_batch()?;
    writer.join().unwrap();

    assert_eq!(batch, vec![dir.path().join("fresh.fast5")]);
    Ok(())
}

#[test]
fn test_empty_seed_blocks_until_first_event() -> Result<()> {
    let dir = TempDir::new()?;
    let mut source = create_input_source(vec![dir.path().to_path_buf()], vec![], true)?;

    let watched = dir.path().to_path_buf();
    let writer = thread::spawn(move || {
        thread::sleep(Duration::from_millis(200));
        touch_fast5(&watched, "first.fast5");
    });

    let batch = source.next_batch()?;
    writer.join().unwrap();

    assert!(!batch.is_empty(), "a watcher batch is never empty");
    assert_eq!(batch, vec![dir.path().join("first.fast5")]);
    Ok(())
}

#[test]
fn test_moved_in_files_are_reported() -> Result<()> {
    let staging = TempDir::new()?;
    let dir = TempDir::new()?;
    let mut source = create_input_source(vec![dir.path().to_path_buf()], vec![], true)?;

    let staged = touch_fast5(staging.path(), "staged.fast5");
    let target = dir.path().join("staged.fast5");
    let rename_target = target.clone();
    let writer = thread::spawn(move || {
        thread::sleep(Duration::from_millis(200));
        fs::rename(staged, rename_target).unwrap();
    });

    let batch = source.next_batch()?;
    writer.join().unwrap();

    assert_eq!(batch, vec![target]);
    Ok(())
}

#[test]
fn test_watcher_is_restartable() -> Result<()> {
    let dir = TempDir::new()?;
    let mut source = create_input_source(vec![dir.path().to_path_buf()], vec![], true)?;

    for round in 0..3 {
        let watched = dir.path().to_path_buf();
        let name = format!("round_{round}.fast5");
        let expected = dir.path().join(&name);
        let writer = thread::spawn(move || {
            thread::sleep(Duration::from_millis(100));
            touch_fast5(&watched, &name);
        });

        let batch = source.next_batch()?;
        writer.join().unwrap();
        assert_eq!(batch, vec![expected], "round {round}");
    }
    Ok(())
}
