//! The integrator's pull-execute-write loop, end to end.

use std::sync::Arc;

use anyhow::Result;
use tempfile::TempDir;

use porecall::testutil::MockBasecaller;
use porecall::{create_input_source, create_task_executor, Fast5Source, OutputWriter};

use crate::helpers::{fixture_source, init_logging, read_ids, touch_fast5, CollectingWriter};

#[test]
fn test_bounded_run_end_to_end() -> Result<()> {
    init_logging();
    let dir = TempDir::new()?;
    let multi = touch_fast5(dir.path(), "multi.fast5");
    let single_a = touch_fast5(dir.path(), "single_a.fast5");
    let single_b = touch_fast5(dir.path(), "single_b.fast5");
    touch_fast5(dir.path(), "sequencing_summary.txt");

    let container_source: Arc<dyn Fast5Source> =
        Arc::new(fixture_source(&multi, &single_a, &single_b));

    // The integrator's wiring: input source, executor, injected caller.
    let mut input = create_input_source(vec![dir.path().to_path_buf()], vec![], false)?;
    let mut executor = create_task_executor(container_source, 4);
    executor.set_caller(Arc::new(MockBasecaller::new("ACGT", "!!!!")));
    let mut writer = CollectingWriter::default();

    // One bounded iteration of the processing loop.
    let tasks = input.next_batch()?;
    let outcome = executor.execute_task_batch(&tasks)?;
    writer.write_batch(&outcome.records)?;

    assert!(outcome.is_complete());
    assert_eq!(writer.batches, 1);
    assert_eq!(read_ids(&writer.records), vec!["r1", "r2", "sa", "sb"]);
    assert!(writer.records.iter().all(|record| record.quality == "!!!!"));
    Ok(())
}

#[cfg(target_os = "linux")]
#[test]
fn test_watched_run_processes_batches_as_they_arrive() -> Result<()> {
    use std::thread;
    use std::time::Duration;

    init_logging();
    let dir = TempDir::new()?;
    let multi = touch_fast5(dir.path(), "multi.fast5");
    let late = dir.path().join("late.fast5");

    let mut container_source = fixture_source(
        &multi,
        "unused_a.fast5".as_ref(),
        "unused_b.fast5".as_ref(),
    );
    container_source.insert(
        &late,
        porecall::testutil::MemoryContainer::single(
            "late_read",
            porecall::testutil::raw_read("run-2", 9, "104"),
        ),
    );
    let container_source: Arc<dyn Fast5Source> = Arc::new(container_source);

    let mut input = create_input_source(vec![dir.path().to_path_buf()], vec![], true)?;
    let mut executor = create_task_executor(container_source, 2);
    executor.set_caller(Arc::new(MockBasecaller::default()));
    let mut writer = CollectingWriter::default();

    let watched = dir.path().to_path_buf();
    let producer = thread::spawn(move || {
        thread::sleep(Duration::from_millis(200));
        touch_fast5(&watched, "late.fast5");
    });

    // Two iterations of the endless watch loop: the seed, then the arrival.
    for _ in 0..2 {
        let tasks = input.next_batch()?;
        let outcome = executor.execute_task_batch(&tasks)?;
        writer.write_batch(&outcome.records)?;
    }
    producer.join().unwrap();

    assert_eq!(writer.batches, 2);
    assert_eq!(read_ids(&writer.records), vec!["late_read", "r1", "r2"]);
    Ok(())
}
