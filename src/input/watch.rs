//! Live directory watching over the platform's native change notification.
//!
//! The watcher family shares one contract ([`super::InputSource`]) across
//! three platform backends: inotify on Linux, `ReadDirectoryChangesW` on
//! Windows, and a fail-fast stub everywhere else. The backend is chosen
//! once at construction; call sites only ever see [`DirectoryWatcher`].

use std::mem;
use std::path::{Path, PathBuf};

use log::info;

use crate::errors::Result;
use crate::fast5::is_fast5_path;

use super::{describe_inputs, scan_inputs, InputSource};

/// Platform-specific change notification backend.
///
/// A backend owns all of its watcher's OS watch handles; dropping the
/// backend releases them.
trait WatchBackend: Send {
    /// Registers a non-recursive watch on `directory` for file-created and
    /// file-moved-in events.
    fn register(&mut self, directory: &Path) -> Result<()>;

    /// Blocks until at least one filesystem event arrives, then drains all
    /// events available without further blocking. Returned paths are not
    /// yet filtered by the container extension.
    fn wait(&mut self) -> Result<Vec<PathBuf>>;
}

/// Watches directories for newly arriving container files.
///
/// `initialize` performs the same bounded scan as [`super::BoundedReader`]
/// to seed an initial batch, then registers a watch on each resolved
/// directory. Construction fails fast on platforms with no native backend.
pub struct DirectoryWatcher {
    input_directories: Vec<PathBuf>,
    input_files: Vec<PathBuf>,
    seed: Vec<PathBuf>,
    backend: Box<dyn WatchBackend>,
}

impl DirectoryWatcher {
    /// Creates a watcher over the given directories and explicit files.
    ///
    /// # Errors
    /// Returns [`crate::errors::PorecallError::WatchUnsupported`] on platforms without a
    /// native notification backend, rather than degrading to a watcher
    /// that never fires.
    pub fn new(input_directories: Vec<PathBuf>, input_files: Vec<PathBuf>) -> Result<Self> {
        Ok(Self {
            input_directories,
            input_files,
            seed: Vec::new(),
            backend: platform_backend()?,
        })
    }
}

impl InputSource for DirectoryWatcher {
    fn initialize(&mut self) -> Result<()> {
        let (batch, directories) = scan_inputs(&self.input_directories, &self.input_files)?;
        for directory in &directories {
            self.backend.register(directory)?;
        }
        info!(
            "Watching {} ({} containers already present)",
            describe_inputs(&self.input_directories, &self.input_files),
            batch.len()
        );
        self.seed = batch;
        Ok(())
    }

    /// Returns the next batch, blocking until one is available.
    ///
    /// Timing contract: if the seeded initial batch is non-empty, the first
    /// call returns exactly that seed without consulting the notification
    /// queue. Every other call (including the first when the seed is empty)
    /// blocks until at least one qualifying event arrives, drains whatever
    /// else is already queued, and returns the result as one batch. The
    /// returned batch is never empty, and the method may be called forever.
    fn next_batch(&mut self) -> Result<Vec<PathBuf>> {
        if !self.seed.is_empty() {
            return Ok(mem::take(&mut self.seed));
        }

        loop {
            let batch: Vec<PathBuf> =
                self.backend.wait()?.into_iter().filter(|path| is_fast5_path(path)).collect();
            if !batch.is_empty() {
                return Ok(batch);
            }
        }
    }
}

#[cfg(target_os = "linux")]
fn platform_backend() -> Result<Box<dyn WatchBackend>> {
    Ok(Box::new(linux::InotifyBackend::new()?))
}

#[cfg(windows)]
fn platform_backend() -> Result<Box<dyn WatchBackend>> {
    Ok(Box::new(windows::ChangeJournalBackend::new()?))
}

#[cfg(not(any(target_os = "linux", windows)))]
fn platform_backend() -> Result<Box<dyn WatchBackend>> {
    Err(crate::errors::PorecallError::WatchUnsupported { platform: std::env::consts::OS })
}

#[cfg(target_os = "linux")]
mod linux {
    use std::path::{Path, PathBuf};

    use log::warn;
    use nix::sys::inotify::{AddWatchFlags, InitFlags, Inotify, WatchDescriptor};

    use crate::errors::{PorecallError, Result};

    use super::WatchBackend;

    /// Inotify-based backend. One watch descriptor per directory; the
    /// kernel queue is drained wholesale on each `wait`.
    pub(super) struct InotifyBackend {
        inotify: Inotify,
        watches: Vec<(WatchDescriptor, PathBuf)>,
    }

    impl InotifyBackend {
        pub(super) fn new() -> Result<Self> {
            let inotify = Inotify::init(InitFlags::empty()).map_err(|error| {
                PorecallError::Watch { reason: format!("inotify init failed: {error}") }
            })?;
            Ok(Self { inotify, watches: Vec::new() })
        }
    }

    impl WatchBackend for InotifyBackend {
        fn register(&mut self, directory: &Path) -> Result<()> {
            let mask = AddWatchFlags::IN_CREATE | AddWatchFlags::IN_MOVED_TO;
            let descriptor = self.inotify.add_watch(directory, mask).map_err(|error| {
                PorecallError::Watch {
                    reason: format!(
                        "inotify add watch failed for '{}': {error}",
                        directory.display()
                    ),
                }
            })?;
            self.watches.push((descriptor, directory.to_path_buf()));
            Ok(())
        }

        fn wait(&mut self) -> Result<Vec<PathBuf>> {
            // read_events blocks until the kernel queue is non-empty, then
            // returns everything currently queued.
            let events = self.inotify.read_events().map_err(|error| PorecallError::Watch {
                reason: format!("inotify read failed: {error}"),
            })?;

            let mut paths = Vec::new();
            for event in events {
                if event.mask.contains(AddWatchFlags::IN_Q_OVERFLOW) {
                    warn!("inotify queue overflow; filesystem events may have been lost");
                    continue;
                }
                let Some(name) = event.name else { continue };
                if let Some((_, directory)) =
                    self.watches.iter().find(|(descriptor, _)| *descriptor == event.wd)
                {
                    paths.push(directory.join(name));
                }
            }
            Ok(paths)
        }
    }
}

#[cfg(windows)]
mod windows {
    use std::path::{Path, PathBuf};
    use std::sync::mpsc::{channel, Receiver};

    use log::warn;
    use notify::event::{ModifyKind, RenameMode};
    use notify::{Config, Event, EventKind, ReadDirectoryChangesWatcher, RecursiveMode, Watcher};

    use crate::errors::{PorecallError, Result};

    use super::WatchBackend;

    /// Change-journal backend over `ReadDirectoryChangesW`, delivered
    /// through the notify crate's Windows watcher.
    pub(super) struct ChangeJournalBackend {
        watcher: ReadDirectoryChangesWatcher,
        events: Receiver<notify::Result<Event>>,
    }

    impl ChangeJournalBackend {
        pub(super) fn new() -> Result<Self> {
            let (sender, events) = channel();
            let watcher =
                ReadDirectoryChangesWatcher::new(sender, Config::default()).map_err(|error| {
                    PorecallError::Watch { reason: format!("watcher init failed: {error}") }
                })?;
            Ok(Self { watcher, events })
        }
    }

    /// Keeps the paths of created and moved-in files, matching the event
    /// mask used by the inotify backend.
    fn arrival_paths(event: notify::Result<Event>) -> Vec<PathBuf> {
        match event {
            Ok(event)
                if matches!(
                    event.kind,
                    EventKind::Create(_) | EventKind::Modify(ModifyKind::Name(RenameMode::To))
                ) =>
            {
                event.paths
            }
            Ok(_) => Vec::new(),
            Err(error) => {
                warn!("directory watch event error: {error}");
                Vec::new()
            }
        }
    }

    impl WatchBackend for ChangeJournalBackend {
        fn register(&mut self, directory: &Path) -> Result<()> {
            self.watcher.watch(directory, RecursiveMode::NonRecursive).map_err(|error| {
                PorecallError::Watch {
                    reason: format!("watch failed for '{}': {error}", directory.display()),
                }
            })
        }

        fn wait(&mut self) -> Result<Vec<PathBuf>> {
            let first = self.events.recv().map_err(|_| PorecallError::Watch {
                reason: "watch event channel closed".to_string(),
            })?;

            let mut paths = arrival_paths(first);
            while let Ok(event) = self.events.try_recv() {
                paths.extend(arrival_paths(event));
            }
            Ok(paths)
        }
    }
}
