//! Watch
//!
//! Change notification for watch mode. The strategy is pluggable; the
//! session only relies on newly appeared or modified sources eventually
//! reaching a registered callback.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use crate::config::WatchStrategyKind;
use crate::discovery::SourceDiscovery;
use crate::error::PolyfillError;

/// File change event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChangeEvent {
    /// File was created.
    Created(PathBuf),
    /// File was modified.
    Modified(PathBuf),
    /// File was deleted.
    Deleted(PathBuf),
}

impl FileChangeEvent {
    pub fn path(&self) -> &PathBuf {
        match self {
            FileChangeEvent::Created(p)
            | FileChangeEvent::Modified(p)
            | FileChangeEvent::Deleted(p) => p,
        }
    }
}

/// What one detection round saw. A round with errors still carries every
/// change it could detect.
#[derive(Debug, Default)]
pub struct WatchRound {
    pub changes: Vec<FileChangeEvent>,
    pub errors: Vec<PolyfillError>,
}

/// Receives the paths of sources that appeared or changed in one round.
pub type ChangeCallback = Box<dyn FnMut(&[PathBuf]) + Send>;

pub trait WatchStrategy {
    fn register(&mut self, callback: ChangeCallback);

    /// Take a baseline so that already known files are not reported.
    /// Returns the errors seen while doing so.
    fn prime(&mut self) -> Vec<PolyfillError> {
        Vec::new()
    }

    /// Run one detection round, notifying callbacks of created/modified sources.
    fn poll_once(&mut self) -> WatchRound;

    /// Whether this strategy can ever report a change.
    fn is_active(&self) -> bool {
        true
    }
}

/// Detects changes by comparing modification times between rounds.
pub struct PollingWatcher {
    discovery: SourceDiscovery,
    file_times: HashMap<PathBuf, SystemTime>,
    callbacks: Vec<ChangeCallback>,
}

impl PollingWatcher {
    pub fn new(discovery: SourceDiscovery) -> Self {
        Self {
            discovery,
            file_times: HashMap::new(),
            callbacks: Vec::new(),
        }
    }

    fn scan(&mut self) -> WatchRound {
        let discovered = match self.discovery.discover() {
            Ok(discovered) => discovered,
            Err(err) => {
                return WatchRound {
                    changes: Vec::new(),
                    errors: vec![err],
                }
            }
        };
        let complete = discovered.is_complete();
        let mut changes = Vec::new();
        let mut present = HashSet::new();

        for file in discovered.paths {
            let Ok(modified) = std::fs::metadata(&file).and_then(|m| m.modified()) else {
                continue;
            };
            present.insert(file.clone());
            match self.file_times.insert(file.clone(), modified) {
                None => changes.push(FileChangeEvent::Created(file)),
                Some(prev_time) if modified != prev_time => {
                    changes.push(FileChangeEvent::Modified(file))
                }
                Some(_) => {}
            }
        }

        // A partial walk cannot tell a deleted file from an unreadable one.
        if complete {
            let mut deleted: Vec<PathBuf> = self
                .file_times
                .keys()
                .filter(|file| !present.contains(*file))
                .cloned()
                .collect();
            deleted.sort();
            for file in deleted {
                self.file_times.remove(&file);
                changes.push(FileChangeEvent::Deleted(file));
            }
        }

        WatchRound {
            changes,
            errors: discovered.errors,
        }
    }
}

impl WatchStrategy for PollingWatcher {
    fn register(&mut self, callback: ChangeCallback) {
        self.callbacks.push(callback);
    }

    fn prime(&mut self) -> Vec<PolyfillError> {
        self.scan().errors
    }

    fn poll_once(&mut self) -> WatchRound {
        let round = self.scan();
        let appeared: Vec<PathBuf> = round
            .changes
            .iter()
            .filter(|change| !matches!(change, FileChangeEvent::Deleted(_)))
            .map(|change| change.path().clone())
            .collect();
        if !appeared.is_empty() {
            for callback in &mut self.callbacks {
                callback(&appeared);
            }
        }
        round
    }
}

/// Never reports anything; used when watching is disabled.
#[derive(Debug, Default)]
pub struct NoopWatcher;

impl WatchStrategy for NoopWatcher {
    fn register(&mut self, _callback: ChangeCallback) {}

    fn poll_once(&mut self) -> WatchRound {
        WatchRound::default()
    }

    fn is_active(&self) -> bool {
        false
    }
}

pub fn create_watcher(kind: WatchStrategyKind, discovery: SourceDiscovery) -> Box<dyn WatchStrategy> {
    match kind {
        WatchStrategyKind::Poll => Box::new(PollingWatcher::new(discovery)),
        WatchStrategyKind::None => Box::new(NoopWatcher),
    }
}

/// Poll `watcher` every `interval`, handing each round to `after_round`.
/// Failed rounds are handed over too; the loop keeps going. Runs forever
/// when `max_rounds` is `None`.
pub fn watch_loop<W, F>(
    watcher: &mut W,
    interval: Duration,
    max_rounds: Option<usize>,
    mut after_round: F,
) where
    W: WatchStrategy + ?Sized,
    F: FnMut(&WatchRound),
{
    let mut round = 0;
    loop {
        if max_rounds.is_some_and(|max| round >= max) {
            break;
        }
        if round > 0 {
            std::thread::sleep(interval);
        }
        after_round(&watcher.poll_once());
        round += 1;
    }
}
