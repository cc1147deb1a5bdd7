//! File watcher for continuous regeneration
//!
//! Implements the `watch` command with:
//! - Debouncing (200ms)
//! - Content-hash filtering (ignores IDE auto-save noise)
//! - Full rebuild per change batch (headers are small; no partial rebuilds)
//! - Graceful Ctrl+C shutdown
//! - NDJSON output for CI

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::{Duration, Instant};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::encoder::encode_assets;
use crate::error::{PackError, PackResult};
use crate::manifest::Manifest;
use crate::writer::{hash_content, sync_outputs, SyncOptions, SyncResult};

/// Debounce duration in milliseconds
pub const DEBOUNCE_MS: u64 = 200;

/// Watch options
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Path to the manifest file
    pub manifest_path: PathBuf,
    /// Project root (parent of the manifest)
    pub root: PathBuf,
}

/// Watch event types for NDJSON output
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchEvent {
    WatchStarted {
        root: String,
    },
    FileChanged {
        path: String,
    },
    BuildStarted,
    BuildComplete {
        written: usize,
        skipped: usize,
        errors: usize,
    },
    Error {
        message: String,
    },
    Shutdown,
}

impl WatchEvent {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Watcher state for debouncing
struct WatcherState {
    pending_changes: HashSet<PathBuf>,
    last_change: Option<Instant>,
}

impl WatcherState {
    fn new() -> Self {
        Self {
            pending_changes: HashSet::new(),
            last_change: None,
        }
    }

    fn add_change(&mut self, path: PathBuf) {
        self.pending_changes.insert(path);
        self.last_change = Some(Instant::now());
    }

    fn should_build(&self) -> bool {
        if let Some(last) = self.last_change {
            !self.pending_changes.is_empty() && last.elapsed() >= Duration::from_millis(DEBOUNCE_MS)
        } else {
            false
        }
    }

    fn take_changes(&mut self) -> Vec<PathBuf> {
        let changes: Vec<_> = self.pending_changes.drain().collect();
        self.last_change = None;
        changes
    }
}

/// Paths the watcher reacts to: every manifest source plus the manifest itself
fn watched_paths(options: &WatchOptions) -> PackResult<HashSet<PathBuf>> {
    let (manifest, _) = Manifest::load_or_default(&options.manifest_path)?;
    let mut paths = HashSet::new();
    paths.insert(canonical_or(&options.manifest_path));
    for asset in manifest.resolve_assets()? {
        paths.insert(canonical_or(&options.root.join(&asset.source)));
    }
    Ok(paths)
}

fn canonical_or(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

fn do_build(options: &WatchOptions, callback: &impl Fn(WatchEvent)) -> PackResult<SyncResult> {
    callback(WatchEvent::BuildStarted);

    let result = match perform_build(options) {
        Ok(result) => result,
        Err(e) => {
            callback(WatchEvent::Error {
                message: e.to_string(),
            });
            return Err(e);
        }
    };

    callback(WatchEvent::BuildComplete {
        written: result.written.len(),
        skipped: result.skipped.len(),
        errors: result.errors.len(),
    });

    Ok(result)
}

fn perform_build(options: &WatchOptions) -> PackResult<SyncResult> {
    let (manifest, _) = Manifest::load_or_default(&options.manifest_path)?;
    let encoded = encode_assets(&manifest, &options.root)?;
    let headers: Vec<_> = encoded.into_iter().map(|e| e.header).collect();
    sync_outputs(&options.root, &headers, &SyncOptions::default())
}

/// Start watching for file changes
///
/// A change to any source (or the manifest) triggers a full rebuild. Errors
/// during a rebuild are reported through the callback but do not stop the
/// watch loop; a later save can fix the problem.
pub fn watch(
    options: WatchOptions,
    running: Arc<AtomicBool>,
    event_callback: impl Fn(WatchEvent),
) -> PackResult<()> {
    event_callback(WatchEvent::WatchStarted {
        root: options.root.display().to_string(),
    });

    // Initial full build; failure here is fatal (bad manifest, missing source).
    do_build(&options, &event_callback)?;

    let (tx, rx) = channel();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                for path in event.paths {
                    let _ = tx.send(path);
                }
            }
        },
        Config::default(),
    )
    .map_err(|e| PackError::Io(std::io::Error::other(e.to_string())))?;

    watcher
        .watch(&options.root, RecursiveMode::Recursive)
        .map_err(|e| PackError::Io(std::io::Error::other(e.to_string())))?;

    let mut state = WatcherState::new();
    let mut sources = watched_paths(&options)?;
    let mut content_hashes: HashMap<PathBuf, String> = HashMap::new();

    // Startup cooldown: drain any initial events from notify (it sometimes
    // sends events for existing files when the watcher is first registered).
    let cooldown_end = Instant::now() + Duration::from_millis(500);
    while Instant::now() < cooldown_end {
        let _ = rx.recv_timeout(Duration::from_millis(50));
    }

    while running.load(Ordering::SeqCst) {
        if let Ok(path) = rx.recv_timeout(Duration::from_millis(50)) {
            let canonical = canonical_or(&path);

            // Generated headers also live under root; reacting to them would
            // loop forever. Only manifest sources and the manifest count.
            if sources.contains(&canonical) {
                if let Ok(content) = std::fs::read(&canonical) {
                    let new_hash = hash_content(&content);
                    if content_hashes.get(&canonical) == Some(&new_hash) {
                        continue;
                    }
                    content_hashes.insert(canonical.clone(), new_hash);
                    state.add_change(canonical);
                }
            }
        }

        if state.should_build() {
            for path in state.take_changes() {
                event_callback(WatchEvent::FileChanged {
                    path: path.display().to_string(),
                });
            }
            // Rebuild errors are reported via the callback; keep watching.
            let _ = do_build(&options, &event_callback);
            // Manifest edits may add or remove sources.
            if let Ok(updated) = watched_paths(&options) {
                sources = updated;
            }
        }
    }

    event_callback(WatchEvent::Shutdown);
    Ok(())
}
