//! Output writing
//!
//! Atomic writes via tempfile + rename, SHA-256 content hashing, and the
//! sync/diff layer that keeps regeneration idempotent: byte-identical
//! outputs are left untouched so repeated builds on unchanged input do not
//! dirty the build tree.

use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::{PackError, PackResult};
use crate::models::HeaderFile;

/// Compute the SHA-256 hash of content, `sha256:`-prefixed
pub fn hash_content(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("sha256:{:x}", hasher.finalize())
}

/// Compute the SHA-256 hash of a file
pub fn hash_file(path: &Path) -> PackResult<String> {
    let content = fs::read(path)?;
    Ok(hash_content(&content))
}

/// Write content to a file atomically
///
/// Uses tempfile + rename in the target directory so a crash mid-write never
/// leaves a truncated header behind. Parent directories are created.
pub fn atomic_write(path: &Path, content: &[u8]) -> PackResult<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(content)?;
    tmp.persist(path).map_err(|e| PackError::Io(e.error))?;
    Ok(())
}

/// Check that an output path stays inside the project root
///
/// Absolute paths and `..` components are rejected: a manifest must not be
/// able to write outside the directory it lives in.
pub fn validate_path_safety(path: &Path, root: &Path) -> PackResult<()> {
    if path.is_absolute() {
        return Err(PackError::PathEscape {
            path: path.to_path_buf(),
            root: root.to_path_buf(),
        });
    }
    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(PackError::PathEscape {
            path: path.to_path_buf(),
            root: root.to_path_buf(),
        });
    }
    Ok(())
}

/// Options for sync operations
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Rewrite outputs even when byte-identical
    pub force: bool,
    /// Report without writing
    pub dry_run: bool,
}

/// Result of a sync operation
#[derive(Debug, Clone, Default)]
pub struct SyncResult {
    /// Files written (or that would be written, in dry-run)
    pub written: Vec<String>,
    /// Files skipped because they were already up to date
    pub skipped: Vec<String>,
    /// Errors encountered
    pub errors: Vec<String>,
}

impl SyncResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Status of one would-be output relative to the file on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffStatus {
    /// Output does not exist yet
    New,
    /// Output exists with different content
    Modified,
    /// Output matches exactly
    Unchanged,
}

impl std::fmt::Display for DiffStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiffStatus::New => write!(f, "new"),
            DiffStatus::Modified => write!(f, "modified"),
            DiffStatus::Unchanged => write!(f, "unchanged"),
        }
    }
}

/// Write rendered headers under `root`, skipping up-to-date files
pub fn sync_outputs(
    root: &Path,
    outputs: &[HeaderFile],
    options: &SyncOptions,
) -> PackResult<SyncResult> {
    let mut result = SyncResult::new();

    for output in outputs {
        let rel = output.path().display().to_string();

        if let Err(e) = validate_path_safety(output.path(), root) {
            result.errors.push(e.to_string());
            continue;
        }

        let target = root.join(output.path());
        let existing = fs::read_to_string(&target).ok();

        if !options.force && existing.as_deref() == Some(output.content()) {
            result.skipped.push(rel);
            continue;
        }

        if options.dry_run {
            result.written.push(rel);
            continue;
        }

        match atomic_write(&target, output.content().as_bytes()) {
            Ok(()) => result.written.push(rel),
            Err(e) => result.errors.push(format!("{rel}: {e}")),
        }
    }

    Ok(result)
}

/// Classify each would-be output against the file on disk, without writing
pub fn diff_outputs(root: &Path, outputs: &[HeaderFile]) -> Vec<(PathBuf, DiffStatus)> {
    outputs
        .iter()
        .map(|output| {
            let target = root.join(output.path());
            let status = match fs::read_to_string(&target) {
                Ok(existing) if existing == output.content() => DiffStatus::Unchanged,
                Ok(_) => DiffStatus::Modified,
                Err(_) if target.exists() => DiffStatus::Modified,
                Err(_) => DiffStatus::New,
            };
            (output.path().clone(), status)
        })
        .collect()
}
