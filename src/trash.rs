//! Recoverable per-root trash store.
//!
//! Deletions from the browsing layer are soft deletes: the item is moved into
//! a hidden `.tidykeep_Trash` directory directly under the root, keeping its
//! base name (disambiguated on collision). Entries can be restored, purged
//! individually, purged wholesale, or swept automatically once they are older
//! than 30 days. The sweep runs when a root is opened, not on a timer.
//!
//! Every operation returns a typed result instead of silently swallowing
//! failures, so callers can log or surface what went wrong. The default
//! caller behavior stays best-effort: a failed entry is reported and skipped,
//! nothing is rolled back.

use crate::fsops;
use crate::naming::resolve_unique;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// Name of the hidden trash directory created under each root.
pub const TRASH_DIR_NAME: &str = ".tidykeep_Trash";

/// How long trash entries are kept before the sweep purges them.
pub const RETENTION: Duration = Duration::from_secs(30 * 86_400);

/// Errors surfaced by trash operations.
#[derive(Debug)]
pub enum TrashError {
    /// The item or entry no longer exists (raced with an external change).
    NotFound(PathBuf),
    /// Access was denied even after clearing the read-only attribute.
    PermissionDenied(PathBuf),
    /// Any other filesystem failure.
    Io { path: PathBuf, source: io::Error },
}

impl std::fmt::Display for TrashError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "Not found: {}", path.display()),
            Self::PermissionDenied(path) => {
                write!(f, "Permission denied: {}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "Filesystem error on {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for TrashError {}

/// Result type for trash operations.
pub type TrashResult<T> = Result<T, TrashError>;

/// A direct child of the trash directory.
#[derive(Debug, Clone)]
pub struct TrashEntry {
    /// Entry name within the trash directory (its identity).
    pub name: String,
    /// Modification time, used for age-based sweeping.
    pub modified: SystemTime,
    /// Whether the entry is a directory.
    pub is_dir: bool,
}

impl TrashEntry {
    /// Age of the entry, saturating to zero for future timestamps.
    pub fn age(&self) -> Duration {
        self.modified.elapsed().unwrap_or(Duration::ZERO)
    }

    /// Whole days since the entry was last modified.
    pub fn age_days(&self) -> u64 {
        self.age().as_secs() / 86_400
    }
}

/// Outcome of an age-based sweep. Per-entry failures never abort the sweep.
#[derive(Debug, Default, Clone, Copy)]
pub struct SweepReport {
    /// Entries purged for being older than the cutoff.
    pub purged: usize,
    /// Entries still within the retention window.
    pub retained: usize,
    /// Entries that could not be inspected or removed and were skipped.
    pub skipped: usize,
}

/// Manages the hidden trash directory of a single root.
pub struct TrashStore {
    root: PathBuf,
    trash_dir: PathBuf,
}

impl TrashStore {
    /// Opens the trash store for `root`, creating the hidden trash directory
    /// if it does not exist yet.
    ///
    /// Initialization is idempotent and best-effort: a creation failure is
    /// swallowed here, and the operations that need the directory will fail
    /// individually later.
    pub fn new(root: &Path) -> Self {
        let store = Self {
            root: root.to_path_buf(),
            trash_dir: root.join(TRASH_DIR_NAME),
        };
        store.init();
        store
    }

    /// Path of the trash directory under this root.
    pub fn trash_dir(&self) -> &Path {
        &self.trash_dir
    }

    /// Ensures the trash directory exists; marks it hidden on Windows.
    fn init(&self) {
        if self.trash_dir.exists() {
            return;
        }
        if fs::create_dir_all(&self.trash_dir).is_ok() {
            self.mark_hidden();
        }
    }

    #[cfg(windows)]
    fn mark_hidden(&self) {
        // The dot prefix is not enough on Windows; set the hidden attribute.
        let _ = std::process::Command::new("attrib")
            .arg("+h")
            .arg(&self.trash_dir)
            .status();
    }

    #[cfg(not(windows))]
    fn mark_hidden(&self) {}

    /// Moves a file or directory into the trash, returning its new path.
    ///
    /// The entry keeps its base name, disambiguated against the current trash
    /// contents. A permission failure clears the read-only attribute on the
    /// source and retries the move once.
    pub fn soft_delete(&self, item: &Path) -> TrashResult<PathBuf> {
        let name = item
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| TrashError::Io {
                path: item.to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "item has no name component"),
            })?;

        self.init();
        let dest = self.trash_dir.join(resolve_unique(&self.trash_dir, name));

        match fsops::move_item(item, &dest) {
            Ok(()) => Ok(dest),
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                let _ = fsops::clear_readonly(item);
                fsops::move_item(item, &dest)
                    .map(|_| dest)
                    .map_err(|e| classify(item, e))
            }
            Err(e) => Err(classify(item, e)),
        }
    }

    /// Moves a trash entry back under the root.
    ///
    /// The original name is used when still free, otherwise a disambiguated
    /// one. Returns the restored path.
    pub fn restore(&self, entry_name: &str) -> TrashResult<PathBuf> {
        let source = self.trash_dir.join(entry_name);
        if !source.exists() {
            return Err(TrashError::NotFound(source));
        }

        let dest = self.root.join(resolve_unique(&self.root, entry_name));
        fsops::move_item(&source, &dest)
            .map(|_| dest)
            .map_err(|e| classify(&source, e))
    }

    /// Permanently removes a single trash entry, overriding read-only
    /// attributes that would block deletion.
    pub fn purge_one(&self, entry_name: &str) -> TrashResult<()> {
        let target = self.trash_dir.join(entry_name);
        fsops::remove_all_force(&target).map_err(|e| classify(&target, e))
    }

    /// Empties the trash: removes the whole trash directory and re-creates an
    /// empty one.
    pub fn purge_all(&self) -> TrashResult<()> {
        if self.trash_dir.exists() {
            fsops::remove_all_force(&self.trash_dir).map_err(|e| classify(&self.trash_dir, e))?;
        }
        self.init();
        Ok(())
    }

    /// Purges every entry older than the 30-day retention window.
    pub fn sweep(&self) -> SweepReport {
        match SystemTime::now().checked_sub(RETENTION) {
            Some(cutoff) => self.sweep_before(cutoff),
            None => SweepReport::default(),
        }
    }

    /// Purges every entry whose modification time is strictly older than
    /// `cutoff`. Entries that fail to be inspected or removed are skipped and
    /// the sweep continues.
    pub fn sweep_before(&self, cutoff: SystemTime) -> SweepReport {
        let mut report = SweepReport::default();
        let entries = match fs::read_dir(&self.trash_dir) {
            Ok(entries) => entries,
            Err(_) => return report,
        };

        for entry in entries.flatten() {
            let modified = entry.metadata().and_then(|m| m.modified());
            match modified {
                Ok(modified) if modified < cutoff => {
                    if fsops::remove_all_force(&entry.path()).is_ok() {
                        report.purged += 1;
                    } else {
                        report.skipped += 1;
                    }
                }
                Ok(_) => report.retained += 1,
                Err(_) => report.skipped += 1,
            }
        }
        report
    }

    /// Lists the direct children of the trash directory, sorted by name.
    ///
    /// A missing trash directory reads as an empty trash.
    pub fn entries(&self) -> TrashResult<Vec<TrashEntry>> {
        let read = match fs::read_dir(&self.trash_dir) {
            Ok(read) => read,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(classify(&self.trash_dir, e)),
        };

        let mut entries = Vec::new();
        for entry in read.flatten() {
            let meta = match entry.metadata() {
                Ok(meta) => meta,
                Err(_) => continue,
            };
            entries.push(TrashEntry {
                name: entry.file_name().to_string_lossy().to_string(),
                modified: meta.modified().unwrap_or(SystemTime::UNIX_EPOCH),
                is_dir: meta.is_dir(),
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

fn classify(path: &Path, e: io::Error) -> TrashError {
    match e.kind() {
        io::ErrorKind::NotFound => TrashError::NotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => TrashError::PermissionDenied(path.to_path_buf()),
        _ => TrashError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    }
}
