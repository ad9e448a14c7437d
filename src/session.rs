//! Explicit per-root session context.
//!
//! The presentation layer keeps no process-wide globals; everything it needs
//! (root scope, current browse position, notes, trash access) hangs off a
//! [`Session`]. Opening a session validates the root, initializes the trash
//! store, and runs the age-based sweep once, which is the only trigger the
//! sweep has.

use crate::trash::{RETENTION, SweepReport, TRASH_DIR_NAME, TrashStore};
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};
use std::time::{Duration, SystemTime};

/// Errors surfaced by session operations.
#[derive(Debug)]
pub enum SessionError {
    /// The given path is not an existing, browsable directory.
    NotADirectory(PathBuf),
    /// A filesystem failure while listing or writing.
    Io { path: PathBuf, source: io::Error },
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotADirectory(path) => {
                write!(f, "Not a browsable directory: {}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "Filesystem error on {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for SessionError {}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Directory contents split the way the browser renders them.
#[derive(Debug, Default)]
pub struct Listing {
    /// Subdirectory names, sorted; the trash directory is never shown.
    pub folders: Vec<String>,
    /// File names, sorted.
    pub files: Vec<String>,
}

/// A browsing session scoped to one root directory.
pub struct Session {
    root: PathBuf,
    current: PathBuf,
    sweep_report: SweepReport,
}

impl Session {
    /// Opens a session on `root` with the default 30-day trash retention.
    ///
    /// Validates that the path is an existing directory, canonicalizes it,
    /// ensures the trash directory exists, and sweeps out entries past the
    /// retention window.
    pub fn open(root: &Path) -> SessionResult<Self> {
        Self::open_with_retention(root, RETENTION)
    }

    /// Opens a session sweeping with a caller-supplied retention window.
    pub fn open_with_retention(root: &Path, retention: Duration) -> SessionResult<Self> {
        if !root.is_dir() {
            return Err(SessionError::NotADirectory(root.to_path_buf()));
        }
        let root = fs::canonicalize(root).map_err(|e| SessionError::Io {
            path: root.to_path_buf(),
            source: e,
        })?;

        let store = TrashStore::new(&root);
        let sweep_report = match SystemTime::now().checked_sub(retention) {
            Some(cutoff) => store.sweep_before(cutoff),
            None => SweepReport::default(),
        };

        Ok(Self {
            current: root.clone(),
            root,
            sweep_report,
        })
    }

    /// The root scope of this session.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The directory currently being browsed.
    pub fn current(&self) -> &Path {
        &self.current
    }

    /// What the sweep at open time purged and retained.
    pub fn sweep_report(&self) -> SweepReport {
        self.sweep_report
    }

    /// A trash store scoped to this session's root.
    pub fn trash(&self) -> TrashStore {
        TrashStore::new(&self.root)
    }

    /// Descends into a subdirectory of the current directory.
    ///
    /// `name` must be a single plain component: separators and parent
    /// references are rejected, so browsing can never leave the root scope.
    /// The trash directory is not browsable.
    pub fn enter(&mut self, name: &str) -> SessionResult<()> {
        let target = self.current.join(name);
        let mut components = Path::new(name).components();
        let is_plain = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !is_plain || name == TRASH_DIR_NAME || !target.is_dir() {
            return Err(SessionError::NotADirectory(target));
        }
        self.current = target;
        Ok(())
    }

    /// Moves up one directory, clamped at the root.
    pub fn up(&mut self) {
        if self.current != self.root
            && let Some(parent) = self.current.parent()
        {
            self.current = parent.to_path_buf();
        }
    }

    /// Jumps back to the root.
    pub fn home(&mut self) {
        self.current = self.root.clone();
    }

    /// Lists the current directory, split into folders and files.
    pub fn list(&self) -> SessionResult<Listing> {
        let entries = fs::read_dir(&self.current).map_err(|e| SessionError::Io {
            path: self.current.clone(),
            source: e,
        })?;

        let mut listing = Listing::default();
        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().to_string();
            match entry.file_type() {
                Ok(t) if t.is_dir() => {
                    if name != TRASH_DIR_NAME {
                        listing.folders.push(name);
                    }
                }
                Ok(t) if t.is_file() => listing.files.push(name),
                _ => {}
            }
        }
        listing.folders.sort();
        listing.files.sort();
        Ok(listing)
    }

    /// Appends a timestamped entry to `<root>/notes.txt`.
    ///
    /// The notes file is append-only freeform text; the organizer reserves
    /// its name and never moves it.
    pub fn append_note(&self, text: &str) -> SessionResult<()> {
        let notes_path = self.root.join("notes.txt");
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&notes_path)
            .map_err(|e| SessionError::Io {
                path: notes_path.clone(),
                source: e,
            })?;

        write!(file, "\n--- {} ---\n{}\n", timestamp, text).map_err(|e| SessionError::Io {
            path: notes_path,
            source: e,
        })
    }
}
