//! Bulk reorganization of a directory tree into category folders.
//!
//! The organizer walks every regular file under the given path, classifies it
//! by extension, and moves it into `<root>/<Category>`, creating category
//! folders on demand and disambiguating destination names. Files already
//! sitting in their category folder are skipped, which makes repeated runs
//! no-ops. After all moves, a second deepest-first pass soft-deletes category
//! folders that ended up empty, so the cleanup is recoverable from trash.
//!
//! Individual move failures are tallied and skipped; the batch always runs to
//! completion.

use crate::config::CompiledRules;
use crate::file_category::Category;
use crate::fsops;
use crate::naming::resolve_unique;
use crate::trash::{TRASH_DIR_NAME, TrashStore};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Errors that abort an organize run before any file is touched.
#[derive(Debug)]
pub enum OrganizeError {
    /// The organization root is not an existing directory.
    InvalidRoot(PathBuf),
    /// The path to organize is not an existing directory.
    InvalidPath(PathBuf),
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRoot(path) => {
                write!(f, "Root is not an existing directory: {}", path.display())
            }
            Self::InvalidPath(path) => {
                write!(f, "Not an existing directory: {}", path.display())
            }
        }
    }
}

impl std::error::Error for OrganizeError {}

/// Result type for organize runs.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Aggregate statistics of one organize run.
#[derive(Debug, Default)]
pub struct OrganizeReport {
    /// Files successfully moved into category folders.
    pub moved_files: usize,
    /// Total size of moved files, measured after the move.
    pub total_bytes: u64,
    /// Moved-file count per category.
    pub category_counts: HashMap<Category, usize>,
    /// Category folders created by this run.
    pub created_categories: Vec<Category>,
    /// Empty category folders soft-deleted after the moves.
    pub pruned_dirs: usize,
    /// Files that failed to move and were skipped.
    pub failed_moves: usize,
}

impl OrganizeReport {
    /// True when the run neither moved nor failed to move anything.
    pub fn is_noop(&self) -> bool {
        self.moved_files == 0 && self.failed_moves == 0
    }
}

/// Walks a tree and relocates files into category folders under the root.
pub struct Organizer {
    rules: CompiledRules,
}

impl Organizer {
    /// Creates an organizer with the given compiled exclusion rules.
    pub fn new(rules: CompiledRules) -> Self {
        Self { rules }
    }

    /// Organizes everything under `current` into category folders under
    /// `root`.
    ///
    /// See [`Organizer::organize_with_progress`] for the full contract.
    pub fn organize(&self, current: &Path, root: &Path) -> OrganizeResult<OrganizeReport> {
        self.organize_with_progress(current, root, |_, _| {})
    }

    /// Organizes everything under `current`, reporting per-file progress.
    ///
    /// `progress` is called after each file is handled with `(done, total)`.
    /// It is purely observational; it cannot cancel the run.
    ///
    /// The walk excludes anything inside the trash directory and any file
    /// matching the reserved/excluded rules. A file whose parent already is
    /// its category folder is left in place, so a second run with no external
    /// changes moves zero files.
    pub fn organize_with_progress(
        &self,
        current: &Path,
        root: &Path,
        mut progress: impl FnMut(usize, usize),
    ) -> OrganizeResult<OrganizeReport> {
        if !root.is_dir() {
            return Err(OrganizeError::InvalidRoot(root.to_path_buf()));
        }
        if !current.is_dir() {
            return Err(OrganizeError::InvalidPath(current.to_path_buf()));
        }

        let mut report = OrganizeReport::default();
        let files = self.collect_files(current, &mut report);
        let total = files.len();

        for (index, src) in files.iter().enumerate() {
            self.move_one(src, root, &mut report);
            progress(index + 1, total);
        }

        report.pruned_dirs = self.prune_empty_category_dirs(current, root);
        Ok(report)
    }

    /// Enumerates every regular file under `path`, excluding the trash
    /// directory and reserved/excluded files.
    ///
    /// Entries that cannot be read, such as a subdirectory without list
    /// permission, are tallied as failures and skipped; enumeration always
    /// continues.
    fn collect_files(&self, path: &Path, report: &mut OrganizeReport) -> Vec<PathBuf> {
        let mut files = Vec::new();
        let walker = WalkDir::new(path)
            .into_iter()
            .filter_entry(|e| e.file_name() != TRASH_DIR_NAME);

        for entry in walker {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file() && self.rules.should_organize(entry.path()) {
                        files.push(entry.into_path());
                    }
                }
                Err(_) => report.failed_moves += 1,
            }
        }
        files
    }

    /// Handles one file: classify, skip if in place, create the category
    /// folder on first use, move under a collision-free name.
    fn move_one(&self, src: &Path, root: &Path, report: &mut OrganizeReport) {
        let Some(name) = src.file_name().and_then(|n| n.to_str()) else {
            report.failed_moves += 1;
            return;
        };

        let category = Category::for_path(src);
        let target_dir = root.join(category.dir_name());

        // Already organized; leaving it alone keeps repeated runs idempotent.
        if src.parent() == Some(target_dir.as_path()) {
            return;
        }

        if !target_dir.exists() {
            if fs::create_dir_all(&target_dir).is_err() {
                report.failed_moves += 1;
                return;
            }
            report.created_categories.push(category);
        }

        let dest = target_dir.join(resolve_unique(&target_dir, name));
        match fsops::move_item(src, &dest) {
            Ok(()) => {
                report.moved_files += 1;
                report.total_bytes += fs::metadata(&dest).map(|m| m.len()).unwrap_or(0);
                *report.category_counts.entry(category).or_insert(0) += 1;
            }
            Err(_) => report.failed_moves += 1,
        }
    }

    /// Deepest-first cleanup pass: category folders left empty by the run are
    /// soft-deleted to trash so the cleanup stays recoverable.
    ///
    /// Only folders whose base name is one of the fixed category names are
    /// touched; `current` itself and the trash directory never are. Children
    /// are visited before parents so nested empties collapse in one pass.
    fn prune_empty_category_dirs(&self, current: &Path, root: &Path) -> usize {
        let mut store: Option<TrashStore> = None;
        let mut pruned = 0;

        // contents_first yields directories after their children, so the
        // trash exclusion is a per-path component check here rather than a
        // descent filter.
        let walker = WalkDir::new(current).contents_first(true);

        for entry in walker.into_iter().flatten() {
            if !entry.file_type().is_dir() || entry.path() == current {
                continue;
            }
            if in_trash(entry.path()) {
                continue;
            }
            let name = entry.file_name().to_string_lossy();
            if !Category::is_prunable_dir_name(&name) {
                continue;
            }
            if !fsops::is_dir_empty(entry.path()).unwrap_or(false) {
                continue;
            }

            let store = store.get_or_insert_with(|| TrashStore::new(root));
            if store.soft_delete(entry.path()).is_ok() {
                pruned += 1;
            }
        }
        pruned
    }
}

/// True if any component of the path is the trash directory.
fn in_trash(path: &Path) -> bool {
    path.components()
        .any(|c| c.as_os_str() == TRASH_DIR_NAME)
}

impl Default for Organizer {
    fn default() -> Self {
        Self::new(CompiledRules::default())
    }
}
