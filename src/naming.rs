//! Collision-free destination naming.
//!
//! Every move into a directory (trash insertion, restore, category move) goes
//! through [`resolve_unique`] first so that no two entries in a single
//! directory ever share a name. The check is a best-effort pre-check against
//! the filesystem, not a lock: a racing external mutator can still make the
//! subsequent move fail, in which case the move's own error is reported.

use std::path::Path;

/// Returns a name that does not currently exist in `directory`.
///
/// If `desired` is free it is returned unchanged. Otherwise the name is split
/// into stem and extension on the final dot, and `stem_1.ext`, `stem_2.ext`,
/// … are probed in increasing order until a free name is found. There is no
/// upper bound on the counter.
///
/// # Examples
///
/// ```no_run
/// use tidykeep::naming::resolve_unique;
/// use std::path::Path;
///
/// let name = resolve_unique(Path::new("/some/dir"), "report.pdf");
/// assert!(name == "report.pdf" || name.starts_with("report_"));
/// ```
pub fn resolve_unique(directory: &Path, desired: &str) -> String {
    if !directory.join(desired).exists() {
        return desired.to_string();
    }

    let (stem, ext) = split_name(desired);
    let mut counter = 1u64;
    loop {
        let candidate = match ext {
            Some(ext) => format!("{}_{}.{}", stem, counter, ext),
            None => format!("{}_{}", stem, counter),
        };
        if !directory.join(&candidate).exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Splits a file name into stem and extension on the final dot.
///
/// Mirrors `Path::file_stem`/`Path::extension` semantics: `archive.tar.gz`
/// splits into `archive.tar` + `gz`, and dotfiles like `.hidden` have no
/// extension.
fn split_name(name: &str) -> (&str, Option<&str>) {
    let path = Path::new(name);
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or(name);
    let ext = path.extension().and_then(|e| e.to_str());
    (stem, ext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_free_name_returned_unchanged() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        assert_eq!(resolve_unique(temp_dir.path(), "report.pdf"), "report.pdf");
    }

    #[test]
    fn test_collision_appends_counter_before_extension() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("report.pdf"), "x").unwrap();

        assert_eq!(
            resolve_unique(temp_dir.path(), "report.pdf"),
            "report_1.pdf"
        );
    }

    #[test]
    fn test_counter_increments_past_existing_candidates() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("report.pdf"), "x").unwrap();
        fs::write(temp_dir.path().join("report_1.pdf"), "x").unwrap();
        fs::write(temp_dir.path().join("report_2.pdf"), "x").unwrap();

        assert_eq!(
            resolve_unique(temp_dir.path(), "report.pdf"),
            "report_3.pdf"
        );
    }

    #[test]
    fn test_repeated_calls_without_insertion_are_stable() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("notes.txt"), "x").unwrap();

        let first = resolve_unique(temp_dir.path(), "notes.txt");
        let second = resolve_unique(temp_dir.path(), "notes.txt");
        assert_eq!(first, second);
        assert_eq!(first, "notes_1.txt");
    }

    #[test]
    fn test_name_without_extension() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("README"), "x").unwrap();

        assert_eq!(resolve_unique(temp_dir.path(), "README"), "README_1");
    }

    #[test]
    fn test_multi_part_extension_splits_on_final_dot() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join("backup.tar.gz"), "x").unwrap();

        assert_eq!(
            resolve_unique(temp_dir.path(), "backup.tar.gz"),
            "backup.tar_1.gz"
        );
    }

    #[test]
    fn test_dotfile_has_no_extension() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::write(temp_dir.path().join(".hidden"), "x").unwrap();

        assert_eq!(resolve_unique(temp_dir.path(), ".hidden"), ".hidden_1");
    }

    #[test]
    fn test_collision_with_directory_entry() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::create_dir(temp_dir.path().join("sub")).unwrap();

        assert_eq!(resolve_unique(temp_dir.path(), "sub"), "sub_1");
    }
}
