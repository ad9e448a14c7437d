//! Low-level filesystem primitives shared by the trash store and organizer.
//!
//! Moves prefer a plain rename and fall back to copy-then-delete when the
//! destination is on a different device. Deletions can override read-only
//! attributes, matching the behavior of the host trash tooling this crate
//! replaces. A failed move either errors before touching anything or leaves
//! the source in place; there is no rollback beyond that.

use std::fs;
use std::io;
use std::path::Path;

/// Moves a file or directory (recursively) to `dest`.
///
/// Tries `fs::rename` first. If the rename fails because the destination is
/// on another filesystem, the item is copied and the source removed.
pub fn move_item(src: &Path, dest: &Path) -> io::Result<()> {
    match fs::rename(src, dest) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            if src.is_dir() {
                copy_dir_recursive(src, dest)?;
                fs::remove_dir_all(src)
            } else {
                fs::copy(src, dest)?;
                fs::remove_file(src)
            }
        }
        Err(e) => Err(e),
    }
}

/// Clears the read-only attribute on a single path.
pub fn clear_readonly(path: &Path) -> io::Result<()> {
    let mut perms = fs::metadata(path)?.permissions();
    #[allow(clippy::permissions_set_readonly_false)]
    perms.set_readonly(false);
    fs::set_permissions(path, perms)
}

/// Permanently removes a file or directory tree, overriding read-only
/// attributes that would otherwise block deletion.
pub fn remove_all_force(path: &Path) -> io::Result<()> {
    let meta = fs::symlink_metadata(path)?;
    if meta.is_dir() {
        match fs::remove_dir_all(path) {
            Ok(()) => Ok(()),
            Err(_) => {
                clear_readonly_recursive(path);
                fs::remove_dir_all(path)
            }
        }
    } else {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                clear_readonly(path)?;
                fs::remove_file(path)
            }
            Err(e) => Err(e),
        }
    }
}

/// Returns true if the directory has no entries.
pub fn is_dir_empty(path: &Path) -> io::Result<bool> {
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Best-effort pass clearing read-only bits on every entry under `path`.
fn clear_readonly_recursive(path: &Path) {
    let _ = clear_readonly(path);
    for entry in walkdir::WalkDir::new(path).into_iter().flatten() {
        let _ = clear_readonly(entry.path());
    }
}

fn copy_dir_recursive(src: &Path, dest: &Path) -> io::Result<()> {
    fs::create_dir_all(dest)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_recursive(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_move_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let src = temp_dir.path().join("a.txt");
        let dest = temp_dir.path().join("b.txt");
        fs::write(&src, "content").unwrap();

        move_item(&src, &dest).expect("Move failed");

        assert!(!src.exists());
        assert_eq!(fs::read_to_string(&dest).unwrap(), "content");
    }

    #[test]
    fn test_move_directory_keeps_contents() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let src = temp_dir.path().join("dir");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("inner.txt"), "inner").unwrap();

        let dest = temp_dir.path().join("moved");
        move_item(&src, &dest).expect("Move failed");

        assert!(!src.exists());
        assert_eq!(fs::read_to_string(dest.join("inner.txt")).unwrap(), "inner");
    }

    #[test]
    fn test_move_missing_source_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let result = move_item(
            &temp_dir.path().join("ghost.txt"),
            &temp_dir.path().join("dest.txt"),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_remove_all_force_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file = temp_dir.path().join("victim.txt");
        fs::write(&file, "x").unwrap();

        remove_all_force(&file).expect("Remove failed");
        assert!(!file.exists());
    }

    #[test]
    fn test_remove_all_force_readonly_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file = temp_dir.path().join("locked.txt");
        fs::write(&file, "x").unwrap();

        let mut perms = fs::metadata(&file).unwrap().permissions();
        perms.set_readonly(true);
        fs::set_permissions(&file, perms).unwrap();

        remove_all_force(&file).expect("Remove failed");
        assert!(!file.exists());
    }

    #[test]
    fn test_remove_all_force_directory_tree() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let dir = temp_dir.path().join("tree");
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("nested").join("deep.txt"), "x").unwrap();

        remove_all_force(&dir).expect("Remove failed");
        assert!(!dir.exists());
    }

    #[test]
    fn test_is_dir_empty() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        assert!(is_dir_empty(temp_dir.path()).unwrap());

        fs::write(temp_dir.path().join("f"), "x").unwrap();
        assert!(!is_dir_empty(temp_dir.path()).unwrap());
    }
}
