//! Command-line interface for tidykeep.
//!
//! Every invocation names the root folder first, then the operation:
//! browsing, organizing, soft-deleting, trash maintenance, or notes. Opening
//! the root also triggers the age-based trash sweep, so stale entries vanish
//! on any command.
//!
//! Failures on individual items are reported and skipped; only conditions
//! that prevent the command from starting at all (missing root, broken
//! config) abort the run.

use crate::config::AppConfig;
use crate::organizer::Organizer;
use crate::output::OutputFormatter;
use crate::session::Session;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Organize a folder tree into category subdirectories with a recoverable
/// 30-day trash.
#[derive(Debug, Parser)]
#[command(name = "tidykeep", version)]
pub struct Cli {
    /// Root folder to operate on.
    pub root: PathBuf,

    /// Path to a configuration file (defaults to .tidykeeprc.toml or
    /// ~/.config/tidykeep/config.toml when present).
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Operations on a root folder.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Move every file under the root into its category folder.
    Organize {
        /// Organize only this subfolder (relative to the root).
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// List folders and files.
    List {
        /// List this subfolder (relative to the root) instead of the root.
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Soft-delete a file or folder into the trash.
    Delete {
        /// Item to delete, relative to the root.
        path: PathBuf,
    },
    /// Inspect or maintain the trash.
    #[command(subcommand)]
    Trash(TrashCommand),
    /// Purge trash entries older than the retention window.
    Sweep,
    /// Append a timestamped entry to the root's notes file.
    Note {
        /// Text of the note.
        text: String,
    },
}

/// Trash maintenance operations.
#[derive(Debug, Subcommand)]
pub enum TrashCommand {
    /// List trash entries with their ages.
    List,
    /// Move a trash entry back to the root.
    Restore {
        /// Entry name within the trash.
        name: String,
    },
    /// Permanently delete a single trash entry.
    Purge {
        /// Entry name within the trash.
        name: String,
    },
    /// Permanently delete every trash entry.
    Empty,
}

/// Runs a parsed CLI invocation.
///
/// This is the single entry point for the binary; errors come back as
/// human-readable strings for the caller to print.
pub fn run_cli(cli: Cli) -> Result<(), String> {
    let config = AppConfig::load(cli.config.as_deref())
        .map_err(|e| format!("Error loading configuration: {}", e))?;
    let rules = config
        .compile()
        .map_err(|e| format!("Error compiling configuration: {}", e))?;

    let mut session = Session::open_with_retention(&cli.root, rules.retention())
        .map_err(|e| e.to_string())?;

    let swept = session.sweep_report();
    if swept.purged > 0 {
        OutputFormatter::info(&format!(
            "Swept {} expired trash entr{} (older than {} days).",
            swept.purged,
            if swept.purged == 1 { "y" } else { "ies" },
            rules.retention().as_secs() / 86_400
        ));
    }

    match cli.command {
        Command::Organize { path } => {
            let target = resolve_subdir(&session, path.as_deref())?;
            OutputFormatter::info(&format!("Organizing contents of: {}", target.display()));

            let pb = OutputFormatter::create_progress_bar(0);
            let report = Organizer::new(rules)
                .organize_with_progress(&target, session.root(), |done, total| {
                    pb.set_length(total as u64);
                    pb.set_position(done as u64);
                })
                .map_err(|e| e.to_string())?;
            pb.finish_and_clear();

            if report.is_noop() {
                OutputFormatter::success("Nothing to organize; everything is already in place.");
            } else {
                OutputFormatter::success(&format!("Organized {} file(s).", report.moved_files));
                OutputFormatter::organize_summary(&report);
            }
            Ok(())
        }
        Command::List { path } => {
            if let Some(path) = path {
                enter_relative(&mut session, &path)?;
            }
            let listing = session.list().map_err(|e| e.to_string())?;

            OutputFormatter::header(&format!("Folders ({})", listing.folders.len()));
            for folder in &listing.folders {
                println!("  {}/", folder);
            }
            OutputFormatter::header(&format!("Files ({})", listing.files.len()));
            for file in &listing.files {
                println!("  {}", file);
            }
            Ok(())
        }
        Command::Delete { path } => {
            let target = resolve_in_root(&session, &path)?;
            match session.trash().soft_delete(&target) {
                Ok(dest) => {
                    OutputFormatter::success(&format!(
                        "Moved to trash as '{}'.",
                        dest.file_name().unwrap_or_default().to_string_lossy()
                    ));
                    Ok(())
                }
                Err(e) => Err(e.to_string()),
            }
        }
        Command::Trash(trash_cmd) => run_trash(&session, trash_cmd),
        Command::Sweep => {
            // The session already swept on open; report totals here.
            let entries = session.trash().entries().map_err(|e| e.to_string())?;
            OutputFormatter::success(&format!(
                "Sweep complete: {} purged, {} remaining.",
                swept.purged,
                entries.len()
            ));
            Ok(())
        }
        Command::Note { text } => {
            session.append_note(&text).map_err(|e| e.to_string())?;
            OutputFormatter::success("Note saved.");
            Ok(())
        }
    }
}

fn run_trash(session: &Session, command: TrashCommand) -> Result<(), String> {
    let store = session.trash();
    match command {
        TrashCommand::List => {
            let entries = store.entries().map_err(|e| e.to_string())?;
            OutputFormatter::trash_listing(&entries);
            Ok(())
        }
        TrashCommand::Restore { name } => {
            let restored = store.restore(&name).map_err(|e| e.to_string())?;
            OutputFormatter::success(&format!("Restored to {}.", restored.display()));
            Ok(())
        }
        TrashCommand::Purge { name } => {
            store.purge_one(&name).map_err(|e| e.to_string())?;
            OutputFormatter::success(&format!("Permanently deleted '{}'.", name));
            Ok(())
        }
        TrashCommand::Empty => {
            store.purge_all().map_err(|e| e.to_string())?;
            OutputFormatter::success("Trash emptied.");
            Ok(())
        }
    }
}

/// Resolves an optional subfolder argument against the session root.
fn resolve_subdir(session: &Session, path: Option<&Path>) -> Result<PathBuf, String> {
    match path {
        None => Ok(session.root().to_path_buf()),
        Some(rel) => {
            let target = resolve_in_root(session, rel)?;
            if target.is_dir() {
                Ok(target)
            } else {
                Err(format!("Not a directory: {}", target.display()))
            }
        }
    }
}

/// Resolves a user-supplied path against the root and verifies it stays
/// inside it.
///
/// The session root is canonical, so canonicalizing the joined path collapses
/// any `..` components and symlinks before the containment check. Absolute
/// arguments outside the root are rejected the same way.
fn resolve_in_root(session: &Session, path: &Path) -> Result<PathBuf, String> {
    let target = session.root().join(path);
    let resolved = target
        .canonicalize()
        .map_err(|_| format!("Not found: {}", target.display()))?;
    if !resolved.starts_with(session.root()) {
        return Err(format!(
            "Refusing to operate outside the root folder: {}",
            path.display()
        ));
    }
    Ok(resolved)
}

/// Walks the session into a subfolder, one component at a time.
fn enter_relative(session: &mut Session, path: &Path) -> Result<(), String> {
    for component in path.components() {
        let name = component.as_os_str().to_string_lossy();
        session.enter(&name).map_err(|e| e.to_string())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_organize() {
        let cli = Cli::try_parse_from(["tidykeep", "/tmp/root", "organize"]).unwrap();
        assert_eq!(cli.root, PathBuf::from("/tmp/root"));
        assert!(matches!(cli.command, Command::Organize { path: None }));
    }

    #[test]
    fn test_parse_organize_with_subfolder() {
        let cli =
            Cli::try_parse_from(["tidykeep", "/tmp/root", "organize", "--path", "sub"]).unwrap();
        match cli.command {
            Command::Organize { path } => assert_eq!(path, Some(PathBuf::from("sub"))),
            other => panic!("Unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_trash_subcommands() {
        let cli = Cli::try_parse_from(["tidykeep", "/tmp/root", "trash", "restore", "a.txt"])
            .unwrap();
        match cli.command {
            Command::Trash(TrashCommand::Restore { name }) => assert_eq!(name, "a.txt"),
            other => panic!("Unexpected command: {:?}", other),
        }

        let cli = Cli::try_parse_from(["tidykeep", "/tmp/root", "trash", "empty"]).unwrap();
        assert!(matches!(cli.command, Command::Trash(TrashCommand::Empty)));
    }

    #[test]
    fn test_parse_requires_command() {
        assert!(Cli::try_parse_from(["tidykeep", "/tmp/root"]).is_err());
    }

    #[test]
    fn test_parse_config_flag() {
        let cli = Cli::try_parse_from([
            "tidykeep",
            "/tmp/root",
            "--config",
            "custom.toml",
            "sweep",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(matches!(cli.command, Command::Sweep));
    }
}
