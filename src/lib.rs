//! tidykeep - folder organization with a recoverable trash
//!
//! This library provides the core of a local folder-management utility:
//! classifying files by extension, bulk-reorganizing a tree into category
//! folders, and a hidden per-root trash supporting soft delete, restore,
//! permanent purge, and an age-based sweep. A session type scopes browsing
//! and notes to one root.

pub mod cli;
pub mod config;
pub mod file_category;
pub mod fsops;
pub mod naming;
pub mod organizer;
pub mod output;
pub mod session;
pub mod trash;

pub use config::{AppConfig, CompiledRules, ConfigError};
pub use file_category::Category;
pub use naming::resolve_unique;
pub use organizer::{OrganizeError, OrganizeReport, Organizer};
pub use session::{Listing, Session, SessionError};
pub use trash::{SweepReport, TRASH_DIR_NAME, TrashEntry, TrashError, TrashStore};

pub use cli::{Cli, Command, run_cli};
