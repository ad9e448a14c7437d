//! Runtime configuration for trash retention and organize exclusions.
//!
//! Configuration is optional and loaded from TOML. Defaults reproduce the
//! stock behavior: 30-day trash retention and a single reserved file name
//! (`notes.txt`) that organization never touches.
//!
//! # Configuration File Format
//!
//! ```toml
//! [trash]
//! retention_days = 30
//!
//! [organize]
//! reserved_filenames = ["notes.txt"]
//! exclude_patterns = ["*.tmp", "node_modules/**"]
//! ```

use glob::Pattern;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Errors that can occur during configuration loading and compilation.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    ConfigInvalid(String),
    /// Invalid glob pattern provided.
    InvalidGlobPattern(String),
    /// IO error while reading configuration.
    IoError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::InvalidGlobPattern(pattern) => {
                write!(f, "Invalid glob pattern '{}'", pattern)
            }
            ConfigError::IoError(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Top-level configuration, deserialized from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Trash retention settings.
    #[serde(default)]
    pub trash: TrashSettings,

    /// Organization exclusion rules.
    #[serde(default)]
    pub organize: OrganizeRules,
}

/// Settings for the age-based trash sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrashSettings {
    /// Days a trash entry is kept before the sweep purges it.
    #[serde(default = "default_retention_days")]
    pub retention_days: u64,
}

/// Rules for excluding files from organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizeRules {
    /// File names never moved by the organizer, at any depth.
    #[serde(default = "default_reserved_filenames")]
    pub reserved_filenames: Vec<String>,

    /// Glob patterns excluded from organization (e.g., "*.tmp").
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

fn default_retention_days() -> u64 {
    30
}

fn default_reserved_filenames() -> Vec<String> {
    vec!["notes.txt".to_string()]
}

impl Default for TrashSettings {
    fn default() -> Self {
        Self {
            retention_days: default_retention_days(),
        }
    }
}

impl Default for OrganizeRules {
    fn default() -> Self {
        Self {
            reserved_filenames: default_reserved_filenames(),
            exclude_patterns: Vec::new(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            trash: TrashSettings::default(),
            organize: OrganizeRules::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration, with fallback to defaults.
    ///
    /// Attempts to load in the following order:
    /// 1. If `config_path` is provided, load from that file
    /// 2. `.tidykeeprc.toml` in the current directory
    /// 3. `~/.config/tidykeep/config.toml`
    /// 4. Built-in defaults
    ///
    /// # Errors
    ///
    /// Returns an error only when an explicitly provided file cannot be read.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(".tidykeeprc.toml");
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("tidykeep")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        Ok(Self::default())
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }

    /// Compile configuration into pre-validated matchers.
    ///
    /// # Errors
    ///
    /// Returns an error if any glob pattern is invalid.
    pub fn compile(self) -> Result<CompiledRules, ConfigError> {
        CompiledRules::new(self)
    }
}

/// Pre-compiled configuration, cheap to consult per file.
#[derive(Debug, Clone)]
pub struct CompiledRules {
    retention: Duration,
    reserved_filenames: HashSet<String>,
    exclude_patterns: Vec<Pattern>,
}

impl CompiledRules {
    fn new(config: AppConfig) -> Result<Self, ConfigError> {
        let exclude_patterns = config
            .organize
            .exclude_patterns
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|_| ConfigError::InvalidGlobPattern(pattern.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            retention: Duration::from_secs(config.trash.retention_days * 86_400),
            reserved_filenames: config.organize.reserved_filenames.into_iter().collect(),
            exclude_patterns,
        })
    }

    /// How long trash entries live before the sweep purges them.
    pub fn retention(&self) -> Duration {
        self.retention
    }

    /// Whether the organizer may move this file.
    ///
    /// Reserved file names are skipped at any depth; exclude patterns match
    /// against the full path.
    pub fn should_organize(&self, file_path: &Path) -> bool {
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        if self.reserved_filenames.contains(file_name.as_ref()) {
            return false;
        }

        !self
            .exclude_patterns
            .iter()
            .any(|pattern| pattern.matches_path(file_path))
    }
}

impl Default for CompiledRules {
    fn default() -> Self {
        // The built-in defaults contain no patterns, so compilation cannot fail.
        AppConfig::default()
            .compile()
            .unwrap_or_else(|_| unreachable!())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_retention_is_thirty_days() {
        let rules = CompiledRules::default();
        assert_eq!(rules.retention(), Duration::from_secs(30 * 86_400));
    }

    #[test]
    fn test_notes_file_reserved_by_default() {
        let rules = CompiledRules::default();
        assert!(!rules.should_organize(Path::new("notes.txt")));
        assert!(!rules.should_organize(Path::new("sub/notes.txt")));
        assert!(rules.should_organize(Path::new("report.pdf")));
    }

    #[test]
    fn test_parse_full_config() {
        let config: AppConfig = toml::from_str(
            r#"
            [trash]
            retention_days = 7

            [organize]
            reserved_filenames = ["notes.txt", "journal.md"]
            exclude_patterns = ["*.tmp"]
            "#,
        )
        .expect("Parse failed");

        assert_eq!(config.trash.retention_days, 7);
        let rules = config.compile().expect("Compile failed");
        assert_eq!(rules.retention(), Duration::from_secs(7 * 86_400));
        assert!(!rules.should_organize(Path::new("journal.md")));
        assert!(!rules.should_organize(Path::new("scratch.tmp")));
        assert!(rules.should_organize(Path::new("photo.jpg")));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").expect("Parse failed");
        assert_eq!(config.trash.retention_days, 30);
        assert_eq!(config.organize.reserved_filenames, vec!["notes.txt"]);
    }

    #[test]
    fn test_exclude_glob_patterns() {
        let config = AppConfig {
            trash: TrashSettings::default(),
            organize: OrganizeRules {
                reserved_filenames: Vec::new(),
                exclude_patterns: vec!["**/node_modules/**".to_string()],
            },
        };
        let rules = config.compile().expect("Compile failed");

        assert!(!rules.should_organize(Path::new("node_modules/pkg/index.js")));
        assert!(!rules.should_organize(Path::new("a/node_modules/pkg/index.js")));
        assert!(rules.should_organize(Path::new("src/index.js")));
    }

    #[test]
    fn test_invalid_glob_pattern_returns_error() {
        let config = AppConfig {
            trash: TrashSettings::default(),
            organize: OrganizeRules {
                reserved_filenames: Vec::new(),
                exclude_patterns: vec!["[invalid".to_string()],
            },
        };

        assert!(config.compile().is_err());
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let result = AppConfig::load(Some(Path::new("/nonexistent/tidykeep.toml")));
        assert!(matches!(result, Err(ConfigError::ConfigNotFound(_))));
    }
}
