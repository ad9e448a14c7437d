//! File categorization by extension.
//!
//! Maps a file's extension to one of a fixed set of categories used as
//! folder names under the organization root. The table is static and the
//! lookup is total: anything not listed (including files with no extension)
//! is `Category::Others`.
//!
//! # Examples
//!
//! ```
//! use tidykeep::file_category::Category;
//!
//! assert_eq!(Category::from_extension("PDF"), Category::Documents);
//! assert_eq!(Category::from_extension("xyz"), Category::Others);
//! ```

use std::path::Path;

/// A file category, used as the name of a folder directly under the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Office and text documents (PDF, DOCX, TXT, etc.)
    Documents,
    /// Image files (JPG, PNG, SVG, etc.)
    Images,
    /// Video files (MP4, MKV, AVI, etc.)
    Videos,
    /// Audio files (MP3, FLAC, OGG, etc.)
    Audio,
    /// Archive files (ZIP, RAR, 7Z, etc.)
    Archives,
    /// Source code and markup (PY, JS, HTML, etc.)
    Code,
    /// Installers and executables (EXE, APK, DEB, etc.)
    Executables,
    /// Everything not covered by the table above.
    Others,
}

/// The categories whose folders are created from the extension table.
///
/// `Others` is deliberately absent: it is a valid classification result and
/// may exist as a folder, but empty-folder cleanup after an organize run only
/// prunes the table-backed names.
pub const TABLE_CATEGORIES: [Category; 7] = [
    Category::Documents,
    Category::Images,
    Category::Videos,
    Category::Audio,
    Category::Archives,
    Category::Code,
    Category::Executables,
];

impl Category {
    /// Looks up the category for a file extension (without the leading dot).
    ///
    /// Matching is case-insensitive and total; unknown extensions map to
    /// `Others`. Only a single final suffix is consulted, so `archive.tar.gz`
    /// resolves via `gz`.
    pub fn from_extension(ext: &str) -> Category {
        match ext.to_lowercase().as_str() {
            "pdf" | "doc" | "docx" | "txt" | "rtf" | "odt" | "xls" | "xlsx" | "ppt" | "pptx" => {
                Category::Documents
            }
            "jpg" | "jpeg" | "png" | "gif" | "bmp" | "svg" | "ico" | "webp" => Category::Images,
            "mp4" | "avi" | "mkv" | "mov" | "wmv" | "flv" | "webm" => Category::Videos,
            "mp3" | "wav" | "flac" | "aac" | "ogg" | "wma" | "m4a" => Category::Audio,
            "zip" | "rar" | "7z" | "tar" | "gz" | "bz2" => Category::Archives,
            "py" | "java" | "cpp" | "c" | "js" | "html" | "css" | "php" | "sql" | "json"
            | "xml" => Category::Code,
            "exe" | "msi" | "apk" | "deb" | "dmg" => Category::Executables,
            _ => Category::Others,
        }
    }

    /// Looks up the category for a path from its final extension.
    ///
    /// Files with no extension classify as `Others`.
    pub fn for_path(path: &Path) -> Category {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => Category::from_extension(ext),
            None => Category::Others,
        }
    }

    /// Returns the on-disk folder name for this category.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Documents => "Documents",
            Category::Images => "Images",
            Category::Videos => "Videos",
            Category::Audio => "Audio",
            Category::Archives => "Archives",
            Category::Code => "Code",
            Category::Executables => "Executables",
            Category::Others => "Others",
        }
    }

    /// Returns true if `name` is the folder name of a table-backed category.
    ///
    /// Used by the post-organize cleanup pass to decide which empty folders
    /// may be moved to trash. Matches folder names exactly (case-sensitive),
    /// and never matches `Others`.
    pub fn is_prunable_dir_name(name: &str) -> bool {
        TABLE_CATEGORIES.iter().any(|c| c.dir_name() == name)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}
