//! Output formatting and styling.
//!
//! Centralizes all CLI output: colored status lines, a progress bar for
//! organize runs, and the per-category summary table printed afterwards.

use crate::organizer::OrganizeReport;
use crate::trash::TrashEntry;
use bytesize::ByteSize;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Manages all CLI output with consistent styling.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Creates a progress bar for an organize run.
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("█▓░"),
        );
        pb
    }

    /// Prints the aggregate statistics of an organize run.
    pub fn organize_summary(report: &OrganizeReport) {
        Self::header("SUMMARY");

        // Sort categories for consistent output
        let mut categories: Vec<_> = report
            .category_counts
            .iter()
            .map(|(category, count)| (category.dir_name(), *count))
            .collect();
        categories.sort_by_key(|&(name, _)| name);

        let max_category_len = categories
            .iter()
            .map(|(name, _)| name.len())
            .max()
            .unwrap_or(0)
            .max(8);

        println!(
            "{:<width$} | {}",
            "Category".bold(),
            "Files".bold(),
            width = max_category_len
        );
        println!("{}", "-".repeat(max_category_len + 10));

        for (category, count) in &categories {
            let file_word = if *count == 1 { "file" } else { "files" };
            println!(
                "{:<width$} | {} {}",
                category,
                count.to_string().green(),
                file_word,
                width = max_category_len
            );
        }

        println!("{}", "-".repeat(max_category_len + 10));
        println!(
            "{:<width$} | {} {} ({})",
            "Total".bold(),
            report.moved_files.to_string().green().bold(),
            if report.moved_files == 1 {
                "file"
            } else {
                "files"
            },
            ByteSize(report.total_bytes),
            width = max_category_len
        );

        if report.pruned_dirs > 0 {
            println!(
                "Moved {} emptied category folder(s) to trash.",
                report.pruned_dirs
            );
        }
        if report.failed_moves > 0 {
            Self::warning(&format!(
                "{} file(s) could not be moved and were skipped.",
                report.failed_moves
            ));
        }
    }

    /// Prints the trash listing with per-entry ages.
    pub fn trash_listing(entries: &[TrashEntry]) {
        if entries.is_empty() {
            Self::info("Trash is empty.");
            return;
        }

        Self::header(&format!("TRASH ({} entries)", entries.len()));
        for entry in entries {
            let kind = if entry.is_dir { "dir " } else { "file" };
            let age = entry.age_days();
            let age_word = if age == 1 { "day" } else { "days" };
            println!("  [{}] {}  ({} {} old)", kind, entry.name, age, age_word);
        }
    }
}
