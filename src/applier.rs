//! Applying an organization plan.
//!
//! The applier walks the scanned files and moves each one that has a plan
//! assignment into its target folder under the root, creating the folder on
//! first use. Moves use `fs::rename`, so a same-named file already in the
//! destination is overwritten on platforms that allow it; that limitation is
//! accepted rather than guarded.
//!
//! One file's failure never stops the batch. Every move, skip, and failure is
//! logged individually and tallied in the returned [`ApplyReport`].

use crate::logger::RunLogger;
use crate::plan::OrganizationPlan;
use crate::scanner::FileEntry;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};

/// A single file move that could not be completed.
#[derive(Debug)]
pub enum MoveError {
    /// The target folder could not be created under the root.
    FolderCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The rename into the target folder failed.
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FolderCreationFailed { path, source } => {
                write!(f, "Failed to create folder {}: {}", path.display(), source)
            }
            Self::RenameFailed { from, to, source } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    from.display(),
                    to.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for MoveError {}

/// Outcome tally of one apply pass.
#[derive(Debug, Default)]
pub struct ApplyReport {
    /// Files moved into their assigned folder (or, in a dry run, that would be).
    pub moved: usize,
    /// Files with no plan assignment, left in place.
    pub skipped: usize,
    /// Files whose move failed, with the reason.
    pub failed: Vec<(String, MoveError)>,
}

impl ApplyReport {
    /// True when every assigned file was moved.
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Moves files into their plan-assigned folders.
pub struct PlanApplier;

impl PlanApplier {
    /// Applies `plan` to `files` under `root`.
    ///
    /// With `dry_run` set, logs every planned move and touches nothing.
    pub fn apply(
        root: &Path,
        files: &[FileEntry],
        plan: &OrganizationPlan,
        logger: &RunLogger,
        dry_run: bool,
    ) -> ApplyReport {
        let mut report = ApplyReport::default();

        let planned = files
            .iter()
            .filter(|file| plan.folder_for(&file.name).is_some())
            .count();
        let progress = if !dry_run && planned > 0 {
            Some(Self::progress_bar(planned as u64))
        } else {
            None
        };

        for file in files {
            let Some(folder) = plan.folder_for(&file.name) else {
                logger.warning(format!(
                    "No folder assignment for {}; leaving it in place.",
                    file.name
                ));
                report.skipped += 1;
                continue;
            };

            if dry_run {
                logger.info(format!("Would move {} into {}/", file.name, folder));
                report.moved += 1;
                continue;
            }

            match Self::move_into_folder(root, file, folder) {
                Ok(_) => {
                    logger.info(format!("Moved {} into {}/", file.name, folder));
                    report.moved += 1;
                }
                Err(e) => {
                    logger.error(e.to_string());
                    report.failed.push((file.name.clone(), e));
                }
            }
            if let Some(bar) = &progress {
                bar.inc(1);
            }
        }

        if let Some(bar) = progress {
            bar.finish_and_clear();
        }

        report
    }

    /// Ensures `folder` exists under `root` and renames the file into it,
    /// preserving the base name. Folder creation is idempotent.
    fn move_into_folder(root: &Path, file: &FileEntry, folder: &str) -> Result<PathBuf, MoveError> {
        let folder_path = root.join(folder);
        fs::create_dir_all(&folder_path).map_err(|e| MoveError::FolderCreationFailed {
            path: folder_path.clone(),
            source: e,
        })?;

        let destination = folder_path.join(&file.name);
        fs::rename(&file.path, &destination).map_err(|e| MoveError::RenameFailed {
            from: file.path.clone(),
            to: destination.clone(),
            source: e,
        })?;

        Ok(destination)
    }

    fn progress_bar(total: u64) -> ProgressBar {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("█▓░"),
        );
        bar
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(root: &Path, name: &str, extension: &str) -> FileEntry {
        FileEntry {
            name: name.to_string(),
            path: root.join(name),
            extension: extension.to_string(),
        }
    }

    #[test]
    fn test_apply_creates_folder_and_moves_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        fs::write(root.join("a.txt"), "content").expect("Failed to write file");

        let mut plan = OrganizationPlan::new();
        plan.assign("a.txt", "Text Files");
        let files = vec![entry(root, "a.txt", ".txt")];

        let report = PlanApplier::apply(root, &files, &plan, &RunLogger::console_only(), false);

        assert_eq!(report.moved, 1);
        assert!(report.is_complete_success());
        assert!(!root.join("a.txt").exists());
        assert!(root.join("Text Files").join("a.txt").is_file());
    }

    #[test]
    fn test_apply_reuses_existing_folder() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        fs::create_dir(root.join("Image Files")).expect("Failed to create folder");
        fs::write(root.join("b.png"), "png").expect("Failed to write file");

        let mut plan = OrganizationPlan::new();
        plan.assign("b.png", "Image Files");
        let files = vec![entry(root, "b.png", ".png")];

        let report = PlanApplier::apply(root, &files, &plan, &RunLogger::console_only(), false);

        assert_eq!(report.moved, 1);
        assert!(root.join("Image Files").join("b.png").is_file());
    }

    #[test]
    fn test_unassigned_files_are_left_in_place() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        fs::write(root.join("keep.xyz"), "data").expect("Failed to write file");

        let plan = OrganizationPlan::new();
        let files = vec![entry(root, "keep.xyz", ".xyz")];

        let report = PlanApplier::apply(root, &files, &plan, &RunLogger::console_only(), false);

        assert_eq!(report.moved, 0);
        assert_eq!(report.skipped, 1);
        assert!(root.join("keep.xyz").exists());
    }

    #[test]
    fn test_one_failure_does_not_stop_the_batch() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        // "ghost.txt" has an assignment but no file on disk, so its rename fails.
        fs::write(root.join("real.txt"), "data").expect("Failed to write file");

        let mut plan = OrganizationPlan::new();
        plan.assign("ghost.txt", "Text Files");
        plan.assign("real.txt", "Text Files");
        let files = vec![
            entry(root, "ghost.txt", ".txt"),
            entry(root, "real.txt", ".txt"),
        ];

        let report = PlanApplier::apply(root, &files, &plan, &RunLogger::console_only(), false);

        assert_eq!(report.moved, 1);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "ghost.txt");
        assert!(root.join("Text Files").join("real.txt").is_file());
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        fs::write(root.join("a.txt"), "content").expect("Failed to write file");

        let mut plan = OrganizationPlan::new();
        plan.assign("a.txt", "Text Files");
        let files = vec![entry(root, "a.txt", ".txt")];

        let report = PlanApplier::apply(root, &files, &plan, &RunLogger::console_only(), true);

        assert_eq!(report.moved, 1);
        assert!(root.join("a.txt").exists());
        assert!(!root.join("Text Files").exists());
    }

    #[test]
    fn test_nested_folder_names_are_created() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path();
        fs::write(root.join("w2.pdf"), "pdf").expect("Failed to write file");

        let mut plan = OrganizationPlan::new();
        plan.assign("w2.pdf", "Documents/Taxes");
        let files = vec![entry(root, "w2.pdf", ".pdf")];

        let report = PlanApplier::apply(root, &files, &plan, &RunLogger::console_only(), false);

        assert_eq!(report.moved, 1);
        assert!(root.join("Documents").join("Taxes").join("w2.pdf").is_file());
    }
}
