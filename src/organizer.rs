//! Run orchestration.
//!
//! An [`Organizer`] owns the run's logger and a classifier strategy and drives
//! the pipeline: scan, optional snapshot side file, classify, apply. Two early
//! exits protect the filesystem: a scan that finds no files ends the run before
//! any plan exists, and an empty plan ends the run before any move happens.

use crate::applier::{ApplyReport, PlanApplier};
use crate::config::ScanFilter;
use crate::logger::RunLogger;
use crate::plan::Classifier;
use crate::scanner::{self, ScanError};
use std::path::{Path, PathBuf};

/// Reasons a run aborts before applying anything.
#[derive(Debug)]
pub enum OrganizeError {
    /// The target directory could not be scanned.
    Scan(ScanError),
    /// Classification produced no usable plan.
    NoPlan,
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scan(e) => write!(f, "{}", e),
            Self::NoPlan => write!(f, "No valid organization plan was available"),
        }
    }
}

impl std::error::Error for OrganizeError {}

impl From<ScanError> for OrganizeError {
    fn from(e: ScanError) -> Self {
        Self::Scan(e)
    }
}

/// Sequences one organization run.
pub struct Organizer {
    logger: RunLogger,
    classifier: Box<dyn Classifier>,
    snapshot_file: Option<PathBuf>,
    dry_run: bool,
}

impl Organizer {
    pub fn new(logger: RunLogger, classifier: Box<dyn Classifier>) -> Self {
        Self {
            logger,
            classifier,
            snapshot_file: None,
            dry_run: false,
        }
    }

    /// Write the snapshot to this path before classification.
    pub fn with_snapshot_file(mut self, path: PathBuf) -> Self {
        self.snapshot_file = Some(path);
        self
    }

    /// Log planned moves without touching the filesystem.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Runs scan → classify → apply against `root`.
    ///
    /// Returns the apply tally, an empty tally when the directory held no
    /// files, or an [`OrganizeError`] when the run aborted. Per-file move
    /// failures do not abort the run; they are logged and counted in the
    /// report.
    pub fn run(&self, root: &Path, filter: &ScanFilter) -> Result<ApplyReport, OrganizeError> {
        self.logger
            .info(format!("Starting organization of {}", root.display()));

        let snapshot = match scanner::scan(root, filter) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                self.logger.error(e.to_string());
                return Err(e.into());
            }
        };
        self.logger.info(format!(
            "Found {} files and {} folders.",
            snapshot.files.len(),
            snapshot.existing_folders.len()
        ));

        if snapshot.is_empty() {
            self.logger
                .warning("No files found to organize. Aborting operation.");
            return Ok(ApplyReport::default());
        }

        if let Some(path) = &self.snapshot_file {
            // Diagnostic only: a failed write is logged and the run continues.
            match snapshot.write_json(path) {
                Ok(()) => self
                    .logger
                    .info(format!("Snapshot written to {}", path.display())),
                Err(e) => self
                    .logger
                    .error(format!("Error writing snapshot to {}: {}", path.display(), e)),
            }
        }

        let plan = self.classifier.classify_snapshot(&snapshot, &self.logger);
        if plan.is_empty() {
            self.logger
                .error("No valid organization plan received. Aborting operation.");
            return Err(OrganizeError::NoPlan);
        }

        let report = PlanApplier::apply(root, &snapshot.files, &plan, &self.logger, self.dry_run);

        if self.dry_run {
            self.logger.info(format!(
                "Dry run complete: {} move(s) planned, {} file(s) left in place.",
                report.moved, report.skipped
            ));
        } else {
            self.logger.info(format!(
                "Organization complete: {} moved, {} left in place, {} failed.",
                report.moved,
                report.skipped,
                report.failed.len()
            ));
        }

        Ok(report)
    }
}
