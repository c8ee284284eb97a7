//! Organization plans and the classifier seam.
//!
//! A plan maps file names to target folder names. It deliberately does not have
//! to cover every scanned file; anything without an assignment stays put.

use crate::logger::RunLogger;
use crate::scanner::DirectorySnapshot;
use std::collections::BTreeMap;

/// A file-name to folder-name mapping driving the apply step.
///
/// Backed by a `BTreeMap` so iteration, and therefore logging and moving, happen
/// in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrganizationPlan {
    assignments: BTreeMap<String, String>,
}

impl OrganizationPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a file to a target folder, replacing any previous assignment.
    pub fn assign(&mut self, file: impl Into<String>, folder: impl Into<String>) {
        self.assignments.insert(file.into(), folder.into());
    }

    /// The folder assigned to a file, if any.
    pub fn folder_for(&self, file: &str) -> Option<&str> {
        self.assignments.get(file).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Iterates assignments in file-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.assignments
            .iter()
            .map(|(file, folder)| (file.as_str(), folder.as_str()))
    }

    /// Decodes a plan from a JSON object of file-name to folder-name strings.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let assignments: BTreeMap<String, String> = serde_json::from_str(text)?;
        Ok(Self { assignments })
    }
}

/// A strategy producing an [`OrganizationPlan`] for a snapshot.
///
/// Implementations must never panic on bad input; a strategy that cannot
/// produce anything usable returns an empty plan and logs why, and the
/// orchestrator turns the empty plan into an aborted run.
pub trait Classifier {
    fn classify_snapshot(
        &self,
        snapshot: &DirectorySnapshot,
        logger: &RunLogger,
    ) -> OrganizationPlan;
}
