//! Remote-assisted classification.
//!
//! The remote classifier turns a snapshot into a prompt for a text-completion
//! service and extracts an organization plan from whatever text comes back. It
//! owns exactly those two things. Transport, authentication, retries, and rate
//! limits belong to the [`CompletionService`] implementation injected into it.
//!
//! Nothing here can fail the pipeline: an empty response, a response without a
//! JSON object, or a transport fault all collapse to an empty plan with the
//! cause logged, and the orchestrator aborts on the empty plan.

use crate::logger::RunLogger;
use crate::plan::{Classifier, OrganizationPlan};
use crate::scanner::DirectorySnapshot;

/// Errors surfaced by a completion transport.
#[derive(Debug)]
pub enum CompletionError {
    /// The request never produced a response.
    Transport(String),
    /// The service answered with a non-success status.
    Api { status: u16, message: String },
    /// The response arrived but could not be understood.
    MalformedResponse(String),
}

impl std::fmt::Display for CompletionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "Completion request failed: {}", msg),
            Self::Api { status, message } => {
                write!(f, "Completion service returned status {}: {}", status, message)
            }
            Self::MalformedResponse(msg) => {
                write!(f, "Completion response was malformed: {}", msg)
            }
        }
    }
}

impl std::error::Error for CompletionError {}

/// A blocking text-completion transport.
///
/// Injected into [`RemoteClassifier`] so the pipeline is testable without live
/// network access.
pub trait CompletionService {
    /// Sends one prompt and returns the raw response text.
    fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

/// Classifier that delegates folder recommendations to a completion service.
pub struct RemoteClassifier {
    service: Box<dyn CompletionService>,
}

impl RemoteClassifier {
    pub fn new(service: Box<dyn CompletionService>) -> Self {
        Self { service }
    }

    /// Builds the deterministic prompt embedding the snapshot as JSON.
    fn build_prompt(snapshot_json: &str) -> String {
        format!(
            "Please analyze the following directory structure represented in JSON format. \
             Based on the file names and their extensions, suggest an organization plan in \
             JSON format. For each file, return the file name and the recommended folder \
             as a key-value pair.\n\n\
             Here is the directory structure:\n{snapshot_json}\n\n\
             Please ensure that the output is valid JSON and follows this structure:\n\
             {{\n    \"file_name\": \"recommended_folder\"\n}}"
        )
    }

    /// Slices the response from the first `{` to the last `}`.
    ///
    /// Collaborators tend to wrap the object in prose; everything around the
    /// braces is discarded.
    fn extract_json_object(text: &str) -> Option<&str> {
        let start = text.find('{')?;
        let end = text.rfind('}')?;
        if end < start {
            return None;
        }
        Some(&text[start..=end])
    }
}

impl Classifier for RemoteClassifier {
    fn classify_snapshot(
        &self,
        snapshot: &DirectorySnapshot,
        logger: &RunLogger,
    ) -> OrganizationPlan {
        let snapshot_json = match serde_json::to_string_pretty(snapshot) {
            Ok(json) => json,
            Err(e) => {
                logger.error(format!("Could not serialize snapshot for the prompt: {}", e));
                return OrganizationPlan::new();
            }
        };

        let prompt = Self::build_prompt(&snapshot_json);
        logger.info("Requesting folder recommendations from the completion service.");

        let response = match self.service.complete(&prompt) {
            Ok(text) => text,
            Err(e) => {
                logger.error(e.to_string());
                return OrganizationPlan::new();
            }
        };

        let response = response.trim();
        if response.is_empty() {
            logger.error("Received an empty response from the completion service.");
            return OrganizationPlan::new();
        }

        let Some(object) = Self::extract_json_object(response) else {
            logger.error("Response contained no JSON object.");
            logger.error(format!("Raw response text: {}", response));
            return OrganizationPlan::new();
        };

        match OrganizationPlan::from_json(object) {
            Ok(plan) => {
                logger.info(format!(
                    "Completion service recommended folders for {} files.",
                    plan.len()
                ));
                plan
            }
            Err(e) => {
                logger.error(format!("Error parsing JSON response: {}", e));
                logger.error(format!("Raw response text: {}", response));
                OrganizationPlan::new()
            }
        }
    }
}
