use serde::Serialize;

use crate::pipeline::models::{DecisionRecord, ProfileOutcome};

/// Everything one document's screening run knows, threaded through every stage.
///
/// Created fresh per document and never shared between runs.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScreeningState {
    pub document_text: String,
    pub candidate_profile: Option<ProfileOutcome>,
    pub verification_summary: Option<String>,
    pub decision: Option<DecisionRecord>,
    /// Human-readable trace. Append-only for the lifetime of the run.
    pub progress_log: Vec<String>,
}

/// The fields one stage produced. Unset fields leave the state untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateUpdate {
    pub candidate_profile: Option<ProfileOutcome>,
    pub verification_summary: Option<String>,
    pub decision: Option<DecisionRecord>,
    pub log: Vec<String>,
}

impl StateUpdate {
    pub fn with_log(mut self, line: impl Into<String>) -> Self {
        self.log.push(line.into());
        self
    }
}

impl ScreeningState {
    pub fn new(document_text: impl Into<String>) -> Self {
        Self {
            document_text: document_text.into(),
            ..Self::default()
        }
    }

    /// Merges a stage's update: set fields overwrite, log lines are appended.
    pub fn apply(&mut self, update: StateUpdate) {
        if let Some(profile) = update.candidate_profile {
            self.candidate_profile = Some(profile);
        }
        if let Some(summary) = update.verification_summary {
            self.verification_summary = Some(summary);
        }
        if let Some(decision) = update.decision {
            self.decision = Some(decision);
        }
        self.progress_log.extend(update.log);
    }
}
