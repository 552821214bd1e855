//! Verification: looks the candidate up online and summarizes what was found.
//!
//! The only conditional branch in the pipeline: without a usable name the
//! search and the summarization call are skipped entirely.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::llm_client::Reasoner;
use crate::pipeline::models::CandidateProfile;
use crate::pipeline::payload::Parsed;
use crate::pipeline::prompts::{SEARCH_QUERY_SUFFIX, VERIFICATION_PROMPT_TEMPLATE};
use crate::pipeline::{PipelineError, ScreeningState, Stage, StateUpdate};
use crate::search_client::WebSearch;

/// Summary recorded when there is no name to verify.
pub const SKIPPED_SUMMARY: &str = "Skipped verification: No name found.";

pub struct VerificationStage {
    reasoner: Arc<dyn Reasoner>,
    searcher: Arc<dyn WebSearch>,
}

impl VerificationStage {
    pub fn new(reasoner: Arc<dyn Reasoner>, searcher: Arc<dyn WebSearch>) -> Self {
        Self { reasoner, searcher }
    }
}

pub fn build_search_query(name: &str) -> String {
    format!("{name} {SEARCH_QUERY_SUFFIX}")
}

pub fn build_verification_prompt(name: &str, search_results: &str) -> String {
    VERIFICATION_PROMPT_TEMPLATE
        .replace("{name}", name)
        .replace("{search_results}", search_results)
}

#[async_trait]
impl Stage for VerificationStage {
    fn name(&self) -> &'static str {
        "verification"
    }

    async fn run(&self, state: &ScreeningState) -> Result<StateUpdate, PipelineError> {
        let name = state
            .candidate_profile
            .as_ref()
            .and_then(Parsed::value)
            .and_then(CandidateProfile::usable_name);

        let Some(name) = name else {
            info!("No usable candidate name; skipping verification");
            return Ok(StateUpdate {
                verification_summary: Some(SKIPPED_SUMMARY.to_string()),
                ..StateUpdate::default()
            }
            .with_log("Researcher skipped (No Name)"));
        };

        let query = build_search_query(name);
        info!("Searching the web for {query:?}");
        let search_results = match self.searcher.search(&query).await {
            Ok(results) => results,
            Err(e) => {
                warn!("Search failed for {name}: {e}");
                format!("Search failed: {e}")
            }
        };

        let prompt = build_verification_prompt(name, &search_results);
        let summary = self
            .reasoner
            .complete(&prompt)
            .await
            .map_err(|source| PipelineError::Reasoning {
                stage: self.name(),
                source,
            })?;

        Ok(StateUpdate {
            verification_summary: Some(summary),
            ..StateUpdate::default()
        }
        .with_log(format!("Researcher is searching for: {name}..."))
        .with_log("Research complete."))
    }
}
