//! Extraction: turns raw résumé text into a `CandidateProfile`.
//!
//! Never fails: malformed output and reasoning-service errors both become an
//! error marker in place of the profile.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::Reasoner;
use crate::pipeline::models::{CandidateProfile, ProfileOutcome, UNKNOWN_NAME};
use crate::pipeline::payload::{parse_payload, Parsed};
use crate::pipeline::prompts::EXTRACTION_PROMPT_TEMPLATE;
use crate::pipeline::{PipelineError, ScreeningState, Stage, StateUpdate};

pub struct ExtractionStage {
    reasoner: Arc<dyn Reasoner>,
}

impl ExtractionStage {
    pub fn new(reasoner: Arc<dyn Reasoner>) -> Self {
        Self { reasoner }
    }
}

pub fn build_extraction_prompt(resume_text: &str) -> String {
    let prompt = EXTRACTION_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
    format!("{prompt}\n\n{JSON_ONLY_INSTRUCTION}")
}

#[async_trait]
impl Stage for ExtractionStage {
    fn name(&self) -> &'static str {
        "extraction"
    }

    async fn run(&self, state: &ScreeningState) -> Result<StateUpdate, PipelineError> {
        info!(
            "Extracting candidate profile from {} chars of resume text",
            state.document_text.len()
        );
        let prompt = build_extraction_prompt(&state.document_text);

        let profile: ProfileOutcome = match self.reasoner.complete(&prompt).await {
            Ok(raw) => parse_payload::<CandidateProfile>(&raw),
            Err(e) => Parsed::failed(format!("Reasoning service error: {e}"), ""),
        };

        let mut update = StateUpdate::default().with_log("Analyst is reading the resume...");
        match &profile {
            Parsed::Parsed(candidate) => {
                info!("Extracted candidate: {}", candidate.display_name());
                update = update.with_log(format!("Extracted: {}", candidate.display_name()));
            }
            Parsed::Failed { error, .. } => {
                warn!("Candidate extraction degraded: {error}");
                update = update
                    .with_log(format!("Extracted: {UNKNOWN_NAME}"))
                    .with_log(format!("Extraction error: {error}"));
            }
        }

        update.candidate_profile = Some(profile);
        Ok(update)
    }
}
