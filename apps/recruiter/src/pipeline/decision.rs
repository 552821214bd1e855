//! Decision: scores the candidate against the job description and drafts a reply.
//!
//! An unusable response degrades to `DecisionRecord::failed()`; only a failed
//! reasoning call aborts the run.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::Reasoner;
use crate::pipeline::models::{DecisionRecord, DecisionResponse};
use crate::pipeline::payload::{parse_payload, Parsed};
use crate::pipeline::prompts::{DECISION_PROMPT_TEMPLATE, JOB_DESCRIPTION};
use crate::pipeline::{PipelineError, ScreeningState, Stage, StateUpdate};

pub struct DecisionStage {
    reasoner: Arc<dyn Reasoner>,
}

impl DecisionStage {
    pub fn new(reasoner: Arc<dyn Reasoner>) -> Self {
        Self { reasoner }
    }
}

/// Builds the decision instruction from the profile, the verification summary
/// and the fixed job description.
pub fn build_decision_prompt(state: &ScreeningState) -> Result<String, PipelineError> {
    let profile = serde_json::to_string(&state.candidate_profile)?;
    let verification = state.verification_summary.as_deref().unwrap_or_default();
    let prompt = DECISION_PROMPT_TEMPLATE
        .replace("{job_description}", JOB_DESCRIPTION)
        .replace("{verification}", verification)
        .replace("{profile}", &profile);
    Ok(format!("{prompt}\n\n{JSON_ONLY_INSTRUCTION}"))
}

/// Interprets the raw decision response, falling back to the failure record.
pub fn interpret_decision(raw: &str) -> Result<DecisionRecord, String> {
    match parse_payload::<DecisionResponse>(raw) {
        Parsed::Parsed(response) => DecisionRecord::try_from(response).map_err(|e| e.to_string()),
        Parsed::Failed { error, .. } => Err(error),
    }
}

#[async_trait]
impl Stage for DecisionStage {
    fn name(&self) -> &'static str {
        "decision"
    }

    async fn run(&self, state: &ScreeningState) -> Result<StateUpdate, PipelineError> {
        let prompt = build_decision_prompt(state)?;
        let raw = self
            .reasoner
            .complete(&prompt)
            .await
            .map_err(|source| PipelineError::Reasoning {
                stage: self.name(),
                source,
            })?;

        let decision = interpret_decision(&raw).unwrap_or_else(|error| {
            warn!("Decision response unusable, substituting failure record: {error}");
            DecisionRecord::failed()
        });
        info!(
            "Decision made: {} ({}/100, advances: {})",
            decision.category,
            decision.score,
            decision.category.is_positive()
        );

        Ok(StateUpdate {
            decision: Some(decision),
            ..StateUpdate::default()
        }
        .with_log("Decision made."))
    }
}
