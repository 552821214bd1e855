// Screening pipeline: extraction → verification → decision.
// Stages read the shared state and return a partial update; the runner merges it.
// All reasoning calls go through the `Reasoner` trait, all lookups through `WebSearch`.

pub mod decision;
pub mod extraction;
pub mod models;
pub mod payload;
pub mod prompts;
pub mod runner;
pub mod state;
pub mod verification;

#[cfg(test)]
pub(crate) mod test_support;

use async_trait::async_trait;
use thiserror::Error;

use crate::llm_client::LlmError;

pub use runner::ScreeningPipeline;
pub use state::{ScreeningState, StateUpdate};

/// Failures a stage does not absorb. These abort the current document only.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{stage} stage failed: {source}")]
    Reasoning {
        stage: &'static str,
        #[source]
        source: LlmError,
    },

    #[error("could not serialize stage input: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// One step of the pipeline.
#[async_trait]
pub trait Stage: Send + Sync {
    fn name(&self) -> &'static str;

    async fn run(&self, state: &ScreeningState) -> Result<StateUpdate, PipelineError>;
}
