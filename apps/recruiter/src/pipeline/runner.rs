use std::sync::Arc;

use tracing::{debug, info};

use crate::llm_client::Reasoner;
use crate::pipeline::decision::DecisionStage;
use crate::pipeline::extraction::ExtractionStage;
use crate::pipeline::verification::VerificationStage;
use crate::pipeline::{PipelineError, ScreeningState, Stage};
use crate::search_client::WebSearch;

/// Runs extraction, verification and decision, in that order, exactly once each.
///
/// There is no retry and no short-circuit here: a stage that degrades still
/// hands its output to the next one. Errors a stage does not absorb end the run.
pub struct ScreeningPipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl ScreeningPipeline {
    pub fn new(reasoner: Arc<dyn Reasoner>, searcher: Arc<dyn WebSearch>) -> Self {
        Self {
            stages: vec![
                Box::new(ExtractionStage::new(Arc::clone(&reasoner))),
                Box::new(VerificationStage::new(Arc::clone(&reasoner), searcher)),
                Box::new(DecisionStage::new(reasoner)),
            ],
        }
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Screens one document, starting from a fresh state.
    pub async fn run(&self, document_text: impl Into<String>) -> Result<ScreeningState, PipelineError> {
        let mut state = ScreeningState::new(document_text);

        for stage in &self.stages {
            info!("Running {} stage", stage.name());
            let update = stage.run(&state).await?;
            debug!(
                "{} stage appended {} log lines",
                stage.name(),
                update.log.len()
            );
            state.apply(update);
        }

        Ok(state)
    }
}
