//! Sequential screening of uploaded documents.
//!
//! Documents are processed one at a time. A document that fails (unreadable
//! upload or an unabsorbed pipeline error) is reported and the batch moves on.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::pipeline::{ScreeningPipeline, ScreeningState};
use crate::screening::ingest::extract_document_text;

#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    Ingest,
    Pipeline,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScreeningOutcome {
    Completed(ScreeningState),
    Failed { stage: FailureStage, error: String },
}

/// Result for one uploaded document.
#[derive(Debug, Serialize)]
pub struct ScreeningReport {
    pub id: Uuid,
    pub file_name: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcome: ScreeningOutcome,
}

impl ScreeningReport {
    pub fn is_completed(&self) -> bool {
        matches!(self.outcome, ScreeningOutcome::Completed(_))
    }
}

/// Screens every document in order, never letting one failure stop the rest.
pub async fn screen_documents(
    pipeline: &ScreeningPipeline,
    documents: Vec<UploadedDocument>,
) -> Vec<ScreeningReport> {
    let mut reports = Vec::with_capacity(documents.len());

    for document in documents {
        let id = Uuid::new_v4();
        let started_at = Utc::now();
        info!("Screening '{}' ({id})", document.file_name);

        let outcome = screen_one(pipeline, &document).await;
        if let ScreeningOutcome::Failed { stage, error } = &outcome {
            error!("Screening '{}' failed at {stage:?}: {error}", document.file_name);
        }

        reports.push(ScreeningReport {
            id,
            file_name: document.file_name,
            started_at,
            finished_at: Utc::now(),
            outcome,
        });
    }

    reports
}

async fn screen_one(pipeline: &ScreeningPipeline, document: &UploadedDocument) -> ScreeningOutcome {
    let text = match extract_document_text(
        &document.file_name,
        document.content_type.as_deref(),
        document.data.clone(),
    )
    .await
    {
        Ok(text) => text,
        Err(e) => {
            return ScreeningOutcome::Failed {
                stage: FailureStage::Ingest,
                error: e.to_string(),
            }
        }
    };

    match pipeline.run(text).await {
        Ok(state) => ScreeningOutcome::Completed(state),
        Err(e) => ScreeningOutcome::Failed {
            stage: FailureStage::Pipeline,
            error: e.to_string(),
        },
    }
}
