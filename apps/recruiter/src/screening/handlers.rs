//! Axum route handlers for the Screening API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::pipeline::ScreeningState;
use crate::screening::batch::{screen_documents, ScreeningReport, UploadedDocument};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScreenTextRequest {
    pub document_text: String,
}

#[derive(Debug, Serialize)]
pub struct ScreeningBatchResponse {
    pub reports: Vec<ScreeningReport>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/screenings
///
/// Multipart upload of one or more résumés (PDF or plain text). Each file field
/// is screened in upload order; per-document failures are reported, not raised.
pub async fn handle_screen_uploads(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ScreeningBatchResponse>, AppError> {
    let mut documents = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        // Plain form fields carry no file name and are ignored.
        let Some(file_name) = field.file_name().map(str::to_owned) else {
            continue;
        };
        let content_type = field.content_type().map(str::to_owned);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read '{file_name}': {e}")))?;

        documents.push(UploadedDocument {
            file_name,
            content_type,
            data,
        });
    }

    if documents.is_empty() {
        return Err(AppError::Validation(
            "Upload at least one resume file".to_string(),
        ));
    }

    info!("Screening batch of {} documents", documents.len());
    let reports = screen_documents(&state.pipeline, documents).await;
    info!(
        "Batch finished: {}/{} documents completed",
        reports.iter().filter(|r| r.is_completed()).count(),
        reports.len()
    );

    Ok(Json(ScreeningBatchResponse { reports }))
}

/// POST /api/v1/screenings/text
///
/// Screens already-extracted résumé text. Empty text is accepted and screened.
pub async fn handle_screen_text(
    State(state): State<AppState>,
    Json(request): Json<ScreenTextRequest>,
) -> Result<Json<ScreeningState>, AppError> {
    let screening = state
        .pipeline
        .run(request.document_text)
        .await
        .map_err(|e| AppError::Llm(format!("Screening failed: {e}")))?;

    Ok(Json(screening))
}
