//! Document ingestion: turns an uploaded file into plain résumé text.
//!
//! PDF extraction is CPU-bound and runs inside `tokio::task::spawn_blocking`.

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("unsupported document type for '{file_name}' ({content_type})")]
    UnsupportedType {
        file_name: String,
        content_type: String,
    },

    #[error("failed to read PDF '{file_name}': {reason}")]
    Pdf { file_name: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
}

/// Classifies an upload by content type, falling back to the file extension.
pub fn detect_kind(file_name: &str, content_type: Option<&str>) -> Option<DocumentKind> {
    let content_type = content_type.unwrap_or_default().to_ascii_lowercase();
    if content_type.starts_with("application/pdf") {
        return Some(DocumentKind::Pdf);
    }
    if content_type.starts_with("text/plain") {
        return Some(DocumentKind::PlainText);
    }

    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "pdf" => Some(DocumentKind::Pdf),
        "txt" | "text" | "md" => Some(DocumentKind::PlainText),
        _ => None,
    }
}

pub async fn extract_document_text(
    file_name: &str,
    content_type: Option<&str>,
    data: Bytes,
) -> Result<String, IngestError> {
    let kind = detect_kind(file_name, content_type).ok_or_else(|| IngestError::UnsupportedType {
        file_name: file_name.to_string(),
        content_type: content_type.unwrap_or("unknown").to_string(),
    })?;

    let text = match kind {
        DocumentKind::PlainText => String::from_utf8_lossy(&data).into_owned(),
        DocumentKind::Pdf => {
            // pdf-extract can panic on malformed input; a panic surfaces as a JoinError.
            let extracted =
                tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
                    .await
                    .map_err(|e| e.to_string())
                    .and_then(|r| r.map_err(|e| e.to_string()));
            extracted.map_err(|reason| IngestError::Pdf {
                file_name: file_name.to_string(),
                reason,
            })?
        }
    };

    debug!("Extracted {} chars from '{file_name}'", text.len());
    Ok(text)
}
