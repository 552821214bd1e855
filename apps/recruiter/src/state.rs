use std::sync::Arc;

use crate::pipeline::ScreeningPipeline;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// The pipeline holds no per-document data, so one instance serves every request.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ScreeningPipeline>,
}
