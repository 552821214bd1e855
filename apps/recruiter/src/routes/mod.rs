pub mod health;

use axum::{extract::DefaultBodyLimit, routing::get, routing::post, Router};

use crate::screening::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/screenings",
            post(handlers::handle_screen_uploads).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route(
            "/api/v1/screenings/text",
            post(handlers::handle_screen_text),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::llm_client::LlmError;
    use crate::pipeline::test_support::{
        ScriptedReasoner, StubSearch, INTERVIEW_DECISION_JSON, JANE_PROFILE_JSON,
    };
    use crate::pipeline::ScreeningPipeline;

    fn router(reasoner: ScriptedReasoner) -> Router {
        let pipeline = ScreeningPipeline::new(
            Arc::new(reasoner),
            Arc::new(StubSearch::returning("Jane Doe - Acme")),
        );
        let state = AppState {
            pipeline: Arc::new(pipeline),
        };
        build_router(state, 1024 * 1024)
    }

    fn happy_reasoner() -> ScriptedReasoner {
        ScriptedReasoner::new([JANE_PROFILE_JSON, "Verified at Acme.", INTERVIEW_DECISION_JSON])
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = router(ScriptedReasoner::default())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_screen_text_returns_full_state() {
        let request = Request::post("/api/v1/screenings/text")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"document_text": "Jane Doe, Python"}"#))
            .unwrap();

        let response = router(happy_reasoner()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["candidate_profile"]["name"], "Jane Doe");
        assert_eq!(body["verification_summary"], "Verified at Acme.");
        assert_eq!(body["decision"]["score"], 82);
        assert_eq!(body["progress_log"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_screen_text_unrecovered_failure_is_500() {
        let reasoner = ScriptedReasoner::new([JANE_PROFILE_JSON]).push_error(LlmError::EmptyContent);
        let request = Request::post("/api/v1/screenings/text")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"document_text": "Jane"}"#))
            .unwrap();

        let response = router(reasoner).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["error"]["code"], "LLM_ERROR");
    }

    #[tokio::test]
    async fn test_multipart_upload_screens_each_file() {
        let boundary = "XBOUNDARYX";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"files\"; filename=\"jane.txt\"\r\n\
             Content-Type: text/plain\r\n\r\n\
             Jane Doe, Python engineer\r\n\
             --{boundary}\r\n\
             Content-Disposition: form-data; name=\"files\"; filename=\"logo.png\"\r\n\
             Content-Type: image/png\r\n\r\n\
             not an image\r\n\
             --{boundary}--\r\n"
        );
        let request = Request::post("/api/v1/screenings")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let response = router(happy_reasoner()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let reports = body["reports"].as_array().unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0]["file_name"], "jane.txt");
        assert_eq!(reports[0]["outcome"]["status"], "completed");
        assert_eq!(reports[0]["outcome"]["decision"]["category"], "Interview");
        assert_eq!(reports[1]["outcome"]["status"], "failed");
        assert_eq!(reports[1]["outcome"]["stage"], "ingest");
    }

    #[tokio::test]
    async fn test_multipart_without_files_is_rejected() {
        let boundary = "XBOUNDARYX";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"note\"\r\n\r\n\
             hello\r\n\
             --{boundary}--\r\n"
        );
        let request = Request::post("/api/v1/screenings")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let response = router(ScriptedReasoner::default())
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
    }
}
