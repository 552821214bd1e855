//! Deterministic stand-ins for the reasoning and search services.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm_client::{LlmError, Reasoner};
use crate::search_client::{SearchError, WebSearch};

/// Replays queued responses in order and records every instruction it receives.
/// Once the queue is drained every call fails with `EmptyContent`.
#[derive(Default)]
pub struct ScriptedReasoner {
    responses: Mutex<VecDeque<Result<String, LlmError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedReasoner {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().map(|s| Ok(s.into())).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn push_error(self, error: LlmError) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn push_response(self, text: &str) -> Self {
        self.responses.lock().unwrap().push_back(Ok(text.to_string()));
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl Reasoner for ScriptedReasoner {
    async fn complete(&self, instruction: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(instruction.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyContent))
    }
}

/// Answers every query the same way and records the queries.
pub struct StubSearch {
    outcome: Result<String, u16>,
    queries: Mutex<Vec<String>>,
}

impl StubSearch {
    pub fn returning(text: &str) -> Self {
        Self {
            outcome: Ok(text.to_string()),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Fails every query with the given HTTP status.
    pub fn failing(status: u16) -> Self {
        Self {
            outcome: Err(status),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl WebSearch for StubSearch {
    async fn search(&self, query: &str) -> Result<String, SearchError> {
        self.queries.lock().unwrap().push(query.to_string());
        match &self.outcome {
            Ok(text) => Ok(text.clone()),
            Err(status) => Err(SearchError::Status { status: *status }),
        }
    }
}

pub const JANE_PROFILE_JSON: &str = r#"{
  "name": "Jane Doe",
  "email": "jane@example.com",
  "years_of_experience": 7,
  "skills": ["Python", "LangChain", "FastAPI"],
  "summary": "Backend engineer focused on LLM products. Ships reliable APIs."
}"#;

pub const INTERVIEW_DECISION_JSON: &str =
    r#"{"score": 82, "decision": "Interview", "email": "Subject: Next steps Body: Hi Jane"}"#;
