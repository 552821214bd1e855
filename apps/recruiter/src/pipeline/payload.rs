//! Tagged parse results for JSON payloads returned by the reasoning service.

use serde::{de::DeserializeOwned, Serialize};

use crate::llm_client::strip_json_fences;

/// Outcome of parsing a reasoning-service response into `T`.
///
/// Serialized untagged: a parsed value renders as `T`, a failure as
/// `{"error": "...", "raw": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Parsed<T> {
    Parsed(T),
    Failed { error: String, raw: String },
}

impl<T> Parsed<T> {
    pub fn failed(error: impl Into<String>, raw: impl Into<String>) -> Self {
        Parsed::Failed {
            error: error.into(),
            raw: raw.into(),
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Parsed::Parsed(value) => Some(value),
            Parsed::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Parsed::Parsed(_) => None,
            Parsed::Failed { error, .. } => Some(error),
        }
    }
}

/// Strips optional code fences and deserializes the remainder.
pub fn parse_payload<T: DeserializeOwned>(raw: &str) -> Parsed<T> {
    match serde_json::from_str::<T>(strip_json_fences(raw)) {
        Ok(value) => Parsed::Parsed(value),
        Err(e) => Parsed::failed(format!("Failed to parse JSON: {e}"), raw),
    }
}
