use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Number;

use crate::pipeline::payload::Parsed;

/// Placeholder used whenever no candidate name could be extracted.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Message carried by the decision record when the decision could not be parsed.
pub const DECISION_FAILURE_MESSAGE: &str = "Could not generate decision.";

/// Structured candidate profile extracted from résumé text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Numeric estimate from the model; never checked against the résumé.
    /// Kept as a JSON number so `7` stays `7` and `7.5` stays `7.5`.
    #[serde(default)]
    pub years_of_experience: Option<Number>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

impl CandidateProfile {
    /// The name to look up online, or `None` if there is nothing usable.
    pub fn usable_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty() && !n.eq_ignore_ascii_case(UNKNOWN_NAME))
    }

    pub fn display_name(&self) -> &str {
        self.usable_name().unwrap_or(UNKNOWN_NAME)
    }
}

/// Treats an explicit `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Extraction result: a profile or an error marker.
pub type ProfileOutcome = Parsed<CandidateProfile>;

/// Hiring recommendation category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DecisionCategory {
    Hire,
    Interview,
    Reject,
    Error,
}

impl DecisionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionCategory::Hire => "Hire",
            DecisionCategory::Interview => "Interview",
            DecisionCategory::Reject => "Reject",
            DecisionCategory::Error => "Error",
        }
    }

    /// Whether the candidate moves forward in the hiring process.
    pub fn is_positive(&self) -> bool {
        matches!(self, DecisionCategory::Hire | DecisionCategory::Interview)
    }
}

impl fmt::Display for DecisionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown decision category '{}'", self.0)
    }
}

impl FromStr for DecisionCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hire" => Ok(DecisionCategory::Hire),
            // "Interface" is an old misspelling that models still echo back.
            "interview" | "interface" => Ok(DecisionCategory::Interview),
            "reject" => Ok(DecisionCategory::Reject),
            "error" => Ok(DecisionCategory::Error),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// Final output of the decision stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionRecord {
    /// Always within 0..=100.
    pub score: u8,
    pub category: DecisionCategory,
    /// Drafted candidate-facing message.
    pub message: String,
}

impl DecisionRecord {
    /// The record substituted whenever the decision response is unusable.
    pub fn failed() -> Self {
        DecisionRecord {
            score: 0,
            category: DecisionCategory::Error,
            message: DECISION_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// Wire shape of the decision response: `{score, decision, email}`.
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionResponse {
    pub score: f64,
    pub decision: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl TryFrom<DecisionResponse> for DecisionRecord {
    type Error = UnknownCategory;

    fn try_from(response: DecisionResponse) -> Result<Self, Self::Error> {
        let category = response.decision.parse()?;
        Ok(DecisionRecord {
            score: response.score.round().clamp(0.0, 100.0) as u8,
            category,
            message: response.email.unwrap_or_default(),
        })
    }
}
