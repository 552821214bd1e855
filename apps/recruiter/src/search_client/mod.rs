//! Search Client: web lookups used by the verification stage.
//!
//! Backed by the DuckDuckGo Instant Answer API. Results are flattened to plain
//! text because the only consumer is a summarization prompt.
//!
//! Limitation: Instant Answer covers topics with an abstract (Wikipedia-style
//! entities), not ranked web results. Queries about private individuals such
//! as "<name> software engineer linkedin github" usually come back empty, so
//! most summaries are written from `NO_RESULTS`. Switching to a ranked-results
//! backend only needs another `WebSearch` implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

const DUCKDUCKGO_API_URL: &str = "https://api.duckduckgo.com/";

/// Returned when the search produced nothing worth summarizing.
pub const NO_RESULTS: &str = "No good search result was found";

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("search service returned status {status}")]
    Status { status: u16 },

    #[error("could not parse search response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A text-in, text-out web search service.
#[async_trait]
pub trait WebSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<String, SearchError>;
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InstantAnswer {
    #[serde(default)]
    heading: String,
    #[serde(default)]
    abstract_text: String,
    #[serde(default, rename = "AbstractURL")]
    abstract_url: String,
    #[serde(default)]
    related_topics: Vec<RelatedTopic>,
}

/// Either a leaf result or a named group of nested results.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RelatedTopic {
    Group {
        #[serde(rename = "Topics")]
        topics: Vec<RelatedTopic>,
    },
    Leaf {
        #[serde(rename = "Text", default)]
        text: String,
        #[serde(rename = "FirstURL", default)]
        first_url: String,
    },
}

#[derive(Clone)]
pub struct DuckDuckGoClient {
    client: Client,
    max_results: usize,
}

impl DuckDuckGoClient {
    pub fn new(max_results: usize) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            max_results,
        })
    }
}

#[async_trait]
impl WebSearch for DuckDuckGoClient {
    async fn search(&self, query: &str) -> Result<String, SearchError> {
        let response = self
            .client
            .get(DUCKDUCKGO_API_URL)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status {
                status: status.as_u16(),
            });
        }

        // The API labels its JSON as javascript, so decode from text.
        let body = response.text().await?;
        let answer: InstantAnswer = serde_json::from_str(&body)?;
        let text = render_results(&answer, self.max_results);
        debug!("search for {query:?} returned {} bytes", text.len());
        Ok(text)
    }
}

fn render_results(answer: &InstantAnswer, max_results: usize) -> String {
    let mut lines = Vec::new();

    if !answer.abstract_text.trim().is_empty() {
        let mut line = String::new();
        if !answer.heading.is_empty() {
            line.push_str(&answer.heading);
            line.push_str(": ");
        }
        line.push_str(answer.abstract_text.trim());
        if !answer.abstract_url.is_empty() {
            line.push_str(&format!(" ({})", answer.abstract_url));
        }
        lines.push(line);
    }

    collect_topics(&answer.related_topics, max_results, &mut lines);

    if lines.is_empty() {
        return NO_RESULTS.to_string();
    }
    lines.truncate(max_results.max(1));
    lines.join("\n")
}

fn collect_topics(topics: &[RelatedTopic], limit: usize, out: &mut Vec<String>) {
    for topic in topics {
        if out.len() >= limit {
            return;
        }
        match topic {
            RelatedTopic::Group { topics } => collect_topics(topics, limit, out),
            RelatedTopic::Leaf { text, first_url } => {
                if text.trim().is_empty() {
                    continue;
                }
                if first_url.is_empty() {
                    out.push(text.trim().to_string());
                } else {
                    out.push(format!("{} ({first_url})", text.trim()));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> InstantAnswer {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_render_abstract_and_topics() {
        let answer = parse(
            r#"{
                "Heading": "Jane Doe",
                "AbstractText": "Jane Doe is a software engineer.",
                "AbstractURL": "https://example.com/jane",
                "RelatedTopics": [
                    {"Text": "Jane Doe on GitHub", "FirstURL": "https://github.com/janedoe"},
                    {"Name": "Profiles", "Topics": [
                        {"Text": "Jane Doe - LinkedIn", "FirstURL": "https://linkedin.com/in/janedoe"}
                    ]}
                ]
            }"#,
        );

        let text = render_results(&answer, 5);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Jane Doe: Jane Doe is a software engineer. (https://example.com/jane)"
        );
        assert_eq!(lines[1], "Jane Doe on GitHub (https://github.com/janedoe)");
        assert!(lines[2].contains("linkedin.com/in/janedoe"));
    }

    #[test]
    fn test_render_respects_max_results() {
        let answer = parse(
            r#"{"RelatedTopics": [
                {"Text": "one", "FirstURL": ""},
                {"Text": "two", "FirstURL": ""},
                {"Text": "three", "FirstURL": ""}
            ]}"#,
        );
        assert_eq!(render_results(&answer, 2), "one\ntwo");
    }

    #[test]
    fn test_render_empty_answer_reports_no_results() {
        let answer = parse(r#"{"Heading": "", "AbstractText": "", "RelatedTopics": []}"#);
        assert_eq!(render_results(&answer, 5), NO_RESULTS);
    }
}
