//! Client for the OpenAI Responses API.
//!
//! One blocking/awaited call per plan, no retry. The request carries the
//! system prompt and the user's material as two input messages plus a
//! strict `json_schema` format directive; the reply is decoded into tagged
//! variants so an absent output text is an explicit error rather than an
//! undefined fallthrough.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::plan::schema::{SCHEMA_NAME, study_plan_schema};

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Production API root. Overridable for tests and proxies.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Upper bound on a single upstream call. There is no retry; a timeout
/// surfaces on the same path as any other transport failure.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Errors from the upstream completion call.
#[derive(Debug, Error)]
pub enum OpenAiError {
    /// The request never completed (connect failure, timeout, bad TLS).
    #[error("completion API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status. `body` is the raw
    /// upstream error text, relayed to the caller as diagnostic detail.
    #[error("completion API returned status {status}")]
    Api { status: u16, body: String },

    /// The reply held no `message` item with an `output_text` payload.
    #[error("no structured output found in completion reply")]
    NoStructuredOutput,
}

/// Client for one upstream completion endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiClient {
    /// Create a client with the given credential and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, OpenAiError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Override the API root (tests point this at a local mock).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Request a plan for the given prompt and material.
    ///
    /// Returns the raw structured-output text; parsing it into a
    /// [`StudyPlan`](crate::plan::StudyPlan) is the caller's step.
    pub async fn generate_plan(
        &self,
        system_prompt: &str,
        material: &str,
    ) -> Result<String, OpenAiError> {
        let body = ResponsesRequest {
            model: self.model.clone(),
            input: vec![
                InputMessage {
                    role: "system",
                    content: system_prompt.to_string(),
                },
                InputMessage {
                    role: "user",
                    content: material.to_string(),
                },
            ],
            text: TextDirective {
                format: FormatDirective {
                    kind: "json_schema",
                    name: SCHEMA_NAME,
                    strict: true,
                    schema: study_plan_schema(),
                },
            },
        };

        let url = format!("{}/responses", self.base_url);
        tracing::debug!(model = %self.model, %url, "requesting plan from completion API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status, "completion API returned an error");
            return Err(OpenAiError::Api { status, body });
        }

        let reply: ResponsesReply = response.json().await?;
        extract_output_text(reply).ok_or(OpenAiError::NoStructuredOutput)
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ResponsesRequest {
    model: String,
    input: Vec<InputMessage>,
    text: TextDirective,
}

#[derive(Debug, Serialize)]
struct InputMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct TextDirective {
    format: FormatDirective,
}

#[derive(Debug, Serialize)]
struct FormatDirective {
    #[serde(rename = "type")]
    kind: &'static str,
    name: &'static str,
    strict: bool,
    schema: Value,
}

#[derive(Debug, Deserialize)]
struct ResponsesReply {
    #[serde(default)]
    output: Vec<OutputItem>,
}

/// One item of the reply's `output` array. Anything that is not a
/// `message` (reasoning traces, tool calls) decodes as `Other` and is
/// skipped during extraction.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum OutputItem {
    Message {
        #[serde(default)]
        content: Vec<ContentItem>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentItem {
    OutputText { text: String },
    #[serde(other)]
    Other,
}

/// Take the first `output_text` payload from the first `message` item
/// that has one. `None` when the reply carries no such payload.
fn extract_output_text(reply: ResponsesReply) -> Option<String> {
    reply.output.into_iter().find_map(|item| match item {
        OutputItem::Message { content } => content.into_iter().find_map(|c| match c {
            ContentItem::OutputText { text } => Some(text),
            ContentItem::Other => None,
        }),
        OutputItem::Other => None,
    })
}
