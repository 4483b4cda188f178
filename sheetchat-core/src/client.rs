//! Chat-completion HTTP client

use crate::config::ChatConfig;
use crate::error::QueryError;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Reply handed to callers when the API answers with an empty choice list.
/// A soft failure: the caller always has text to display.
pub const NO_VALID_RESPONSE: &str = "No valid response from API.";

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
    language: String,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: String,
}

/// Blocking chat-completion client.
///
/// One outbound POST per [`ask`](ChatClient::ask) call; no retry, caching,
/// or deduplication. The underlying connection pool is shared across calls
/// and clones.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::blocking::Client,
    config: ChatConfig,
}

impl ChatClient {
    pub fn new(config: ChatConfig) -> Result<Self, QueryError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| QueryError::Unexpected(e.to_string()))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Send one question and return the assistant's answer text.
    ///
    /// Connection failures, timeouts, and non-2xx statuses are
    /// [`QueryError::Network`]; a body that does not decode into the
    /// expected shape is [`QueryError::ResponseShape`]. A well-formed
    /// response with no choices yields [`NO_VALID_RESPONSE`].
    pub fn ask(&self, question: &str) -> Result<String, QueryError> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: question.to_string(),
            }],
            temperature: self.config.temperature,
            language: self.config.language.clone(),
        };

        debug!(
            "dispatching chat completion to {} (model {})",
            self.config.endpoint, self.config.model
        );

        let body = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .map_err(QueryError::Network)?
            .error_for_status()
            .map_err(QueryError::Network)?
            .text()
            .map_err(QueryError::Network)?;

        parse_answer(&body)
    }
}

/// Decode a response body and extract `choices[0].message.content`.
fn parse_answer(body: &str) -> Result<String, QueryError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(QueryError::ResponseShape)?;

    match response.choices.into_iter().next() {
        Some(choice) => Ok(choice.message.content),
        None => {
            warn!("chat completion returned no choices");
            Ok(NO_VALID_RESPONSE.to_string())
        }
    }
}
