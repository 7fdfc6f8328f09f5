//! Gemini review client.
//!
//! One `generateContent` call per review: the prompt from [`crate::prompt`],
//! the response schema, and a low sampling temperature. No retries. Every
//! failure is logged with its cause and reported as [`Error::ReviewFailed`].

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::config::Config;
use crate::parse::parse_feedback;
use crate::prompt::{build_prompt, response_schema};
use crate::types::{FeedbackItem, Language};
use crate::{Error, Result};

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "API_KEY";

/// Anything that can review a piece of code.
///
/// The TUI holds an `Arc<dyn ReviewService>` so tests can substitute a stub
/// for the HTTP client.
#[async_trait]
pub trait ReviewService: Send + Sync {
    /// Reviews `code` written in `language` and returns the findings.
    ///
    /// An empty vector means the reviewer found nothing to report.
    async fn review(&self, code: &str, language: Language) -> Result<Vec<FeedbackItem>>;
}

/// HTTP client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
    temperature: f64,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

/// Why a call failed. Only ever logged; callers see `Error::ReviewFailed`.
#[derive(Debug, thiserror::Error)]
enum CallError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("failed to decode response envelope: {0}")]
    Envelope(#[source] reqwest::Error),
    #[error("response text is not valid feedback JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    parts: Option<Vec<Part>>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenates the text of every part of every candidate.
    fn text(self) -> String {
        self.candidates
            .unwrap_or_default()
            .into_iter()
            .flat_map(|c| c.content.and_then(|c| c.parts).unwrap_or_default())
            .filter_map(|p| p.text)
            .collect()
    }
}

impl GeminiClient {
    /// Builds a client from `config` and an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingApiKey` for a blank key and `Error::Config` if the
    /// HTTP client cannot be constructed.
    pub fn new(config: &Config, api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(Error::MissingApiKey(API_KEY_ENV));
        }
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            api_key,
            temperature: config.temperature,
        })
    }

    /// Builds a client reading the API key from [`API_KEY_ENV`].
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingApiKey` if the variable is unset or empty.
    pub fn from_env(config: &Config) -> Result<Self> {
        let key = std::env::var(API_KEY_ENV).unwrap_or_default();
        Self::new(config, key)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    async fn generate(&self, code: &str, language: Language) -> std::result::Result<Vec<FeedbackItem>, CallError> {
        let body = json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [{"text": build_prompt(code, language)}]
                }
            ],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema(),
                "temperature": self.temperature
            }
        });

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(CallError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CallError::Status { status, body });
        }

        let envelope: GenerateContentResponse =
            response.json().await.map_err(CallError::Envelope)?;
        Ok(parse_feedback(&envelope.text())?)
    }
}

#[async_trait]
impl ReviewService for GeminiClient {
    async fn review(&self, code: &str, language: Language) -> Result<Vec<FeedbackItem>> {
        tracing::debug!(model = %self.model, %language, bytes = code.len(), "calling Gemini API");
        match self.generate(code, language).await {
            Ok(items) => {
                tracing::debug!(findings = items.len(), "Gemini review parsed");
                Ok(items)
            }
            Err(e) => {
                tracing::error!(error = %e, "error calling Gemini API");
                Err(Error::ReviewFailed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(json: &str) -> GenerateContentResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn envelope_text_joins_all_parts() {
        let env = envelope(
            r#"{"candidates":[{"content":{"parts":[{"text":"[{\"line\":1,"},{"text":"\"x\":2}]"}]}}]}"#,
        );
        assert_eq!(env.text(), r#"[{"line":1,"x":2}]"#);
    }

    #[test]
    fn envelope_without_candidates_is_empty_text() {
        assert_eq!(envelope("{}").text(), "");
        assert_eq!(envelope(r#"{"candidates":[{}]}"#).text(), "");
    }

    #[test]
    fn endpoint_strips_trailing_slash() {
        let config = Config {
            base_url: "http://localhost:9999/v1beta/".to_owned(),
            ..Config::default()
        };
        let client = GeminiClient::new(&config, "k").unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:9999/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn debug_output_hides_api_key() {
        let client = GeminiClient::new(&Config::default(), "super-secret").unwrap();
        assert!(!format!("{client:?}").contains("super-secret"));
    }

    #[test]
    fn blank_key_is_rejected() {
        let err = GeminiClient::new(&Config::default(), "  ").unwrap_err();
        assert!(matches!(err, Error::MissingApiKey(API_KEY_ENV)));
        assert_eq!(err.to_string(), "API_KEY environment variable not set");
    }
}
