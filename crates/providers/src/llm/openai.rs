//! OpenAI chat-completions and transcription client.
//!
//! Two calls: story analysis via `POST /v1/chat/completions` with a JSON
//! response format, and spoken-story transcription via
//! `POST /v1/audio/transcriptions` (multipart).

use std::time::Duration;

use serde::Deserialize;
use storyweave_core::analysis::{clamp_intensity, validate_analysis, StoryAnalysis};

use crate::error::ProviderError;

/// Vendor name used in errors and logs.
const PROVIDER: &str = "OpenAI";

/// Default API base URL.
const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Default analysis model.
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Transcription model.
const TRANSCRIPTION_MODEL: &str = "whisper-1";

/// Long stories can take a while to analyze.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Configuration for the OpenAI client.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Bearer token.
    pub api_key: String,
    /// Base URL, overridable for proxies and testing.
    pub base_url: String,
    /// Chat-completions model for analysis.
    pub model: String,
}

impl OpenAiConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `OPENAI_API_KEY` is not set.
    ///
    /// | Variable         | Required | Default                  |
    /// |------------------|----------|--------------------------|
    /// | `OPENAI_API_KEY` | yes      | —                        |
    /// | `OPENAI_API_URL` | no       | `https://api.openai.com` |
    /// | `OPENAI_MODEL`   | no       | `gpt-4o-mini`            |
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").ok()?;
        Some(Self {
            api_key,
            base_url: std::env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        })
    }
}

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Thin client over the OpenAI HTTP API.
pub struct OpenAiClient {
    config: OpenAiConfig,
    client: reqwest::Client,
}

impl OpenAiClient {
    /// Create a client with a pre-configured HTTP client.
    pub fn new(config: OpenAiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { config, client }
    }

    /// Model identifier recorded on analysis rows.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Analyze a story for characters and emotional beats.
    pub async fn analyze_story(
        &self,
        title: &str,
        body: &str,
    ) -> Result<StoryAnalysis, ProviderError> {
        let url = format!("{}/v1/chat/completions", self.config.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&serde_json::json!({
                "model": self.config.model,
                "response_format": {"type": "json_object"},
                "messages": [
                    {"role": "system", "content": ANALYSIS_SYSTEM_PROMPT},
                    {"role": "user", "content": build_analysis_prompt(title, body)},
                ],
            }))
            .send()
            .await?;

        let response = check_status(response).await?;
        let chat: ChatResponse =
            response
                .json()
                .await
                .map_err(|e| ProviderError::InvalidResponse {
                    provider: PROVIDER,
                    message: e.to_string(),
                })?;

        let content = chat
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| ProviderError::InvalidResponse {
                provider: PROVIDER,
                message: "empty choices array".to_string(),
            })?;

        let mut analysis: StoryAnalysis =
            serde_json::from_str(content).map_err(|e| ProviderError::InvalidResponse {
                provider: PROVIDER,
                message: format!("analysis JSON did not match schema: {e}"),
            })?;

        // Models occasionally stray outside the requested intensity range.
        for beat in &mut analysis.emotions {
            beat.intensity = clamp_intensity(beat.intensity);
        }

        validate_analysis(&analysis).map_err(|message| ProviderError::InvalidResponse {
            provider: PROVIDER,
            message,
        })?;

        Ok(analysis)
    }

    /// Transcribe an uploaded audio recording to text.
    pub async fn transcribe(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ProviderError> {
        let url = format!("{}/v1/audio/transcriptions", self.config.base_url);

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("audio/mpeg")
            .map_err(|e| ProviderError::InvalidResponse {
                provider: PROVIDER,
                message: format!("invalid upload mime: {e}"),
            })?;
        let form = reqwest::multipart::Form::new()
            .text("model", TRANSCRIPTION_MODEL)
            .text("response_format", "json")
            .part("file", part);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .multipart(form)
            .send()
            .await?;

        let response = check_status(response).await?;
        let body: TranscriptionResponse =
            response
                .json()
                .await
                .map_err(|e| ProviderError::InvalidResponse {
                    provider: PROVIDER,
                    message: e.to_string(),
                })?;

        Ok(body.text)
    }
}

/// System prompt pinning the analysis output schema.
const ANALYSIS_SYSTEM_PROMPT: &str = "You are a literary analyst. Respond with a single JSON \
    object with keys: characters (array of {name, role, traits}), emotions (array of {emotion, \
    intensity, context} where intensity is between 0.0 and 1.0), and summary (one paragraph).";

/// Build the user message for the analysis request.
fn build_analysis_prompt(title: &str, body: &str) -> String {
    format!("Analyze the following story.\n\nTitle: {title}\n\n{body}")
}

/// Turn a non-2xx response into a [`ProviderError::HttpStatus`] carrying the
/// vendor's error body.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    Err(ProviderError::HttpStatus {
        provider: PROVIDER,
        status,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_returns_none_without_api_key() {
        std::env::remove_var("OPENAI_API_KEY");
        assert!(OpenAiConfig::from_env().is_none());
    }

    #[test]
    fn analysis_prompt_contains_title_and_body() {
        let prompt = build_analysis_prompt("Tides", "Once upon a time.");
        assert!(prompt.contains("Title: Tides"));
        assert!(prompt.contains("Once upon a time."));
    }

    #[test]
    fn system_prompt_names_all_schema_keys() {
        assert!(ANALYSIS_SYSTEM_PROMPT.contains("characters"));
        assert!(ANALYSIS_SYSTEM_PROMPT.contains("emotions"));
        assert!(ANALYSIS_SYSTEM_PROMPT.contains("summary"));
    }
}
