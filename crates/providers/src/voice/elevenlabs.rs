//! ElevenLabs voice cloning and text-to-speech client.
//!
//! Wraps the three calls the platform needs: `POST /v1/voices/add`
//! (instant voice clone from uploaded samples), `POST
//! /v1/text-to-speech/{voice_id}` (narration synthesis), and `DELETE
//! /v1/voices/{voice_id}`.

use std::time::Duration;

use serde::Deserialize;

use crate::error::ProviderError;

/// Vendor name used in errors and logs.
const PROVIDER: &str = "ElevenLabs";

/// Default API base URL.
const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io";

/// Default TTS model.
const DEFAULT_MODEL_ID: &str = "eleven_multilingual_v2";

/// Synthesis can take a while for long stories.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Configuration for the ElevenLabs client.
#[derive(Debug, Clone)]
pub struct ElevenLabsConfig {
    /// API key sent in the `xi-api-key` header.
    pub api_key: String,
    /// Base URL, overridable for testing/self-hosted gateways.
    pub base_url: String,
    /// TTS model id.
    pub model_id: String,
}

impl ElevenLabsConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `ELEVENLABS_API_KEY` is not set.
    ///
    /// | Variable              | Required | Default                      |
    /// |-----------------------|----------|------------------------------|
    /// | `ELEVENLABS_API_KEY`  | yes      | —                            |
    /// | `ELEVENLABS_API_URL`  | no       | `https://api.elevenlabs.io`  |
    /// | `ELEVENLABS_MODEL_ID` | no       | `eleven_multilingual_v2`     |
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("ELEVENLABS_API_KEY").ok()?;
        Some(Self {
            api_key,
            base_url: std::env::var("ELEVENLABS_API_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            model_id: std::env::var("ELEVENLABS_MODEL_ID")
                .unwrap_or_else(|_| DEFAULT_MODEL_ID.to_string()),
        })
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// One uploaded voice sample destined for cloning.
#[derive(Debug, Clone)]
pub struct VoiceSample {
    /// Original file name (used as the multipart part file name).
    pub file_name: String,
    /// Raw audio bytes.
    pub bytes: Vec<u8>,
}

/// Response shape of `POST /v1/voices/add`.
#[derive(Debug, Deserialize)]
struct AddVoiceResponse {
    voice_id: String,
}

/// Thin client over the ElevenLabs HTTP API.
pub struct ElevenLabsClient {
    config: ElevenLabsConfig,
    client: reqwest::Client,
}

impl ElevenLabsClient {
    /// Create a client with a pre-configured HTTP client.
    pub fn new(config: ElevenLabsConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { config, client }
    }

    /// Create an instant voice clone from the given samples.
    ///
    /// Returns the vendor voice id to store on the profile row.
    pub async fn add_voice(
        &self,
        name: &str,
        samples: Vec<VoiceSample>,
    ) -> Result<String, ProviderError> {
        let url = format!("{}/v1/voices/add", self.config.base_url);

        let mut form = reqwest::multipart::Form::new().text("name", name.to_string());
        for sample in samples {
            let part = reqwest::multipart::Part::bytes(sample.bytes)
                .file_name(sample.file_name)
                .mime_str("audio/mpeg")
                .map_err(|e| ProviderError::InvalidResponse {
                    provider: PROVIDER,
                    message: format!("invalid sample mime: {e}"),
                })?;
            form = form.part("files", part);
        }

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", &self.config.api_key)
            .multipart(form)
            .send()
            .await?;

        let response = check_status(response).await?;
        let body: AddVoiceResponse =
            response
                .json()
                .await
                .map_err(|e| ProviderError::InvalidResponse {
                    provider: PROVIDER,
                    message: e.to_string(),
                })?;

        tracing::info!(voice_id = %body.voice_id, "Voice clone created");
        Ok(body.voice_id)
    }

    /// Synthesize speech for the given text with a voice id.
    ///
    /// Returns the raw audio bytes (MP3).
    pub async fn synthesize(&self, voice_id: &str, text: &str) -> Result<Vec<u8>, ProviderError> {
        let url = format!("{}/v1/text-to-speech/{voice_id}", self.config.base_url);

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", &self.config.api_key)
            .json(&serde_json::json!({
                "text": text,
                "model_id": self.config.model_id,
                "voice_settings": {
                    "stability": 0.5,
                    "similarity_boost": 0.75
                }
            }))
            .send()
            .await?;

        let response = check_status(response).await?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }

    /// Delete a cloned voice on the vendor side.
    pub async fn delete_voice(&self, voice_id: &str) -> Result<(), ProviderError> {
        let url = format!("{}/v1/voices/{voice_id}", self.config.base_url);

        let response = self
            .client
            .delete(&url)
            .header("xi-api-key", &self.config.api_key)
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }
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
        std::env::remove_var("ELEVENLABS_API_KEY");
        assert!(ElevenLabsConfig::from_env().is_none());
    }

    #[test]
    fn new_does_not_panic() {
        let _client = ElevenLabsClient::new(ElevenLabsConfig {
            api_key: "key".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
        });
    }
}
