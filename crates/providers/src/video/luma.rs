//! Luma Dream Machine text-to-video adapter.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::ProviderError;
use crate::video::{VideoProvider, VideoRequest, VideoStatus};

const PROVIDER: &str = "luma";

const DEFAULT_BASE_URL: &str = "https://api.lumalabs.ai";

/// Default fallback priority (lower tries first).
const DEFAULT_PRIORITY: i32 = 4;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the Luma adapter.
#[derive(Debug, Clone)]
pub struct LumaConfig {
    pub api_key: String,
    pub base_url: String,
    pub priority: i32,
}

impl LumaConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `LUMA_API_KEY` is not set or `LUMA_ENABLED` is
    /// `false`.
    ///
    /// | Variable        | Required | Default                    |
    /// |-----------------|----------|----------------------------|
    /// | `LUMA_API_KEY`  | yes      | —                          |
    /// | `LUMA_API_URL`  | no       | `https://api.lumalabs.ai`  |
    /// | `LUMA_PRIORITY` | no       | `4`                        |
    /// | `LUMA_ENABLED`  | no       | `true`                     |
    pub fn from_env() -> Option<Self> {
        if std::env::var("LUMA_ENABLED").as_deref() == Ok("false") {
            return None;
        }
        let api_key = std::env::var("LUMA_API_KEY").ok()?;
        Some(Self {
            api_key,
            base_url: std::env::var("LUMA_API_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            priority: std::env::var("LUMA_PRIORITY")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PRIORITY),
        })
    }
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    id: String,
    state: String,
    #[serde(default)]
    assets: Option<Assets>,
    #[serde(default)]
    failure_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Assets {
    #[serde(default)]
    video: Option<String>,
}

/// Luma Dream Machine client.
pub struct LumaProvider {
    config: LumaConfig,
    client: reqwest::Client,
}

impl LumaProvider {
    pub fn new(config: LumaConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { config, client }
    }

    /// Fallback priority from configuration.
    pub fn priority(&self) -> i32 {
        self.config.priority
    }

    fn map_state(body: GenerationResponse) -> Result<VideoStatus, ProviderError> {
        let status = match body.state.as_str() {
            "queued" => VideoStatus::Queued,
            "dreaming" => VideoStatus::Rendering,
            "completed" => {
                let output_url = body
                    .assets
                    .and_then(|a| a.video)
                    .ok_or_else(|| ProviderError::InvalidResponse {
                        provider: PROVIDER,
                        message: "completed generation carries no video asset".to_string(),
                    })?;
                VideoStatus::Completed { output_url }
            }
            "failed" => VideoStatus::Failed {
                reason: body
                    .failure_reason
                    .unwrap_or_else(|| "vendor reported failure".to_string()),
            },
            other => {
                return Err(ProviderError::InvalidResponse {
                    provider: PROVIDER,
                    message: format!("unknown state '{other}'"),
                })
            }
        };
        Ok(status)
    }
}

#[async_trait]
impl VideoProvider for LumaProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn submit(&self, request: &VideoRequest) -> Result<String, ProviderError> {
        let url = format!("{}/dream-machine/v1/generations", self.config.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&serde_json::json!({
                "prompt": request.prompt,
                "aspect_ratio": request.aspect_ratio,
                "duration": format!("{}s", request.duration_secs),
            }))
            .send()
            .await?;

        let response = check_status(response).await?;
        let body: GenerationResponse =
            response
                .json()
                .await
                .map_err(|e| ProviderError::InvalidResponse {
                    provider: PROVIDER,
                    message: e.to_string(),
                })?;
        Ok(body.id)
    }

    async fn status(&self, provider_job_id: &str) -> Result<VideoStatus, ProviderError> {
        let url = format!(
            "{}/dream-machine/v1/generations/{provider_job_id}",
            self.config.base_url
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;

        let response = check_status(response).await?;
        let body: GenerationResponse =
            response
                .json()
                .await
                .map_err(|e| ProviderError::InvalidResponse {
                    provider: PROVIDER,
                    message: e.to_string(),
                })?;

        Self::map_state(body)
    }
}

/// Turn a non-2xx response into a [`ProviderError::HttpStatus`].
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
