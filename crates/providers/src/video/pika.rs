//! Pika text-to-video adapter.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::ProviderError;
use crate::video::{VideoProvider, VideoRequest, VideoStatus};

const PROVIDER: &str = "pika";

const DEFAULT_BASE_URL: &str = "https://api.pika.art";

/// Default fallback priority (lower tries first).
const DEFAULT_PRIORITY: i32 = 3;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the Pika adapter.
#[derive(Debug, Clone)]
pub struct PikaConfig {
    pub api_key: String,
    pub base_url: String,
    pub priority: i32,
}

impl PikaConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `PIKA_API_KEY` is not set or `PIKA_ENABLED` is
    /// `false`.
    ///
    /// | Variable        | Required | Default                |
    /// |-----------------|----------|------------------------|
    /// | `PIKA_API_KEY`  | yes      | —                      |
    /// | `PIKA_API_URL`  | no       | `https://api.pika.art` |
    /// | `PIKA_PRIORITY` | no       | `3`                    |
    /// | `PIKA_ENABLED`  | no       | `true`                 |
    pub fn from_env() -> Option<Self> {
        if std::env::var("PIKA_ENABLED").as_deref() == Ok("false") {
            return None;
        }
        let api_key = std::env::var("PIKA_API_KEY").ok()?;
        Some(Self {
            api_key,
            base_url: std::env::var("PIKA_API_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            priority: std::env::var("PIKA_PRIORITY")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PRIORITY),
        })
    }
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    video_id: String,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    status: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Pika text-to-video client.
pub struct PikaProvider {
    config: PikaConfig,
    client: reqwest::Client,
}

impl PikaProvider {
    pub fn new(config: PikaConfig) -> Self {
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
}

#[async_trait]
impl VideoProvider for PikaProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn submit(&self, request: &VideoRequest) -> Result<String, ProviderError> {
        let url = format!("{}/generate", self.config.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&serde_json::json!({
                "promptText": request.prompt,
                "options": {
                    "duration": request.duration_secs,
                    "aspectRatio": request.aspect_ratio,
                },
            }))
            .send()
            .await?;

        let response = check_status(response).await?;
        let body: SubmitResponse =
            response
                .json()
                .await
                .map_err(|e| ProviderError::InvalidResponse {
                    provider: PROVIDER,
                    message: e.to_string(),
                })?;
        Ok(body.video_id)
    }

    async fn status(&self, provider_job_id: &str) -> Result<VideoStatus, ProviderError> {
        let url = format!("{}/videos/{provider_job_id}", self.config.base_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;

        let response = check_status(response).await?;
        let body: StatusResponse =
            response
                .json()
                .await
                .map_err(|e| ProviderError::InvalidResponse {
                    provider: PROVIDER,
                    message: e.to_string(),
                })?;

        let status = match body.status.as_str() {
            "queued" => VideoStatus::Queued,
            "generating" => VideoStatus::Rendering,
            "finished" => {
                let output_url = body.url.ok_or_else(|| ProviderError::InvalidResponse {
                    provider: PROVIDER,
                    message: "finished video carries no url".to_string(),
                })?;
                VideoStatus::Completed { output_url }
            }
            "failed" => VideoStatus::Failed {
                reason: body
                    .error
                    .unwrap_or_else(|| "vendor reported failure".to_string()),
            },
            other => {
                return Err(ProviderError::InvalidResponse {
                    provider: PROVIDER,
                    message: format!("unknown status '{other}'"),
                })
            }
        };
        Ok(status)
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
