//! RunwayML text-to-video adapter.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::ProviderError;
use crate::video::{VideoProvider, VideoRequest, VideoStatus};

const PROVIDER: &str = "runway";

const DEFAULT_BASE_URL: &str = "https://api.dev.runwayml.com";

/// API version header Runway requires on every call.
const API_VERSION: &str = "2024-11-06";

/// Default fallback priority (lower tries first).
const DEFAULT_PRIORITY: i32 = 2;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the Runway adapter.
#[derive(Debug, Clone)]
pub struct RunwayConfig {
    pub api_key: String,
    pub base_url: String,
    pub priority: i32,
}

impl RunwayConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `RUNWAY_API_KEY` is not set or `RUNWAY_ENABLED` is
    /// `false`.
    ///
    /// | Variable          | Required | Default                          |
    /// |-------------------|----------|----------------------------------|
    /// | `RUNWAY_API_KEY`  | yes      | —                                |
    /// | `RUNWAY_API_URL`  | no       | `https://api.dev.runwayml.com`   |
    /// | `RUNWAY_PRIORITY` | no       | `2`                              |
    /// | `RUNWAY_ENABLED`  | no       | `true`                           |
    pub fn from_env() -> Option<Self> {
        if std::env::var("RUNWAY_ENABLED").as_deref() == Ok("false") {
            return None;
        }
        let api_key = std::env::var("RUNWAY_API_KEY").ok()?;
        Some(Self {
            api_key,
            base_url: std::env::var("RUNWAY_API_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            priority: std::env::var("RUNWAY_PRIORITY")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PRIORITY),
        })
    }
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct TaskResponse {
    status: String,
    #[serde(default)]
    output: Vec<String>,
    #[serde(default)]
    failure: Option<String>,
}

/// RunwayML text-to-video client.
pub struct RunwayProvider {
    config: RunwayConfig,
    client: reqwest::Client,
}

impl RunwayProvider {
    pub fn new(config: RunwayConfig) -> Self {
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
impl VideoProvider for RunwayProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn submit(&self, request: &VideoRequest) -> Result<String, ProviderError> {
        let url = format!("{}/v1/text_to_video", self.config.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .header("X-Runway-Version", API_VERSION)
            .json(&serde_json::json!({
                "promptText": request.prompt,
                "duration": request.duration_secs,
                "ratio": request.aspect_ratio,
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
        Ok(body.id)
    }

    async fn status(&self, provider_job_id: &str) -> Result<VideoStatus, ProviderError> {
        let url = format!("{}/v1/tasks/{provider_job_id}", self.config.base_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.api_key)
            .header("X-Runway-Version", API_VERSION)
            .send()
            .await?;

        let response = check_status(response).await?;
        let body: TaskResponse =
            response
                .json()
                .await
                .map_err(|e| ProviderError::InvalidResponse {
                    provider: PROVIDER,
                    message: e.to_string(),
                })?;

        let status = match body.status.as_str() {
            "PENDING" | "THROTTLED" => VideoStatus::Queued,
            "RUNNING" => VideoStatus::Rendering,
            "SUCCEEDED" => {
                let output_url =
                    body.output
                        .into_iter()
                        .next()
                        .ok_or_else(|| ProviderError::InvalidResponse {
                            provider: PROVIDER,
                            message: "succeeded task carries no output".to_string(),
                        })?;
                VideoStatus::Completed { output_url }
            }
            "FAILED" => VideoStatus::Failed {
                reason: body
                    .failure
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
