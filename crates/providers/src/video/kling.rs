//! Kling text-to-video adapter.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::ProviderError;
use crate::video::{VideoProvider, VideoRequest, VideoStatus};

const PROVIDER: &str = "kling";

const DEFAULT_BASE_URL: &str = "https://api.klingai.com";

/// Default fallback priority (lower tries first).
const DEFAULT_PRIORITY: i32 = 1;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the Kling adapter.
#[derive(Debug, Clone)]
pub struct KlingConfig {
    pub api_key: String,
    pub base_url: String,
    pub priority: i32,
}

impl KlingConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `KLING_API_KEY` is not set or `KLING_ENABLED` is
    /// `false`.
    ///
    /// | Variable         | Required | Default                    |
    /// |------------------|----------|----------------------------|
    /// | `KLING_API_KEY`  | yes      | —                          |
    /// | `KLING_API_URL`  | no       | `https://api.klingai.com`  |
    /// | `KLING_PRIORITY` | no       | `1`                        |
    /// | `KLING_ENABLED`  | no       | `true`                     |
    pub fn from_env() -> Option<Self> {
        if std::env::var("KLING_ENABLED").as_deref() == Ok("false") {
            return None;
        }
        let api_key = std::env::var("KLING_API_KEY").ok()?;
        Some(Self {
            api_key,
            base_url: std::env::var("KLING_API_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            priority: std::env::var("KLING_PRIORITY")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PRIORITY),
        })
    }
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    data: SubmitData,
}

#[derive(Debug, Deserialize)]
struct SubmitData {
    task_id: String,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    data: StatusData,
}

#[derive(Debug, Deserialize)]
struct StatusData {
    task_status: String,
    #[serde(default)]
    task_status_msg: Option<String>,
    #[serde(default)]
    task_result: Option<TaskResult>,
}

#[derive(Debug, Deserialize)]
struct TaskResult {
    #[serde(default)]
    videos: Vec<TaskVideo>,
}

#[derive(Debug, Deserialize)]
struct TaskVideo {
    url: String,
}

/// Kling text-to-video client.
pub struct KlingProvider {
    config: KlingConfig,
    client: reqwest::Client,
}

impl KlingProvider {
    pub fn new(config: KlingConfig) -> Self {
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
impl VideoProvider for KlingProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn submit(&self, request: &VideoRequest) -> Result<String, ProviderError> {
        let url = format!("{}/v1/videos/text2video", self.config.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&serde_json::json!({
                "prompt": request.prompt,
                "duration": request.duration_secs.to_string(),
                "aspect_ratio": request.aspect_ratio,
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
        Ok(body.data.task_id)
    }

    async fn status(&self, provider_job_id: &str) -> Result<VideoStatus, ProviderError> {
        let url = format!(
            "{}/v1/videos/text2video/{provider_job_id}",
            self.config.base_url
        );

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

        let status = match body.data.task_status.as_str() {
            "submitted" => VideoStatus::Queued,
            "processing" => VideoStatus::Rendering,
            "succeed" => {
                let output_url = body
                    .data
                    .task_result
                    .and_then(|r| r.videos.into_iter().next())
                    .map(|v| v.url)
                    .ok_or_else(|| ProviderError::InvalidResponse {
                        provider: PROVIDER,
                        message: "succeeded task carries no video url".to_string(),
                    })?;
                VideoStatus::Completed { output_url }
            }
            "failed" => VideoStatus::Failed {
                reason: body
                    .data
                    .task_status_msg
                    .unwrap_or_else(|| "vendor reported failure".to_string()),
            },
            other => {
                return Err(ProviderError::InvalidResponse {
                    provider: PROVIDER,
                    message: format!("unknown task_status '{other}'"),
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
