//! Video generation vendors behind a common trait.
//!
//! Each adapter maps one vendor's JSON API onto [`VideoRequest`] /
//! [`VideoStatus`]; the [`ProviderRegistry`] orders enabled adapters by
//! priority and falls back sequentially on submission failure.

pub mod kling;
pub mod luma;
pub mod pika;
pub mod registry;
pub mod runway;

pub use kling::KlingProvider;
pub use luma::LumaProvider;
pub use pika::PikaProvider;
pub use registry::{ProviderInfo, ProviderRegistry, RegisteredProvider};
pub use runway::RunwayProvider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use storyweave_core::status::video_job;

use crate::error::ProviderError;

/// A render request in the internal shape all adapters accept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoRequest {
    /// Text prompt for the generator.
    pub prompt: String,
    /// Requested clip length in seconds.
    pub duration_secs: u32,
    /// Aspect ratio string, e.g. `"16:9"`.
    pub aspect_ratio: String,
}

/// Default clip length.
pub const DEFAULT_DURATION_SECS: u32 = 5;

/// Default aspect ratio.
pub const DEFAULT_ASPECT_RATIO: &str = "16:9";

impl VideoRequest {
    /// Build a request with the platform defaults for length and ratio.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            duration_secs: DEFAULT_DURATION_SECS,
            aspect_ratio: DEFAULT_ASPECT_RATIO.to_string(),
        }
    }
}

/// Vendor-agnostic render status.
#[derive(Debug, Clone, PartialEq)]
pub enum VideoStatus {
    /// Accepted but not yet started.
    Queued,
    /// Actively rendering.
    Rendering,
    /// Finished; the output is downloadable.
    Completed { output_url: String },
    /// The vendor reported failure.
    Failed { reason: String },
}

impl VideoStatus {
    /// Map onto the `video_jobs.status` string for the row update.
    pub fn job_status(&self) -> &'static str {
        match self {
            VideoStatus::Queued | VideoStatus::Rendering => video_job::SUBMITTED,
            VideoStatus::Completed { .. } => video_job::COMPLETED,
            VideoStatus::Failed { .. } => video_job::FAILED,
        }
    }
}

/// A video generation vendor.
#[async_trait]
pub trait VideoProvider: Send + Sync {
    /// Stable provider name stored on `video_jobs.provider`.
    fn name(&self) -> &'static str;

    /// Submit a render request, returning the vendor's job id.
    async fn submit(&self, request: &VideoRequest) -> Result<String, ProviderError>;

    /// Poll the vendor for the current status of a submitted job.
    async fn status(&self, provider_job_id: &str) -> Result<VideoStatus, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_maps_onto_job_status_strings() {
        assert_eq!(VideoStatus::Queued.job_status(), "submitted");
        assert_eq!(VideoStatus::Rendering.job_status(), "submitted");
        assert_eq!(
            VideoStatus::Completed {
                output_url: "https://cdn.example.com/v.mp4".to_string()
            }
            .job_status(),
            "completed"
        );
        assert_eq!(
            VideoStatus::Failed {
                reason: "nsfw".to_string()
            }
            .job_status(),
            "failed"
        );
    }

    #[test]
    fn request_defaults() {
        let req = VideoRequest::new("a lighthouse at dusk");
        assert_eq!(req.duration_secs, 5);
        assert_eq!(req.aspect_ratio, "16:9");
    }
}
