//! Prioritized video provider registry with sequential fallback.
//!
//! Enabled providers (those with credentials in the environment) are held in
//! ascending priority order. An in-memory active-provider pointer selects
//! which vendor is tried first; switching it is a pointer write behind a
//! `RwLock`. Submission walks the active provider, then the remaining
//! enabled providers in priority order, returning on the first acceptance.
//! There is no circuit breaking or health-based demotion.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

use crate::error::ProviderError;
use crate::video::kling::{KlingConfig, KlingProvider};
use crate::video::luma::{LumaConfig, LumaProvider};
use crate::video::pika::{PikaConfig, PikaProvider};
use crate::video::runway::{RunwayConfig, RunwayProvider};
use crate::video::{VideoProvider, VideoRequest, VideoStatus};

/// One registered (enabled) provider.
pub struct RegisteredProvider {
    pub name: &'static str,
    pub priority: i32,
    pub provider: Arc<dyn VideoProvider>,
}

/// Registry entry as reported by the admin listing endpoint.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProviderInfo {
    pub name: &'static str,
    pub priority: i32,
    pub active: bool,
}

/// The prioritized provider registry.
///
/// Created once at startup via [`ProviderRegistry::from_env`] and shared via
/// `Arc` in the application state.
pub struct ProviderRegistry {
    /// Enabled providers in ascending priority order.
    providers: Vec<RegisteredProvider>,
    /// Name of the provider tried first; always one of `providers`.
    active: RwLock<Option<&'static str>>,
}

impl ProviderRegistry {
    /// Build a registry from explicit entries.
    ///
    /// Entries are sorted by ascending priority; the first becomes the
    /// initial active provider.
    pub fn new(mut providers: Vec<RegisteredProvider>) -> Self {
        providers.sort_by_key(|p| p.priority);
        let active = providers.first().map(|p| p.name);
        Self {
            providers,
            active: RwLock::new(active),
        }
    }

    /// Build the registry from environment configuration.
    ///
    /// Vendors without credentials (or explicitly disabled) are left out.
    pub fn from_env() -> Self {
        let mut providers: Vec<RegisteredProvider> = Vec::new();

        if let Some(config) = KlingConfig::from_env() {
            let provider = KlingProvider::new(config);
            providers.push(RegisteredProvider {
                name: "kling",
                priority: provider.priority(),
                provider: Arc::new(provider),
            });
        }
        if let Some(config) = RunwayConfig::from_env() {
            let provider = RunwayProvider::new(config);
            providers.push(RegisteredProvider {
                name: "runway",
                priority: provider.priority(),
                provider: Arc::new(provider),
            });
        }
        if let Some(config) = PikaConfig::from_env() {
            let provider = PikaProvider::new(config);
            providers.push(RegisteredProvider {
                name: "pika",
                priority: provider.priority(),
                provider: Arc::new(provider),
            });
        }
        if let Some(config) = LumaConfig::from_env() {
            let provider = LumaProvider::new(config);
            providers.push(RegisteredProvider {
                name: "luma",
                priority: provider.priority(),
                provider: Arc::new(provider),
            });
        }

        tracing::info!(
            enabled = providers.len(),
            "Video provider registry constructed"
        );
        Self::new(providers)
    }

    /// List registered providers with the current active flag.
    pub async fn list(&self) -> Vec<ProviderInfo> {
        let active = *self.active.read().await;
        self.providers
            .iter()
            .map(|p| ProviderInfo {
                name: p.name,
                priority: p.priority,
                active: Some(p.name) == active,
            })
            .collect()
    }

    /// Switch the active provider pointer.
    ///
    /// Returns an error naming the known providers when `name` is not
    /// registered.
    pub async fn set_active(&self, name: &str) -> Result<(), ProviderError> {
        match self.providers.iter().find(|p| p.name == name) {
            Some(p) => {
                *self.active.write().await = Some(p.name);
                tracing::info!(provider = p.name, "Active video provider switched");
                Ok(())
            }
            None => {
                let known: Vec<_> = self.providers.iter().map(|p| p.name).collect();
                Err(ProviderError::Exhausted(format!(
                    "unknown provider '{name}', registered: {}",
                    known.join(", ")
                )))
            }
        }
    }

    /// Submit a render request with sequential fallback.
    ///
    /// Tries the active provider first, then the remaining enabled
    /// providers in priority order. Returns the accepting provider's name
    /// and its job id. Each rejection is logged and the loop continues;
    /// only when every provider has failed does the call error.
    pub async fn submit_with_fallback(
        &self,
        request: &VideoRequest,
    ) -> Result<(&'static str, String), ProviderError> {
        let ordered = self.fallback_order().await;
        if ordered.is_empty() {
            return Err(ProviderError::Exhausted(
                "no video providers are configured".to_string(),
            ));
        }

        let mut failures: Vec<String> = Vec::new();
        for provider in ordered {
            match provider.submit(request).await {
                Ok(job_id) => {
                    tracing::info!(provider = provider.name(), job_id = %job_id, "Render submitted");
                    return Ok((provider.name(), job_id));
                }
                Err(e) => {
                    tracing::warn!(
                        provider = provider.name(),
                        error = %e,
                        "Provider rejected render, falling back"
                    );
                    failures.push(format!("{}: {e}", provider.name()));
                }
            }
        }

        Err(ProviderError::Exhausted(failures.join("; ")))
    }

    /// Poll the status of a job on the named provider.
    pub async fn status(
        &self,
        provider_name: &str,
        provider_job_id: &str,
    ) -> Result<VideoStatus, ProviderError> {
        let provider = self
            .providers
            .iter()
            .find(|p| p.name == provider_name)
            .ok_or_else(|| {
                ProviderError::Exhausted(format!("provider '{provider_name}' is not registered"))
            })?;
        provider.provider.status(provider_job_id).await
    }

    /// Resolve the try-order: active first, then the rest by priority.
    async fn fallback_order(&self) -> Vec<Arc<dyn VideoProvider>> {
        let active = *self.active.read().await;
        let mut ordered: Vec<Arc<dyn VideoProvider>> = Vec::with_capacity(self.providers.len());

        if let Some(active_name) = active {
            if let Some(p) = self.providers.iter().find(|p| p.name == active_name) {
                ordered.push(Arc::clone(&p.provider));
            }
        }
        for p in &self.providers {
            if Some(p.name) != active {
                ordered.push(Arc::clone(&p.provider));
            }
        }
        ordered
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted provider: fails the first `fail_count` submissions.
    struct ScriptedProvider {
        name: &'static str,
        accepts: bool,
        calls: AtomicUsize,
    }

    impl ScriptedProvider {
        fn new(name: &'static str, accepts: bool) -> Arc<Self> {
            Arc::new(Self {
                name,
                accepts,
                calls: AtomicUsize::new(0),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl VideoProvider for ScriptedProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn submit(&self, _request: &VideoRequest) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.accepts {
                Ok(format!("{}-job-1", self.name))
            } else {
                Err(ProviderError::HttpStatus {
                    provider: self.name,
                    status: 503,
                    message: "over capacity".to_string(),
                })
            }
        }

        async fn status(&self, _provider_job_id: &str) -> Result<VideoStatus, ProviderError> {
            Ok(VideoStatus::Rendering)
        }
    }

    fn entry(name: &'static str, priority: i32, provider: Arc<ScriptedProvider>) -> RegisteredProvider {
        RegisteredProvider {
            name,
            priority,
            provider,
        }
    }

    #[tokio::test]
    async fn lowest_priority_provider_is_active_by_default() {
        let registry = ProviderRegistry::new(vec![
            entry("pika", 3, ScriptedProvider::new("pika", true)),
            entry("kling", 1, ScriptedProvider::new("kling", true)),
        ]);

        let infos = registry.list().await;
        assert_eq!(infos[0].name, "kling");
        assert!(infos[0].active);
        assert!(!infos[1].active);
    }

    #[tokio::test]
    async fn submit_uses_active_provider_first() {
        let kling = ScriptedProvider::new("kling", true);
        let pika = ScriptedProvider::new("pika", true);
        let registry = ProviderRegistry::new(vec![
            entry("kling", 1, Arc::clone(&kling)),
            entry("pika", 3, Arc::clone(&pika)),
        ]);

        let (name, job_id) = registry
            .submit_with_fallback(&VideoRequest::new("a storm at sea"))
            .await
            .unwrap();
        assert_eq!(name, "kling");
        assert_eq!(job_id, "kling-job-1");
        assert_eq!(pika.call_count(), 0);
    }

    #[tokio::test]
    async fn fallback_walks_priority_order_on_failure() {
        let kling = ScriptedProvider::new("kling", false);
        let runway = ScriptedProvider::new("runway", false);
        let pika = ScriptedProvider::new("pika", true);
        let registry = ProviderRegistry::new(vec![
            entry("kling", 1, Arc::clone(&kling)),
            entry("runway", 2, Arc::clone(&runway)),
            entry("pika", 3, Arc::clone(&pika)),
        ]);

        let (name, _) = registry
            .submit_with_fallback(&VideoRequest::new("dawn over mountains"))
            .await
            .unwrap();
        assert_eq!(name, "pika");
        assert_eq!(kling.call_count(), 1);
        assert_eq!(runway.call_count(), 1);
    }

    #[tokio::test]
    async fn switching_active_reorders_the_walk() {
        let kling = ScriptedProvider::new("kling", true);
        let luma = ScriptedProvider::new("luma", true);
        let registry = ProviderRegistry::new(vec![
            entry("kling", 1, Arc::clone(&kling)),
            entry("luma", 4, Arc::clone(&luma)),
        ]);

        registry.set_active("luma").await.unwrap();
        let (name, _) = registry
            .submit_with_fallback(&VideoRequest::new("city lights"))
            .await
            .unwrap();
        assert_eq!(name, "luma");
        assert_eq!(kling.call_count(), 0);
    }

    #[tokio::test]
    async fn set_active_rejects_unknown_provider() {
        let registry =
            ProviderRegistry::new(vec![entry("kling", 1, ScriptedProvider::new("kling", true))]);
        let err = registry.set_active("sora").await.unwrap_err();
        assert!(err.to_string().contains("unknown provider 'sora'"));
    }

    #[tokio::test]
    async fn all_failures_surface_every_vendor_error() {
        let registry = ProviderRegistry::new(vec![
            entry("kling", 1, ScriptedProvider::new("kling", false)),
            entry("runway", 2, ScriptedProvider::new("runway", false)),
        ]);

        let err = registry
            .submit_with_fallback(&VideoRequest::new("empty harbor"))
            .await
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("kling"));
        assert!(message.contains("runway"));
    }

    #[tokio::test]
    async fn empty_registry_reports_not_configured() {
        let registry = ProviderRegistry::new(vec![]);
        let err = registry
            .submit_with_fallback(&VideoRequest::new("anything"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no video providers are configured"));
    }

    #[tokio::test]
    async fn status_requires_registered_provider() {
        let registry =
            ProviderRegistry::new(vec![entry("kling", 1, ScriptedProvider::new("kling", true))]);
        assert!(registry.status("kling", "job-1").await.is_ok());
        assert!(registry.status("runway", "job-1").await.is_err());
    }
}
