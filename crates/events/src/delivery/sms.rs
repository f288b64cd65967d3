//! SMS notification delivery via an HTTP vendor API.
//!
//! [`SmsDelivery`] POSTs a JSON message to the configured vendor endpoint.
//! A single attempt is made per delivery; the dispatcher records the outcome
//! in the delivery row.

use std::time::Duration;

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for SMS delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum SmsError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The vendor returned a non-2xx status code.
    #[error("SMS vendor returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// SmsConfig
// ---------------------------------------------------------------------------

/// Configuration for the HTTP SMS vendor.
#[derive(Debug, Clone)]
pub struct SmsConfig {
    /// Vendor message-send endpoint URL.
    pub api_url: String,
    /// Bearer token for the vendor API.
    pub api_key: String,
    /// Sender id or number.
    pub from_number: String,
}

impl SmsConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMS_API_URL` or `SMS_API_KEY` is not set,
    /// signalling that SMS delivery is not configured and should be skipped.
    ///
    /// | Variable      | Required | Default       |
    /// |---------------|----------|---------------|
    /// | `SMS_API_URL` | yes      | —             |
    /// | `SMS_API_KEY` | yes      | —             |
    /// | `SMS_FROM`    | no       | `Storyweave`  |
    pub fn from_env() -> Option<Self> {
        let api_url = std::env::var("SMS_API_URL").ok()?;
        let api_key = std::env::var("SMS_API_KEY").ok()?;
        Some(Self {
            api_url,
            api_key,
            from_number: std::env::var("SMS_FROM").unwrap_or_else(|_| "Storyweave".to_string()),
        })
    }
}

// ---------------------------------------------------------------------------
// SmsDelivery
// ---------------------------------------------------------------------------

/// Delivers rendered notification texts to an HTTP SMS vendor.
pub struct SmsDelivery {
    config: SmsConfig,
    client: reqwest::Client,
}

impl SmsDelivery {
    /// Create a new delivery service with a pre-configured HTTP client.
    pub fn new(config: SmsConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { config, client }
    }

    /// Send one SMS. Single attempt, no retry.
    pub async fn deliver(&self, to_phone: &str, body: &str) -> Result<(), SmsError> {
        let payload = serde_json::json!({
            "from": self.config.from_number,
            "to": to_phone,
            "body": body,
        });

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SmsError::HttpStatus(response.status().as_u16()));
        }

        tracing::info!(to = to_phone, "Notification SMS sent");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_returns_none_without_api_url() {
        std::env::remove_var("SMS_API_URL");
        assert!(SmsConfig::from_env().is_none());
    }

    #[test]
    fn sms_error_display_http_status() {
        let err = SmsError::HttpStatus(429);
        assert_eq!(err.to_string(), "SMS vendor returned HTTP 429");
    }

    #[test]
    fn new_does_not_panic() {
        let _delivery = SmsDelivery::new(SmsConfig {
            api_url: "https://sms.example.com/v1/messages".to_string(),
            api_key: "key".to_string(),
            from_number: "Storyweave".to_string(),
        });
    }
}
