//! # AI Configuration Module
//!
//! This module defines configuration for the AI collaborator: where to reach
//! it, how long each kind of call may take, and how failures are retried.

use std::env;
use std::time::Duration;

// Constants for the collaborator endpoint
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONVERSION_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_STREAM_TIMEOUT_SECS: u64 = 60;

/// Recovery configuration for error handling
#[derive(Debug, Clone)]
pub struct RecoveryConfig {
    /// Maximum number of retry attempts
    pub max_retries: u32,
    /// Base delay between retries in milliseconds
    pub base_retry_delay_ms: u64,
    /// Maximum delay between retries in milliseconds
    pub max_retry_delay_ms: u64,
    /// Circuit breaker failure threshold
    pub circuit_breaker_threshold: u32,
    /// Circuit breaker reset timeout in seconds
    pub circuit_breaker_reset_secs: u64,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_retry_delay_ms: 1000, // 1 second
            max_retry_delay_ms: 10000, // 10 seconds
            circuit_breaker_threshold: 5,
            circuit_breaker_reset_secs: 60, // 1 minute
        }
    }
}

impl RecoveryConfig {
    /// Backoff before retry number `attempt` (1-based), capped, without jitter
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        let delay = self
            .base_retry_delay_ms
            .saturating_mul(1u64 << exponent)
            .min(self.max_retry_delay_ms);
        Duration::from_millis(delay)
    }
}

/// Configuration for the AI collaborator client
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// Base URL of the generative language API
    pub endpoint: String,
    /// Model used for every call
    pub model: String,
    /// API key; omitted when a proxy adds it
    pub api_key: Option<String>,
    /// Timeout for extraction and meal-plan calls
    pub request_timeout_secs: u64,
    /// Timeout for conversion-rate estimates
    pub conversion_timeout_secs: u64,
    /// Timeout for a whole categorization stream
    pub stream_timeout_secs: u64,
    /// Recovery and error handling configuration
    pub recovery: RecoveryConfig,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            conversion_timeout_secs: DEFAULT_CONVERSION_TIMEOUT_SECS,
            stream_timeout_secs: DEFAULT_STREAM_TIMEOUT_SECS,
            recovery: RecoveryConfig::default(),
        }
    }
}

impl AiConfig {
    /// Load from the environment (and `.env`), falling back to defaults
    ///
    /// - `KONDATE_AI_ENDPOINT`
    /// - `KONDATE_AI_MODEL`
    /// - `GEMINI_API_KEY`
    /// - `KONDATE_AI_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let mut config = Self::default();
        if let Ok(endpoint) = env::var("KONDATE_AI_ENDPOINT") {
            config.endpoint = endpoint.trim_end_matches('/').to_string();
        }
        if let Ok(model) = env::var("KONDATE_AI_MODEL") {
            config.model = model;
        }
        config.api_key = env::var("GEMINI_API_KEY").ok().filter(|key| !key.trim().is_empty());
        if let Some(secs) = env::var("KONDATE_AI_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
        {
            config.request_timeout_secs = secs;
        }
        config
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn conversion_timeout(&self) -> Duration {
        Duration::from_secs(self.conversion_timeout_secs)
    }

    pub fn stream_timeout(&self) -> Duration {
        Duration::from_secs(self.stream_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.conversion_timeout(), Duration::from_secs(15));
        assert!(config.api_key.is_none());
        assert_eq!(config.recovery.circuit_breaker_threshold, 5);
    }

    #[test]
    fn test_backoff_is_exponential_and_capped() {
        let recovery = RecoveryConfig::default();
        assert_eq!(recovery.backoff(1), Duration::from_millis(1000));
        assert_eq!(recovery.backoff(2), Duration::from_millis(2000));
        assert_eq!(recovery.backoff(3), Duration::from_millis(4000));
        assert_eq!(recovery.backoff(10), Duration::from_millis(10000));
    }
}
