//! # AI Collaborator Module
//!
//! Abstraction over the generative-AI service the planner delegates to:
//! structured extraction (recipes from photos, meal-plan suggestions,
//! conversion-rate estimates) and the streaming shopping-list categorizer.
//!
//! Providers only move text and bytes. Prompting, JSON extraction and stream
//! framing live in the submodules so they work the same for every provider.

pub mod categorizer;
pub mod extraction;
pub mod fake;
pub mod gemini;
pub mod json_extract;
pub mod prompts;
pub mod stream_frames;

pub use categorizer::{categorize_shopping_list, CategorizedItem};
pub use extraction::{
    estimate_conversion_rate, extract_recipe, generate_meal_plan, suggest_units, AiRateEstimator,
};
pub use fake::FakeProvider;
pub use gemini::GeminiProvider;

use crate::errors::AiError;
use async_trait::async_trait;
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;

/// Raw byte chunks of a streamed response body, in arrival order
pub type ChunkReceiver = mpsc::Receiver<Result<Vec<u8>, AiError>>;

/// An image sent along with a prompt
#[derive(Clone, PartialEq)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl InlineImage {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// MIME type guessed from a file extension
    pub fn mime_for_extension(extension: &str) -> &'static str {
        match extension.to_lowercase().as_str() {
            "png" => "image/png",
            "webp" => "image/webp",
            "gif" => "image/gif",
            "heic" => "image/heic",
            _ => "image/jpeg",
        }
    }
}

impl fmt::Debug for InlineImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InlineImage")
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// A single non-streaming request
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub prompt: String,
    pub images: Vec<InlineImage>,
    /// e.g. `application/json` to ask for a bare JSON answer
    pub response_mime_type: Option<String>,
}

impl GenerationRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    /// Ask for a JSON answer
    pub fn json(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            images: Vec::new(),
            response_mime_type: Some("application/json".to_string()),
        }
    }

    pub fn with_images(mut self, images: Vec<InlineImage>) -> Self {
        self.images = images;
        self
    }
}

/// Transport to a generative text service
#[async_trait]
pub trait CompletionProvider: Send + Sync + fmt::Debug {
    /// Generate a complete text answer
    async fn generate(&self, request: &GenerationRequest) -> Result<String, AiError>;

    /// Start a streamed answer; the receiver yields raw body bytes
    ///
    /// The body is a sequence of JSON objects that may be split anywhere,
    /// including inside a UTF-8 sequence.
    async fn generate_stream(&self, prompt: &str) -> Result<ChunkReceiver, AiError>;

    fn provider_name(&self) -> &'static str;
}

/// Run a collaborator call under a time budget
pub async fn with_timeout<T, F>(budget: Duration, what: &str, call: F) -> Result<T, AiError>
where
    F: Future<Output = Result<T, AiError>>,
{
    match tokio::time::timeout(budget, call).await {
        Ok(result) => result,
        Err(_) => Err(AiError::Timeout(format!(
            "{what} did not finish within {}s",
            budget.as_secs()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_with_timeout_expires() {
        let result: Result<(), AiError> = with_timeout(Duration::from_millis(10), "slow call", async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await;
        assert!(matches!(result, Err(AiError::Timeout(msg)) if msg.contains("slow call")));
    }

    #[tokio::test]
    async fn test_with_timeout_passes_result_through() {
        let result = with_timeout(Duration::from_secs(1), "fast call", async { Ok(7) }).await;
        assert_eq!(result, Ok(7));
    }

    #[test]
    fn test_mime_for_extension() {
        assert_eq!(InlineImage::mime_for_extension("PNG"), "image/png");
        assert_eq!(InlineImage::mime_for_extension("jpg"), "image/jpeg");
    }
}
