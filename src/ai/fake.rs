//! Fake AI provider for testing.
//!
//! Answers are picked by checking whether the prompt contains a registered
//! substring, so tests run without network access. Streamed answers are
//! replayed as a Gemini-style response array cut into small byte chunks.

use super::{ChunkReceiver, CompletionProvider, GenerationRequest};
use crate::errors::AiError;
use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, RwLock};
use std::time::Duration;
use tokio::sync::mpsc;

/// A deterministic provider for tests
///
/// Patterns are tried in registration order; the first one contained in the
/// prompt (case-insensitive) wins.
#[derive(Debug)]
pub struct FakeProvider {
    responses: RwLock<Vec<(String, String)>>,
    default_response: Option<String>,
    failure: Option<AiError>,
    delay: Option<Duration>,
    /// Characters of answer text per streamed response object
    fragment_chars: usize,
    /// Bytes per streamed chunk
    chunk_bytes: usize,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self {
            responses: RwLock::new(Vec::new()),
            default_response: None,
            failure: None,
            delay: None,
            fragment_chars: 7,
            chunk_bytes: 16,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

impl FakeProvider {
    /// A provider with no registered responses; unmatched prompts fail
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider answering `response` to prompts containing `prompt_contains`
    pub fn with_response(prompt_contains: &str, response: &str) -> Self {
        let provider = Self::new();
        provider.add_response(prompt_contains, response);
        provider
    }

    pub fn add_response(&self, prompt_contains: &str, response: &str) {
        self.responses
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((prompt_contains.to_lowercase(), response.to_string()));
    }

    /// Answer used when no pattern matches
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    /// Fail every call with `error`
    pub fn failing(error: AiError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    /// Sleep before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Stream framing granularity
    pub fn with_stream_chunking(mut self, fragment_chars: usize, chunk_bytes: usize) -> Self {
        self.fragment_chars = fragment_chars.max(1);
        self.chunk_bytes = chunk_bytes.max(1);
        self
    }

    /// Number of calls made so far, streaming or not
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every prompt received, in order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    async fn answer(&self, prompt: &str) -> Result<String, AiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(prompt.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        let lowered = prompt.to_lowercase();
        let matched = self
            .responses
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .find(|(pattern, _)| lowered.contains(pattern.as_str()))
            .map(|(_, response)| response.clone());

        matched
            .or_else(|| self.default_response.clone())
            .ok_or_else(|| {
                let head: String = prompt.chars().take(100).collect();
                AiError::UnexpectedResponse(format!(
                    "FakeProvider: no response configured for prompt: {head}"
                ))
            })
    }

    /// Wire body of a streamed answer: a JSON array of response objects
    pub fn stream_body(&self, text: &str) -> Vec<u8> {
        let chars: Vec<char> = text.chars().collect();
        let frames: Vec<String> = chars
            .chunks(self.fragment_chars)
            .map(|fragment| {
                let fragment: String = fragment.iter().collect();
                json!({"candidates": [{"content": {"parts": [{"text": fragment}], "role": "model"}}]})
                    .to_string()
            })
            .collect();
        format!("[{}]", frames.join(",\r\n")).into_bytes()
    }
}

#[async_trait]
impl CompletionProvider for FakeProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, AiError> {
        self.answer(&request.prompt).await
    }

    async fn generate_stream(&self, prompt: &str) -> Result<ChunkReceiver, AiError> {
        let text = self.answer(prompt).await?;
        let body = self.stream_body(&text);
        let chunks: Vec<Vec<u8>> = body.chunks(self.chunk_bytes).map(<[u8]>::to_vec).collect();

        let (sender, receiver) = mpsc::channel(chunks.len().max(1));
        tokio::spawn(async move {
            for chunk in chunks {
                if sender.send(Ok(chunk)).await.is_err() {
                    break;
                }
            }
        });
        Ok(receiver)
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}
