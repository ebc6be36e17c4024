//! Gemini-compatible HTTP provider.
//!
//! Talks to `{endpoint}/models/{model}:generateContent` and
//! `:streamGenerateContent`, either directly with an API key or through a
//! proxy that adds one.

use super::{ChunkReceiver, CompletionProvider, GenerationRequest};
use crate::ai_config::AiConfig;
use crate::circuit_breaker::CircuitBreaker;
use crate::errors::AiError;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand::Rng;
use serde_json::{json, Value};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

const STREAM_CHANNEL_CAPACITY: usize = 32;

/// HTTP client for a Gemini-style generative language API
#[derive(Debug)]
pub struct GeminiProvider {
    client: reqwest::Client,
    config: AiConfig,
    breaker: CircuitBreaker,
}

impl GeminiProvider {
    pub fn new(config: AiConfig) -> Result<Self, AiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|err| AiError::NotConfigured(format!("HTTP client: {err}")))?;

        Ok(Self {
            client,
            breaker: CircuitBreaker::new(config.recovery.clone()),
            config,
        })
    }

    pub fn from_env() -> Result<Self, AiError> {
        Self::new(AiConfig::from_env())
    }

    fn url(&self, method: &str) -> String {
        let mut url = format!(
            "{}/models/{}:{}",
            self.config.endpoint, self.config.model, method
        );
        if let Some(key) = &self.config.api_key {
            url.push_str(if url.contains('?') { "&key=" } else { "?key=" });
            url.push_str(key);
        }
        url
    }

    async fn post_once(&self, url: &str, body: &Value) -> Result<reqwest::Response, AiError> {
        let response = self.client.post(url).json(body).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(AiError::Http {
            status: status.as_u16(),
            body,
        })
    }

    /// POST with retries on transient failures, guarded by the circuit breaker
    async fn post(&self, method: &str, body: &Value) -> Result<reqwest::Response, AiError> {
        if self.breaker.is_open() {
            warn!(method, "AI circuit open, failing fast");
            return Err(AiError::CircuitOpen);
        }

        let url = self.url(method);
        let max_retries = self.config.recovery.max_retries;
        let mut attempt = 0;

        loop {
            match self.post_once(&url, body).await {
                Ok(response) => {
                    self.breaker.record_success();
                    return Ok(response);
                }
                Err(err) if err.is_transient() && attempt < max_retries => {
                    attempt += 1;
                    let delay = self.config.recovery.backoff(attempt) + jitter();
                    warn!(method, attempt, delay_ms = delay.as_millis() as u64, error = %err, "Retrying AI request");
                    tokio::time::sleep(delay).await;
                }
                Err(err) => {
                    self.breaker.record_failure();
                    warn!(method, attempt, error = %err, "AI request failed");
                    return Err(err);
                }
            }
        }
    }
}

fn jitter() -> Duration {
    Duration::from_millis(rand::thread_rng().gen_range(0..=250))
}

/// Request body in the `contents/parts` layout
pub fn request_body(request: &GenerationRequest) -> Value {
    let mut parts: Vec<Value> = request
        .images
        .iter()
        .map(|image| {
            json!({
                "inlineData": {
                    "mimeType": image.mime_type,
                    "data": BASE64.encode(&image.data),
                }
            })
        })
        .collect();
    parts.push(json!({ "text": request.prompt }));

    let mut body = json!({ "contents": [{ "parts": parts }] });
    if let Some(mime) = &request.response_mime_type {
        body["generationConfig"] = json!({ "responseMimeType": mime });
    }
    body
}

/// Answer text of a `generateContent` response
///
/// `candidates[0].content.parts[0].text`, or `candidates[0].text` as a fallback.
pub fn response_text(body: &Value) -> Result<String, AiError> {
    body.pointer("/candidates/0/content/parts/0/text")
        .or_else(|| body.pointer("/candidates/0/text"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| AiError::UnexpectedResponse("no candidate text in response".to_string()))
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, AiError> {
        let body = request_body(request);
        debug!(images = request.images.len(), prompt_chars = request.prompt.chars().count(), "generateContent");

        let response = self.post("generateContent", &body).await?;
        let payload: Value = response.json().await?;
        let text = response_text(&payload)?;
        if text.trim().is_empty() {
            return Err(AiError::EmptyResponse);
        }
        Ok(text)
    }

    async fn generate_stream(&self, prompt: &str) -> Result<ChunkReceiver, AiError> {
        let body = request_body(&GenerationRequest::text(prompt));
        let mut response = self.post("streamGenerateContent", &body).await?;
        let (sender, receiver) = mpsc::channel(STREAM_CHANNEL_CAPACITY);

        tokio::spawn(async move {
            let mut total = 0usize;
            loop {
                match response.chunk().await {
                    Ok(Some(bytes)) => {
                        total += bytes.len();
                        if sender.send(Ok(bytes.to_vec())).await.is_err() {
                            debug!("Stream receiver dropped");
                            break;
                        }
                    }
                    Ok(None) => {
                        info!(bytes = total, "AI stream finished");
                        break;
                    }
                    Err(err) => {
                        let _ = sender.send(Err(AiError::from(err))).await;
                        break;
                    }
                }
            }
        });

        Ok(receiver)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}
