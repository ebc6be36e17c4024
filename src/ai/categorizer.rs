//! # Shopping List Categorizer
//!
//! Sends the shopping list to the collaborator, which streams it back sorted
//! by store section as `- name quantity` lines. The stream is decoded frame by
//! frame and line by line as it arrives.

use super::prompts;
use super::stream_frames::{frame_text, FrameDecoder, LineAssembler};
use super::{with_timeout, CompletionProvider};
use crate::errors::AiError;
use crate::quantity_patterns::BULLET_LINE_REGEX;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

/// A shopping-list line as sent to and read back from the categorizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorizedItem {
    pub name: String,
    pub quantity: String,
}

impl CategorizedItem {
    pub fn new(name: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
        }
    }
}

/// Read one `- name quantity` line; the quantity is the text after the last space
///
/// ```rust
/// use kondate::ai::categorizer::parse_bullet_line;
///
/// let item = parse_bullet_line("- 豚 ロース 200g").unwrap();
/// assert_eq!(item.name, "豚 ロース");
/// assert_eq!(item.quantity, "200g");
///
/// assert!(parse_bullet_line("## 野菜・果物").is_none());
/// ```
pub fn parse_bullet_line(line: &str) -> Option<CategorizedItem> {
    let caps = BULLET_LINE_REGEX.captures(line.trim())?;
    Some(CategorizedItem::new(caps[1].trim(), &caps[2]))
}

/// The list text sent to the collaborator
pub fn list_text(items: &[CategorizedItem]) -> String {
    items
        .iter()
        .map(|item| format!("- {} {}", item.name, item.quantity))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Sort a shopping list into store-section order
///
/// Lines that are not bullets (headers, prose) are ignored. An empty list is
/// returned as-is without calling the collaborator.
pub async fn categorize_shopping_list(
    provider: &dyn CompletionProvider,
    items: &[CategorizedItem],
    timeout: Duration,
) -> Result<Vec<CategorizedItem>, AiError> {
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let prompt = prompts::categorize_prompt(&list_text(items));
    let sorted = with_timeout(timeout, "shopping list categorization", async {
        let mut receiver = provider.generate_stream(&prompt).await?;
        let mut decoder = FrameDecoder::new();
        let mut lines = LineAssembler::new();
        let mut sorted = Vec::new();
        let mut frames = 0usize;

        while let Some(chunk) = receiver.recv().await {
            for frame in decoder.push(&chunk?) {
                frames += 1;
                if let Some(error) = frame.get("error") {
                    return Err(AiError::UnexpectedResponse(stream_error(error)));
                }
                if let Some(text) = frame_text(&frame) {
                    sorted.extend(lines.push(text).iter().filter_map(|l| parse_bullet_line(l)));
                }
            }
        }
        sorted.extend(lines.finish().iter().filter_map(|l| parse_bullet_line(l)));

        if decoder.has_remainder() {
            debug!("Stream ended with an incomplete frame");
        }
        debug!(frames, "Categorizer stream consumed");
        Ok(sorted)
    })
    .await?;

    info!(
        requested = items.len(),
        received = sorted.len(),
        "Shopping list categorized"
    );
    Ok(sorted)
}

fn stream_error(error: &Value) -> String {
    error
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| error.to_string())
}
