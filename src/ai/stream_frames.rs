//! # Stream Framing
//!
//! A streamed answer arrives as a JSON array of response objects, cut into
//! network chunks at arbitrary byte offsets. [`FrameDecoder`] turns the raw
//! chunks back into complete response objects and [`LineAssembler`] turns
//! their text fragments into complete lines.

use super::json_extract::balanced_end;
use log::trace;
use serde_json::Value;

/// Reassembles complete top-level JSON objects from raw byte chunks
#[derive(Debug, Default)]
pub struct FrameDecoder {
    /// Trailing bytes of an incomplete UTF-8 sequence
    pending: Vec<u8>,
    /// Decoded text not yet consumed
    buffer: String,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk; returns every object completed by it, in order
    ///
    /// Objects that balance but do not parse are dropped.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Value> {
        self.pending.extend_from_slice(chunk);
        self.decode_pending();

        let mut frames = Vec::new();
        let mut consumed = 0;

        while let Some(offset) = self.buffer[consumed..].find('{') {
            let start = consumed + offset;
            let Some(end) = balanced_end(&self.buffer, start) else {
                // incomplete object, wait for more bytes
                consumed = start;
                break;
            };

            match serde_json::from_str::<Value>(&self.buffer[start..end]) {
                Ok(frame) => frames.push(frame),
                Err(err) => trace!("Dropping unparseable frame: {err}"),
            }
            consumed = end;
        }

        if !self.buffer[consumed..].contains('{') {
            // separators only (",", "]", whitespace)
            consumed = self.buffer.len();
        }
        self.buffer.replace_range(..consumed, "");
        frames
    }

    /// Whether undecoded input is left over
    pub fn has_remainder(&self) -> bool {
        !self.pending.is_empty() || !self.buffer.trim().is_empty()
    }

    fn decode_pending(&mut self) {
        loop {
            let (valid, invalid_len) = match std::str::from_utf8(&self.pending) {
                Ok(_) => (self.pending.len(), None),
                Err(err) => (err.valid_up_to(), err.error_len()),
            };
            self.buffer
                .push_str(&String::from_utf8_lossy(&self.pending[..valid]));

            match invalid_len {
                // invalid sequence: replace it and keep going
                Some(bad) => {
                    self.buffer.push(char::REPLACEMENT_CHARACTER);
                    self.pending = self.pending.split_off(valid + bad);
                }
                // complete, or a truncated sequence kept for the next chunk
                None => {
                    self.pending = self.pending.split_off(valid);
                    return;
                }
            }
        }
    }
}

/// Candidate text of one streamed response object
///
/// Read from `candidates[0].content.parts[0].text`.
pub fn frame_text(frame: &Value) -> Option<&str> {
    frame
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
}

/// Joins text fragments and emits complete, trimmed, non-empty lines
#[derive(Debug, Default)]
pub struct LineAssembler {
    partial: String,
}

impl LineAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fragment: &str) -> Vec<String> {
        self.partial.push_str(fragment);

        let mut lines = Vec::new();
        while let Some(newline) = self.partial.find('\n') {
            let line: String = self.partial.drain(..=newline).collect();
            let line = line.trim();
            if !line.is_empty() {
                lines.push(line.to_string());
            }
        }
        lines
    }

    /// Lines left once the stream has ended
    pub fn finish(self) -> Vec<String> {
        self.partial
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }
}
