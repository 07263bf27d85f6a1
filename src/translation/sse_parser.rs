//! Decoder for `text/event-stream` chat-completion responses.
//!
//! Bytes arrive in arbitrary fragments. [`EventStreamDecoder`] buffers them,
//! splits complete lines, and turns each `data: {...}` payload into the text
//! delta it carries. [`decode_event_stream`] wraps the decoder around a live
//! byte stream and [`collect_fragments`] drains it into a single string.

use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use serde::Deserialize;
use std::fmt::Display;

/// Payload that marks the end of the event stream.
pub const DONE_SENTINEL: &str = "[DONE]";

/// Consecutive unparseable payloads after which a warning is logged.
const PARSE_FAILURE_WARN_THRESHOLD: usize = 8;

#[derive(Debug, Deserialize)]
struct StreamResponse {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: Option<Delta>,
}

#[derive(Debug, Deserialize)]
struct Delta {
    content: Option<String>,
}

/// Incremental line decoder for one event stream.
#[derive(Debug, Default)]
pub struct EventStreamDecoder {
    buffer: Vec<u8>,
    finished: bool,
    consecutive_failures: usize,
}

impl EventStreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` once the `[DONE]` sentinel has been seen.
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Appends a chunk and returns the deltas of every line it completed.
    ///
    /// A trailing partial line stays buffered until the next call. Input fed
    /// after the sentinel is discarded.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        if self.finished {
            return Vec::new();
        }

        self.buffer.extend_from_slice(chunk);

        let mut deltas = Vec::new();
        while !self.finished
            && let Some(line_end) = self.buffer.iter().position(|&b| b == b'\n')
        {
            let line: Vec<u8> = self.buffer.drain(..=line_end).collect();
            if let Some(delta) = self.decode_line(&line) {
                deltas.push(delta);
            }
        }

        if self.finished {
            self.buffer.clear();
        }
        deltas
    }

    /// Decodes whatever is left in the buffer once the input has ended.
    pub fn finish(&mut self) -> Option<String> {
        if self.finished || self.buffer.is_empty() {
            return None;
        }
        let rest = std::mem::take(&mut self.buffer);
        self.decode_line(&rest)
    }

    fn decode_line(&mut self, line: &[u8]) -> Option<String> {
        let line = String::from_utf8_lossy(line);
        let payload = line.trim().strip_prefix("data:")?.trim();

        if payload == DONE_SENTINEL {
            self.finished = true;
            return None;
        }

        match parse_delta(payload) {
            Ok(text) => {
                self.consecutive_failures = 0;
                (!text.is_empty()).then_some(text)
            }
            Err(e) => {
                // Some providers split one JSON object across two lines.
                self.consecutive_failures += 1;
                tracing::trace!("skipping unparseable event payload: {e}");
                if self.consecutive_failures == PARSE_FAILURE_WARN_THRESHOLD {
                    tracing::warn!(
                        "{} consecutive event payloads could not be parsed",
                        self.consecutive_failures
                    );
                }
                None
            }
        }
    }
}

/// Extracts the text delta from one `data:` payload.
fn parse_delta(payload: &str) -> Result<String, serde_json::Error> {
    let response: StreamResponse = serde_json::from_str(payload)?;

    Ok(response
        .choices
        .into_iter()
        .filter_map(|c| c.delta.and_then(|d| d.content))
        .collect())
}

/// Turns a raw event-stream byte stream into a lazy stream of text deltas.
///
/// The stream ends when the byte stream ends. A transport error is treated
/// as the end of the stream. Reading continues after `[DONE]` so the
/// connection is drained, but nothing more is emitted.
pub fn decode_event_stream<S, E>(byte_stream: S) -> impl Stream<Item = String> + Send
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Display + Send + 'static,
{
    async_stream::stream! {
        let mut byte_stream = std::pin::pin!(byte_stream);
        let mut decoder = EventStreamDecoder::new();
        let mut chunk_count = 0usize;

        while let Some(chunk_result) = byte_stream.next().await {
            let chunk = match chunk_result {
                Ok(c) => c,
                Err(e) => {
                    tracing::warn!("event stream interrupted after {chunk_count} chunks: {e}");
                    break;
                }
            };
            chunk_count += 1;

            for delta in decoder.feed(&chunk) {
                yield delta;
            }
        }

        if let Some(delta) = decoder.finish() {
            yield delta;
        }
        tracing::debug!("event stream closed after {chunk_count} chunks");
    }
}

/// Drains a fragment stream, handing each fragment to `sink` in order.
///
/// The next fragment is not requested until `sink` returns. Returns the
/// trimmed concatenation of all fragments.
pub async fn collect_fragments<S, F>(stream: S, mut sink: F) -> String
where
    S: Stream<Item = String>,
    F: FnMut(&str),
{
    let mut stream = std::pin::pin!(stream);
    let mut full_text = String::new();

    while let Some(fragment) = stream.next().await {
        sink(&fragment);
        full_text.push_str(&fragment);
    }

    full_text.trim().to_string()
}
