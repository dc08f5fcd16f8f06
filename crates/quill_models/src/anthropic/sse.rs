//! Incremental server-sent event decoding.

use quill_error::{RemoteServiceError, RemoteServiceErrorKind};

/// A complete server-sent event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SseEvent {
    /// Value of the `event:` field, if any
    pub event: Option<String>,
    /// `data:` lines joined with `\n`
    pub data: String,
}

/// Reassembles events from arbitrarily split network chunks.
///
/// Bytes are buffered until a blank line terminates an event, so multi-byte
/// UTF-8 sequences split across chunks decode correctly.
///
/// # Examples
///
/// ```
/// use quill_models::SseDecoder;
///
/// let mut decoder = SseDecoder::new();
/// assert!(decoder.push(b"event: ping\ndata: {\"ty").unwrap().is_empty());
/// let events = decoder.push(b"pe\":\"ping\"}\n\n").unwrap();
/// assert_eq!(events.len(), 1);
/// assert_eq!(events[0].event.as_deref(), Some("ping"));
/// assert_eq!(events[0].data, "{\"type\":\"ping\"}");
/// ```
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    /// Create an empty decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed bytes and return every event completed by them.
    ///
    /// # Errors
    ///
    /// Returns a malformed-response error when a completed event is not
    /// valid UTF-8.
    pub fn push(&mut self, bytes: &[u8]) -> Result<Vec<SseEvent>, RemoteServiceError> {
        self.buffer.extend(bytes.iter().copied().filter(|b| *b != b'\r'));

        let mut events = Vec::new();
        while let Some(pos) = find_boundary(&self.buffer) {
            let raw: Vec<u8> = self.buffer.drain(..pos + 2).collect();
            if let Some(event) = parse_event(&raw[..pos])? {
                events.push(event);
            }
        }
        Ok(events)
    }

    /// Flush a trailing event that was not followed by a blank line.
    pub fn finish(self) -> Result<Option<SseEvent>, RemoteServiceError> {
        parse_event(&self.buffer)
    }
}

fn find_boundary(buffer: &[u8]) -> Option<usize> {
    buffer.windows(2).position(|w| w == b"\n\n")
}

fn parse_event(raw: &[u8]) -> Result<Option<SseEvent>, RemoteServiceError> {
    let text = std::str::from_utf8(raw).map_err(|e| {
        RemoteServiceError::new(RemoteServiceErrorKind::Malformed(format!(
            "Invalid UTF-8 in event stream: {}",
            e
        )))
    })?;

    let mut event = SseEvent::default();
    let mut data_lines = Vec::new();
    for line in text.lines() {
        // Comment lines start with a colon
        if line.is_empty() || line.starts_with(':') {
            continue;
        }
        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "event" => event.event = Some(value.to_string()),
            "data" => data_lines.push(value),
            _ => {}
        }
    }

    if event.event.is_none() && data_lines.is_empty() {
        return Ok(None);
    }
    event.data = data_lines.join("\n");
    Ok(Some(event))
}
