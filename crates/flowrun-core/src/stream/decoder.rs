//! Stateful SSE frame decoder.
//!
//! Wire protocol (see the execution endpoint): each frame is
//! `data: <json>` terminated by a blank line (`\n\n`). Chunk boundaries
//! may fall anywhere — between frames, inside the `data: ` prefix, in
//! the middle of the payload, or mid-UTF-8-sequence — so the decoder
//! carries the undelimited tail of each chunk as a raw byte remainder
//! and prepends it to the next chunk before splitting again.

/// Byte sequence separating frames on the wire.
const FRAME_DELIMITER: &[u8] = b"\n\n";

/// Prefix carried by every real frame; anything else between delimiters
/// is protocol noise (comments, keep-alive padding) and is dropped.
const DATA_PREFIX: &str = "data: ";

/// Incremental frame decoder for one execution stream.
///
/// One decoder instance belongs to one run. Dropping it mid-stream
/// discards any truncated trailing frame, which is the required
/// behavior when the transport ends before a delimiter arrives.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    /// Undelimited bytes carried over from previous chunks. Kept as raw
    /// bytes: decoding is deferred until a full frame is available, so
    /// a chunk boundary inside a multi-byte character is harmless.
    remainder: Vec<u8>,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one transport chunk; returns every frame payload completed
    /// by it, in arrival order, stripped of the `data: ` prefix.
    ///
    /// No frame is emitted twice and no partial frame is ever emitted,
    /// regardless of how the byte stream is fragmented.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.remainder.extend_from_slice(chunk);

        let mut frames = Vec::new();
        while let Some(at) = find_delimiter(&self.remainder) {
            let piece: Vec<u8> = self.remainder.drain(..at + FRAME_DELIMITER.len()).collect();
            let text = String::from_utf8_lossy(&piece[..at]);
            match text.strip_prefix(DATA_PREFIX) {
                Some(payload) => frames.push(payload.to_string()),
                None => tracing::debug!("Discarding non-data stream piece ({} bytes)", at),
            }
        }
        frames
    }

    /// Number of buffered bytes still awaiting a delimiter.
    pub fn pending(&self) -> usize {
        self.remainder.len()
    }
}

fn find_delimiter(buf: &[u8]) -> Option<usize> {
    buf.windows(FRAME_DELIMITER.len())
        .position(|w| w == FRAME_DELIMITER)
}
