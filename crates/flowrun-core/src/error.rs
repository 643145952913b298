//! Error taxonomy for the flowrun core.
//!
//! Three families, matching the three places a run can go wrong:
//! validation (before anything touches the network), transport
//! (creation request / execution stream), and per-frame parsing.

/// A candidate workflow spec was rejected before submission.
///
/// Validation errors never reach the network — they are reported to the
/// caller synchronously.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The raw text is not well-formed JSON.
    #[error("Invalid workflow JSON: {0}")]
    Malformed(String),

    /// The JSON parsed, but the structure violates the workflow schema.
    #[error("Schema violation: {0}")]
    SchemaViolation(String),
}

/// The run could not be carried through at the HTTP level.
///
/// Any of these terminates the run: the reducer records a single error
/// StatusLine and moves to `Terminated(Errored)`.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The creation endpoint returned a non-success status or an
    /// unusable body.
    #[error("Failed to create workflow: {0}")]
    CreateFailed(String),

    /// The execution endpoint refused the run request, so there is no
    /// stream to read.
    #[error("Execution stream unavailable: {0}")]
    StreamUnavailable(String),

    /// The connection dropped mid-request or mid-stream.
    #[error("Network failure: {0}")]
    NetworkFailure(String),
}

/// A single frame's payload could not be turned into a [`StreamEvent`].
///
/// Parse errors are fail-soft: the reducer surfaces them as one
/// error-tagged StatusLine and keeps consuming subsequent frames.
///
/// [`StreamEvent`]: crate::stream::StreamEvent
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The frame payload is not valid JSON.
    #[error("Malformed frame payload: {0}")]
    Malformed(String),

    /// The payload is valid JSON but matches neither a log entry nor a
    /// workflow status event.
    #[error("Unrecognized event shape: {0}")]
    UnknownShape(String),
}
