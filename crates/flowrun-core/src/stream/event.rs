//! Typed events carried by execution stream frames.
//!
//! A frame payload is JSON and decodes to one of two shapes:
//! a per-node [`LogEntry`], or a [`WorkflowStatusEvent`] carrying the
//! terminal classification of the whole run. The two are discriminated
//! by an explicit `"type": "workflowStatus"` tag — its absence means
//! the payload must be a log entry.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Lifecycle status attached to a single log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogStatus {
    Running,
    Success,
    Failure,
    Retrying,
    Info,
}

/// One log line produced by a node of the running workflow.
///
/// Immutable once parsed; the reducer appends it verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// When the execution service emitted the entry.
    ///
    /// The service emits offset-less naive-UTC timestamps
    /// (`2025-03-01T10:00:00.123456`); RFC 3339 with an offset is also
    /// accepted.
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,

    /// Which node produced it.
    pub node_id: String,

    pub status: LogStatus,
    pub message: String,

    /// Node output, if the entry carries one (arbitrary structure).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<serde_json::Value>,

    /// Error text, for failure/retry entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Accept both RFC 3339 (`...T10:00:00Z`) and the offset-less
/// naive-UTC form the execution service actually sends.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    raw.parse::<NaiveDateTime>()
        .map(|naive| naive.and_utc())
        .map_err(serde::de::Error::custom)
}

/// Terminal classification carried by a workflow status event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowOutcome {
    Completed,
    Failed,
}

/// End-of-run event pushed by the execution service.
///
/// Receipt marks the stream as logically finished, although the
/// transport may still deliver further frames before closing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowStatusEvent {
    pub status: WorkflowOutcome,
    pub message: String,
}

/// The unit produced by frame parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    Log(LogEntry),
    WorkflowStatus(WorkflowStatusEvent),
}

/// Tag value discriminating a workflow status event from a log entry.
const WORKFLOW_STATUS_TAG: &str = "workflowStatus";

/// Parse one frame payload into a typed event.
///
/// A payload with `"type": "workflowStatus"` must decode as a
/// [`WorkflowStatusEvent`]; any other payload must decode as a
/// [`LogEntry`]. JSON that parses but fits neither shape is
/// [`ParseError::UnknownShape`].
pub fn parse_event(frame: &str) -> Result<StreamEvent, ParseError> {
    let value: serde_json::Value =
        serde_json::from_str(frame).map_err(|_| ParseError::Malformed(frame.to_string()))?;

    let is_status = value.get("type").and_then(|t| t.as_str()) == Some(WORKFLOW_STATUS_TAG);

    if is_status {
        serde_json::from_value(value)
            .map(StreamEvent::WorkflowStatus)
            .map_err(|_| ParseError::UnknownShape(frame.to_string()))
    } else {
        serde_json::from_value(value)
            .map(StreamEvent::Log)
            .map_err(|_| ParseError::UnknownShape(frame.to_string()))
    }
}
