//! flowrun core — transport-agnostic client logic for the mini
//! workflow runner service.
//!
//! The interesting part is incremental consumption of the server-pushed
//! execution stream: bytes arrive in arbitrarily-fragmented chunks and
//! are reassembled into discrete typed events, then folded into an
//! ordered, append-only log without ever dropping, duplicating, or
//! reordering an event.
//!
//! Data flows strictly one way:
//!
//! `spec::validate` → [`client::WorkflowClient`] →
//! [`stream::FrameDecoder`] → [`stream::parse_event`] →
//! [`log_view::LogView`]
//!
//! Only the client performs I/O; everything below it is pure and
//! testable without a network.

pub mod client;
pub mod error;
pub mod log_view;
pub mod spec;
pub mod stream;

// Convenience re-exports
pub use client::{RunOptions, WorkflowClient};
pub use error::{ParseError, TransportError, ValidationError};
pub use log_view::{LogLine, LogView, RunState, TerminalState};
pub use spec::{validate, WorkflowSpec};
pub use stream::{FrameDecoder, LogEntry, LogStatus, StreamEvent};
