//! Incremental consumption of the execution event stream.
//!
//! The transport delivers bytes in arbitrarily-sized chunks with no
//! alignment to frame boundaries. [`FrameDecoder`] reassembles those
//! chunks into discrete `data: `-prefixed frames; [`parse_event`] turns
//! a frame's JSON payload into a typed [`StreamEvent`].

pub mod decoder;
pub mod event;

pub use decoder::FrameDecoder;
pub use event::{parse_event, LogEntry, LogStatus, StreamEvent, WorkflowOutcome, WorkflowStatusEvent};
