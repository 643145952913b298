//! Ordered, append-only view of one run's log, plus the run lifecycle
//! state machine.
//!
//! The reducer is deterministic: the same sequence of inputs always
//! produces the same line sequence and state. Display order equals
//! arrival order of the underlying frames — nothing is reordered,
//! dropped, or duplicated.
//!
//! Per-frame decode/parse failures are fail-soft: each one becomes a
//! single `[ERROR]`-tagged status line and the stream keeps going.
//! (The strict fail-fast alternative was considered and rejected; see
//! DESIGN.md.)

use crate::error::ParseError;
use crate::stream::{LogEntry, StreamEvent, WorkflowOutcome};

/// One display line: either a synthetic client-generated status line or
/// a log entry received from the execution service.
#[derive(Debug, Clone, PartialEq)]
pub enum LogLine {
    /// Synthetic line (e.g. "Creating workflow..."); the reducer is the
    /// only place these are created.
    Status(String),
    /// A parsed frame, preserved verbatim.
    Entry(LogEntry),
}

/// How a terminated run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalState {
    /// The service reported completion (or the stream ended cleanly).
    Completed,
    /// The service reported failure.
    Failed,
    /// Validation passed but the run died on a transport error.
    Errored,
}

/// Lifecycle of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    /// Creation request in flight.
    Creating,
    /// Execution response headers received; body frames streaming.
    Executing,
    Terminated(TerminalState),
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Terminated(_))
    }
}

/// The visible log of one run.
///
/// Owned by the workflow client for the lifetime of a single run and
/// discarded at the start of the next — state never leaks across runs.
#[derive(Debug, Clone, Default)]
pub struct LogView {
    lines: Vec<LogLine>,
    state: RunState,
}

impl LogView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Display lines, in arrival order.
    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Append a synthetic status line.
    pub fn push_status(&mut self, message: impl Into<String>) {
        self.lines.push(LogLine::Status(message.into()));
    }

    /// Run invocation: wipe any previous content and announce creation.
    ///
    /// First of the exactly-two clears a run performs.
    pub fn begin_creating(&mut self, message: impl Into<String>) {
        self.lines.clear();
        self.state = RunState::Creating;
        self.push_status(message);
    }

    /// Execution stream opened: discard the interim creation status
    /// lines so the view holds only streamed content.
    ///
    /// Second of the exactly-two clears.
    pub fn begin_executing(&mut self) {
        self.lines.clear();
        self.state = RunState::Executing;
    }

    /// Fold one decoded frame (or its parse failure) into the view.
    pub fn apply(&mut self, event: Result<StreamEvent, ParseError>) {
        match event {
            Ok(StreamEvent::Log(entry)) => self.lines.push(LogLine::Entry(entry)),
            Ok(StreamEvent::WorkflowStatus(event)) => {
                self.push_status(format!("[WORKFLOW] {}", event.message));
                // First terminal classification wins; later frames are
                // still appended but cannot re-classify the run.
                if !self.state.is_terminal() {
                    self.state = RunState::Terminated(match event.status {
                        WorkflowOutcome::Completed => TerminalState::Completed,
                        WorkflowOutcome::Failed => TerminalState::Failed,
                    });
                }
            }
            Err(err) => {
                tracing::warn!("Skipping undecodable frame: {err}");
                self.push_status(format!("[ERROR] {err}"));
            }
        }
    }

    /// Transport stream ended. A clean end without a workflow status
    /// event counts as completion.
    pub fn finish(&mut self) {
        if !self.state.is_terminal() {
            self.state = RunState::Terminated(TerminalState::Completed);
        }
    }

    /// Unrecoverable error at any stage: record it and terminate.
    pub fn fail(&mut self, message: impl std::fmt::Display) {
        self.push_status(format!("Error: {message}"));
        self.state = RunState::Terminated(TerminalState::Errored);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::{parse_event, LogStatus, WorkflowStatusEvent};
    use chrono::Utc;

    fn entry(node_id: &str, status: LogStatus, message: &str) -> LogEntry {
        LogEntry {
            timestamp: Utc::now(),
            node_id: node_id.to_string(),
            status,
            message: message.to_string(),
            output: None,
            error: None,
        }
    }

    #[test]
    fn ordered_log_with_terminal_completion() {
        let mut view = LogView::new();
        view.push_status("Creating workflow...");
        view.apply(Ok(StreamEvent::Log(entry("node-1", LogStatus::Running, "working"))));
        view.apply(Ok(StreamEvent::Log(entry("node-1", LogStatus::Success, "done"))));
        view.apply(Ok(StreamEvent::WorkflowStatus(WorkflowStatusEvent {
            status: crate::stream::WorkflowOutcome::Completed,
            message: "Workflow finished.".to_string(),
        })));

        assert_eq!(view.lines().len(), 4);
        assert_eq!(
            view.lines()[0],
            LogLine::Status("Creating workflow...".to_string())
        );
        assert!(matches!(&view.lines()[1], LogLine::Entry(e) if e.status == LogStatus::Running));
        assert!(matches!(&view.lines()[2], LogLine::Entry(e) if e.status == LogStatus::Success));
        assert_eq!(
            view.lines()[3],
            LogLine::Status("[WORKFLOW] Workflow finished.".to_string())
        );
        assert_eq!(view.state(), RunState::Terminated(TerminalState::Completed));
    }

    #[test]
    fn lifecycle_transitions() {
        let mut view = LogView::new();
        assert_eq!(view.state(), RunState::Idle);

        view.begin_creating("Creating workflow...");
        assert_eq!(view.state(), RunState::Creating);
        assert_eq!(view.lines().len(), 1);

        view.push_status("Workflow created (ID: wf-1). Starting execution...");
        assert_eq!(view.lines().len(), 2);

        // Opening the stream clears the interim status lines.
        view.begin_executing();
        assert_eq!(view.state(), RunState::Executing);
        assert!(view.lines().is_empty());

        view.finish();
        assert_eq!(view.state(), RunState::Terminated(TerminalState::Completed));
    }

    #[test]
    fn parse_error_is_fail_soft() {
        let mut view = LogView::new();
        view.begin_executing();

        view.apply(Ok(StreamEvent::Log(entry("n1", LogStatus::Running, "before"))));
        view.apply(parse_event("{ broken"));
        view.apply(Ok(StreamEvent::Log(entry("n2", LogStatus::Success, "after"))));

        let error_lines: Vec<_> = view
            .lines()
            .iter()
            .filter(|line| matches!(line, LogLine::Status(s) if s.starts_with("[ERROR]")))
            .collect();
        assert_eq!(error_lines.len(), 1);
        assert_eq!(view.lines().len(), 3);
        // The run is still live after a bad frame.
        assert_eq!(view.state(), RunState::Executing);
    }

    #[test]
    fn workflow_failure_classifies_the_run() {
        let mut view = LogView::new();
        view.begin_executing();
        view.apply(Ok(StreamEvent::WorkflowStatus(WorkflowStatusEvent {
            status: crate::stream::WorkflowOutcome::Failed,
            message: "Workflow failed at LLMNode.".to_string(),
        })));
        assert_eq!(view.state(), RunState::Terminated(TerminalState::Failed));

        // Frames after the terminal event are still appended, and the
        // classification does not change.
        view.apply(Ok(StreamEvent::Log(entry("n2", LogStatus::Info, "late"))));
        assert_eq!(view.lines().len(), 2);
        assert_eq!(view.state(), RunState::Terminated(TerminalState::Failed));
    }

    #[test]
    fn transport_failure_terminates_as_errored() {
        let mut view = LogView::new();
        view.begin_creating("Creating workflow...");
        view.fail("Network failure: connection refused");
        assert_eq!(view.state(), RunState::Terminated(TerminalState::Errored));
        assert!(matches!(
            view.lines().last(),
            Some(LogLine::Status(s)) if s.starts_with("Error:")
        ));
    }

    #[test]
    fn starting_a_new_run_resets_prior_content() {
        let mut view = LogView::new();
        view.begin_creating("Creating workflow...");
        view.apply(Ok(StreamEvent::Log(entry("n1", LogStatus::Info, "old run"))));

        view.begin_creating("Creating workflow...");
        assert_eq!(view.lines().len(), 1);
        assert_eq!(view.state(), RunState::Creating);
    }
}
