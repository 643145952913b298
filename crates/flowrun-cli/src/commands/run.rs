//! `flowrun run` — submit a workflow and stream its execution log.

use console::style;
use flowrun_core::log_view::{LogLine, RunState, TerminalState};
use flowrun_core::stream::{LogEntry, LogStatus};
use flowrun_core::{RunOptions, WorkflowClient};

/// Run a workflow spec file against the service and print the live log.
pub async fn run(
    base_url: &str,
    spec_file: &str,
    input: &str,
    force_llm_timeout: bool,
) -> Result<(), String> {
    let spec = super::load_spec(spec_file)?;
    println!(
        "Loaded workflow spec: {} ({} nodes)",
        spec_file,
        spec.nodes.len()
    );

    let client = WorkflowClient::new(base_url);
    let options = RunOptions { force_llm_timeout };

    // The view is append-only between clears, so rendering is just
    // "print every line we have not printed yet". A clear (run start,
    // stream open) resets the counter; the terminal scrolls on.
    let mut printed = 0usize;
    let outcome = client
        .run(&spec, input, options, |view| {
            if view.lines().len() < printed {
                printed = 0;
            }
            for line in &view.lines()[printed..] {
                println!("{}", render_line(line));
            }
            printed = view.lines().len();
        })
        .await;

    match outcome {
        Ok(view) => match view.state() {
            RunState::Terminated(TerminalState::Completed) => Ok(()),
            RunState::Terminated(TerminalState::Failed) => {
                Err("Workflow reported failure.".to_string())
            }
            other => Err(format!("Run ended in unexpected state: {:?}", other)),
        },
        Err(e) => Err(e.to_string()),
    }
}

/// Format one log line for the terminal.
fn render_line(line: &LogLine) -> String {
    match line {
        LogLine::Status(message) => style(message).dim().to_string(),
        LogLine::Entry(entry) => render_entry(entry),
    }
}

fn render_entry(entry: &LogEntry) -> String {
    let status = match entry.status {
        LogStatus::Running => style("running ").cyan(),
        LogStatus::Success => style("success ").green(),
        LogStatus::Failure => style("failure ").red(),
        LogStatus::Retrying => style("retrying").yellow(),
        LogStatus::Info => style("info    ").dim(),
    };

    let mut rendered = format!(
        "{} {} {} {}",
        style(entry.timestamp.format("%H:%M:%S%.3f").to_string()).dim(),
        status,
        style(&entry.node_id).bold(),
        entry.message
    );
    if let Some(output) = &entry.output {
        rendered.push_str(&format!("\n           {} {}", style("output:").dim(), output));
    }
    if let Some(error) = &entry.error {
        rendered.push_str(&format!("\n           {} {}", style("error:").red(), error));
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn renders_entry_with_output_and_error() {
        let entry = LogEntry {
            timestamp: Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap(),
            node_id: "n1".to_string(),
            status: LogStatus::Failure,
            message: "LLM call failed.".to_string(),
            output: Some(serde_json::json!({"partial": true})),
            error: Some("timeout".to_string()),
        };
        let rendered = render_entry(&entry);
        assert!(rendered.contains("n1"));
        assert!(rendered.contains("LLM call failed."));
        assert!(rendered.contains("partial"));
        assert!(rendered.contains("timeout"));
    }

    #[test]
    fn renders_status_line_verbatim() {
        let rendered = render_line(&LogLine::Status("Creating workflow...".to_string()));
        assert!(rendered.contains("Creating workflow..."));
    }
}
