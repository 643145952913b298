//! Workflow Client — creates a workflow on the remote execution
//! service, triggers a run, and folds the streamed execution log into a
//! [`LogView`].
//!
//! One logical flow per run: a single creation request, then one
//! long-lived streaming read loop. Each awaited chunk is a suspend
//! point; dropping the `run` future cancels the read loop, releases the
//! response stream, and applies no further events.

use futures_util::StreamExt;
use serde::{Deserialize, Serialize};

use crate::error::TransportError;
use crate::log_view::LogView;
use crate::spec::WorkflowSpec;
use crate::stream::{parse_event, FrameDecoder};

/// Per-run options.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Injected-fault switch consumed entirely by the execution
    /// service; the client forwards it verbatim and never interprets
    /// it. Lets an operator exercise the failure/retry path.
    pub force_llm_timeout: bool,
}

/// Body of the run request (see the execution endpoint contract).
#[derive(Debug, Serialize)]
struct RunRequest<'a> {
    input: &'a str,
    #[serde(rename = "forceLLMTimeout")]
    force_llm_timeout: bool,
}

/// Creation endpoint response; only the identifier matters to us.
#[derive(Debug, Deserialize)]
struct CreateWorkflowResponse {
    id: String,
}

/// HTTP client for the workflow execution service.
pub struct WorkflowClient {
    http: reqwest::Client,
    base_url: String,
}

impl WorkflowClient {
    /// Build a client against the given service base URL
    /// (e.g. `http://localhost:8000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Register a validated spec with the service; returns the workflow
    /// identifier. Any non-success status is an error.
    pub async fn create_workflow(&self, spec: &WorkflowSpec) -> Result<String, TransportError> {
        let url = format!("{}/api/workflows", self.base_url);
        tracing::debug!("Creating workflow at {url}");

        let response = self
            .http
            .post(&url)
            .json(spec)
            .send()
            .await
            .map_err(|e| TransportError::NetworkFailure(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::CreateFailed(format!("{status}: {body}")));
        }

        let created: CreateWorkflowResponse = response
            .json()
            .await
            .map_err(|e| TransportError::CreateFailed(e.to_string()))?;
        Ok(created.id)
    }

    /// Run a workflow end to end: create it, open the execution stream,
    /// and feed every frame through decoder → parser → reducer.
    ///
    /// `observe` is called after every change to the view, so a caller
    /// can render incrementally; the final view is also returned. A
    /// fresh [`LogView`] and [`FrameDecoder`] are owned by this call,
    /// so sequential runs can never leak a stale remainder or stale
    /// lines into each other.
    pub async fn run<F>(
        &self,
        spec: &WorkflowSpec,
        input: &str,
        options: RunOptions,
        mut observe: F,
    ) -> Result<LogView, TransportError>
    where
        F: FnMut(&LogView),
    {
        let mut view = LogView::new();
        view.begin_creating("Creating workflow...");
        observe(&view);

        let id = match self.create_workflow(spec).await {
            Ok(id) => id,
            Err(err) => {
                view.fail(&err);
                observe(&view);
                return Err(err);
            }
        };
        view.push_status(format!(
            "Workflow created (ID: {id}). Starting execution..."
        ));
        observe(&view);

        let url = format!("{}/api/workflows/{id}/run", self.base_url);
        tracing::debug!("Starting execution stream at {url}");

        let response = match self
            .http
            .post(&url)
            .json(&RunRequest {
                input,
                force_llm_timeout: options.force_llm_timeout,
            })
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                let err = TransportError::NetworkFailure(e.to_string());
                view.fail(&err);
                observe(&view);
                return Err(err);
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = TransportError::StreamUnavailable(format!("{status}: {body}"));
            view.fail(&err);
            observe(&view);
            return Err(err);
        }

        // Headers are in; the body is now streaming.
        view.begin_executing();
        observe(&view);

        let mut decoder = FrameDecoder::new();
        let mut body = response.bytes_stream();
        while let Some(chunk) = body.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    let err = TransportError::NetworkFailure(e.to_string());
                    view.fail(&err);
                    observe(&view);
                    return Err(err);
                }
            };
            for frame in decoder.feed(&chunk) {
                view.apply(parse_event(&frame));
                observe(&view);
            }
        }

        if decoder.pending() > 0 {
            // Truncated trailing frame; discarded, not an error.
            tracing::debug!("Stream ended with {} undelimited bytes", decoder.pending());
        }

        view.finish();
        observe(&view);
        Ok(view)
    }
}
