//! CLI command implementations.
//!
//! Each submodule corresponds to a top-level CLI command and reuses
//! the flowrun-core domain logic.

pub mod run;
pub mod validate;

use flowrun_core::spec::WorkflowSpec;
use flowrun_core::ValidationError;

/// Read a spec file and validate it.
pub fn load_spec(path: &str) -> Result<WorkflowSpec, String> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read spec file '{}': {}", path, e))?;
    flowrun_core::validate(&raw).map_err(|e| match e {
        ValidationError::Malformed(msg) => format!("Spec is not valid JSON: {}", msg),
        ValidationError::SchemaViolation(reason) => format!("Spec rejected: {}", reason),
    })
}
