//! Workflow specification types and pre-submission validation.
//!
//! A workflow spec is a fixed two-node pipeline:
//!
//! ```json
//! {
//!   "nodes": [
//!     { "id": "n1", "type": "PromptNode", "data": { "template": "Say hi {{input}}" } },
//!     { "id": "n2", "type": "LLMNode", "data": {} }
//!   ]
//! }
//! ```
//!
//! `validate` is the only way to obtain a [`WorkflowSpec`] from raw
//! text, so anything submitted to the service has already passed the
//! structural checks.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Placeholder the prompt template must contain; the execution service
/// substitutes the run's input text for it.
pub const TEMPLATE_PLACEHOLDER: &str = "{{input}}";

/// A validated two-node workflow specification (PromptNode then LLMNode).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowSpec {
    /// Exactly two nodes, in pipeline order.
    pub nodes: Vec<WorkflowNode>,
}

/// A single node of the workflow, discriminated by its `type` literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WorkflowNode {
    /// Expands a template around the run input.
    #[serde(rename = "PromptNode")]
    Prompt {
        id: String,
        data: PromptNodeData,
    },

    /// Sends the expanded prompt to the model. No required data fields.
    #[serde(rename = "LLMNode")]
    Llm {
        id: String,
        #[serde(default)]
        data: serde_json::Map<String, serde_json::Value>,
    },
}

impl WorkflowNode {
    /// The node's identifier, regardless of variant.
    pub fn id(&self) -> &str {
        match self {
            WorkflowNode::Prompt { id, .. } => id,
            WorkflowNode::Llm { id, .. } => id,
        }
    }
}

/// Data block of a PromptNode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptNodeData {
    /// Prompt template; must contain [`TEMPLATE_PLACEHOLDER`].
    pub template: String,
}

/// Validate raw text as a workflow spec.
///
/// Checks run in order and short-circuit on the first failure:
/// well-formed JSON, node count == 2, node 1 is a PromptNode, its
/// template contains `{{input}}`, node 2 is an LLMNode. Each failure
/// carries its own reason — there is no lenient or partial acceptance.
///
/// Pure: safe to call on every keystroke of an editor without any
/// state carried between calls.
pub fn validate(raw: &str) -> Result<WorkflowSpec, ValidationError> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| ValidationError::Malformed(e.to_string()))?;

    let nodes = value
        .get("nodes")
        .and_then(|n| n.as_array())
        .ok_or_else(|| {
            ValidationError::SchemaViolation("Spec must contain a 'nodes' array.".to_string())
        })?;

    if nodes.len() != 2 {
        return Err(ValidationError::SchemaViolation(format!(
            "Expected exactly 2 nodes, found {}.",
            nodes.len()
        )));
    }

    if node_type(&nodes[0]) != Some("PromptNode") {
        return Err(ValidationError::SchemaViolation(
            "Node 1 must have type 'PromptNode'.".to_string(),
        ));
    }

    let template = nodes[0]
        .get("data")
        .and_then(|d| d.get("template"))
        .and_then(|t| t.as_str())
        .ok_or_else(|| {
            ValidationError::SchemaViolation(
                "PromptNode data must contain a 'template' string.".to_string(),
            )
        })?;

    if !template.contains(TEMPLATE_PLACEHOLDER) {
        return Err(ValidationError::SchemaViolation(format!(
            "PromptNode template must include the '{}' placeholder.",
            TEMPLATE_PLACEHOLDER
        )));
    }

    if node_type(&nodes[1]) != Some("LLMNode") {
        return Err(ValidationError::SchemaViolation(
            "Node 2 must have type 'LLMNode'.".to_string(),
        ));
    }

    // Structure is sound; the typed deserialization should not fail now,
    // but a missing node id would still surface here.
    serde_json::from_value(value).map_err(|e| ValidationError::SchemaViolation(e.to_string()))
}

fn node_type(node: &serde_json::Value) -> Option<&str> {
    node.get("type").and_then(|t| t.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "nodes": [
            { "id": "n1", "type": "PromptNode", "data": { "template": "Say hi {{input}}" } },
            { "id": "n2", "type": "LLMNode", "data": {} }
        ]
    }"#;

    #[test]
    fn accepts_two_node_prompt_then_llm_spec() {
        let spec = validate(VALID).unwrap();
        assert_eq!(spec.nodes.len(), 2);
        assert_eq!(spec.nodes[0].id(), "n1");
        assert!(matches!(spec.nodes[0], WorkflowNode::Prompt { .. }));
        assert!(matches!(spec.nodes[1], WorkflowNode::Llm { .. }));
    }

    #[test]
    fn rejects_invalid_json_as_malformed() {
        let err = validate("{ not json").unwrap_err();
        assert!(matches!(err, ValidationError::Malformed(_)));
    }

    #[test]
    fn rejects_wrong_node_count() {
        let err = validate(r#"{ "nodes": [] }"#).unwrap_err();
        match err {
            ValidationError::SchemaViolation(reason) => {
                assert!(reason.contains("exactly 2 nodes"), "reason: {reason}");
            }
            other => panic!("expected SchemaViolation, got {other:?}"),
        }
    }

    #[test]
    fn rejects_swapped_node_order() {
        let raw = r#"{
            "nodes": [
                { "id": "n1", "type": "LLMNode", "data": {} },
                { "id": "n2", "type": "PromptNode", "data": { "template": "{{input}}" } }
            ]
        }"#;
        let err = validate(raw).unwrap_err();
        match err {
            ValidationError::SchemaViolation(reason) => {
                assert!(reason.contains("Node 1"), "reason: {reason}");
            }
            other => panic!("expected SchemaViolation, got {other:?}"),
        }
    }

    #[test]
    fn rejects_template_without_placeholder() {
        let raw = r#"{
            "nodes": [
                { "id": "n1", "type": "PromptNode", "data": { "template": "no placeholder" } },
                { "id": "n2", "type": "LLMNode", "data": {} }
            ]
        }"#;
        let err = validate(raw).unwrap_err();
        match err {
            ValidationError::SchemaViolation(reason) => {
                assert!(reason.contains("{{input}}"), "reason: {reason}");
            }
            other => panic!("expected SchemaViolation, got {other:?}"),
        }
    }

    #[test]
    fn rejects_wrong_second_node_type() {
        let raw = r#"{
            "nodes": [
                { "id": "n1", "type": "PromptNode", "data": { "template": "{{input}}" } },
                { "id": "n2", "type": "ToolNode", "data": {} }
            ]
        }"#;
        let err = validate(raw).unwrap_err();
        match err {
            ValidationError::SchemaViolation(reason) => {
                assert!(reason.contains("Node 2"), "reason: {reason}");
            }
            other => panic!("expected SchemaViolation, got {other:?}"),
        }
    }

    #[test]
    fn validated_spec_round_trips_to_wire_json() {
        let spec = validate(VALID).unwrap();
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["nodes"][0]["type"], "PromptNode");
        assert_eq!(json["nodes"][1]["type"], "LLMNode");
    }
}
