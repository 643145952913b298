//! `flowrun validate` — check a workflow spec file without submitting it.

use flowrun_core::spec::WorkflowNode;

/// Validate a workflow spec JSON file and print a short summary.
pub fn run(spec_file: &str) -> Result<(), String> {
    let spec = super::load_spec(spec_file)?;

    println!("Workflow spec '{}' is valid", spec_file);
    for (i, node) in spec.nodes.iter().enumerate() {
        let kind = match node {
            WorkflowNode::Prompt { .. } => "PromptNode",
            WorkflowNode::Llm { .. } => "LLMNode",
        };
        println!("   {}. {} ({})", i + 1, node.id(), kind);
    }
    Ok(())
}
