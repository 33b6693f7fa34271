//! The `pathwise validate` command.

use std::path::PathBuf;

use anyhow::Result;

use pathwise_core::parser::{
    load_graph_directory, merge_graph_documents, parse_graph_document, validate_graph_document,
};

pub fn execute(graph_path: PathBuf) -> Result<()> {
    let docs = if graph_path.is_dir() {
        load_graph_directory(&graph_path)?
    } else {
        vec![parse_graph_document(&graph_path)?]
    };

    for doc in &docs {
        println!(
            "Graph: {} ({} components, {} relationships)",
            doc.name,
            doc.components.len(),
            doc.relationships.len()
        );
    }

    // A directory loads as one graph, so ids and cycles are checked across files.
    let merged = merge_graph_documents(&docs);
    if docs.len() > 1 {
        println!(
            "Combined: {} documents ({} components, {} relationships)",
            docs.len(),
            merged.components.len(),
            merged.relationships.len()
        );
    }

    let warnings = validate_graph_document(&merged);
    for w in &warnings {
        let prefix = w
            .component_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("All graph documents valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
