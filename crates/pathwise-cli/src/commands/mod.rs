pub mod analyze;
pub mod compare;
pub mod evaluate;
pub mod init;
pub mod map;
pub mod progression;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use pathwise_core::config::{load_config_from, PathwiseConfig};
use pathwise_core::LearningComponent;
use pathwise_graph::{GraphLoader, GraphStore};

/// Load config, apply a `--graph` override and load the graph it names.
pub fn load_graph(
    config_path: Option<PathBuf>,
    graph: Option<PathBuf>,
) -> Result<(PathwiseConfig, GraphStore)> {
    let mut config = load_config_from(config_path.as_deref())?;
    if graph.is_some() {
        config.graph_path = graph;
    }
    let loader = GraphLoader::from_config(&config);
    tracing::debug!(source = ?loader.source(), "loading knowledge graph");
    let store = loader.load_new()?;
    Ok((config, store))
}

/// One row per component.
pub fn component_table(components: &[LearningComponent]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Id", "Label", "Subject", "Grades", "Standards"]);
    for c in components {
        table.add_row(vec![
            Cell::new(&c.id),
            Cell::new(&c.label),
            Cell::new(c.subject.to_string()),
            Cell::new(c.grades.join(", ")),
            Cell::new(c.standards.join(", ")),
        ]);
    }
    table
}

/// Print a titled component table, or a placeholder when empty.
pub fn print_components(title: &str, components: &[LearningComponent]) {
    println!("{title} ({}):", components.len());
    if components.is_empty() {
        println!("  (none)");
    } else {
        println!("{}", component_table(components));
    }
}
