//! The `pathwise progression` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use pathwise_graph::build_progression;

use super::load_graph;

pub fn execute(
    component: String,
    max_depth: Option<usize>,
    graph: Option<PathBuf>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (config, store) = load_graph(config_path, graph)?;
    let depth = max_depth.unwrap_or(config.max_depth);

    let Some(progression) = build_progression(&store, &component, depth) else {
        anyhow::bail!("component '{component}' not found");
    };

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&progression)?);
        }
        _ => {
            let mut table = Table::new();
            table.set_header(vec!["Step", "Id", "Label", "Grades", "Type"]);
            for (i, c) in progression.components.iter().enumerate() {
                let step = if c.id == component {
                    format!("{} *", i + 1)
                } else {
                    (i + 1).to_string()
                };
                table.add_row(vec![
                    Cell::new(step),
                    Cell::new(&c.id),
                    Cell::new(&c.label),
                    Cell::new(c.grades.join(", ")),
                    Cell::new(c.skill_type.to_string()),
                ]);
            }
            println!("{table}");
            println!(
                "{} steps, grades {}",
                progression.len(),
                progression.grade_span.join(", ")
            );
        }
    }

    Ok(())
}
