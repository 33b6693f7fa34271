//! The `pathwise analyze` command.

use std::path::PathBuf;

use anyhow::Result;

use pathwise_graph::analyze_standard;

use super::{load_graph, print_components};

pub fn execute(
    standard: String,
    graph: Option<PathBuf>,
    max_depth: Option<usize>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (config, store) = load_graph(config_path, graph)?;
    let depth = max_depth.unwrap_or(config.max_depth);

    let Some(analysis) = analyze_standard(&store, &standard, depth)? else {
        anyhow::bail!("standard '{standard}' not found");
    };

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }
        _ => {
            println!("Standard: {}", analysis.standard);
            println!();
            print_components("Learning components", &analysis.learning_components);
            print_components("Prerequisites", &analysis.prerequisites);
            print_components("Next skills", &analysis.next_skills);
            println!(
                "Progression ({} steps, grades {}):",
                analysis.progression.len(),
                analysis.progression.grade_span.join(", ")
            );
            for (i, c) in analysis.progression.components.iter().enumerate() {
                println!("  {:>2}. {} [{}]", i + 1, c.label, c.id);
            }
        }
    }

    Ok(())
}
