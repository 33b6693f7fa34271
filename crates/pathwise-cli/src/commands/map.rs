//! The `pathwise map` command.

use std::path::PathBuf;

use anyhow::Result;

use pathwise_graph::map_skill_to_components;

use super::{load_graph, print_components};

pub fn execute(
    description: String,
    grade: Option<String>,
    graph: Option<PathBuf>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (_, store) = load_graph(config_path, graph)?;
    let mapping = map_skill_to_components(&store, &description, grade.as_deref());

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&mapping)?);
        }
        _ => {
            println!("Skill: {}", mapping.skill_description);
            if let Some(grade) = &mapping.grade_level {
                println!("Grade: {grade}");
            }
            println!();
            if mapping.learning_components.is_empty() {
                println!("No matching learning components.");
                return Ok(());
            }
            print_components("Matches", &mapping.learning_components);
            print_components("Prerequisites", &mapping.prerequisites);
            print_components("Next skills", &mapping.next_skills);
        }
    }

    Ok(())
}
