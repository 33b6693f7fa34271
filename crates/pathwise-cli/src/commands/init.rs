//! The `pathwise init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("pathwise.toml").exists() {
        println!("pathwise.toml already exists, skipping.");
    } else {
        std::fs::write("pathwise.toml", SAMPLE_CONFIG)?;
        println!("Created pathwise.toml");
    }

    std::fs::create_dir_all("graphs")?;
    let example_path = std::path::Path::new("graphs/example.toml");
    if example_path.exists() {
        println!("graphs/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_GRAPH)?;
        println!("Created graphs/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: pathwise validate --graph graphs/example.toml");
    println!("  2. Set graph_path in pathwise.toml to use your own graph");
    println!("  3. Run: pathwise evaluate --text \"Keep trying, you can do it.\" --target-grade 2");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# pathwise configuration

# Graph document file or directory. Leave unset to use the built-in K-5 graph.
# graph_path = "graphs"

max_depth = 5
# default_target_grade = "3"

check_literacy = true
check_motivation = true
check_standards_alignment = false

output_dir = "./pathwise-results"
"#;

const EXAMPLE_GRAPH: &str = r#"[graph]
id = "example"
name = "Example Graph"
description = "A small place-value progression to get started"

[[components]]
id = "example.count-to-100"
label = "Count to 100"
description = "Count to 100 by ones and by tens"
subject = "math"
grades = ["K"]
domain = "Counting and Cardinality"
cluster = "Know number names and the count sequence"
skill_type = "procedural"
standards = ["K.CC.A.1"]

[[components]]
id = "example.tens-and-ones"
label = "Tens and ones"
description = "Understand that the two digits of a two-digit number represent amounts of tens and ones"
subject = "math"
grades = ["1"]
domain = "Number and Operations in Base Ten"
cluster = "Understand place value"
skill_type = "conceptual"
prerequisites = ["example.count-to-100"]
standards = ["1.NBT.B.2"]

[[components]]
id = "example.add-within-100"
label = "Add within 100"
description = "Add and subtract within 100 using place value strategies"
subject = "math"
grades = ["2"]
domain = "Number and Operations in Base Ten"
cluster = "Use place value understanding to add and subtract"
skill_type = "procedural"
prerequisites = ["example.tens-and-ones"]
standards = ["2.NBT.B.5"]
"#;
