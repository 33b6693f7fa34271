//! CLI integration tests using assert_cmd.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn pathwise() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("pathwise").unwrap();
    cmd.env_remove("PATHWISE_GRAPH_PATH")
        .env_remove("PATHWISE_MAX_DEPTH")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

/// The single JSON file `evaluate --save` wrote into `dir`.
fn saved_evaluation(dir: &Path) -> PathBuf {
    let entries: Vec<PathBuf> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    assert_eq!(entries.len(), 1, "expected one saved evaluation in {dir:?}");
    entries[0].clone()
}

#[test]
fn analyze_known_standard() {
    pathwise()
        .args(["analyze", "--standard", "3.OA.A.1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("math.oa.equal-groups"))
        .stdout(predicate::str::contains("Prerequisites"))
        .stdout(predicate::str::contains("Progression"));
}

#[test]
fn analyze_json_output() {
    let output = pathwise()
        .args(["analyze", "--standard", "3.oa.a.1", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["standard"], "3.oa.a.1");
    assert_eq!(json["learning_components"][0]["id"], "math.oa.equal-groups");
    assert!(json["progression"]["pathway"]
        .as_array()
        .unwrap()
        .iter()
        .any(|id| id == "math.oa.equal-groups"));
}

#[test]
fn analyze_unknown_standard_fails() {
    pathwise()
        .args(["analyze", "--standard", "9.ZZ.Z.9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn analyze_with_graph_override() {
    pathwise()
        .args([
            "analyze",
            "--standard",
            "K.OA.A.4",
            "--graph",
            "../../graphs/early-numeracy.toml",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("numeracy.make-ten"))
        .stdout(predicate::str::contains("numeracy.add-within-20"));
}

#[test]
fn analyze_with_missing_graph_fails() {
    pathwise()
        .args(["analyze", "--standard", "K.OA.A.4", "--graph", "no_such_graph.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn map_nonsense_description() {
    pathwise()
        .args(["map", "--description", "xyzzy nonsense query", "--grade", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No matching learning components"));
}

#[test]
fn map_json_output() {
    let output = pathwise()
        .args([
            "map",
            "--description",
            "compare fractions",
            "--grade",
            "3",
            "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    let matches = json["learning_components"].as_array().unwrap();
    assert!(!matches.is_empty() && matches.len() <= 3);
    assert_eq!(matches[0]["id"], "math.nf.compare-fractions");
    assert_eq!(json["common_errors"].as_array().unwrap().len(), 0);
}

#[test]
fn progression_text_output() {
    pathwise()
        .args(["progression", "--component", "ela.rl.inference", "--max-depth", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ela.rl.summarize"))
        .stdout(predicate::str::contains("ela.ri.text-evidence"))
        .stdout(predicate::str::contains("4 steps"));
}

#[test]
fn progression_unknown_component_fails() {
    pathwise()
        .args(["progression", "--component", "no.such.component"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn progression_depth_from_config() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("pathwise.toml");
    std::fs::write(&config, "max_depth = 0\n").unwrap();

    let output = pathwise()
        .args(["progression", "--component", "math.oa.division-meaning", "--format", "json"])
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["pathway"].as_array().unwrap().len(), 1);
}

#[test]
fn missing_config_file_fails() {
    pathwise()
        .args(["progression", "--component", "math.md.area", "--config", "nope.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn evaluate_simple_text() {
    pathwise()
        .args(["evaluate", "--text", "The cat sat. It ran.", "--type", "literacy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Complexity: accessible"));
}

#[test]
fn evaluate_motivation_only_json() {
    let output = pathwise()
        .args([
            "evaluate",
            "--text",
            "Keep trying! You can choose how to start.",
            "--type",
            "motivation",
            "--format",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert!(json["evaluation"]["literacy"].is_null());
    assert!(json["evaluation"]["motivation"].is_object());
    assert!(json["suggestions"].is_array());
}

#[test]
fn evaluate_from_file_with_target_grade() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("lesson.txt");
    std::fs::write(
        &path,
        "First, read the story. Next, explain the main idea using evidence.",
    )
    .unwrap();

    pathwise()
        .args(["evaluate", "--target-grade", "3", "--file"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Appropriateness for grade 3"));
}

#[test]
fn evaluate_requires_text_or_file() {
    pathwise().arg("evaluate").assert().failure();
}

#[test]
fn evaluate_rejects_unknown_type() {
    pathwise()
        .args(["evaluate", "--text", "hello", "--type", "everything"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown evaluation type"));
}

#[test]
fn evaluate_markdown_with_standards() {
    pathwise()
        .args(["evaluate", "--text", "Count the blocks.", "--format", "markdown"])
        .args(["--type", "full"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Content Evaluation"))
        .stdout(predicate::str::contains("## Standards Alignment"));
}

#[test]
fn save_and_compare_evaluations() {
    let baseline_dir = TempDir::new().unwrap();
    let current_dir = TempDir::new().unwrap();

    pathwise()
        .args(["evaluate", "--text", "Count the blocks. Put them in a row.", "--save"])
        .arg("--output")
        .arg(baseline_dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Evaluation saved"));

    pathwise()
        .args([
            "evaluate",
            "--text",
            "Count the blocks. You can choose a color. Keep trying, practice helps you grow. \
             First put them in a row, next check your work. You will use counting at home.",
            "--save",
        ])
        .arg("--output")
        .arg(current_dir.path())
        .assert()
        .success();

    let baseline = saved_evaluation(baseline_dir.path());
    let current = saved_evaluation(current_dir.path());

    pathwise()
        .arg("compare")
        .arg("--baseline")
        .arg(&baseline)
        .arg("--current")
        .arg(&current)
        .assert()
        .success()
        .stdout(predicate::str::contains("Improvements"))
        .stdout(predicate::str::contains("motivation.growth_mindset"));

    // Swapped, the revision looks like a regression.
    pathwise()
        .arg("compare")
        .arg("--baseline")
        .arg(&current)
        .arg("--current")
        .arg(&baseline)
        .arg("--fail-on-regression")
        .assert()
        .failure();
}

#[test]
fn compare_nonexistent_evaluation() {
    pathwise()
        .args([
            "compare",
            "--baseline",
            "no_such_file.json",
            "--current",
            "also_no_file.json",
        ])
        .assert()
        .failure();
}

#[test]
fn validate_repository_graphs() {
    pathwise()
        .args(["validate", "--graph", "../../graphs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Early Numeracy"))
        .stdout(predicate::str::contains("5 components"))
        .stdout(predicate::str::contains("All graph documents valid"));
}

#[test]
fn validate_reports_cycle() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cycle.toml");
    std::fs::write(
        &path,
        r#"
[graph]
id = "cycle"
name = "Cycle"

[[components]]
id = "a"
label = "A"
subject = "math"
grades = ["1"]
prerequisites = ["b"]

[[components]]
id = "b"
label = "B"
subject = "math"
grades = ["1"]
prerequisites = ["a"]
"#,
    )
    .unwrap();

    pathwise()
        .arg("validate")
        .arg("--graph")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("prerequisite cycle: a -> b"))
        .stdout(predicate::str::contains("1 warning(s) found"));

    // The engine still loads and traverses cyclic data.
    pathwise()
        .args(["progression", "--component", "a", "--format", "json"])
        .arg("--graph")
        .arg(&path)
        .assert()
        .success();
}

fn write_graph(dir: &Path, file: &str, graph_id: &str, components: &str) {
    std::fs::write(
        dir.join(file),
        format!("[graph]\nid = \"{graph_id}\"\nname = \"{graph_id}\"\n{components}"),
    )
    .unwrap();
}

#[test]
fn validate_directory_as_one_graph() {
    let dir = TempDir::new().unwrap();
    write_graph(
        dir.path(),
        "one.toml",
        "one",
        "[[components]]\nid = \"x\"\nlabel = \"X\"\nsubject = \"math\"\ngrades = [\"1\"]\n",
    );
    write_graph(
        dir.path(),
        "two.toml",
        "two",
        "[[components]]\nid = \"y\"\nlabel = \"Y\"\nsubject = \"math\"\ngrades = [\"2\"]\n\
         prerequisites = [\"x\"]\n",
    );

    pathwise()
        .arg("validate")
        .arg("--graph")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Combined: 2 documents (2 components"))
        .stdout(predicate::str::contains("All graph documents valid"));
}

#[test]
fn validate_directory_reports_duplicates_across_files() {
    let dir = TempDir::new().unwrap();
    let x = "[[components]]\nid = \"x\"\nlabel = \"X\"\nsubject = \"math\"\ngrades = [\"1\"]\n";
    write_graph(dir.path(), "one.toml", "one", x);
    write_graph(dir.path(), "two.toml", "two", x);

    pathwise()
        .arg("validate")
        .arg("--graph")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("duplicate component ID: x"))
        .stdout(predicate::str::contains("1 warning(s) found"));

    // The loader rejects the same directory.
    pathwise()
        .args(["progression", "--component", "x", "--graph"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate"));
}

#[test]
fn validate_nonexistent_file() {
    pathwise()
        .args(["validate", "--graph", "nonexistent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    pathwise()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created pathwise.toml"))
        .stdout(predicate::str::contains("Created graphs/example.toml"));

    assert!(dir.path().join("pathwise.toml").exists());
    assert!(dir.path().join("graphs/example.toml").exists());

    pathwise()
        .current_dir(dir.path())
        .args(["validate", "--graph", "graphs/example.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All graph documents valid"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    pathwise()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    pathwise()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn help_output() {
    pathwise()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Learning-skill graph and instructional content evaluator",
        ));
}

#[test]
fn version_output() {
    pathwise()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pathwise"));
}
