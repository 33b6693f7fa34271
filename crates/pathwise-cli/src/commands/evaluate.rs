//! The `pathwise evaluate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use pathwise_core::config::load_config_from;
use pathwise_eval::{
    generate_improvement_suggestions, ContentEvaluation, ContentEvaluationResponse,
    ContentEvaluator, EvaluationOptions, EvaluationType,
};

pub struct EvaluateArgs {
    pub text: Option<String>,
    pub file: Option<PathBuf>,
    pub target_grade: Option<String>,
    pub evaluation_type: Option<EvaluationType>,
    pub format: String,
    pub save: bool,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let config = load_config_from(args.config.as_deref())?;

    let text = match (args.text, &args.file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read text from {}", path.display()))?,
        (None, None) => anyhow::bail!("either --text or --file is required"),
    };

    let target = args.target_grade.or(config.default_target_grade.clone());
    let options = match args.evaluation_type {
        Some(kind) => kind.options(target),
        None => EvaluationOptions {
            target_grade_level: target,
            check_literacy: config.check_literacy,
            check_motivation: config.check_motivation,
            check_standards_alignment: config.check_standards_alignment,
        },
    };

    let evaluation = ContentEvaluator::default().evaluate(&text, &options);
    let suggestions = generate_improvement_suggestions(&evaluation);

    if args.save {
        let dir = args.output.unwrap_or(config.output_dir);
        let path = dir.join(format!("evaluation-{}.json", evaluation.id));
        evaluation.save_json(&path)?;
        eprintln!("Evaluation saved to {}", path.display());
    }

    match args.format.as_str() {
        "json" => {
            let response = ContentEvaluationResponse {
                evaluation,
                suggestions,
            };
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        "markdown" | "md" => {
            println!("{}", evaluation.to_markdown());
        }
        _ => print_text(&evaluation, &suggestions),
    }

    Ok(())
}

fn print_text(evaluation: &ContentEvaluation, suggestions: &[String]) {
    if let Some(l) = &evaluation.literacy {
        let c = &l.complexity;
        println!(
            "Complexity: {} (grade level {:.1}, confidence {:.0}%)",
            c.overall,
            c.grade_level,
            c.confidence * 100.0
        );
        if let Some(target) = &l.target_grade {
            println!(
                "Appropriateness for grade {target}: {:.0}%",
                l.appropriateness * 100.0
            );
        }

        let mut table = Table::new();
        table.set_header(vec!["Dimension", "Level"]);
        for (name, level) in [
            ("Structure", c.dimensions.structure),
            ("Language features", c.dimensions.language_features),
            ("Knowledge demands", c.dimensions.knowledge_demands),
            ("Meaning and purpose", c.dimensions.meaning_purpose),
        ] {
            table.add_row(vec![Cell::new(name), Cell::new(level.to_string())]);
        }
        println!("{table}");
        println!(
            "Vocabulary tiers: {} / {} / {}",
            l.vocabulary.tier1, l.vocabulary.tier2, l.vocabulary.tier3
        );
        println!();
    }

    if let Some(m) = &evaluation.motivation {
        let mut table = Table::new();
        table.set_header(vec!["Motivation", "Score"]);
        for (name, score) in [
            ("Growth mindset", m.growth_mindset_support),
            ("Autonomy", m.autonomy_support),
            ("Relevance", m.relevance_clarity),
            ("Achievability", m.achievability_cues),
            ("Overall", m.overall),
        ] {
            table.add_row(vec![
                Cell::new(name),
                Cell::new(format!("{:.0}%", score * 100.0)),
            ]);
        }
        println!("{table}");
        println!();
    }

    if let Some(s) = &evaluation.standards_alignment {
        if !s.implemented {
            println!("Standards alignment: not implemented");
            println!();
        }
    }

    if suggestions.is_empty() {
        println!("No suggestions.");
    } else {
        println!("Suggestions:");
        for s in suggestions {
            println!("  - {s}");
        }
    }
}
