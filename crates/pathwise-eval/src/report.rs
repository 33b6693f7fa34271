//! Evaluation results with JSON persistence and revision comparison.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::StandardsAlignment;
use crate::motivation::MotivationEvaluation;
use crate::rubric::{ComplexityLevel, LiteracyEvaluation};

/// One evaluation of one text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentEvaluation {
    pub id: Uuid,
    pub evaluated_at: DateTime<Utc>,
    pub evaluator_version: String,
    #[serde(default)]
    pub target_grade_level: Option<String>,
    #[serde(default)]
    pub literacy: Option<LiteracyEvaluation>,
    #[serde(default)]
    pub motivation: Option<MotivationEvaluation>,
    #[serde(default)]
    pub standards_alignment: Option<StandardsAlignment>,
}

impl ContentEvaluation {
    /// Save the evaluation as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize evaluation")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write evaluation to {}", path.display()))?;
        Ok(())
    }

    /// Load an evaluation from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read evaluation from {}", path.display()))?;
        let evaluation: ContentEvaluation =
            serde_json::from_str(&content).context("failed to parse evaluation JSON")?;
        Ok(evaluation)
    }

    /// Normalised metrics and whether a higher value is better.
    fn metrics(&self) -> Vec<(&'static str, f64, bool)> {
        let mut out = Vec::new();
        if let Some(l) = &self.literacy {
            let c = &l.complexity;
            out.push(("appropriateness", l.appropriateness, true));
            out.push(("complexity.overall", level_score(c.overall), false));
            out.push(("complexity.structure", level_score(c.dimensions.structure), false));
            out.push((
                "complexity.language_features",
                level_score(c.dimensions.language_features),
                false,
            ));
            out.push((
                "complexity.knowledge_demands",
                level_score(c.dimensions.knowledge_demands),
                false,
            ));
            out.push((
                "complexity.meaning_purpose",
                level_score(c.dimensions.meaning_purpose),
                false,
            ));
        }
        if let Some(m) = &self.motivation {
            out.push(("motivation.growth_mindset", m.growth_mindset_support, true));
            out.push(("motivation.autonomy", m.autonomy_support, true));
            out.push(("motivation.relevance", m.relevance_clarity, true));
            out.push(("motivation.achievability", m.achievability_cues, true));
            out.push(("motivation.overall", m.overall, true));
        }
        out
    }

    /// Compare this evaluation of a revised text against a baseline.
    ///
    /// Metrics are normalised to [0, 1]; a change larger than `threshold` in
    /// the metric's better direction is an improvement, in the other direction
    /// a regression. Complexity levels count lower as better.
    pub fn compare(&self, baseline: &ContentEvaluation, threshold: f64) -> RevisionReport {
        let baseline_metrics = baseline.metrics();
        let current_metrics = self.metrics();

        let mut regressions = Vec::new();
        let mut improvements = Vec::new();
        let mut unchanged = 0usize;

        for &(metric, current, higher_is_better) in &current_metrics {
            let Some(&(_, baseline_val, _)) = baseline_metrics.iter().find(|m| m.0 == metric)
            else {
                continue;
            };
            let delta = current - baseline_val;
            let gain = if higher_is_better { delta } else { -delta };
            let change = MetricChange {
                metric: metric.to_string(),
                baseline: baseline_val,
                current,
                delta,
            };
            if gain < -threshold {
                regressions.push(change);
            } else if gain > threshold {
                improvements.push(change);
            } else {
                unchanged += 1;
            }
        }

        let not_compared = current_metrics
            .iter()
            .filter(|c| !baseline_metrics.iter().any(|b| b.0 == c.0))
            .count()
            + baseline_metrics
                .iter()
                .filter(|b| !current_metrics.iter().any(|c| c.0 == b.0))
                .count();

        let grade_level_delta = match (&self.literacy, &baseline.literacy) {
            (Some(c), Some(b)) => Some(c.complexity.grade_level - b.complexity.grade_level),
            _ => None,
        };

        RevisionReport {
            regressions,
            improvements,
            unchanged,
            not_compared,
            grade_level_delta,
        }
    }

    /// Format the evaluation as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str("# Content Evaluation\n\n");
        md.push_str(&format!(
            "**Evaluated:** {} | **Evaluator:** {}",
            self.evaluated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            self.evaluator_version
        ));
        if let Some(target) = &self.target_grade_level {
            md.push_str(&format!(" | **Target grade:** {target}"));
        }
        md.push_str("\n\n");

        if let Some(l) = &self.literacy {
            let c = &l.complexity;
            md.push_str("## Literacy\n\n");
            md.push_str(&format!(
                "**Overall complexity:** {} | **Grade level:** {:.1} | **Confidence:** {:.0}% | **Appropriateness:** {:.0}%\n\n",
                c.overall,
                c.grade_level,
                c.confidence * 100.0,
                l.appropriateness * 100.0
            ));
            md.push_str("| Dimension | Level |\n");
            md.push_str("|-----------|-------|\n");
            md.push_str(&format!("| Structure | {} |\n", c.dimensions.structure));
            md.push_str(&format!(
                "| Language features | {} |\n",
                c.dimensions.language_features
            ));
            md.push_str(&format!(
                "| Knowledge demands | {} |\n",
                c.dimensions.knowledge_demands
            ));
            md.push_str(&format!(
                "| Meaning and purpose | {} |\n",
                c.dimensions.meaning_purpose
            ));
            md.push('\n');
            md.push_str(&format!(
                "Vocabulary: {} tier 1, {} tier 2, {} tier 3. Sentences: {:.1} words on average, {:.2} subordinate clauses per sentence.\n\n",
                l.vocabulary.tier1,
                l.vocabulary.tier2,
                l.vocabulary.tier3,
                l.sentences.average_length,
                l.sentences.subordinate_ratio
            ));
            md.push_str(&format!("_{}_\n\n", c.rationale));
        }

        if let Some(m) = &self.motivation {
            md.push_str("## Motivation\n\n");
            md.push_str("| Dimension | Score |\n");
            md.push_str("|-----------|-------|\n");
            for (name, score) in [
                ("Growth mindset", m.growth_mindset_support),
                ("Autonomy", m.autonomy_support),
                ("Relevance", m.relevance_clarity),
                ("Achievability", m.achievability_cues),
                ("Overall", m.overall),
            ] {
                md.push_str(&format!("| {name} | {:.0}% |\n", score * 100.0));
            }
            md.push('\n');
        }

        if let Some(s) = &self.standards_alignment {
            md.push_str("## Standards Alignment\n\n");
            if s.aligned_standards.is_empty() {
                md.push_str("No aligned standards reported.\n\n");
            } else {
                md.push_str(&format!("Aligned: {}\n\n", s.aligned_standards.join(", ")));
            }
        }

        let suggestions = crate::engine::generate_improvement_suggestions(self);
        if !suggestions.is_empty() {
            md.push_str("## Suggestions\n\n");
            for s in &suggestions {
                md.push_str(&format!("- {s}\n"));
            }
        }

        md
    }
}

fn level_score(level: ComplexityLevel) -> f64 {
    level.rank() as f64 / 4.0
}

/// Result of comparing two evaluations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevisionReport {
    pub regressions: Vec<MetricChange>,
    pub improvements: Vec<MetricChange>,
    pub unchanged: usize,
    /// Metrics present in only one of the two evaluations.
    pub not_compared: usize,
    /// Current minus baseline grade level, when both have literacy results.
    pub grade_level_delta: Option<f64>,
}

/// One compared metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricChange {
    pub metric: String,
    pub baseline: f64,
    pub current: f64,
    pub delta: f64,
}

impl RevisionReport {
    /// Format the revision report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Summary:** {} regressions, {} improvements, {} unchanged\n\n",
            self.regressions.len(),
            self.improvements.len(),
            self.unchanged
        ));
        if let Some(delta) = self.grade_level_delta {
            md.push_str(&format!("**Grade level change:** {delta:+.1}\n\n"));
        }

        for (title, changes) in [
            ("Regressions", &self.regressions),
            ("Improvements", &self.improvements),
        ] {
            if changes.is_empty() {
                continue;
            }
            md.push_str(&format!("### {title}\n\n"));
            md.push_str("| Metric | Baseline | Current | Delta |\n");
            md.push_str("|--------|----------|---------|-------|\n");
            for c in changes {
                md.push_str(&format!(
                    "| {} | {:.2} | {:.2} | {:+.2} |\n",
                    c.metric, c.baseline, c.current, c.delta
                ));
            }
            md.push('\n');
        }

        md
    }

    /// Returns true if there are any regressions.
    pub fn has_regressions(&self) -> bool {
        !self.regressions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{evaluate_content, EvaluationOptions};

    const PLAIN: &str = "Count the blocks. Put them in a row.";
    const ENCOURAGING: &str = "Count the blocks. You can choose a color. Keep trying, \
        practice helps you grow. First put them in a row, next check your work. \
        You will use counting at home every day.";

    #[test]
    fn compare_identical_evaluations() {
        let eval = evaluate_content(PLAIN, &EvaluationOptions::default());
        let report = eval.compare(&eval, 0.05);
        assert!(!report.has_regressions());
        assert!(report.improvements.is_empty());
        assert_eq!(report.unchanged, 11);
        assert_eq!(report.not_compared, 0);
        assert_eq!(report.grade_level_delta, Some(0.0));
    }

    #[test]
    fn compare_detects_motivation_changes() {
        let baseline = evaluate_content(PLAIN, &EvaluationOptions::default());
        let current = evaluate_content(ENCOURAGING, &EvaluationOptions::default());

        let report = current.compare(&baseline, 0.05);
        assert!(report
            .improvements
            .iter()
            .any(|c| c.metric == "motivation.growth_mindset"));

        let reverse = baseline.compare(&current, 0.05);
        assert!(reverse.has_regressions());
        assert!(reverse.to_markdown().contains("Regressions"));
    }

    #[test]
    fn compare_counts_missing_sections() {
        let baseline = evaluate_content(PLAIN, &EvaluationOptions::default());
        let current = evaluate_content(
            PLAIN,
            &EvaluationOptions {
                check_literacy: false,
                ..Default::default()
            },
        );
        let report = current.compare(&baseline, 0.05);
        assert_eq!(report.not_compared, 6);
        assert_eq!(report.unchanged, 5);
        assert!(report.grade_level_delta.is_none());
    }

    #[test]
    fn json_roundtrip() {
        let eval = evaluate_content(ENCOURAGING, &EvaluationOptions::default());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("eval.json");

        eval.save_json(&path).unwrap();
        let loaded = ContentEvaluation::load_json(&path).unwrap();

        assert_eq!(loaded.id, eval.id);
        assert_eq!(loaded.evaluator_version, eval.evaluator_version);
        let (l, e) = (loaded.literacy.unwrap(), eval.literacy.unwrap());
        assert_eq!(l.complexity.overall, e.complexity.overall);
        assert_eq!(l.recommendations, e.recommendations);
        assert!((l.complexity.grade_level - e.complexity.grade_level).abs() < 1e-9);
        assert_eq!(
            loaded.motivation.unwrap().feedback,
            eval.motivation.unwrap().feedback
        );
    }

    #[test]
    fn load_missing_file_fails() {
        let err = ContentEvaluation::load_json(Path::new("/nonexistent/eval.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read evaluation"));
    }

    #[test]
    fn markdown_output() {
        let eval = evaluate_content(
            PLAIN,
            &EvaluationOptions {
                target_grade_level: Some("1".into()),
                check_standards_alignment: true,
                ..Default::default()
            },
        );
        let md = eval.to_markdown();
        assert!(md.starts_with("# Content Evaluation"));
        assert!(md.contains("**Target grade:** 1"));
        assert!(md.contains("## Literacy"));
        assert!(md.contains("accessible"));
        assert!(md.contains("## Motivation"));
        assert!(md.contains("## Standards Alignment"));
        assert!(md.contains("## Suggestions"));
    }
}
