//! Five-level complexity rubric and literacy evaluation.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use pathwise_core::parse_grade_level;

use crate::metrics::{ratio, HeuristicComplexity, SentenceStats, VocabularyTiers};
use crate::traits::{ComplexityAnalysis, ComplexityModel};

/// Ordinal text complexity, least complex first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityLevel {
    #[default]
    Accessible,
    SlightlyComplex,
    ModeratelyComplex,
    VeryComplex,
    ExceedinglyComplex,
}

impl ComplexityLevel {
    /// 0 for accessible up to 4 for exceedingly complex.
    pub fn rank(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for ComplexityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Accessible => "accessible",
            Self::SlightlyComplex => "slightly complex",
            Self::ModeratelyComplex => "moderately complex",
            Self::VeryComplex => "very complex",
            Self::ExceedinglyComplex => "exceedingly complex",
        };
        f.write_str(s)
    }
}

/// Bucket a [0, 1] score. Monotonic; NaN and negatives are accessible.
pub fn score_to_level(score: f64) -> ComplexityLevel {
    if score >= 0.8 {
        ComplexityLevel::ExceedinglyComplex
    } else if score >= 0.6 {
        ComplexityLevel::VeryComplex
    } else if score >= 0.4 {
        ComplexityLevel::ModeratelyComplex
    } else if score >= 0.2 {
        ComplexityLevel::SlightlyComplex
    } else {
        ComplexityLevel::Accessible
    }
}

/// Per-dimension rubric levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionLevels {
    pub structure: ComplexityLevel,
    pub language_features: ComplexityLevel,
    pub knowledge_demands: ComplexityLevel,
    pub meaning_purpose: ComplexityLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextComplexityEvaluation {
    pub overall: ComplexityLevel,
    pub dimensions: DimensionLevels,
    pub grade_level: f64,
    /// Grows with text length, 0 for empty text.
    pub confidence: f64,
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteracyEvaluation {
    pub complexity: TextComplexityEvaluation,
    pub vocabulary: VocabularyTiers,
    pub sentences: SentenceStats,
    /// `max(0, 1 - 0.2 * |target - actual|)`, or 1.0 without a usable target.
    pub appropriateness: f64,
    #[serde(default)]
    pub target_grade: Option<String>,
    pub recommendations: Vec<String>,
}

/// Buckets a [`ComplexityModel`]'s scores into rubric levels.
#[derive(Clone)]
pub struct RubricScorer {
    model: Arc<dyn ComplexityModel>,
}

impl Default for RubricScorer {
    fn default() -> Self {
        Self::new(Arc::new(HeuristicComplexity))
    }
}

impl fmt::Debug for RubricScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RubricScorer")
            .field("model", &self.model.name())
            .finish()
    }
}

impl RubricScorer {
    pub fn new(model: Arc<dyn ComplexityModel>) -> Self {
        Self { model }
    }

    pub fn evaluate_text_complexity(&self, text: &str) -> TextComplexityEvaluation {
        let analysis = self.model.analyze(text);
        self.complexity_from(&analysis)
    }

    pub fn evaluate_literacy(&self, text: &str, target_grade: Option<&str>) -> LiteracyEvaluation {
        let analysis = self.model.analyze(text);
        let complexity = self.complexity_from(&analysis);
        let appropriateness = appropriateness(target_grade, analysis.grade_level);
        let recommendations = recommendations(&analysis);

        LiteracyEvaluation {
            complexity,
            vocabulary: analysis.vocabulary,
            sentences: analysis.sentences,
            appropriateness,
            target_grade: target_grade.map(str::to_string),
            recommendations,
        }
    }

    fn complexity_from(&self, analysis: &ComplexityAnalysis) -> TextComplexityEvaluation {
        let d = &analysis.dimensions;
        let dimensions = DimensionLevels {
            structure: score_to_level(d.structure),
            language_features: score_to_level(d.language_features),
            knowledge_demands: score_to_level(d.knowledge_demands),
            meaning_purpose: score_to_level(d.meaning_purpose),
        };
        let overall = score_to_level(d.mean());

        let confidence = if analysis.word_count == 0 {
            0.0
        } else {
            0.3 + 0.6 * (analysis.word_count as f64 / 100.0).min(1.0)
        };

        let rationale = if analysis.word_count == 0 {
            "No words to analyze; treated as accessible.".to_string()
        } else {
            format!(
                "{} model: {} words in {} sentences ({:.1} words per sentence, {:.2} subordinate clauses per sentence); {} domain-specific and {} academic words; estimated grade level {:.1}.",
                self.model.name(),
                analysis.word_count,
                analysis.sentences.sentence_count,
                analysis.sentences.average_length,
                analysis.sentences.subordinate_ratio,
                analysis.vocabulary.tier3,
                analysis.vocabulary.tier2,
                analysis.grade_level,
            )
        };

        TextComplexityEvaluation {
            overall,
            dimensions,
            grade_level: analysis.grade_level,
            confidence,
            rationale,
        }
    }
}

fn appropriateness(target_grade: Option<&str>, actual: f64) -> f64 {
    let Some(target) = target_grade else {
        return 1.0;
    };
    match parse_grade_level(target) {
        Some(t) => (1.0 - 0.2 * (t as f64 - actual).abs()).max(0.0),
        None => {
            tracing::warn!(target, "unrecognised target grade, skipping appropriateness");
            1.0
        }
    }
}

fn recommendations(analysis: &ComplexityAnalysis) -> Vec<String> {
    let mut out = Vec::new();
    let total = analysis.word_count;
    if total == 0 {
        return out;
    }

    if analysis.sentences.average_length > 20.0 {
        out.push(format!(
            "Shorten sentences: they average {:.1} words; aim for 20 or fewer.",
            analysis.sentences.average_length
        ));
    }
    if ratio(analysis.vocabulary.tier3, total) > 0.10 {
        out.push(format!(
            "Define domain terms: {} of {} words are domain-specific vocabulary.",
            analysis.vocabulary.tier3, total
        ));
    }
    if ratio(analysis.vocabulary.tier2, total) < 0.05 {
        out.push(
            "Add academic vocabulary such as \"explain\", \"compare\" or \"evidence\" to build cross-subject language."
                .to_string(),
        );
    }
    out
}

/// Evaluate with the heuristic model.
pub fn evaluate_text_complexity(text: &str) -> TextComplexityEvaluation {
    RubricScorer::default().evaluate_text_complexity(text)
}

/// Evaluate with the heuristic model.
pub fn evaluate_literacy(text: &str, target_grade: Option<&str>) -> LiteracyEvaluation {
    RubricScorer::default().evaluate_literacy(text, target_grade)
}
