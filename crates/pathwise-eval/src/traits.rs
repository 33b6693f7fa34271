//! Scoring contracts.
//!
//! The rubric and the evaluator only see per-dimension scores. The heuristic
//! models in [`crate::metrics`] and [`crate::motivation`] are the defaults; a
//! statistical or learned model can be swapped in by implementing these
//! traits.

use serde::{Deserialize, Serialize};

use crate::metrics::{SentenceStats, VocabularyTiers};

/// Raw complexity dimension scores, each in [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionScores {
    pub structure: f64,
    pub language_features: f64,
    pub knowledge_demands: f64,
    pub meaning_purpose: f64,
}

impl DimensionScores {
    pub fn mean(&self) -> f64 {
        (self.structure + self.language_features + self.knowledge_demands + self.meaning_purpose)
            / 4.0
    }
}

/// What a [`ComplexityModel`] reports for one text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplexityAnalysis {
    /// Estimated US grade level. May be negative for very simple text.
    pub grade_level: f64,
    pub word_count: usize,
    pub vocabulary: VocabularyTiers,
    pub sentences: SentenceStats,
    pub dimensions: DimensionScores,
}

/// Text to raw complexity scores.
pub trait ComplexityModel: Send + Sync {
    /// Short model name recorded in rationales.
    fn name(&self) -> &str;

    fn analyze(&self, text: &str) -> ComplexityAnalysis;
}

/// Motivation dimension scores, each in [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MotivationScores {
    pub growth_mindset: f64,
    pub autonomy: f64,
    pub relevance: f64,
    pub achievability: f64,
}

impl MotivationScores {
    pub fn mean(&self) -> f64 {
        (self.growth_mindset + self.autonomy + self.relevance + self.achievability) / 4.0
    }
}

/// Text to motivation scores.
pub trait MotivationModel: Send + Sync {
    fn name(&self) -> &str;

    fn score(&self, text: &str) -> MotivationScores;
}
