//! Deterministic text statistics.
//!
//! Sentences are split on runs of `.`, `!` and `?`; words on whitespace. Both
//! drop empty pieces. Every function here is total: empty or punctuation-only
//! text yields zeroed statistics, never NaN.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::traits::{ComplexityAnalysis, ComplexityModel, DimensionScores};

/// Domain-specific mathematics vocabulary.
const TIER3_TERMS: &[&str] = &[
    "addend", "algorithm", "angle", "area", "array", "axis", "coefficient", "composite",
    "congruent", "coordinate", "decimal", "decompose", "denominator", "denominators",
    "diameter", "difference", "dividend", "divisor", "equation", "equations", "equivalent",
    "exponent", "expression", "factor", "factors", "fraction", "fractions", "hypotenuse",
    "inequality", "integer", "integers", "multiplication", "multiple", "multiples",
    "numerator", "numerators", "parallelogram", "percent", "perimeter", "polygon", "prime",
    "product", "proportion", "quadrilateral", "quotient", "radius", "ratio", "regroup",
    "remainder", "rhombus", "subtraction", "addition", "division", "sum", "symmetry",
    "trapezoid", "variable", "vertex", "volume",
];

/// General academic vocabulary used across subjects.
const TIER2_TERMS: &[&str] = &[
    "analyze", "approach", "approximate", "assume", "calculate", "category", "classify",
    "communicate", "compare", "concept", "conclude", "conclusion", "consequence", "context",
    "contrast", "define", "demonstrate", "describe", "determine", "distinguish", "estimate",
    "establish", "evaluate", "evidence", "examine", "explain", "feature", "function",
    "identify", "illustrate", "indicate", "infer", "interpret", "justify", "method",
    "organize", "pattern", "predict", "process", "relationship", "represent", "require",
    "sequence", "significant", "solve", "specific", "strategy", "structure", "summarize",
    "support",
];

/// Subordinating conjunctions and relative pronouns.
const SUBORDINATORS: &str = r"(?i)\b(because|although|though|while|when|whenever|where|wherever|whereas|if|unless|since|until|after|before|which|who|whom|whose|that)\b";

static SENTENCE_SPLIT: OnceLock<Regex> = OnceLock::new();
static VOWEL_GROUPS: OnceLock<Regex> = OnceLock::new();
static SUBORDINATE_RE: OnceLock<Regex> = OnceLock::new();
static TIER3: OnceLock<HashSet<&'static str>> = OnceLock::new();
static TIER2: OnceLock<HashSet<&'static str>> = OnceLock::new();

fn sentence_split() -> &'static Regex {
    SENTENCE_SPLIT.get_or_init(|| Regex::new(r"[.!?]+").unwrap())
}

/// Non-empty sentences of `text`.
pub fn sentences(text: &str) -> Vec<&str> {
    sentence_split()
        .split(text)
        .filter(|s| !s.trim().is_empty())
        .collect()
}

/// Whitespace-separated words of `text`.
pub fn words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Lower-case `word` and keep only ASCII letters.
pub fn clean_word(word: &str) -> String {
    word.chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Estimated syllable count of one word, at least 1.
pub fn count_syllables(word: &str) -> usize {
    let word = clean_word(word);
    if word.len() <= 3 {
        return 1;
    }
    let vowels = VOWEL_GROUPS.get_or_init(|| Regex::new(r"[aeiouy]+").unwrap());
    let mut count = vowels.find_iter(&word).count();
    if word.ends_with('e') && !word.ends_with("le") {
        count = count.saturating_sub(1);
    }
    count.max(1)
}

/// Flesch-Kincaid grade level; 0.0 when there are no words or no sentences.
pub fn flesch_kincaid_grade(text: &str) -> f64 {
    let words = words(text);
    let sentence_count = sentences(text).len();
    if words.is_empty() || sentence_count == 0 {
        return 0.0;
    }
    let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();
    let word_count = words.len() as f64;
    0.39 * (word_count / sentence_count as f64) + 11.8 * (syllables as f64 / word_count)
        - 15.59
}

/// Word counts per vocabulary tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyTiers {
    /// Everyday words.
    pub tier1: usize,
    /// General academic words.
    pub tier2: usize,
    /// Domain-specific terms.
    pub tier3: usize,
}

impl VocabularyTiers {
    pub fn total(&self) -> usize {
        self.tier1 + self.tier2 + self.tier3
    }
}

/// Classify every word of `text` into a tier. Tier counts sum to the word count.
pub fn vocabulary_tiers(text: &str) -> VocabularyTiers {
    let tier3 = TIER3.get_or_init(|| TIER3_TERMS.iter().copied().collect());
    let tier2 = TIER2.get_or_init(|| TIER2_TERMS.iter().copied().collect());

    let mut tiers = VocabularyTiers::default();
    for word in words(text) {
        let cleaned = clean_word(word);
        if tier3.contains(cleaned.as_str()) {
            tiers.tier3 += 1;
        } else if tier2.contains(cleaned.as_str()) {
            tiers.tier2 += 1;
        } else {
            tiers.tier1 += 1;
        }
    }
    tiers
}

/// Sentence length and clause statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentenceStats {
    pub sentence_count: usize,
    /// Mean words per sentence.
    pub average_length: f64,
    /// Subordinating words per sentence.
    pub subordinate_ratio: f64,
    /// Mean of the capped length and subordinate-ratio scores, in [0, 1].
    pub complexity_score: f64,
}

pub fn sentence_complexity(text: &str) -> SentenceStats {
    let sentence_count = sentences(text).len();
    if sentence_count == 0 {
        return SentenceStats::default();
    }
    let subordinators = SUBORDINATE_RE.get_or_init(|| Regex::new(SUBORDINATORS).unwrap());

    let n = sentence_count as f64;
    let average_length = words(text).len() as f64 / n;
    let subordinate_ratio = subordinators.find_iter(text).count() as f64 / n;
    let complexity_score =
        ((average_length / 25.0).min(1.0) + (subordinate_ratio / 2.0).min(1.0)) / 2.0;

    SentenceStats {
        sentence_count,
        average_length,
        subordinate_ratio,
        complexity_score,
    }
}

/// Divide, treating an empty denominator as a zero ratio.
pub(crate) fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// The keyword and formula based complexity model.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicComplexity;

impl ComplexityModel for HeuristicComplexity {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn analyze(&self, text: &str) -> ComplexityAnalysis {
        let word_count = words(text).len();
        let vocabulary = vocabulary_tiers(text);
        let sentences = sentence_complexity(text);

        let vocabulary_complexity = ratio(vocabulary.tier2 + 2 * vocabulary.tier3, word_count);
        let dimensions = DimensionScores {
            structure: sentences.complexity_score,
            language_features: (vocabulary_complexity + sentences.complexity_score) / 2.0,
            knowledge_demands: ratio(vocabulary.tier3, word_count),
            meaning_purpose: sentences.subordinate_ratio / 2.0,
        };

        ComplexityAnalysis {
            grade_level: flesch_kincaid_grade(text),
            word_count,
            vocabulary,
            sentences,
            dimensions,
        }
    }
}
