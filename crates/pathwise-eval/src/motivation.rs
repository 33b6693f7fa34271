//! Phrase-presence motivation scoring.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::traits::{MotivationModel, MotivationScores};

const GROWTH_MINDSET_PHRASES: &[&str] = &[
    "not yet",
    "keep trying",
    "try again",
    "practice",
    "effort",
    "mistakes help",
    "learn from",
    "challenge",
    "improve",
    "getting better",
    "grow",
    "persevere",
    "hard work",
    "strategy",
    "your brain",
];

const AUTONOMY_PHRASES: &[&str] = &[
    "choose",
    "choice",
    "you decide",
    "your own",
    "pick",
    "option",
    "select",
    "which way",
    "you prefer",
    "in your own words",
];

const RELEVANCE_PHRASES: &[&str] = &[
    "real world",
    "real life",
    "everyday",
    "in your life",
    "why this matters",
    "this helps you",
    "you will use",
    "useful",
    "at home",
    "community",
    "imagine",
    "for example",
];

const ACHIEVABILITY_PHRASES: &[&str] = &[
    "step by step",
    "step 1",
    "first",
    "next",
    "start with",
    "you can",
    "break it down",
    "small steps",
    "one at a time",
    "hint",
    "check your work",
    "together",
];

const GROWTH_MINDSET_CAP: f64 = 5.0;
const AUTONOMY_CAP: f64 = 3.0;
const RELEVANCE_CAP: f64 = 3.0;
const ACHIEVABILITY_CAP: f64 = 4.0;

const GROWTH_MINDSET_THRESHOLD: f64 = 0.4;
const AUTONOMY_THRESHOLD: f64 = 0.3;
const RELEVANCE_THRESHOLD: f64 = 0.3;
const ACHIEVABILITY_THRESHOLD: f64 = 0.3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotivationEvaluation {
    pub growth_mindset_support: f64,
    pub autonomy_support: f64,
    pub relevance_clarity: f64,
    pub achievability_cues: f64,
    /// Mean of the four dimension scores.
    pub overall: f64,
    pub feedback: Vec<String>,
}

/// Distinct phrases of `phrases` present in already lower-cased `text`.
fn count_phrases(text: &str, phrases: &[&str]) -> usize {
    phrases.iter().filter(|p| text.contains(*p)).count()
}

fn capped(count: usize, cap: f64) -> f64 {
    (count as f64 / cap).min(1.0)
}

/// Fixed phrase lists scored against capped match counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicMotivation;

impl MotivationModel for HeuristicMotivation {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn score(&self, text: &str) -> MotivationScores {
        let lower = text.to_lowercase();
        MotivationScores {
            growth_mindset: capped(
                count_phrases(&lower, GROWTH_MINDSET_PHRASES),
                GROWTH_MINDSET_CAP,
            ),
            autonomy: capped(count_phrases(&lower, AUTONOMY_PHRASES), AUTONOMY_CAP),
            relevance: capped(count_phrases(&lower, RELEVANCE_PHRASES), RELEVANCE_CAP),
            achievability: capped(
                count_phrases(&lower, ACHIEVABILITY_PHRASES),
                ACHIEVABILITY_CAP,
            ),
        }
    }
}

/// Turn raw scores into an evaluation with feedback for weak dimensions.
pub fn motivation_evaluation(scores: MotivationScores) -> MotivationEvaluation {
    let mut feedback = Vec::new();
    if scores.growth_mindset < GROWTH_MINDSET_THRESHOLD {
        feedback.push(
            "Add growth-mindset language that treats mistakes and effort as part of learning (for example \"not yet\" or \"keep trying\")."
                .to_string(),
        );
    }
    if scores.autonomy < AUTONOMY_THRESHOLD {
        feedback.push(
            "Give learners a choice in how they work or let them respond in their own words."
                .to_string(),
        );
    }
    if scores.relevance < RELEVANCE_THRESHOLD {
        feedback.push(
            "Connect the task to real-life situations so learners see why it matters.".to_string(),
        );
    }
    if scores.achievability < ACHIEVABILITY_THRESHOLD {
        feedback.push(
            "Break the task into small, clear steps so success feels within reach.".to_string(),
        );
    }

    MotivationEvaluation {
        growth_mindset_support: scores.growth_mindset,
        autonomy_support: scores.autonomy,
        relevance_clarity: scores.relevance,
        achievability_cues: scores.achievability,
        overall: scores.mean(),
        feedback,
    }
}

/// Score `text` with `model`.
pub fn analyze_motivation_with(
    model: &Arc<dyn MotivationModel>,
    text: &str,
) -> MotivationEvaluation {
    motivation_evaluation(model.score(text))
}

/// Score `text` with the heuristic phrase lists.
pub fn analyze_motivation(text: &str) -> MotivationEvaluation {
    motivation_evaluation(HeuristicMotivation.score(text))
}
