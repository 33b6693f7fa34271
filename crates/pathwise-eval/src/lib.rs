//! pathwise-eval: Text complexity and motivation evaluation.
//!
//! Scores instructional text with transparent, deterministic heuristics and
//! combines the results into a [`ContentEvaluation`]. Nothing here depends on
//! the knowledge graph, so evaluation keeps working when the graph failed to
//! load.

pub mod engine;
pub mod metrics;
pub mod motivation;
pub mod report;
pub mod rubric;
pub mod traits;

pub use engine::{
    evaluate_content, evaluate_request, generate_improvement_suggestions, ContentEvaluationRequest,
    ContentEvaluationResponse, ContentEvaluator, EvaluationOptions, EvaluationType,
    StandardsAlignment, EVALUATOR_VERSION,
};
pub use motivation::{analyze_motivation, MotivationEvaluation};
pub use report::{ContentEvaluation, RevisionReport};
pub use rubric::{
    evaluate_literacy, evaluate_text_complexity, score_to_level, ComplexityLevel,
    LiteracyEvaluation, RubricScorer, TextComplexityEvaluation,
};
pub use traits::{ComplexityModel, MotivationModel};
