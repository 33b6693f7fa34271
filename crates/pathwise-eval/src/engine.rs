//! Evaluation orchestrator.
//!
//! Composes the literacy rubric, the motivation analyzer and the
//! standards-alignment placeholder into one [`ContentEvaluation`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::metrics::HeuristicComplexity;
use crate::motivation::{analyze_motivation_with, HeuristicMotivation};
use crate::report::ContentEvaluation;
use crate::rubric::RubricScorer;
use crate::traits::{ComplexityModel, MotivationModel};

/// Version tag stamped on every evaluation.
pub const EVALUATOR_VERSION: &str = concat!("pathwise-eval/", env!("CARGO_PKG_VERSION"));

const STANDARDS_GAP: &str =
    "Standards alignment checking is not implemented yet; review alignment manually.";

fn default_true() -> bool {
    true
}

/// Which evaluations to run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationOptions {
    #[serde(default)]
    pub target_grade_level: Option<String>,
    #[serde(default = "default_true")]
    pub check_literacy: bool,
    #[serde(default = "default_true")]
    pub check_motivation: bool,
    #[serde(default)]
    pub check_standards_alignment: bool,
}

impl Default for EvaluationOptions {
    fn default() -> Self {
        Self {
            target_grade_level: None,
            check_literacy: true,
            check_motivation: true,
            check_standards_alignment: false,
        }
    }
}

/// Placeholder result until alignment checking exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardsAlignment {
    pub implemented: bool,
    pub aligned_standards: Vec<String>,
    pub gaps: Vec<String>,
}

impl StandardsAlignment {
    pub fn unimplemented() -> Self {
        Self {
            implemented: false,
            aligned_standards: Vec::new(),
            gaps: vec![STANDARDS_GAP.to_string()],
        }
    }
}

/// Runs evaluations with pluggable scoring models.
#[derive(Clone)]
pub struct ContentEvaluator {
    rubric: RubricScorer,
    motivation: Arc<dyn MotivationModel>,
}

impl Default for ContentEvaluator {
    fn default() -> Self {
        Self::new(Arc::new(HeuristicComplexity), Arc::new(HeuristicMotivation))
    }
}

impl fmt::Debug for ContentEvaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentEvaluator")
            .field("rubric", &self.rubric)
            .field("motivation", &self.motivation.name())
            .finish()
    }
}

impl ContentEvaluator {
    pub fn new(complexity: Arc<dyn ComplexityModel>, motivation: Arc<dyn MotivationModel>) -> Self {
        Self {
            rubric: RubricScorer::new(complexity),
            motivation,
        }
    }

    pub fn evaluate(&self, text: &str, options: &EvaluationOptions) -> ContentEvaluation {
        let literacy = options.check_literacy.then(|| {
            self.rubric
                .evaluate_literacy(text, options.target_grade_level.as_deref())
        });
        let motivation = options
            .check_motivation
            .then(|| analyze_motivation_with(&self.motivation, text));
        let standards_alignment = options
            .check_standards_alignment
            .then(StandardsAlignment::unimplemented);

        tracing::debug!(
            chars = text.len(),
            literacy = options.check_literacy,
            motivation = options.check_motivation,
            standards = options.check_standards_alignment,
            "evaluated content"
        );

        ContentEvaluation {
            id: Uuid::new_v4(),
            evaluated_at: Utc::now(),
            evaluator_version: EVALUATOR_VERSION.to_string(),
            target_grade_level: options.target_grade_level.clone(),
            literacy,
            motivation,
            standards_alignment,
        }
    }

    pub fn evaluate_request(
        &self,
        request: &ContentEvaluationRequest,
    ) -> ContentEvaluationResponse {
        let options = request
            .evaluation_type
            .options(request.target_grade_level.clone());
        let evaluation = self.evaluate(&request.text, &options);
        let suggestions = generate_improvement_suggestions(&evaluation);
        ContentEvaluationResponse {
            evaluation,
            suggestions,
        }
    }
}

/// Evaluate with the heuristic models.
pub fn evaluate_content(text: &str, options: &EvaluationOptions) -> ContentEvaluation {
    ContentEvaluator::default().evaluate(text, options)
}

/// Literacy recommendations, then motivation feedback, then standards gaps.
pub fn generate_improvement_suggestions(evaluation: &ContentEvaluation) -> Vec<String> {
    let mut suggestions = Vec::new();
    if let Some(literacy) = &evaluation.literacy {
        suggestions.extend(literacy.recommendations.iter().cloned());
    }
    if let Some(motivation) = &evaluation.motivation {
        suggestions.extend(motivation.feedback.iter().cloned());
    }
    if let Some(standards) = &evaluation.standards_alignment {
        suggestions.extend(standards.gaps.iter().cloned());
    }
    suggestions
}

/// Subset of evaluations a request asks for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationType {
    /// Literacy, motivation and standards alignment.
    #[default]
    Full,
    Literacy,
    Motivation,
    Standards,
}

impl EvaluationType {
    pub fn options(self, target_grade_level: Option<String>) -> EvaluationOptions {
        let (check_literacy, check_motivation, check_standards_alignment) = match self {
            Self::Full => (true, true, true),
            Self::Literacy => (true, false, false),
            Self::Motivation => (false, true, false),
            Self::Standards => (false, false, true),
        };
        EvaluationOptions {
            target_grade_level,
            check_literacy,
            check_motivation,
            check_standards_alignment,
        }
    }
}

impl fmt::Display for EvaluationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Full => "full",
            Self::Literacy => "literacy",
            Self::Motivation => "motivation",
            Self::Standards => "standards",
        };
        f.write_str(s)
    }
}

impl FromStr for EvaluationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "literacy" => Ok(Self::Literacy),
            "motivation" => Ok(Self::Motivation),
            "standards" | "standards_alignment" => Ok(Self::Standards),
            other => Err(format!(
                "unknown evaluation type '{other}' (expected full, literacy, motivation or standards)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEvaluationRequest {
    pub text: String,
    #[serde(default)]
    pub target_grade_level: Option<String>,
    #[serde(default)]
    pub evaluation_type: EvaluationType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentEvaluationResponse {
    pub evaluation: ContentEvaluation,
    pub suggestions: Vec<String>,
}

/// Answer a content evaluation request with the heuristic models.
pub fn evaluate_request(request: &ContentEvaluationRequest) -> ContentEvaluationResponse {
    ContentEvaluator::default().evaluate_request(request)
}
