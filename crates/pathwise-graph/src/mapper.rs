//! Keyword-relevance mapping from free-text skill descriptions to components.

use serde::Serialize;

use pathwise_core::LearningComponent;

use crate::resolver::{dependents, prerequisites};
use crate::store::GraphStore;

/// Number of top-scoring components kept per mapping.
pub const MAX_MATCHES: usize = 3;

/// A free-text skill mapped onto the graph.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SkillMapping {
    pub skill_description: String,
    pub grade_level: Option<String>,
    /// Best keyword matches, highest score first.
    pub learning_components: Vec<LearningComponent>,
    /// Union of the matches' direct prerequisites.
    pub prerequisites: Vec<LearningComponent>,
    /// Union of the matches' direct dependents.
    pub next_skills: Vec<LearningComponent>,
    /// Filled by an external error bank; always empty here.
    pub common_errors: Vec<String>,
}

/// Map a skill description to at most [`MAX_MATCHES`] components.
///
/// A candidate scores one point per description token that occurs as a
/// substring of its label, description, domain and cluster. Ties keep store
/// order and zero scores are dropped. No match yields an empty
/// `learning_components` list, not an error.
pub fn map_skill_to_components(
    store: &GraphStore,
    description: &str,
    grade_level: Option<&str>,
) -> SkillMapping {
    let lower = description.to_lowercase();
    let tokens: Vec<&str> = lower.split_whitespace().collect();

    let mut scored: Vec<(usize, &LearningComponent)> = store
        .components()
        .iter()
        .filter(|c| grade_level.map_or(true, |g| c.has_grade(g)))
        .map(|c| {
            let haystack = c.search_text();
            let score = tokens.iter().filter(|t| haystack.contains(**t)).count();
            (score, c)
        })
        .filter(|(score, _)| *score > 0)
        .collect();

    // Stable sort keeps store order among equal scores.
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.truncate(MAX_MATCHES);

    let matches: Vec<&LearningComponent> = scored.into_iter().map(|(_, c)| c).collect();

    let mut prereqs: Vec<LearningComponent> = Vec::new();
    let mut next: Vec<LearningComponent> = Vec::new();
    for m in &matches {
        push_unique(&mut prereqs, prerequisites(store, &m.id));
        push_unique(&mut next, dependents(store, &m.id));
    }

    tracing::debug!(
        tokens = tokens.len(),
        matches = matches.len(),
        "mapped skill description"
    );

    SkillMapping {
        skill_description: description.to_string(),
        grade_level: grade_level.map(str::to_string),
        learning_components: matches.into_iter().cloned().collect(),
        prerequisites: prereqs,
        next_skills: next,
        common_errors: Vec::new(),
    }
}

fn push_unique(into: &mut Vec<LearningComponent>, from: Vec<&LearningComponent>) {
    for c in from {
        if !into.iter().any(|existing| existing.id == c.id) {
            into.push(c.clone());
        }
    }
}
