//! Skill analysis lookup by standard or component identifier.

use serde::Serialize;

use pathwise_core::{GraphError, LearningComponent, LearningProgression};

use crate::progression::build_progression;
use crate::resolver::{dependents, prerequisites};
use crate::store::GraphStore;

/// Everything the application shows for one standard.
#[derive(Debug, Clone, Serialize)]
pub struct SkillAnalysis {
    pub standard: String,
    pub learning_components: Vec<LearningComponent>,
    pub prerequisites: Vec<LearningComponent>,
    pub next_skills: Vec<LearningComponent>,
    /// Built from the first matched component.
    pub progression: LearningProgression,
}

/// Look up a standard (case-insensitive) or a component id.
///
/// `Ok(None)` means nothing matched. An unloaded store is an error rather
/// than an empty result so a failed startup load is not mistaken for
/// "not found".
pub fn analyze_standard(
    store: &GraphStore,
    standard_id: &str,
    max_depth: usize,
) -> Result<Option<SkillAnalysis>, GraphError> {
    if !store.is_loaded() {
        return Err(GraphError::NotLoaded);
    }

    let wanted = standard_id.trim();
    let matches: Vec<&LearningComponent> = store
        .components()
        .iter()
        .filter(|c| {
            c.id == wanted || c.standards.iter().any(|s| s.eq_ignore_ascii_case(wanted))
        })
        .collect();

    let Some(first) = matches.first() else {
        tracing::debug!(standard = wanted, "no component matches standard");
        return Ok(None);
    };
    let Some(progression) = build_progression(store, &first.id, max_depth) else {
        return Ok(None);
    };

    let mut prereqs: Vec<LearningComponent> = Vec::new();
    let mut next: Vec<LearningComponent> = Vec::new();
    for m in &matches {
        for p in prerequisites(store, &m.id) {
            if !prereqs.iter().any(|e| e.id == p.id) {
                prereqs.push(p.clone());
            }
        }
        for d in dependents(store, &m.id) {
            if !next.iter().any(|e| e.id == d.id) {
                next.push(d.clone());
            }
        }
    }

    Ok(Some(SkillAnalysis {
        standard: standard_id.to_string(),
        learning_components: matches.into_iter().cloned().collect(),
        prerequisites: prereqs,
        next_skills: next,
        progression,
    }))
}
