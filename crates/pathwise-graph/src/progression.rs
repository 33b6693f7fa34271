//! Depth-bounded bidirectional progression building.

use std::collections::HashSet;

use pathwise_core::model::sort_grade_tags;
use pathwise_core::{LearningComponent, LearningProgression};

use crate::resolver::{dependents, prerequisites};
use crate::store::GraphStore;

/// Default number of prerequisite/dependent hops walked from the start.
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Traversal direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    /// Toward prerequisites.
    Backward,
    /// Toward dependents.
    Forward,
}

impl Direction {
    fn neighbors<'a>(self, store: &'a GraphStore, id: &str) -> Vec<&'a LearningComponent> {
        match self {
            Direction::Backward => prerequisites(store, id),
            Direction::Forward => dependents(store, id),
        }
    }
}

/// Build the learning progression anchored at `start_id`.
///
/// Returns `None` when `start_id` is unknown. Prerequisites up to `max_depth`
/// hops away come first (earliest-learned first), then the start component,
/// then dependents up to `max_depth` hops away. A single visited set spans
/// both passes, so every id appears once and cyclic data terminates.
pub fn build_progression(
    store: &GraphStore,
    start_id: &str,
    max_depth: usize,
) -> Option<LearningProgression> {
    let start = store.component(start_id)?;

    let mut visited: HashSet<&str> = HashSet::new();
    visited.insert(start.id.as_str());

    let mut backward = walk(store, start, Direction::Backward, max_depth, &mut visited);
    let forward = walk(store, start, Direction::Forward, max_depth, &mut visited);

    // Each newly found prerequisite goes in front of everything found before it.
    backward.reverse();

    let mut components: Vec<LearningComponent> =
        Vec::with_capacity(backward.len() + 1 + forward.len());
    components.extend(backward.into_iter().cloned());
    components.push(start.clone());
    components.extend(forward.into_iter().cloned());

    let pathway: Vec<String> = components.iter().map(|c| c.id.clone()).collect();

    let mut grade_span: Vec<String> = Vec::new();
    for grade in components.iter().flat_map(|c| c.grades.iter()) {
        if !grade_span.contains(grade) {
            grade_span.push(grade.clone());
        }
    }
    sort_grade_tags(&mut grade_span);

    tracing::debug!(
        start = start_id,
        max_depth,
        components = pathway.len(),
        "built learning progression"
    );

    Some(LearningProgression {
        components,
        pathway,
        grade_span,
    })
}

/// Depth-first walk from `start`, returning newly visited components in
/// discovery order. Nodes at depth `max_depth` are recorded but not expanded.
fn walk<'a>(
    store: &'a GraphStore,
    start: &'a LearningComponent,
    direction: Direction,
    max_depth: usize,
    visited: &mut HashSet<&'a str>,
) -> Vec<&'a LearningComponent> {
    let mut found = Vec::new();
    if max_depth == 0 {
        return found;
    }

    let mut stack: Vec<(&'a LearningComponent, usize)> = direction
        .neighbors(store, &start.id)
        .into_iter()
        .rev()
        .map(|c| (c, 1))
        .collect();

    while let Some((component, depth)) = stack.pop() {
        if !visited.insert(component.id.as_str()) {
            continue;
        }
        found.push(component);

        if depth < max_depth {
            for next in direction.neighbors(store, &component.id).into_iter().rev() {
                if !visited.contains(next.id.as_str()) {
                    stack.push((next, depth + 1));
                }
            }
        }
    }

    found
}
