//! Direct-neighbor prerequisite queries.

use pathwise_core::{LearningComponent, RelationshipKind};

use crate::store::GraphStore;

/// Components named in `id`'s prerequisite list, in list order.
///
/// Unknown ids, ids with no prerequisites, and prerequisite ids that name no
/// loaded component all contribute nothing.
pub fn prerequisites<'a>(store: &'a GraphStore, id: &str) -> Vec<&'a LearningComponent> {
    let Some(component) = store.component(id) else {
        return Vec::new();
    };
    let mut out: Vec<&LearningComponent> = Vec::with_capacity(component.prerequisites.len());
    for prereq_id in &component.prerequisites {
        if let Some(prereq) = store.component(prereq_id) {
            if !out.iter().any(|c| c.id == prereq.id) {
                out.push(prereq);
            }
        }
    }
    out
}

/// Components that list `id` as a prerequisite, found through `precedes` edges.
pub fn dependents<'a>(store: &'a GraphStore, id: &str) -> Vec<&'a LearningComponent> {
    store
        .outgoing(id, RelationshipKind::Precedes)
        .into_iter()
        .filter_map(|r| store.component(&r.target))
        .collect()
}
