//! In-memory component and relationship collections.

use std::collections::{HashMap, HashSet};

use pathwise_core::{GraphError, LearningComponent, Relationship, RelationshipKind};

/// The process-wide graph snapshot.
///
/// Only [`GraphLoader`](crate::GraphLoader) populates a store; once loaded it
/// is read-only.
///
/// Components keep their insertion order; lookups by id go through `index`.
/// `outgoing` maps a source id to indices in `relationships` and is kept in
/// step with every insertion.
///
/// ```compile_fail
/// let mut store = pathwise_graph::GraphStore::new();
/// store.add_relationship(pathwise_core::Relationship::precedes("a", "b"));
/// ```
#[derive(Debug, Default)]
pub struct GraphStore {
    components: Vec<LearningComponent>,
    index: HashMap<String, usize>,
    relationships: Vec<Relationship>,
    edge_set: HashSet<Relationship>,
    outgoing: HashMap<String, Vec<usize>>,
    loaded: bool,
}

impl GraphStore {
    /// Create an empty, unloaded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` once a loader has populated the store completely.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub(crate) fn mark_loaded(&mut self) {
        self.loaded = true;
    }

    /// Insert a component. Rejects empty and duplicate identifiers.
    pub(crate) fn insert_component(
        &mut self,
        component: LearningComponent,
    ) -> Result<(), GraphError> {
        if component.id.trim().is_empty() {
            return Err(GraphError::InvalidComponent {
                id: component.id,
                reason: format!("component '{}' has an empty id", component.label),
            });
        }
        if self.index.contains_key(&component.id) {
            return Err(GraphError::DuplicateComponent(component.id));
        }
        self.index.insert(component.id.clone(), self.components.len());
        self.components.push(component);
        Ok(())
    }

    /// Add a relationship. Exact duplicates are ignored; returns `true` if it was new.
    pub(crate) fn add_relationship(&mut self, relationship: Relationship) -> bool {
        if !self.edge_set.insert(relationship.clone()) {
            return false;
        }
        self.outgoing
            .entry(relationship.source.clone())
            .or_default()
            .push(self.relationships.len());
        self.relationships.push(relationship);
        true
    }

    pub fn component(&self, id: &str) -> Option<&LearningComponent> {
        self.index.get(id).map(|&i| &self.components[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All components in insertion order.
    pub fn components(&self) -> &[LearningComponent] {
        &self.components
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Relationships of one kind, in insertion order.
    pub fn relationships_of_kind(
        &self,
        kind: RelationshipKind,
    ) -> impl Iterator<Item = &Relationship> + '_ {
        self.relationships.iter().filter(move |r| r.kind == kind)
    }

    /// Relationships of one kind whose source is `id`.
    pub fn outgoing(&self, id: &str, kind: RelationshipKind) -> Vec<&Relationship> {
        self.outgoing
            .get(id)
            .map(|indices| {
                indices
                    .iter()
                    .filter_map(|&i| self.relationships.get(i))
                    .filter(|r| r.kind == kind)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathwise_core::{SkillType, Subject};

    fn component(id: &str) -> LearningComponent {
        LearningComponent {
            id: id.into(),
            label: id.to_uppercase(),
            description: String::new(),
            subject: Subject::Ela,
            grades: vec!["1".into()],
            domain: String::new(),
            cluster: String::new(),
            skill_type: SkillType::Procedural,
            prerequisites: vec![],
            standards: vec![],
        }
    }

    #[test]
    fn insert_and_lookup() {
        let mut store = GraphStore::new();
        store.insert_component(component("a")).unwrap();
        store.insert_component(component("b")).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.component("b").unwrap().label, "B");
        assert!(store.component("zzz").is_none());
        assert_eq!(store.components()[0].id, "a");
        assert!(!store.is_loaded());
    }

    #[test]
    fn duplicate_and_empty_ids_rejected() {
        let mut store = GraphStore::new();
        store.insert_component(component("a")).unwrap();
        assert!(matches!(
            store.insert_component(component("a")),
            Err(GraphError::DuplicateComponent(id)) if id == "a"
        ));
        assert!(matches!(
            store.insert_component(component("  ")),
            Err(GraphError::InvalidComponent { .. })
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn relationships_are_deduplicated_and_indexed() {
        let mut store = GraphStore::new();
        assert!(store.add_relationship(Relationship::precedes("a", "b")));
        assert!(!store.add_relationship(Relationship::precedes("a", "b")));
        assert!(store.add_relationship(Relationship {
            source: "a".into(),
            target: "c".into(),
            kind: RelationshipKind::Supports,
        }));

        assert_eq!(store.relationships().len(), 2);
        assert_eq!(store.outgoing("a", RelationshipKind::Precedes).len(), 1);
        assert_eq!(store.outgoing("a", RelationshipKind::Supports).len(), 1);
        assert!(store.outgoing("b", RelationshipKind::Precedes).is_empty());
        assert_eq!(
            store.relationships_of_kind(RelationshipKind::Precedes).count(),
            1
        );
    }
}
