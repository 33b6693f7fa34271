//! One-time graph population.
//!
//! The application owns a [`GraphStore`] and calls [`GraphLoader::load`]
//! during startup. Repeated calls on a loaded store are no-ops. A failed
//! load returns the error and leaves whatever was inserted before the failure
//! in place; the store stays unloaded.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::Serialize;

use pathwise_core::config::PathwiseConfig;
use pathwise_core::parser::{
    load_graph_directory, parse_graph_document, parse_graph_document_str, GraphDocument,
};
use pathwise_core::{GraphError, Relationship, RelationshipKind};

use crate::store::GraphStore;

const BUILTIN_GRAPH: &str = include_str!("../data/k5_foundations.toml");
const BUILTIN_ORIGIN: &str = "builtin:k5_foundations.toml";

/// Where graph documents come from.
#[derive(Debug, Clone)]
pub enum GraphSource {
    /// The seed graph compiled into this crate.
    Builtin,
    /// A TOML file, or a directory searched recursively for TOML files.
    Path(PathBuf),
    /// Documents that are already parsed.
    Documents(Vec<GraphDocument>),
}

/// Counts reported after a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub components: usize,
    pub relationships: usize,
    /// Prerequisite ids that name no loaded component.
    pub dangling_prerequisites: usize,
}

impl LoadSummary {
    fn of(store: &GraphStore) -> Self {
        let dangling_prerequisites = store
            .components()
            .iter()
            .flat_map(|c| c.prerequisites.iter())
            .filter(|p| !store.contains(p))
            .count();
        Self {
            components: store.len(),
            relationships: store.relationships().len(),
            dangling_prerequisites,
        }
    }
}

/// Populates a [`GraphStore`] from a [`GraphSource`].
#[derive(Debug, Clone)]
pub struct GraphLoader {
    source: GraphSource,
}

impl Default for GraphLoader {
    fn default() -> Self {
        Self::builtin()
    }
}

impl GraphLoader {
    pub fn new(source: GraphSource) -> Self {
        Self { source }
    }

    pub fn builtin() -> Self {
        Self::new(GraphSource::Builtin)
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(GraphSource::Path(path.into()))
    }

    /// The configured graph path, or the built-in seed graph.
    pub fn from_config(config: &PathwiseConfig) -> Self {
        match &config.graph_path {
            Some(path) => Self::from_path(path.clone()),
            None => Self::builtin(),
        }
    }

    pub fn source(&self) -> &GraphSource {
        &self.source
    }

    /// Populate `store` unless it is already loaded.
    pub fn load(&self, store: &mut GraphStore) -> Result<LoadSummary, GraphError> {
        if store.is_loaded() {
            tracing::debug!("graph already loaded, skipping");
            return Ok(LoadSummary::of(store));
        }

        match self.populate(store) {
            Ok(summary) => {
                tracing::info!(
                    components = summary.components,
                    relationships = summary.relationships,
                    dangling = summary.dangling_prerequisites,
                    "knowledge graph loaded"
                );
                Ok(summary)
            }
            Err(e) => {
                tracing::error!("knowledge graph load failed: {e}");
                Err(e)
            }
        }
    }

    /// Build and load a fresh store.
    pub fn load_new(&self) -> Result<GraphStore, GraphError> {
        let mut store = GraphStore::new();
        self.load(&mut store)?;
        Ok(store)
    }

    fn populate(&self, store: &mut GraphStore) -> Result<LoadSummary, GraphError> {
        let documents = self.read_documents()?;

        // Explicit precedes edges become prerequisites of their target.
        let mut extra_prereqs: HashMap<&str, Vec<&str>> = HashMap::new();
        for doc in &documents {
            for r in &doc.relationships {
                if r.kind == RelationshipKind::Precedes {
                    extra_prereqs
                        .entry(r.target.as_str())
                        .or_default()
                        .push(r.source.as_str());
                }
            }
        }

        for doc in &documents {
            for component in &doc.components {
                let mut component = component.clone();
                if let Some(extra) = extra_prereqs.get(component.id.as_str()) {
                    for &p in extra {
                        if !component.prerequisites.iter().any(|q| q == p) {
                            component.prerequisites.push(p.to_string());
                        }
                    }
                }
                store.insert_component(component)?;
            }
        }

        // One precedes edge per (prerequisite -> component) pair.
        let mut derived = Vec::new();
        for component in store.components() {
            let mut seen = HashSet::new();
            for p in &component.prerequisites {
                if seen.insert(p.as_str()) {
                    derived.push(Relationship::precedes(p.clone(), component.id.clone()));
                }
            }
        }
        for relationship in derived {
            store.add_relationship(relationship);
        }

        for doc in &documents {
            for relationship in &doc.relationships {
                if relationship.kind != RelationshipKind::Precedes {
                    store.add_relationship(relationship.clone());
                }
            }
        }

        store.mark_loaded();
        Ok(LoadSummary::of(store))
    }

    fn read_documents(&self) -> Result<Vec<GraphDocument>, GraphError> {
        match &self.source {
            GraphSource::Builtin => {
                let doc = parse_graph_document_str(BUILTIN_GRAPH, Path::new(BUILTIN_ORIGIN))
                    .map_err(|e| source_error(BUILTIN_ORIGIN, e))?;
                Ok(vec![doc])
            }
            GraphSource::Path(path) => {
                let origin = path.display().to_string();
                if path.is_dir() {
                    load_graph_directory(path).map_err(|e| source_error(&origin, e))
                } else {
                    parse_graph_document(path)
                        .map(|doc| vec![doc])
                        .map_err(|e| source_error(&origin, e))
                }
            }
            GraphSource::Documents(docs) => Ok(docs.clone()),
        }
    }
}

fn source_error(origin: &str, err: anyhow::Error) -> GraphError {
    GraphError::Source {
        origin: origin.to_string(),
        message: format!("{err:#}"),
    }
}

/// The built-in seed graph as a parsed document.
pub fn builtin_document() -> Result<GraphDocument, GraphError> {
    parse_graph_document_str(BUILTIN_GRAPH, Path::new(BUILTIN_ORIGIN))
        .map_err(|e| source_error(BUILTIN_ORIGIN, e))
}
