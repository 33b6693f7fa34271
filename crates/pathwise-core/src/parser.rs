//! TOML graph document parser.
//!
//! Loads learning-component graph documents from TOML files and directories,
//! and validates them.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::{LearningComponent, Relationship, RelationshipKind, SkillType, Subject};

/// A parsed graph document: one curriculum slice of components plus any
/// explicit relationships beyond the prerequisite lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphDocument {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub components: Vec<LearningComponent>,
    /// Explicit edges. Prerequisite edges are derived at load time and are not listed here.
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

/// Intermediate TOML structure for parsing graph files.
#[derive(Debug, Deserialize)]
struct TomlGraphFile {
    graph: TomlGraphHeader,
    #[serde(default)]
    components: Vec<TomlComponent>,
    #[serde(default)]
    relationships: Vec<TomlRelationship>,
}

#[derive(Debug, Deserialize)]
struct TomlGraphHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlComponent {
    id: String,
    label: String,
    #[serde(default)]
    description: String,
    subject: String,
    #[serde(default)]
    grades: Vec<String>,
    #[serde(default)]
    domain: String,
    #[serde(default)]
    cluster: String,
    #[serde(default = "default_skill_type")]
    skill_type: String,
    #[serde(default)]
    prerequisites: Vec<String>,
    #[serde(default)]
    standards: Vec<String>,
}

fn default_skill_type() -> String {
    "conceptual".to_string()
}

#[derive(Debug, Deserialize)]
struct TomlRelationship {
    source: String,
    target: String,
    #[serde(default = "default_relationship_kind")]
    kind: String,
}

fn default_relationship_kind() -> String {
    "related_to".to_string()
}

/// Parse a single TOML file into a `GraphDocument`.
pub fn parse_graph_document(path: &Path) -> Result<GraphDocument> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read graph file: {}", path.display()))?;

    parse_graph_document_str(&content, path)
}

/// Parse a TOML string into a `GraphDocument`.
pub fn parse_graph_document_str(content: &str, source_path: &Path) -> Result<GraphDocument> {
    let parsed: TomlGraphFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let components = parsed
        .components
        .into_iter()
        .map(|c| {
            let subject: Subject = c
                .subject
                .parse()
                .map_err(|e: String| anyhow::anyhow!("component '{}': {}", c.id, e))?;
            let skill_type: SkillType = c
                .skill_type
                .parse()
                .map_err(|e: String| anyhow::anyhow!("component '{}': {}", c.id, e))?;

            Ok(LearningComponent {
                id: c.id,
                label: c.label,
                description: c.description,
                subject,
                grades: dedup_preserving_order(c.grades),
                domain: c.domain,
                cluster: c.cluster,
                skill_type,
                prerequisites: dedup_preserving_order(c.prerequisites),
                standards: dedup_preserving_order(c.standards),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let relationships = parsed
        .relationships
        .into_iter()
        .map(|r| {
            let kind: RelationshipKind = r
                .kind
                .parse()
                .map_err(|e: String| anyhow::anyhow!("{} -> {}: {}", r.source, r.target, e))?;
            Ok(Relationship {
                source: r.source,
                target: r.target,
                kind,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(GraphDocument {
        id: parsed.graph.id,
        name: parsed.graph.name,
        description: parsed.graph.description,
        components,
        relationships,
    })
}

fn dedup_preserving_order(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && seen.insert(v.clone()))
        .collect()
}

/// Recursively load all `.toml` graph documents from a directory.
///
/// Files are visited in name order so the resulting component order is stable.
pub fn load_graph_directory(dir: &Path) -> Result<Vec<GraphDocument>> {
    let mut documents = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            documents.extend(load_graph_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_graph_document(&path) {
                Ok(doc) => documents.push(doc),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(documents)
}

/// Combine documents into the single graph a loader would build from them.
///
/// Components and relationships keep document order.
pub fn merge_graph_documents(docs: &[GraphDocument]) -> GraphDocument {
    if let [doc] = docs {
        return doc.clone();
    }
    GraphDocument {
        id: docs.iter().map(|d| d.id.as_str()).collect::<Vec<_>>().join("+"),
        name: docs.iter().map(|d| d.name.as_str()).collect::<Vec<_>>().join(", "),
        description: String::new(),
        components: docs.iter().flat_map(|d| d.components.clone()).collect(),
        relationships: docs.iter().flat_map(|d| d.relationships.clone()).collect(),
    }
}

/// A warning from graph document validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The component ID (if applicable).
    pub component_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a graph document for common authoring mistakes.
///
/// Duplicate and empty ids also fail a load. The engine tolerates everything
/// else reported here, including dangling ids and cycles.
pub fn validate_graph_document(doc: &GraphDocument) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_ids = HashSet::new();
    for c in &doc.components {
        if c.id.trim().is_empty() {
            warnings.push(ValidationWarning {
                component_id: None,
                message: format!("component '{}' has an empty id", c.label),
            });
        } else if !seen_ids.insert(c.id.as_str()) {
            warnings.push(ValidationWarning {
                component_id: Some(c.id.clone()),
                message: format!("duplicate component ID: {}", c.id),
            });
        }
    }

    for c in &doc.components {
        if c.grades.is_empty() {
            warnings.push(ValidationWarning {
                component_id: Some(c.id.clone()),
                message: "no grade tags; grade-filtered lookups will skip it".into(),
            });
        }
        for p in &c.prerequisites {
            if p == &c.id {
                warnings.push(ValidationWarning {
                    component_id: Some(c.id.clone()),
                    message: "component lists itself as a prerequisite".into(),
                });
            } else if !seen_ids.contains(p.as_str()) {
                warnings.push(ValidationWarning {
                    component_id: Some(c.id.clone()),
                    message: format!("unknown prerequisite: {p}"),
                });
            }
        }
    }

    for r in &doc.relationships {
        if r.kind == RelationshipKind::Precedes {
            warnings.push(ValidationWarning {
                component_id: Some(r.target.clone()),
                message: format!(
                    "explicit precedes relationship {} -> {}; list {} under its prerequisites",
                    r.source, r.target, r.source
                ),
            });
        }
        for endpoint in [&r.source, &r.target] {
            if !seen_ids.contains(endpoint.as_str()) {
                warnings.push(ValidationWarning {
                    component_id: None,
                    message: format!(
                        "{} relationship {} -> {} references unknown component {}",
                        r.kind, r.source, r.target, endpoint
                    ),
                });
            }
        }
    }

    for cycle in find_prerequisite_cycles(doc) {
        warnings.push(ValidationWarning {
            component_id: cycle.first().cloned(),
            message: format!("prerequisite cycle: {}", cycle.join(" -> ")),
        });
    }

    warnings
}

/// Find every elementary cycle of length two or more along precedes edges.
///
/// Each cycle is reported once, rotated so its smallest id comes first.
/// Self-prerequisites are reported separately by `validate_graph_document`.
pub fn find_prerequisite_cycles(doc: &GraphDocument) -> Vec<Vec<String>> {
    let nodes: Vec<&str> = doc
        .components
        .iter()
        .map(|c| c.id.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let index: HashMap<&str, usize> = nodes.iter().enumerate().map(|(i, &n)| (n, i)).collect();

    let mut succ: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    let mut pred: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    let mut add_edge = |from: &str, to: &str| {
        let (Some(&a), Some(&b)) = (index.get(from), index.get(to)) else {
            return;
        };
        if a != b && !succ[a].contains(&b) {
            succ[a].push(b);
            pred[b].push(a);
        }
    };
    for c in &doc.components {
        for p in &c.prerequisites {
            add_edge(p.as_str(), c.id.as_str());
        }
    }
    for r in &doc.relationships {
        if r.kind == RelationshipKind::Precedes {
            add_edge(r.source.as_str(), r.target.as_str());
        }
    }

    let mut cycles = Vec::new();
    for start in 0..nodes.len() {
        // Only nodes at or after `start` that sit on a cycle through it, so
        // each cycle is found from its smallest member.
        let forward = reachable(start, &succ);
        let backward = reachable(start, &pred);
        let region: Vec<bool> = forward.iter().zip(&backward).map(|(f, b)| *f && *b).collect();

        let mut path = vec![start];
        let mut on_path = vec![false; nodes.len()];
        on_path[start] = true;
        let mut cursors = vec![0usize];

        while let Some(cursor) = cursors.last_mut() {
            let node = path[path.len() - 1];
            let Some(&next) = succ[node].get(*cursor) else {
                cursors.pop();
                on_path[node] = false;
                path.pop();
                continue;
            };
            *cursor += 1;

            if next == start {
                cycles.push(path.iter().map(|&i| nodes[i].to_string()).collect());
            } else if region[next] && !on_path[next] {
                on_path[next] = true;
                path.push(next);
                cursors.push(0);
            }
        }
    }

    cycles
}

/// Nodes reachable from `start` through nodes numbered at least `start`.
fn reachable(start: usize, edges: &[Vec<usize>]) -> Vec<bool> {
    let mut seen = vec![false; edges.len()];
    seen[start] = true;
    let mut stack = vec![start];
    while let Some(node) = stack.pop() {
        for &next in &edges[node] {
            if next > start && !seen[next] {
                seen[next] = true;
                stack.push(next);
            }
        }
    }
    seen
}
