//! pathwise-core: Data model, graph documents, errors and configuration.
//!
//! This crate defines the learning-component graph model that the graph
//! engine and the CLI build on, plus the TOML document format the graph is
//! loaded from.

pub mod config;
pub mod error;
pub mod model;
pub mod parser;

pub use error::GraphError;
pub use model::{
    parse_grade_level, LearningComponent, LearningProgression, Relationship, RelationshipKind,
    SkillType, Subject,
};
