//! pathwise-graph: the learning-component prerequisite graph.
//!
//! A [`GraphStore`] is populated once by a [`GraphLoader`] during application
//! startup and is read-only afterwards. Every query module takes the store by
//! shared reference, so a loaded store can be wrapped in an `Arc` and queried
//! from any number of threads.

pub mod loader;
pub mod lookup;
pub mod mapper;
pub mod progression;
pub mod resolver;
pub mod store;

pub use loader::{GraphLoader, GraphSource, LoadSummary};
pub use lookup::{analyze_standard, SkillAnalysis};
pub use mapper::{map_skill_to_components, SkillMapping};
pub use progression::{build_progression, DEFAULT_MAX_DEPTH};
pub use resolver::{dependents, prerequisites};
pub use store::GraphStore;
