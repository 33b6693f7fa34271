//! Graph error types.
//!
//! Unknown identifiers are not errors: lookups return `None` or an empty
//! list. These variants cover load failures and use of a store that never
//! finished loading.

use thiserror::Error;

/// Errors raised while populating or querying the learning-component graph.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A graph-dependent operation was called before a successful load.
    #[error("knowledge graph is not loaded")]
    NotLoaded,

    /// Two components share the same identifier.
    #[error("duplicate learning component: {0}")]
    DuplicateComponent(String),

    /// A component failed structural checks during insertion.
    #[error("invalid learning component '{id}': {reason}")]
    InvalidComponent { id: String, reason: String },

    /// The graph source could not be read or parsed.
    #[error("failed to load graph from {origin}: {message}")]
    Source { origin: String, message: String },
}

impl GraphError {
    /// Returns `true` if the store may hold a partial population after this error.
    pub fn leaves_partial_state(&self) -> bool {
        matches!(
            self,
            GraphError::DuplicateComponent(_) | GraphError::InvalidComponent { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        assert_eq!(
            GraphError::DuplicateComponent("a".into()).to_string(),
            "duplicate learning component: a"
        );
        let err = GraphError::Source {
            origin: "graphs/x.toml".into(),
            message: "bad toml".into(),
        };
        assert!(err.to_string().contains("graphs/x.toml"));
    }

    #[test]
    fn partial_state_classification() {
        assert!(GraphError::DuplicateComponent("a".into()).leaves_partial_state());
        assert!(!GraphError::NotLoaded.leaves_partial_state());
        assert!(!GraphError::Source {
            origin: "builtin".into(),
            message: String::new()
        }
        .leaves_partial_state());
    }
}
