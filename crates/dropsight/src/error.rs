//! # Overlay Error Types
//!
//! All errors that can occur in the overlay engine.

use std::fmt;

use dropsight_core::PoolError;
use dropsight_shared::EntityKey;
use thiserror::Error;

/// A host collaborator the engine depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collaborator {
    /// Viewer state (position, input focus).
    Viewer,
    /// Camera projection.
    Camera,
    /// Widget template used to create badges.
    Template,
}

impl fmt::Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Viewer => "viewer",
            Self::Camera => "camera",
            Self::Template => "widget template",
        })
    }
}

/// Errors that can occur in the overlay engine.
#[derive(Error, Debug)]
pub enum OverlayError {
    /// A collaborator is not available this tick; retried next tick.
    #[error("missing collaborator: {0}")]
    MissingCollaborator(Collaborator),

    /// No display record exists for the entity.
    #[error("unknown entity: {0}")]
    UnknownEntity(EntityKey),

    /// Every widget up to the pool ceiling is owned.
    #[error("widget pool exhausted: all {max_capacity} widgets are owned")]
    PoolExhausted {
        /// The configured ceiling.
        max_capacity: usize,
    },

    /// Lifecycle contract violated inside the engine.
    #[error("state inconsistency: {0}")]
    StateInconsistency(String),

    /// A configuration value was rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

impl From<PoolError> for OverlayError {
    fn from(err: PoolError) -> Self {
        match err {
            PoolError::Exhausted { max_capacity } => Self::PoolExhausted { max_capacity },
            PoolError::SourceUnavailable => Self::MissingCollaborator(Collaborator::Template),
            PoolError::NotOwned => {
                Self::StateInconsistency("widget released while not owned".to_owned())
            }
        }
    }
}

/// Result type for overlay operations.
pub type OverlayResult<T> = Result<T, OverlayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_errors_map_into_taxonomy() {
        assert!(matches!(
            OverlayError::from(PoolError::Exhausted { max_capacity: 4 }),
            OverlayError::PoolExhausted { max_capacity: 4 }
        ));
        assert!(matches!(
            OverlayError::from(PoolError::SourceUnavailable),
            OverlayError::MissingCollaborator(Collaborator::Template)
        ));
        assert!(matches!(
            OverlayError::from(PoolError::NotOwned),
            OverlayError::StateInconsistency(_)
        ));
    }

    #[test]
    fn test_messages() {
        let err = OverlayError::MissingCollaborator(Collaborator::Camera);
        assert_eq!(err.to_string(), "missing collaborator: camera");
    }
}
