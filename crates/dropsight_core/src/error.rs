//! # Pool Error Types

use thiserror::Error;

/// Errors raised by [`crate::WidgetPool`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    /// Every widget up to the ceiling is owned and none is idle.
    #[error("widget pool exhausted: all {max_capacity} widgets are owned")]
    Exhausted {
        /// The configured ceiling.
        max_capacity: usize,
    },

    /// The host could not produce a new widget (template not ready).
    #[error("widget source unavailable")]
    SourceUnavailable,

    /// A handle was released that the pool had not handed out.
    #[error("released a widget that is not currently owned")]
    NotOwned,
}

/// Result type for pool operations.
pub type PoolResult<T> = Result<T, PoolError>;
