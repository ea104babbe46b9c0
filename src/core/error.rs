//! Resolution errors.
//!
//! Every bound in [`EngineConfig`](super::EngineConfig) that trips and every
//! invalid chooser answer surfaces here. Popping an empty stack is not an
//! error: it is an invariant violation and panics.

use thiserror::Error;

use crate::events::Event;

/// Errors produced while resolving actions, events and triggers.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// Replacement chaining ran past the configured depth.
    #[error("replacement chain exceeded {limit} steps while resolving {event}")]
    ChainLimitExceeded { limit: u32, event: Event },

    /// The chooser answered with an index outside the candidate range.
    #[error("chooser returned index {index} for {count} candidates")]
    InvalidChoice { index: usize, count: usize },

    /// The executor ran past the configured step bound.
    #[error("executor exceeded {limit} steps without settling")]
    StepLimitExceeded { limit: u64 },

    /// State-based rules kept changing the state past the configured bound.
    #[error("state-based rules did not converge within {limit} passes")]
    StateBasedLimitExceeded { limit: u32 },

    /// Snapshot or trace encoding failed.
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] bincode::Error),
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, ResolutionError>;
