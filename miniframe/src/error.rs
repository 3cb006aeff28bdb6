//! Typed engine errors.
//!
//! Per spec.md §7, contract violations are programming errors that fail
//! fast, and most of them panic. The two operations below are checkable by
//! the caller before touching engine-internal invariants, so they return a
//! typed `Err` instead of panicking unconditionally.

/// Typed failure for [`crate::Engine`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiniFrameError {
    /// An actor index passed to `best_transition`/`forecast_value` was out
    /// of range for this model's `NUM_ACTORS`.
    InvalidActor { actor: usize, num_actors: usize },
    /// `set_nb_trans_montecarlo` was called with a non-positive value.
    NonPositiveMonteCarloThreshold { value: i64 },
}

impl std::fmt::Display for MiniFrameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidActor { actor, num_actors } => write!(
                f,
                "actor index {actor} out of range for NUM_ACTORS={num_actors}"
            ),
            Self::NonPositiveMonteCarloThreshold { value } => write!(
                f,
                "nb_trans_montecarlo must be positive, got {value}"
            ),
        }
    }
}

impl std::error::Error for MiniFrameError {}
