//! Engine configuration.

use crate::error::MiniFrameError;

/// Frontier ordering strategy, fixed for the lifetime of an [`crate::Engine`]
/// (the caller selects once at construction; it is not changed mid-session).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionOrder {
    /// Priority = forecast from the world's sente's point of view, highest first.
    ByValue,
    /// Insertion order; the most recently queued world is explored first.
    ByWidth,
}

/// Engine-wide tunables: budget, depth bound, frontier ordering, sampling,
/// pruning delta, and reuse — mirrors the engine setters in spec.md §6.1.
#[derive(Debug, Clone, PartialEq)]
pub struct Policy {
    /// Wall-clock budget for a single `expand()` call, in milliseconds.
    pub max_time_ms: f64,
    /// Depth bound relative to the current world's depth. `-1` = unbounded.
    pub max_depth_exp: i64,
    /// Frontier ordering strategy.
    pub expansion_order: ExpansionOrder,
    /// MonteCarlo branching threshold: a world with more expandable
    /// transitions than this is sampled rather than expanded exhaustively.
    pub nb_trans_montecarlo: i64,
    /// Minimum forecast gap (from the parent's sente's point of view) at
    /// which a dominated sibling is pruned from further search.
    pub pruning_delta: f64,
    /// Whether previously computed worlds are reused on structural match.
    pub reuse: bool,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            max_time_ms: 1000.0,
            max_depth_exp: -1,
            expansion_order: ExpansionOrder::ByValue,
            nb_trans_montecarlo: i64::MAX,
            pruning_delta: f64::INFINITY,
            reuse: true,
        }
    }
}

impl Policy {
    /// Clamp `max_depth_exp` per spec.md §6.1 ("values < -1 clamped to -1").
    pub fn set_max_depth_exp(&mut self, value: i64) {
        self.max_depth_exp = value.max(-1);
    }

    /// Validate `value` and set `nb_trans_montecarlo`.
    ///
    /// # Errors
    ///
    /// Returns [`MiniFrameError::NonPositiveMonteCarloThreshold`] if `value <= 0`.
    pub fn set_nb_trans_montecarlo(&mut self, value: i64) -> Result<(), MiniFrameError> {
        if value <= 0 {
            return Err(MiniFrameError::NonPositiveMonteCarloThreshold { value });
        }
        self.nb_trans_montecarlo = value;
        Ok(())
    }
}
