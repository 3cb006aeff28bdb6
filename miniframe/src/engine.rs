//! Engine facade: the public operations that compose the rest of the crate (§4.9).

use std::time::Instant;

use crate::error::MiniFrameError;
use crate::expander;
use crate::frontier::Frontier;
use crate::lifecycle;
use crate::model::Model;
use crate::policy::{ExpansionOrder, Policy};
use crate::rng::{SamplingSource, ThreadRngSource};
use crate::telemetry::Telemetry;
use crate::world::{Arena, WorldHandle};
use crate::world_index;

/// The best-first search engine over a user-supplied [`Model`].
///
/// Single-threaded by design (§5): `Engine` carries no internal
/// synchronization and is neither required nor expected to be `Send`/`Sync`.
pub struct Engine<M: Model> {
    model: M,
    arena: Arena<M>,
    computed: Vec<WorldHandle>,
    frontier: Frontier,
    to_free: Vec<WorldHandle>,
    current: WorldHandle,
    policy: Policy,
    rng: Box<dyn SamplingSource>,
    start_expand_clock: Instant,
    telemetry: Telemetry,
}

impl<M: Model> Engine<M> {
    /// Construct the engine with `initial_status` as the current world,
    /// queued unexpanded on the frontier.
    #[must_use]
    pub fn create(model: M, initial_status: M::Status) -> Self {
        let mut arena = Arena::new();
        let current = arena.insert(&model, initial_status, 0);
        let mut frontier = Frontier::new(ExpansionOrder::ByValue);
        frontier.push_to_expand(current);
        Self {
            model,
            arena,
            computed: Vec::new(),
            frontier,
            to_free: Vec::new(),
            current,
            policy: Policy::default(),
            rng: Box::new(ThreadRngSource::default()),
            start_expand_clock: Instant::now(),
            telemetry: Telemetry::default(),
        }
    }

    /// Search all three collections for a status matching `status` by
    /// [`Model::is_same`]. On a match, canonicalize the stored status to the
    /// caller's copy and designate it current. On a miss: allocate a new
    /// world and queue it for expansion if reuse is enabled, otherwise
    /// discard the whole graph and start over from `status`.
    pub fn set_current_world(&mut self, status: M::Status) {
        let found = world_index::find_reusable(
            &self.model,
            &self.arena,
            &self.computed,
            &self.frontier,
            &status,
        );
        self.current = match found {
            Some(handle) => {
                self.arena.get_mut(handle).status = status;
                handle
            }
            None if self.policy.reuse => {
                let handle = self.arena.insert(&self.model, status, 0);
                self.frontier.push_to_expand(handle);
                handle
            }
            None => {
                self.discard_graph();
                let handle = self.arena.insert(&self.model, status, 0);
                self.frontier.push_to_expand(handle);
                handle
            }
        };

        lifecycle::mark_disposable(
            &self.model,
            &self.arena,
            &self.computed,
            &self.frontier,
            self.current,
            &mut self.to_free,
        );
        lifecycle::free_disposable_worlds(
            &mut self.arena,
            &mut self.computed,
            &mut self.frontier,
            &mut self.to_free,
        );
    }

    /// Discard the entire search graph and reset to an empty index, keeping
    /// only the arena allocator. Used when reuse is disabled and
    /// `set_current_world` sees a status with no match.
    fn discard_graph(&mut self) {
        self.arena = Arena::new();
        self.computed.clear();
        self.frontier = Frontier::new(self.policy.expansion_order);
        self.to_free.clear();
    }

    /// Run one time-budgeted expansion pass (§4.7).
    pub fn expand(&mut self) {
        expander::expand(
            &self.model,
            &mut self.arena,
            &mut self.computed,
            &mut self.frontier,
            &mut self.to_free,
            self.current,
            &self.policy,
            self.rng.as_mut(),
            self.start_expand_clock,
            &mut self.telemetry,
        );
        lifecycle::free_disposable_worlds(
            &mut self.arena,
            &mut self.computed,
            &mut self.frontier,
            &mut self.to_free,
        );
        self.telemetry.worlds_computed = self.computed.len();
        self.telemetry.worlds_to_expand = self.frontier.to_expand_len();
        self.telemetry.worlds_on_hold = self.frontier.on_hold_len();
        self.telemetry.worlds_to_free = self.to_free.len();
    }

    /// The current world's best outgoing transition payload for `actor`.
    ///
    /// # Errors
    ///
    /// Returns [`MiniFrameError::InvalidActor`] if `actor >= M::NUM_ACTORS`.
    pub fn best_transition(&self, actor: usize) -> Result<Option<M::Transition>, MiniFrameError> {
        if actor >= M::NUM_ACTORS {
            return Err(MiniFrameError::InvalidActor {
                actor,
                num_actors: M::NUM_ACTORS,
            });
        }
        Ok(self
            .arena
            .get(self.current)
            .best_transition(actor)
            .map(|t| t.payload.clone()))
    }

    /// Current telemetry snapshot (§6.2).
    #[must_use]
    pub fn telemetry(&self) -> Telemetry {
        self.telemetry
    }

    /// Read-only access to the current world's status.
    #[must_use]
    pub fn current_status(&self) -> &M::Status {
        &self.arena.get(self.current).status
    }

    pub fn set_max_time_ms(&mut self, value: f64) {
        self.policy.max_time_ms = value.max(0.0);
    }

    pub fn set_max_depth_exp(&mut self, value: i64) {
        self.policy.set_max_depth_exp(value);
    }

    pub fn set_expansion_order(&mut self, order: ExpansionOrder) {
        self.policy.expansion_order = order;
    }

    /// # Errors
    ///
    /// Returns [`MiniFrameError::NonPositiveMonteCarloThreshold`] if `value <= 0`.
    pub fn set_nb_trans_montecarlo(&mut self, value: i64) -> Result<(), MiniFrameError> {
        self.policy.set_nb_trans_montecarlo(value)
    }

    pub fn set_pruning_delta(&mut self, value: f64) {
        self.policy.pruning_delta = value;
    }

    pub fn set_reuse(&mut self, reuse: bool) {
        self.policy.reuse = reuse;
    }

    /// Override the MonteCarlo sampling source (e.g. a seeded
    /// [`crate::rng::StdRngSource`] for deterministic tests).
    pub fn set_sampling_source(&mut self, source: Box<dyn SamplingSource>) {
        self.rng = source;
    }

    /// Set the clock `expand()` measures its budget from.
    pub fn set_start_expand_clock(&mut self, start: Instant) {
        self.start_expand_clock = start;
    }
}
