//! The model interface: the contract MiniFrame requires from user code.

/// Which actor preempts at a world, or the simultaneous-play sentinel.
///
/// An enum variant expresses the sentinel directly instead of a reserved
/// out-of-range actor index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sente {
    /// The actor with preemption at this world.
    Actor(usize),
    /// All actors act at once; no single actor preempts.
    Simultaneous,
}

/// The contract a caller's domain model must satisfy for MiniFrame to search it.
///
/// `Status` and `Transition` are opaque to the engine: it never inspects their
/// fields, only compares and clones them through this trait. `Status: Clone`
/// covers status copying; there is no separate `copy` method.
///
/// # Contract
///
/// - `get_transitions` and `get_values` are each called exactly once per
///   world, at creation; their results are frozen for the world's lifetime.
/// - `step` must be pure: same `(status, transition)` in, same status out.
/// - `is_same` defines equivalence for reuse. It may compare a subset of
///   fields, but callers of [`crate::Engine::set_current_world`] rely on the
///   engine overwriting the stored status with the caller's copy on a match,
///   so a coarse `is_same` never hides externally supplied state.
/// - `is_disposable` is a hint only; the engine may also free worlds with no
///   incoming transitions that are not the current world.
pub trait Model {
    /// An immutable-by-contract snapshot of the simulated world.
    type Status: Clone;
    /// A value-copyable payload describing one legal action from a status.
    type Transition: Clone;

    /// Number of actors with a forecast slot in every world. Must be ≥ 1.
    const NUM_ACTORS: usize;
    /// Upper bound on `get_transitions(status).len()` for any status.
    const MAX_TRANSITIONS: usize;
    /// Whether this model's worlds can report [`Sente::Simultaneous`].
    const SIMULTANEOUS_PLAY: bool;

    /// Structural equivalence used for world reuse.
    fn is_same(&self, a: &Self::Status, b: &Self::Status) -> bool;

    /// Which actor preempts at `status`, or [`Sente::Simultaneous`].
    fn get_sente(&self, status: &Self::Status) -> Sente;

    /// Enumerate legal transitions from `status`. At most `MAX_TRANSITIONS`.
    fn get_transitions(&self, status: &Self::Status) -> Vec<Self::Transition>;

    /// Per-actor egocentric value of `status`, `NUM_ACTORS` entries long.
    fn get_values(&self, status: &Self::Status) -> Vec<f64>;

    /// Deterministically compute the successor status.
    fn step(&self, status: &Self::Status, transition: &Self::Transition) -> Self::Status;

    /// Terminal predicate.
    fn is_end(&self, status: &Self::Status) -> bool;

    /// Hint: may `candidate` be freed given the new `current` world?
    fn is_disposable(&self, candidate: &Self::Status, current: &Self::Status) -> bool;

    /// The model's numeric epsilon, used to scale the propagator's delay
    /// penalty. Must be strictly smaller than any two distinct forecast
    /// values the model can emit, per [`crate::World::best_transition`]'s
    /// tie-breaking contract.
    fn epsilon(&self) -> f64 {
        1e-9
    }
}
