//! Transition: a directed edge in the search graph.

use crate::model::Model;
use crate::world::WorldHandle;

/// A reference to a [`Transition`] living inline inside its owning world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionHandle {
    pub(crate) world: WorldHandle,
    pub(crate) index: u32,
}

impl TransitionHandle {
    /// The world this transition originates from.
    #[must_use]
    pub fn from(self) -> WorldHandle {
        self.world
    }
}

/// Whether a transition's destination has been computed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Not yet expanded.
    Unexpanded,
    /// Expanded to the given world.
    Expanded(WorldHandle),
}

/// A directed edge from one world to another, carrying the model's payload
/// and a running per-actor forecast.
///
/// `forecast` is seeded from the destination world's own forecast at the
/// moment the edge is expanded and refines monotonically downward from
/// there as [`crate::propagator::propagate_from`] revisits it (see the
/// writing policy in the propagator module).
#[derive(Clone)]
pub struct Transition<M: Model> {
    pub payload: M::Transition,
    pub(crate) from: WorldHandle,
    pub(crate) to: Destination,
    pub(crate) forecast: Vec<f64>,
}

impl<M: Model> std::fmt::Debug for Transition<M>
where
    M::Transition: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transition")
            .field("payload", &self.payload)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("forecast", &self.forecast)
            .finish()
    }
}

impl<M: Model> Transition<M> {
    /// The world this transition originates from.
    #[must_use]
    pub fn from(&self) -> WorldHandle {
        self.from
    }

    /// The world this transition leads to, if expanded.
    #[must_use]
    pub fn to(&self) -> Option<WorldHandle> {
        match self.to {
            Destination::Expanded(w) => Some(w),
            Destination::Unexpanded => None,
        }
    }

    /// The running best-known per-actor value achievable via this edge.
    #[must_use]
    pub fn forecast(&self, actor: usize) -> f64 {
        self.forecast[actor]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::WalkModel;
    use crate::world::Arena;

    #[test]
    fn unexpanded_transition_has_no_destination() {
        let model = WalkModel::default();
        let mut arena = Arena::new();
        let handle = arena.insert(&model, model.initial(), 0);
        let world = arena.get(handle);
        assert!(world.transitions()[0].to().is_none());
    }

    #[test]
    fn transition_from_points_back_to_origin() {
        let model = WalkModel::default();
        let mut arena = Arena::new();
        let handle = arena.insert(&model, model.initial(), 0);
        let world = arena.get(handle);
        for t in world.transitions() {
            assert_eq!(t.from(), handle);
        }
    }
}
