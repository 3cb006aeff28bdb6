//! World: a node in the search graph, and the arena that owns it.

use crate::model::{Model, Sente};
use crate::transition::{Destination, Transition, TransitionHandle};

/// An opaque reference to a [`World`] living inside an [`Arena`].
///
/// Carries a generation counter so that a handle outliving the slot it once
/// named is caught as a stale dereference (in debug builds) rather than
/// silently aliasing whatever world now occupies that slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorldHandle {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

/// A node in the reachable-states graph: a status plus its precomputed
/// outgoing transitions and incoming-edge set.
///
/// `values`, `transitions`, `is_terminal`, and `sente` are computed once at
/// construction and never mutated afterward — only `status` itself may later
/// be overwritten in place, by [`crate::Engine::set_current_world`]'s
/// canonicalization step.
pub struct World<M: Model> {
    pub status: M::Status,
    values: Vec<f64>,
    pub(crate) transitions: Vec<Transition<M>>,
    pub(crate) sources: Vec<TransitionHandle>,
    pub depth: u32,
    is_terminal: bool,
    sente: Sente,
}

impl<M: Model> std::fmt::Debug for World<M>
where
    M::Status: std::fmt::Debug,
    M::Transition: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("status", &self.status)
            .field("values", &self.values)
            .field("transitions", &self.transitions)
            .field("sources", &self.sources)
            .field("depth", &self.depth)
            .field("is_terminal", &self.is_terminal)
            .field("sente", &self.sente)
            .finish()
    }
}

impl<M: Model> World<M> {
    pub(crate) fn new(model: &M, status: M::Status, depth: u32, handle: WorldHandle) -> Self {
        let raw_transitions = model.get_transitions(&status);
        debug_assert!(
            raw_transitions.len() <= M::MAX_TRANSITIONS,
            "model returned more than MAX_TRANSITIONS transitions"
        );
        let values = model.get_values(&status);
        debug_assert_eq!(
            values.len(),
            M::NUM_ACTORS,
            "model returned the wrong number of per-actor values"
        );
        let is_terminal = model.is_end(&status);
        let sente = model.get_sente(&status);

        let transitions = raw_transitions
            .into_iter()
            .map(|payload| Transition {
                payload,
                from: handle,
                to: Destination::Unexpanded,
                forecast: values.clone(),
            })
            .collect();

        Self {
            status,
            values,
            transitions,
            sources: Vec::new(),
            depth,
            is_terminal,
            sente,
        }
    }

    /// The world's sente, frozen at creation.
    #[must_use]
    pub fn sente(&self) -> Sente {
        self.sente
    }

    /// True if the status this world wraps is terminal.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.is_terminal
    }

    /// Egocentric value of this world for `actor`, independent of any subtree.
    #[must_use]
    pub fn value(&self, actor: usize) -> f64 {
        self.values[actor]
    }

    /// Outgoing transitions, in the order the model returned them.
    #[must_use]
    pub fn transitions(&self) -> &[Transition<M>] {
        &self.transitions
    }

    /// Worlds that have expanded transitions leading here.
    #[must_use]
    pub fn sources(&self) -> &[TransitionHandle] {
        &self.sources
    }

    /// The substituted actor index used for forecast queries at this world:
    /// `actor` unchanged unless this world's sente is [`Sente::Simultaneous`],
    /// in which case `querying_actor` is substituted (Open Question 2 in
    /// the design notes resolves this as "substitute the querying actor").
    fn resolved_actor(&self, querying_actor: usize) -> usize {
        match self.sente {
            Sente::Actor(a) => a,
            Sente::Simultaneous => querying_actor,
        }
    }

    /// Among outgoing transitions with a destination, the one maximizing
    /// `forecast[sente_or_actor]`. Ties favor the earliest (stable insertion
    /// order). Returns `None` if no outgoing transition has been expanded.
    #[must_use]
    pub fn best_transition(&self, actor: usize) -> Option<&Transition<M>> {
        let key_actor = self.resolved_actor(actor);
        let mut best: Option<&Transition<M>> = None;
        for t in &self.transitions {
            if !matches!(t.to, Destination::Expanded(_)) {
                continue;
            }
            let candidate_value = t.forecast[key_actor];
            match best {
                None => best = Some(t),
                Some(current_best) if candidate_value > current_best.forecast[key_actor] => {
                    best = Some(t);
                }
                Some(_) => {}
            }
        }
        best
    }

    /// `best_transition(actor).forecast[actor]`, or this world's own
    /// egocentric value if no transition has been expanded.
    #[must_use]
    pub fn forecast_value(&self, actor: usize) -> f64 {
        match self.best_transition(actor) {
            Some(t) => t.forecast[actor],
            None => self.values[actor],
        }
    }

    /// The priority used to order the by-value frontier: this world's own
    /// forecast from its sente's point of view. For [`Sente::Simultaneous`]
    /// worlds (which have no single querying actor in this context) this is
    /// the maximum forecast across actors — an implementation choice the
    /// frontier ordering tests do not depend on.
    #[must_use]
    pub(crate) fn priority(&self) -> f64 {
        match self.sente {
            Sente::Actor(a) => self.forecast_value(a),
            Sente::Simultaneous => (0..self.values.len())
                .map(|a| self.forecast_value(a))
                .fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

struct Slot<M: Model> {
    generation: u32,
    world: Option<World<M>>,
}

/// Owns every [`World`] the engine has ever created, indexed by
/// [`WorldHandle`]. Disposal tombstones a slot rather than compacting the
/// vector, so handles into other slots never shift.
pub struct Arena<M: Model> {
    slots: Vec<Slot<M>>,
    free: Vec<u32>,
}

impl<M: Model> Arena<M> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Construct a world from `status` and insert it, returning its handle.
    pub(crate) fn insert(&mut self, model: &M, status: M::Status, depth: u32) -> WorldHandle {
        let (index, generation) = match self.free.pop() {
            Some(index) => (index, self.slots[index as usize].generation),
            None => {
                let index = u32::try_from(self.slots.len()).expect("world arena overflow");
                self.slots.push(Slot {
                    generation: 0,
                    world: None,
                });
                (index, 0)
            }
        };
        let handle = WorldHandle { index, generation };
        let world = World::new(model, status, depth, handle);
        self.slots[index as usize].world = Some(world);
        handle
    }

    #[must_use]
    pub fn get(&self, handle: WorldHandle) -> &World<M> {
        let slot = &self.slots[handle.index as usize];
        debug_assert_eq!(
            slot.generation, handle.generation,
            "stale WorldHandle dereferenced"
        );
        slot.world.as_ref().expect("WorldHandle points to a freed slot")
    }

    pub fn get_mut(&mut self, handle: WorldHandle) -> &mut World<M> {
        let slot = &mut self.slots[handle.index as usize];
        debug_assert_eq!(
            slot.generation, handle.generation,
            "stale WorldHandle dereferenced"
        );
        slot.world.as_mut().expect("WorldHandle points to a freed slot")
    }

    #[must_use]
    pub fn contains(&self, handle: WorldHandle) -> bool {
        self.slots
            .get(handle.index as usize)
            .is_some_and(|slot| slot.generation == handle.generation && slot.world.is_some())
    }

    /// Remove and return the world at `handle`, tombstoning its slot.
    pub(crate) fn remove(&mut self, handle: WorldHandle) -> World<M> {
        let slot = &mut self.slots[handle.index as usize];
        debug_assert_eq!(
            slot.generation, handle.generation,
            "stale WorldHandle dereferenced"
        );
        let world = slot.world.take().expect("double free of WorldHandle");
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        world
    }

    /// True iff `handle`'s world is non-terminal, has at least one
    /// unexpanded outgoing transition, and no sibling transition already
    /// leads to a terminal world.
    #[must_use]
    pub(crate) fn world_is_expandable(&self, handle: WorldHandle) -> bool {
        let world = self.get(handle);
        if world.is_terminal {
            return false;
        }
        let has_unexpanded = world
            .transitions
            .iter()
            .any(|t| matches!(t.to, Destination::Unexpanded));
        if !has_unexpanded {
            return false;
        }
        !world.transitions.iter().any(|t| match t.to {
            Destination::Expanded(dest) => self.get(dest).is_terminal,
            Destination::Unexpanded => false,
        })
    }

    /// True iff transition `index` of `handle`'s world is expandable: not
    /// already expanded, and no sibling transition leads to a terminal
    /// world (the forcing-terminal shortcut, §4.3).
    #[must_use]
    pub(crate) fn transition_is_expandable(&self, handle: WorldHandle, index: usize) -> bool {
        let world = self.get(handle);
        if matches!(world.transitions[index].to, Destination::Expanded(_)) {
            return false;
        }
        !world
            .transitions
            .iter()
            .enumerate()
            .any(|(i, t)| i != index && matches!(t.to, Destination::Expanded(d) if self.get(d).is_terminal))
    }

    #[must_use]
    pub(crate) fn num_expandable_transitions(&self, handle: WorldHandle) -> usize {
        (0..self.get(handle).transitions.len())
            .filter(|&i| self.transition_is_expandable(handle, i))
            .count()
    }
}
