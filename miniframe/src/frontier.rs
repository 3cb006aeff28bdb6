//! The expansion frontier: the `to-expand` and `on-hold` collections of §4.4.
//!
//! A clear, not maximally fast, implementation: `to-expand` is an unsorted
//! `Vec`, and by-value ordering re-selects the maximum at each pop — O(n)
//! per step, acceptable for the graph sizes this engine targets.

use crate::model::Model;
use crate::policy::ExpansionOrder;
use crate::world::{Arena, WorldHandle};

/// The `to-expand` priority collection plus the `on-hold` auxiliary
/// collection of depth-deferred work.
pub struct Frontier {
    order: ExpansionOrder,
    to_expand: Vec<WorldHandle>,
    on_hold: Vec<WorldHandle>,
}

impl Frontier {
    #[must_use]
    pub(crate) fn new(order: ExpansionOrder) -> Self {
        Self {
            order,
            to_expand: Vec::new(),
            on_hold: Vec::new(),
        }
    }

    pub(crate) fn push_to_expand(&mut self, handle: WorldHandle) {
        self.to_expand.push(handle);
    }

    pub(crate) fn push_on_hold(&mut self, handle: WorldHandle) {
        self.on_hold.push(handle);
    }

    /// Move every on-hold world back into `to-expand`. Run at the start of
    /// every `expand()` call (§4.4).
    pub(crate) fn drain_on_hold(&mut self) {
        self.to_expand.append(&mut self.on_hold);
    }

    /// Move `handle` to the end of `to-expand` if present, so it is the
    /// first popped regardless of ordering strategy (§4.7 step 2).
    pub(crate) fn move_to_end(&mut self, handle: WorldHandle) {
        if let Some(pos) = self.to_expand.iter().position(|&h| h == handle) {
            let h = self.to_expand.remove(pos);
            self.to_expand.push(h);
        }
    }

    pub(crate) fn remove(&mut self, handle: WorldHandle) {
        self.to_expand.retain(|&h| h != handle);
        self.on_hold.retain(|&h| h != handle);
    }

    /// Pop the next world to expand, from the high-priority end.
    ///
    /// By-width pops the most recently queued world (a stack). By-value
    /// scans for the maximum [`crate::world::World::priority`], breaking
    /// ties toward the end of the vector (so `move_to_end` reliably wins
    /// ties, including for the current world).
    pub(crate) fn pop<M: Model>(&mut self, arena: &Arena<M>) -> Option<WorldHandle> {
        match self.order {
            ExpansionOrder::ByWidth => self.to_expand.pop(),
            ExpansionOrder::ByValue => {
                if self.to_expand.is_empty() {
                    return None;
                }
                let mut best_idx = self.to_expand.len() - 1;
                let mut best_priority = arena.get(self.to_expand[best_idx]).priority();
                for i in (0..self.to_expand.len() - 1).rev() {
                    let priority = arena.get(self.to_expand[i]).priority();
                    if priority > best_priority {
                        best_priority = priority;
                        best_idx = i;
                    }
                }
                Some(self.to_expand.remove(best_idx))
            }
        }
    }

    #[must_use]
    pub(crate) fn to_expand_len(&self) -> usize {
        self.to_expand.len()
    }

    #[must_use]
    pub(crate) fn on_hold_len(&self) -> usize {
        self.on_hold.len()
    }

    #[must_use]
    pub(crate) fn to_expand_handles(&self) -> &[WorldHandle] {
        &self.to_expand
    }

    #[must_use]
    pub(crate) fn on_hold_handles(&self) -> &[WorldHandle] {
        &self.on_hold
    }
}
