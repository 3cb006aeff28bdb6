//! Disposal: identifying and freeing worlds the engine no longer needs (§4.8).
//!
//! Disposal runs opportunistically: [`mark_disposable`] is called again on
//! every iteration of the expander's main loop, so a world orphaned by one
//! disposal (its last incoming transition just got freed) is caught on the
//! next call rather than requiring an explicit cascade here.

use crate::frontier::Frontier;
use crate::model::Model;
use crate::transition::Destination;
use crate::world::{Arena, WorldHandle};

/// Scan `computed` and both frontier collections for worlds with no
/// incoming transitions that the model marks disposable relative to
/// `current`, and queue them in `to_free`.
///
/// Never queues `current` itself, and never queues a handle already queued.
pub(crate) fn mark_disposable<M: Model>(
    model: &M,
    arena: &Arena<M>,
    computed: &[WorldHandle],
    frontier: &Frontier,
    current: WorldHandle,
    to_free: &mut Vec<WorldHandle>,
) {
    let current_status = arena.get(current).status.clone();
    let candidates = computed
        .iter()
        .chain(frontier.to_expand_handles())
        .chain(frontier.on_hold_handles());
    for &handle in candidates {
        if handle == current || to_free.contains(&handle) {
            continue;
        }
        let world = arena.get(handle);
        if world.sources().is_empty() && model.is_disposable(&world.status, &current_status) {
            to_free.push(handle);
        }
    }
}

/// Free every world queued in `to_free`: detach every incoming transition
/// (reverting it to [`Destination::Unexpanded`]), drop this world from the
/// `sources` of every world it had an expanded transition into, then
/// release it. Returns the number of worlds freed.
///
/// Post-condition: no remaining transition points to a freed world, and no
/// remaining `sources` entry references a freed world (spec.md §4.8, §8
/// property 3).
pub(crate) fn free_disposable_worlds<M: Model>(
    arena: &mut Arena<M>,
    computed: &mut Vec<WorldHandle>,
    frontier: &mut Frontier,
    to_free: &mut Vec<WorldHandle>,
) -> usize {
    let mut freed = 0;
    while let Some(handle) = to_free.pop() {
        if !arena.contains(handle) {
            continue;
        }
        let world = arena.remove(handle);
        computed.retain(|&h| h != handle);
        frontier.remove(handle);

        for source in world.sources() {
            if arena.contains(source.from()) {
                let parent = arena.get_mut(source.from());
                parent.transitions[source.index as usize].to = Destination::Unexpanded;
            }
        }
        for transition in world.transitions() {
            if let Some(child) = transition.to() {
                if arena.contains(child) {
                    arena.get_mut(child).sources.retain(|s| s.from() != handle);
                }
            }
        }
        freed += 1;
    }
    freed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::ExpansionOrder;
    use crate::test_support::WalkModel;
    use crate::transition::{Destination, TransitionHandle};

    fn empty_frontier() -> Frontier {
        Frontier::new(ExpansionOrder::ByWidth)
    }

    #[test]
    fn orphaned_world_is_marked_and_freed() {
        let model = WalkModel::default();
        let mut arena = Arena::new();
        let current = arena.insert(&model, model.initial(), 0);
        let orphan_status = crate::test_support::WalkStatus {
            pos: 3,
            target: 2,
            step: 1,
        };
        let orphan = arena.insert(&model, orphan_status, 1);
        let mut computed = vec![current, orphan];
        let mut frontier = empty_frontier();
        let mut to_free = Vec::new();

        mark_disposable(&model, &arena, &computed, &frontier, current, &mut to_free);
        assert_eq!(to_free, vec![orphan]);

        let freed = free_disposable_worlds(&mut arena, &mut computed, &mut frontier, &mut to_free);
        assert_eq!(freed, 1);
        assert!(!arena.contains(orphan));
        assert_eq!(computed, vec![current]);
    }

    #[test]
    fn current_world_is_never_marked() {
        let model = WalkModel::default();
        let mut arena = Arena::new();
        let current = arena.insert(&model, model.initial(), 0);
        let computed = vec![current];
        let frontier = empty_frontier();
        let mut to_free = Vec::new();
        mark_disposable(&model, &arena, &computed, &frontier, current, &mut to_free);
        assert!(to_free.is_empty());
    }

    #[test]
    fn world_with_incoming_transition_is_not_marked() {
        let model = WalkModel::default();
        let mut arena = Arena::new();
        let parent = arena.insert(&model, model.initial(), 0);
        let child_status = crate::test_support::WalkStatus {
            pos: 1,
            target: 2,
            step: 1,
        };
        let child = arena.insert(&model, child_status, 1);
        arena.get_mut(parent).transitions[0].to = Destination::Expanded(child);
        arena
            .get_mut(child)
            .sources
            .push(TransitionHandle { world: parent, index: 0 });

        let computed = vec![parent, child];
        let frontier = empty_frontier();
        let mut to_free = Vec::new();
        mark_disposable(&model, &arena, &computed, &frontier, parent, &mut to_free);
        assert!(!to_free.contains(&child));
    }

    #[test]
    fn freeing_a_world_drops_it_from_its_childs_sources() {
        let model = WalkModel::default();
        let mut arena = Arena::new();
        let parent = arena.insert(&model, model.initial(), 0);
        let child_status = crate::test_support::WalkStatus {
            pos: 1,
            target: 2,
            step: 1,
        };
        let child = arena.insert(&model, child_status, 1);
        arena.get_mut(parent).transitions[0].to = Destination::Expanded(child);
        arena
            .get_mut(child)
            .sources
            .push(TransitionHandle { world: parent, index: 0 });

        let mut computed = vec![parent, child];
        let mut frontier = empty_frontier();
        let mut to_free = vec![parent];
        free_disposable_worlds(&mut arena, &mut computed, &mut frontier, &mut to_free);

        assert!(arena.get(child).sources().is_empty());
    }
}
