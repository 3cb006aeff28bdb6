//! Value Propagator: backward refresh of ancestor transition forecasts (§4.6).
//!
//! Implemented as an explicit work stack with paired `Enter`/`Exit` frames
//! rather than recursion: this avoids stack growth proportional to graph
//! depth and makes the cycle-guard's "currently on the call path" semantics
//! (insert on enter, remove on return) explicit rather than relying on the
//! native call stack unwinding.

use std::collections::HashSet;

use crate::model::Model;
use crate::world::{Arena, WorldHandle};

enum Frame {
    Enter(WorldHandle, u32),
    Exit(WorldHandle),
}

/// Recompute `start`'s per-actor forecast and push the change to every
/// ancestor transition whose forecast it affects, recursively.
///
/// `depth_penalty` is the propagation distance already traveled; pass `0`
/// when `start` is the world whose outgoing forecast just changed (e.g. the
/// world the expander just finished expanding).
pub(crate) fn propagate_from<M: Model>(model: &M, arena: &mut Arena<M>, start: WorldHandle) {
    let epsilon = model.epsilon();
    let mut on_path: HashSet<WorldHandle> = HashSet::new();
    let mut stack = vec![Frame::Enter(start, 0)];

    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Exit(w) => {
                on_path.remove(&w);
            }
            Frame::Enter(w, depth_penalty) => {
                // Cycle-guard: a world already on the current propagation
                // path is skipped, matching the recursive sketch's
                // `if w in visited: return`.
                if on_path.contains(&w) {
                    continue;
                }
                on_path.insert(w);
                stack.push(Frame::Exit(w));

                if arena.get(w).sources().is_empty() {
                    continue;
                }

                let updated = updated_forecast::<M>(arena, w, depth_penalty, epsilon);

                let sources = arena.get(w).sources().to_vec();
                for source in sources {
                    let parent = arena.get_mut(source.from());
                    let edge = &mut parent.transitions[source.index as usize];
                    if edge.forecast != updated {
                        edge.forecast = updated.clone();
                        stack.push(Frame::Enter(source.from(), depth_penalty + 1));
                    }
                }
            }
        }
    }
}

/// For each actor `a`, `w.best_transition(a).forecast(a)` (or `w.value(a)`
/// if `w` has no expanded outgoing transition), minus the ε-scaled delay
/// penalty. Writing policy: callers overwrite unconditionally whenever this
/// differs from the current stored forecast — not only when it increases —
/// so stale forecasts can be lowered when reuse invalidates a subgraph
/// (Open Question 1; spec.md §9, §4.6 "Writing policy").
fn updated_forecast<M: Model>(
    arena: &Arena<M>,
    w: WorldHandle,
    depth_penalty: u32,
    epsilon: f64,
) -> Vec<f64> {
    let world = arena.get(w);
    let penalty = f64::from(depth_penalty) * epsilon;
    (0..M::NUM_ACTORS)
        .map(|actor| {
            let src_value = match world.best_transition(actor) {
                Some(t) => t.forecast(actor),
                None => world.value(actor),
            };
            src_value - penalty
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{WalkModel, WalkStatus};
    use crate::transition::Destination;

    fn set_to<M: Model>(arena: &mut Arena<M>, world: WorldHandle, index: usize, to: WorldHandle) {
        arena.get_mut(world).transitions[index].to = Destination::Expanded(to);
        let handle = crate::transition::TransitionHandle {
            world,
            index: u32::try_from(index).unwrap(),
        };
        arena.get_mut(to).sources.push(handle);
    }

    #[test]
    fn propagation_lowers_ancestor_forecast_by_epsilon_per_hop() {
        let model = WalkModel::default();
        let mut arena = Arena::new();
        let root = arena.insert(&model, model.initial(), 0);
        let child_status = WalkStatus {
            pos: 1,
            target: 2,
            step: 1,
        };
        let child = arena.insert(&model, child_status, 1);
        set_to(&mut arena, root, 0, child);

        propagate_from(&model, &mut arena, root);

        let root_world = arena.get(root);
        let t = &root_world.transitions()[0];
        assert_eq!(t.forecast(0), arena.get(child).forecast_value(0));
    }

    #[test]
    fn self_loop_does_not_infinite_loop() {
        let model = WalkModel::default();
        let mut arena = Arena::new();
        let root = arena.insert(&model, model.initial(), 0);
        set_to(&mut arena, root, 1, root); // transitions[1] is the "stay" move (delta 0)

        // Must return instead of recursing forever on the self-loop.
        propagate_from(&model, &mut arena, root);
        assert!(arena.contains(root));
    }

    #[test]
    fn overwrite_applies_even_when_value_decreases() {
        let model = WalkModel::default();
        let mut arena = Arena::new();
        let root = arena.insert(&model, model.initial(), 0);
        let child = arena.insert(&model, model.initial(), 1);
        set_to(&mut arena, root, 0, child);
        arena.get_mut(root).transitions[0].forecast = vec![999.0];

        propagate_from(&model, &mut arena, root);

        assert!(arena.get(root).transitions()[0].forecast(0) < 999.0);
    }
}
