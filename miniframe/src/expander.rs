//! Expander: the time-budgeted best-first loop (§4.7).

use std::time::{Duration, Instant};

use crate::frontier::Frontier;
use crate::model::{Model, Sente};
use crate::policy::Policy;
use crate::propagator;
use crate::rng::SamplingSource;
use crate::telemetry::Telemetry;
use crate::transition::Destination;
use crate::world::{Arena, WorldHandle};
use crate::world_index;

/// Run one `expand()` call. `start` is the caller-supplied expansion-start
/// clock (spec.md §5): a `now()` read returning earlier than `start` is
/// treated as "time exhausted" via [`Instant::checked_duration_since`]
/// rather than panicking on clock skew.
#[allow(clippy::too_many_arguments)]
pub(crate) fn expand<M: Model>(
    model: &M,
    arena: &mut Arena<M>,
    computed: &mut Vec<WorldHandle>,
    frontier: &mut Frontier,
    to_free: &mut Vec<WorldHandle>,
    current: WorldHandle,
    policy: &Policy,
    rng: &mut dyn SamplingSource,
    start: Instant,
    telemetry: &mut Telemetry,
) {
    frontier.drain_on_hold();
    frontier.move_to_end(current);

    let depth_ceiling = if policy.max_depth_exp < 0 {
        None
    } else {
        let span = u32::try_from(policy.max_depth_exp).unwrap_or(u32::MAX);
        Some(arena.get(current).depth.saturating_add(span))
    };
    let budget = Duration::from_secs_f64(policy.max_time_ms.max(0.0) / 1000.0);

    let mut max_step_cost = Duration::ZERO;
    let mut max_depth_reached = arena.get(current).depth;
    let mut lookups = 0usize;
    let mut reused = 0usize;
    let mut final_elapsed = Duration::ZERO;

    loop {
        let elapsed = match Instant::now().checked_duration_since(start) {
            Some(e) => e,
            None => break,
        };
        final_elapsed = elapsed;
        if elapsed + max_step_cost > budget {
            break;
        }

        let Some(w) = frontier.pop(arena) else {
            break;
        };
        let step_start = Instant::now();

        let disposable_now = w != current
            && (arena.get(w).sources().is_empty()
                || model.is_disposable(&arena.get(w).status, &arena.get(current).status));
        if disposable_now {
            to_free.push(w);
            max_step_cost = max_step_cost.max(step_start.elapsed());
            continue;
        }

        if let Some(ceiling) = depth_ceiling {
            if arena.get(w).depth >= ceiling {
                frontier.push_on_hold(w);
                max_step_cost = max_step_cost.max(step_start.elapsed());
                continue;
            }
        }

        let expandable: Vec<usize> = if arena.world_is_expandable(w) {
            (0..arena.get(w).transitions().len())
                .filter(|&i| arena.transition_is_expandable(w, i))
                .collect()
        } else {
            Vec::new()
        };

        let tau = if expandable.is_empty() {
            0.0
        } else {
            policy.nb_trans_montecarlo as f64 / expandable.len() as f64
        };
        let selected: Vec<usize> = if tau >= 1.0 {
            expandable
        } else {
            expandable
                .into_iter()
                .filter(|_| rng.sample_unit() < tau)
                .collect()
        };

        // Pass 1: create or look up every selected successor and attach its
        // transition, before any pruning decision is made. Pruning (§4.7.1)
        // compares a child against *all* of its siblings expanded this
        // round, so it must see the full sibling set rather than whatever
        // had been attached by an earlier iteration.
        let mut newly_created: Vec<WorldHandle> = Vec::new();
        for index in &selected {
            let index = *index;
            // Re-check expandability: an earlier index processed this same
            // round may have just revealed a forcing terminal sibling
            // (§4.3), which retroactively disqualifies this one too.
            if !arena.transition_is_expandable(w, index) {
                continue;
            }
            let payload = arena.get(w).transitions()[index].payload.clone();
            let father_status = arena.get(w).status.clone();
            let successor_status = model.step(&father_status, &payload);
            let father_depth = arena.get(w).depth;

            let target = if policy.reuse {
                lookups += 1;
                match world_index::find_reusable(model, arena, computed, frontier, &successor_status) {
                    Some(existing) => {
                        reused += 1;
                        existing
                    }
                    None => {
                        let child = arena.insert(model, successor_status, father_depth + 1);
                        newly_created.push(child);
                        child
                    }
                }
            } else {
                let child = arena.insert(model, successor_status, father_depth + 1);
                newly_created.push(child);
                child
            };

            let forecast: Vec<f64> = (0..M::NUM_ACTORS)
                .map(|a| arena.get(target).forecast_value(a))
                .collect();
            arena.get_mut(w).transitions[index].to = Destination::Expanded(target);
            arena.get_mut(target).sources.push(crate::transition::TransitionHandle {
                world: w,
                index: u32::try_from(index).expect("transition index overflow"),
            });
            arena.get_mut(w).transitions[index].forecast = forecast;
            max_depth_reached = max_depth_reached.max(arena.get(target).depth);
        }

        // Pass 2: route every newly created child now that the full
        // sibling set is visible.
        for child in &newly_created {
            route_new_child(arena, computed, frontier, w, *child, policy.pruning_delta);
        }

        if !selected.is_empty() {
            propagator::propagate_from(model, arena, w);
        }

        if arena.num_expandable_transitions(w) > 0 {
            frontier.push_on_hold(w);
        } else {
            computed.push(w);
        }

        max_step_cost = max_step_cost.max(step_start.elapsed());
    }

    telemetry.worlds_computed = computed.len();
    telemetry.worlds_to_expand = frontier.to_expand_len();
    telemetry.worlds_to_free = to_free.len();
    telemetry.worlds_on_hold = frontier.on_hold_len();
    telemetry.reuse_ratio = if lookups == 0 {
        0.0
    } else {
        reused as f64 / lookups as f64
    };
    telemetry.unused_time_ms = policy.max_time_ms - final_elapsed.as_secs_f64() * 1000.0;
    telemetry.max_depth_reached = max_depth_reached;
}

/// File a newly created child into `computed` (pruned, per §4.7.1) or
/// `to-expand` (searched further).
fn route_new_child<M: Model>(
    arena: &Arena<M>,
    computed: &mut Vec<WorldHandle>,
    frontier: &mut Frontier,
    father: WorldHandle,
    child: WorldHandle,
    pruning_delta: f64,
) {
    if is_pruned(arena, father, child, pruning_delta) {
        computed.push(child);
    } else {
        frontier.push_to_expand(child);
    }
}

/// True iff an already-expanded sibling of `child` beats it by more than
/// `pruning_delta` from `father`'s sente's point of view (§4.7.1).
fn is_pruned<M: Model>(
    arena: &Arena<M>,
    father: WorldHandle,
    child: WorldHandle,
    pruning_delta: f64,
) -> bool {
    let father_world = arena.get(father);
    let sente_actor = match father_world.sente() {
        Sente::Actor(a) => a,
        Sente::Simultaneous => 0,
    };
    let child_value = arena.get(child).forecast_value(sente_actor);
    father_world.transitions().iter().any(|t| match t.to() {
        Some(sibling) if sibling != child => {
            arena.get(sibling).forecast_value(sente_actor) > child_value + pruning_delta
        }
        _ => false,
    })
}
