//! World Index: reuse lookup across the three world collections (§4.5).

use crate::frontier::Frontier;
use crate::model::Model;
use crate::world::{Arena, WorldHandle};

/// Search `computed`, then `to-expand`, then `on-hold` (in that order) for a
/// world whose status matches `status` by [`Model::is_same`]. Returns the
/// first match found.
pub(crate) fn find_reusable<M: Model>(
    model: &M,
    arena: &Arena<M>,
    computed: &[WorldHandle],
    frontier: &Frontier,
    status: &M::Status,
) -> Option<WorldHandle> {
    computed
        .iter()
        .chain(frontier.to_expand_handles())
        .chain(frontier.on_hold_handles())
        .copied()
        .find(|&handle| model.is_same(&arena.get(handle).status, status))
}
