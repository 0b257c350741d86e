use crate::error::{CoreError, Result};

use super::{Node, Transition};

/// Pick the next transition to attempt on a shortest-hop path from `current`
/// to `target`.
///
/// Backward layered search starting at `target`:
/// - every node of the current layer is matched against the enabled
///   `transitions` whose destination it is, in iteration order
/// - the first such transition whose source is `current` is returned at once;
///   layers grow by one hop, so that edge starts a minimum-hop path
/// - other sources not seen before form the next layer
///
/// Ties resolve by layer entry order, then by the order of `transitions`.
/// Blocked transitions are ignored entirely.
///
/// `scratch` doubles as visited set and queue: the prefix behind the cursor
/// is consumed, the part up to `visited` is still queued. Nothing is
/// allocated. A scratch slice smaller than the set of nodes that can reach
/// `target` yields `ScratchExhausted`.
///
/// Returns `Ok(None)` when `current == target` or the target is unreachable.
pub fn next_step<'r, 't, N, I>(
    current: N,
    target: N,
    transitions: I,
    scratch: &mut [N],
) -> Result<Option<&'r Transition<'t, N>>>
where
    N: Node,
    I: Iterator<Item = &'r Transition<'t, N>> + Clone,
{
    if current == target {
        return Ok(None);
    }

    let capacity = scratch.len();
    if capacity == 0 {
        return Err(CoreError::scratch_exhausted(capacity));
    }

    scratch[0] = target;
    let mut cursor = 0;
    let mut visited = 1;
    let mut hops = 1usize;

    while cursor < visited {
        let layer_end = visited;

        while cursor < layer_end {
            let node = scratch[cursor];
            cursor += 1;

            for transition in transitions.clone() {
                if transition.destination() != node || !transition.is_available() {
                    continue;
                }

                let predecessor = transition.source();
                if predecessor == current {
                    tracing::trace!(?current, ?target, hops, "next step found");
                    return Ok(Some(transition));
                }

                if scratch[..visited].contains(&predecessor) {
                    continue;
                }
                if visited == capacity {
                    return Err(CoreError::scratch_exhausted(capacity));
                }
                scratch[visited] = predecessor;
                visited += 1;
            }
        }

        hops += 1;
    }

    tracing::trace!(?current, ?target, explored = visited, "target unreachable");
    Ok(None)
}
