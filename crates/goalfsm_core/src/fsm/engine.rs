use crate::config::EngineConfig;
use crate::error::{CoreError, Result};

use super::invalidation::{Invalidation, InvalidationFlags};
use super::registry::{Registry, Slot};
use super::search::next_step;
use super::{ActionResult, Node, Transition, TransitionState};

/// What a single [`Engine::tick`] did.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TickOutcome<N> {
    /// Already at the target; nothing changed.
    Idle,
    /// The attempted transition succeeded and the actor moved.
    Advanced { from: N, to: N },
    /// The attempted transition's action failed; the same edge is retried next tick.
    Failed { at: N, toward: N },
}

/// Engine whose buffers were allocated once at construction.
pub type HeapEngine<'a, N> = Engine<'a, N, Box<[Slot<'a, N>]>, Box<[N]>>;

/// Goal-oriented state machine driven one transition attempt per tick.
///
/// Responsibilities:
/// - hold current and target node
/// - hold the registered transitions (`R`) and the search scratch region (`S`)
/// - cache the transition to attempt next and decide when that cache is stale
///
/// `R` and `S` are any slice-like buffers: fixed arrays or borrowed slices for
/// allocation-free setups, boxed slices via [`Engine::new`]. Neither is resized
/// after construction; `tick` and the search never allocate.
///
/// The engine is single-threaded; callers serialize mutations and ticks.
pub struct Engine<'a, N, R, S> {
    registry: Registry<'a, N, R>,
    scratch: S,
    current: N,
    target: N,
    pending: Option<&'a Transition<'a, N>>,
    invalidation: Invalidation,
}

impl<'a, N: Node> HeapEngine<'a, N> {
    /// Allocate registry and scratch sized by `config`.
    ///
    /// Starts at rest: both current and target are `initial`.
    pub fn new(config: EngineConfig, initial: N) -> Self {
        let slots = vec![None; config.transition_capacity()].into_boxed_slice();
        let scratch = vec![initial; config.node_capacity()].into_boxed_slice();
        Engine::with_storage(slots, scratch, initial)
    }
}

impl<'a, N, R, S> Engine<'a, N, R, S>
where
    N: Node,
    R: AsRef<[Slot<'a, N>]> + AsMut<[Slot<'a, N>]>,
    S: AsRef<[N]> + AsMut<[N]>,
{
    /// Build on caller-supplied storage.
    ///
    /// `scratch` must hold at least as many nodes as the node domain; a search
    /// that outgrows it fails with `ScratchExhausted`.
    pub fn with_storage(slots: R, scratch: S, initial: N) -> Self {
        Self {
            registry: Registry::new(slots),
            scratch,
            current: initial,
            target: initial,
            pending: None,
            invalidation: Invalidation::new(),
        }
    }

    // ---------------- Registry ----------------

    pub fn add_transition(&mut self, transition: &'a Transition<'a, N>) -> Result<()> {
        self.registry.add(transition)?;
        self.invalidation.topology_changed();
        tracing::debug!(
            source = ?transition.source(),
            destination = ?transition.destination(),
            label = transition.label(),
            "transition registered"
        );
        Ok(())
    }

    pub fn remove_transition(&mut self, transition: &Transition<'a, N>) -> Result<()> {
        self.registry.remove(transition)?;
        self.invalidation.topology_changed();
        tracing::debug!(
            source = ?transition.source(),
            destination = ?transition.destination(),
            label = transition.label(),
            "transition unregistered"
        );
        Ok(())
    }

    /// Enable or block `transition`. Takes effect on the next tick.
    pub fn set_transition_state(&mut self, transition: &Transition<'a, N>, state: TransitionState) {
        transition.set_state(state);
        self.invalidation.topology_changed();
        tracing::debug!(
            source = ?transition.source(),
            destination = ?transition.destination(),
            state = state.label(),
            "transition state set"
        );
    }

    // ---------------- Goal / position ----------------

    /// Override the actor's position (e.g. after an external reset).
    pub fn set_current(&mut self, node: N) {
        self.current = node;
        self.invalidation.goal_changed();
    }

    pub fn set_target(&mut self, node: N) {
        self.target = node;
        self.invalidation.goal_changed();
    }

    // ---------------- Tick ----------------

    /// Attempt at most one transition toward the target.
    ///
    /// Errors:
    /// - `NoPathFound` when the target is unreachable through enabled
    ///   transitions; position is unchanged and the engine keeps working. The
    ///   error repeats every tick until goal or topology changes, without
    ///   searching again in between.
    /// - `ScratchExhausted` when the scratch region is smaller than the node domain.
    ///
    /// A failing action is not an error: see [`TickOutcome::Failed`].
    pub fn tick(&mut self) -> Result<TickOutcome<N>> {
        if self.current == self.target {
            tracing::trace!(current = ?self.current, "idle at target");
            return Ok(TickOutcome::Idle);
        }

        let replanned = self.invalidation.needs_replan(self.pending.is_some());
        if replanned {
            self.pending = next_step(
                self.current,
                self.target,
                self.registry.iter(),
                self.scratch.as_mut(),
            )?;
            self.invalidation.replanned();
        }

        let Some(transition) = self.pending else {
            if replanned {
                tracing::warn!(current = ?self.current, target = ?self.target, "no path to target");
            } else {
                tracing::trace!(current = ?self.current, target = ?self.target, "still no path to target");
            }
            return Err(CoreError::no_path());
        };

        if replanned {
            tracing::debug!(
                current = ?self.current,
                target = ?self.target,
                destination = ?transition.destination(),
                label = transition.label(),
                "planned next step"
            );
        } else {
            tracing::trace!(
                current = ?self.current,
                destination = ?transition.destination(),
                label = transition.label(),
                "retrying failed step"
            );
        }

        let from = self.current;
        let to = transition.destination();
        let result = transition.attempt();
        self.invalidation.attempted(result);

        match result {
            ActionResult::Success => {
                self.current = to;
                tracing::debug!(?from, ?to, label = transition.label(), "advanced");
                Ok(TickOutcome::Advanced { from, to })
            }
            ActionResult::Failure => {
                tracing::debug!(at = ?from, toward = ?to, label = transition.label(), "step failed");
                Ok(TickOutcome::Failed { at: from, toward: to })
            }
        }
    }

    /// Run the search from the current position without touching the cache
    /// or the invalidation flags.
    pub fn peek_next(&mut self) -> Result<Option<&'a Transition<'a, N>>> {
        next_step(
            self.current,
            self.target,
            self.registry.iter(),
            self.scratch.as_mut(),
        )
    }

    // ---------------- Introspection ----------------

    pub fn current(&self) -> N {
        self.current
    }

    pub fn target(&self) -> N {
        self.target
    }

    pub fn is_idle(&self) -> bool {
        self.current == self.target
    }

    /// Transition cached by the last search (or the one being retried).
    pub fn pending(&self) -> Option<&'a Transition<'a, N>> {
        self.pending
    }

    pub fn flags(&self) -> InvalidationFlags {
        self.invalidation.flags()
    }

    pub fn registry(&self) -> &Registry<'a, N, R> {
        &self.registry
    }

    pub fn node_capacity(&self) -> usize {
        self.scratch.as_ref().len()
    }

    /// Available transitions leaving `node`, in registration order.
    pub fn outgoing(&self, node: N) -> impl Iterator<Item = &'a Transition<'a, N>> + '_ {
        self.registry.outgoing(node)
    }
}
