use std::cell::Cell;
use std::fmt;

/// Whether a transition currently takes part in path search.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum TransitionState {
    #[default]
    Available,
    Blocked,
}

impl TransitionState {
    pub const fn is_available(self) -> bool {
        matches!(self, TransitionState::Available)
    }

    /// Stable, human-readable label for log fields.
    pub const fn label(self) -> &'static str {
        match self {
            TransitionState::Available => "available",
            TransitionState::Blocked => "blocked",
        }
    }
}

/// Outcome reported by an [`Action`].
///
/// - Success: the actor reached the transition's destination
/// - Failure: the actor stays put; the engine retries the same edge next tick
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ActionResult {
    Success,
    Failure,
}

impl ActionResult {
    pub const fn is_success(self) -> bool {
        matches!(self, ActionResult::Success)
    }
}

impl From<bool> for ActionResult {
    fn from(ok: bool) -> Self {
        if ok {
            ActionResult::Success
        } else {
            ActionResult::Failure
        }
    }
}

/// What an action is asked to perform.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Attempt<N> {
    pub source: N,
    pub destination: N,
    pub label: Option<&'static str>,
}

/// Side effect run when the engine attempts a transition.
///
/// Called synchronously from [`crate::fsm::Engine::tick`]; implementations are
/// expected to return quickly. Actions that keep state between attempts use
/// interior mutability, the engine only ever holds a shared reference.
pub trait Action<N> {
    fn execute(&self, attempt: Attempt<N>) -> ActionResult;
}

impl<N, F> Action<N> for F
where
    F: Fn(Attempt<N>) -> ActionResult,
{
    fn execute(&self, attempt: Attempt<N>) -> ActionResult {
        self(attempt)
    }
}

/// Pass-through action: always succeeds.
#[derive(Debug, Copy, Clone, Default)]
pub struct NoopAction;

impl<N> Action<N> for NoopAction {
    fn execute(&self, _attempt: Attempt<N>) -> ActionResult {
        ActionResult::Success
    }
}

/// Directed edge between two nodes.
///
/// Storage belongs to the caller; an engine only keeps `&'a Transition` while it
/// is registered and compares transitions by address. Two transitions with the
/// same endpoints are independent edges.
///
/// The enabled state lives in a `Cell` so the engine can flip it through a
/// shared reference; outside code changes it via
/// [`crate::fsm::Engine::set_transition_state`] so the topology change is seen.
pub struct Transition<'a, N> {
    source: N,
    destination: N,
    state: Cell<TransitionState>,
    action: Option<&'a dyn Action<N>>,
    label: Option<&'static str>,
}

impl<'a, N: Copy> Transition<'a, N> {
    /// Available transition without an action (always succeeds when attempted).
    pub const fn new(source: N, destination: N) -> Self {
        Self {
            source,
            destination,
            state: Cell::new(TransitionState::Available),
            action: None,
            label: None,
        }
    }

    pub fn with_action<A: Action<N>>(mut self, action: &'a A) -> Self {
        self.action = Some(action);
        self
    }

    pub fn with_label(mut self, label: &'static str) -> Self {
        self.label = Some(label);
        self
    }

    /// Start out blocked instead of available.
    pub fn blocked(self) -> Self {
        self.state.set(TransitionState::Blocked);
        self
    }

    pub fn source(&self) -> N {
        self.source
    }

    pub fn destination(&self) -> N {
        self.destination
    }

    pub fn state(&self) -> TransitionState {
        self.state.get()
    }

    pub fn is_available(&self) -> bool {
        self.state.get().is_available()
    }

    pub fn label(&self) -> Option<&'static str> {
        self.label
    }

    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    pub(crate) fn set_state(&self, state: TransitionState) {
        self.state.set(state);
    }

    /// Run the action, treating a missing one as success.
    pub(crate) fn attempt(&self) -> ActionResult {
        match self.action {
            Some(action) => action.execute(Attempt {
                source: self.source,
                destination: self.destination,
                label: self.label,
            }),
            None => ActionResult::Success,
        }
    }
}

impl<N: fmt::Debug> fmt::Debug for Transition<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("source", &self.source)
            .field("destination", &self.destination)
            .field("state", &self.state.get())
            .field("action", &self.action.is_some())
            .field("label", &self.label)
            .finish()
    }
}

/// Identity comparison used by the registry and the engine cache.
pub(crate) fn same<N>(a: &Transition<'_, N>, b: &Transition<'_, N>) -> bool {
    std::ptr::eq(a, b)
}
