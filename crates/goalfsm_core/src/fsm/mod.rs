//! goalfsm_core::fsm
//!
//! Goal-oriented state machine: an actor sits on one node of a directed graph
//! and is driven, one transition attempt per tick, toward a commanded target.
//!
//! Key ideas:
//! - Registry of caller-owned transitions, each `Available` or `Blocked`
//! - Backward shortest-hop search from the target picks the next edge
//! - The picked edge is cached; a failing action is retried on the same edge
//!   until goal or topology changes
//! - No allocation in `tick` or the search

mod engine;
mod invalidation;
mod node;
mod registry;
mod search;
mod transition;

pub use engine::{Engine, HeapEngine, TickOutcome};
pub use invalidation::InvalidationFlags;
pub use node::Node;
pub use registry::{Registry, Slot};
pub use search::next_step;
pub use transition::{Action, ActionResult, Attempt, NoopAction, Transition, TransitionState};
