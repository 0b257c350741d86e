//! goalfsm_core: goal-oriented state machine for embedded control loops.
//!
//! Design goals:
//! - Pure, synchronous logic driven by an external tick.
//! - No allocation on the tick path; storage is sized once.
//! - Recoverable errors instead of assertions.

pub mod error;

/// Engine sizing.
pub mod config;

/// Routing of core errors onto `tracing`.
pub mod logging;

/// Transition registry, next-step search and tick controller.
pub mod fsm;

pub use config::EngineConfig;
pub use error::{CoreError, Result};
