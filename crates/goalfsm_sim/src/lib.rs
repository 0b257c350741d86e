//! goalfsm_sim
//!
//! Drives a `goalfsm_core` engine from command-line configuration on a
//! periodic tick, standing in for the control loop of a real actor.

pub mod config;
pub mod runner;

pub use config::{EdgeSpec, SimConfig};
pub use runner::{run, run_ticks, FlakyAction, StopReason, Summary};
