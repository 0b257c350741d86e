//! Construction-time sizing for an engine.

use crate::error::{CoreError, Domain, ErrorKind, Payload, Result};

/// Sizes fixed for the lifetime of an engine.
///
/// - `transition_capacity`: maximum number of registered transitions
/// - `node_capacity`: size of the node domain; the search scratch region holds this many nodes
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct EngineConfig {
    transition_capacity: usize,
    node_capacity: usize,
}

impl EngineConfig {
    pub fn new(transition_capacity: usize, node_capacity: usize) -> Result<Self> {
        if transition_capacity == 0 {
            return Err(invalid("transition capacity must be non-zero", "transition_capacity"));
        }
        if node_capacity == 0 {
            return Err(invalid("node capacity must be non-zero", "node_capacity"));
        }
        Ok(Self {
            transition_capacity,
            node_capacity,
        })
    }

    pub const fn transition_capacity(&self) -> usize {
        self.transition_capacity
    }

    pub const fn node_capacity(&self) -> usize {
        self.node_capacity
    }
}

fn invalid(message: &'static str, field: &'static str) -> CoreError {
    CoreError::error()
        .domain(Domain::Config)
        .kind(ErrorKind::InvalidArgument)
        .msg(message)
        .payload(Payload::Context {
            key: "field",
            value: field.into(),
        })
        .build()
}
