use std::fmt;

/// Identifier for one state in the control graph.
///
/// Anything small, copyable and comparable qualifies: plain integers for
/// index-style graphs, or a caller enum naming the actor's states. The size of
/// the node domain is not part of the type; it is fixed per engine through
/// [`crate::config::EngineConfig::node_capacity`].
pub trait Node: Copy + Eq + fmt::Debug {}

impl<T> Node for T where T: Copy + Eq + fmt::Debug {}
