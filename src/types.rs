//! Integer types found in the packed input document.

/// The node id type, local to one graph.
pub type NodeId = i32;

/// The node type code.
pub type NodeType = i32;

/// The edge type code.
pub type EdgeType = i32;
