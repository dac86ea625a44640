//! fOS DOM - Document Object Model
//!
//! Arena-backed DOM tree. Nodes are addressed by [`NodeId`] and live as long
//! as the [`Document`] that created them; detaching a node only unlinks it
//! from its parent.

mod document;
mod node;

pub use document::Document;
pub use node::{ElementData, Node, NodeData};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);
    /// Invalid/null node ID
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this is a valid node ID
    #[inline]
    pub fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// DOM error
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DomError {
    #[error("Unknown node: {0:?}")]
    UnknownNode(NodeId),

    #[error("Hierarchy request error: {0}")]
    HierarchyRequest(String),
}
