//! fOS DOM - Document Object Model
//!
//! Arena-based, in-memory DOM tree. Nodes are addressed by [`NodeId`] and
//! linked through parent/child/sibling ids rather than pointers.

mod attributes;
mod dom_events;
mod node;
mod operations;
mod serialize;
mod tree;

pub use attributes::{Attr, NamedNodeMap};
pub use dom_events::{Event, EventListener};
pub use node::{ElementData, Node, NodeData, StyleDeclaration};
pub use operations::{DomError, DomResult};
pub use tree::{Children, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Raw arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// SVG namespace URI
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
