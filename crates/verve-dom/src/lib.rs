//! Verve DOM - Document model
//!
//! Arena-backed document tree for headless page scripting. Hosts build the
//! tree, assign geometry, and drive it through the high-level `Document` API.

mod document;
mod geometry;
mod node;
mod selector;
mod tree;

pub use document::Document;
pub use geometry::{Rect, Viewport};
pub use node::{Attribute, ElementData, Node, NodeData};
pub use selector::{AttributeMatcher, CompoundSelector, Selector, SelectorList, SelectorPart};
pub use tree::DomTree;

/// Node identifier (index into arena, ordered by creation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Sentinel for absent links
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Document root ID
    pub const ROOT: NodeId = NodeId(0);

    /// Check that this ID points at a node
    #[inline]
    pub fn is_valid(&self) -> bool {
        *self != NodeId::NONE
    }
}
