//! Focus trapping
//!
//! Keeps keyboard focus cycling through a container's focusable elements
//! while a modal surface such as the mobile menu is open.

use verve_dom::{Document, NodeId, SelectorList};

const FOCUSABLE: &str = "a, button, [tabindex]:not([tabindex=\"-1\"])";

/// Tab wrap behavior over a fixed list of focusable elements.
#[derive(Debug, Default)]
pub(crate) struct FocusTrap {
    members: Vec<NodeId>,
}

impl FocusTrap {
    /// Collect the focusable elements under `container`, in document order.
    pub(crate) fn capture(doc: &Document, container: NodeId) -> Self {
        let Some(list) = SelectorList::parse(FOCUSABLE) else {
            return Self::default();
        };
        let members = doc
            .tree
            .descendants(container)
            .filter(|&id| doc.matches_selector(id, &list))
            .collect();
        Self { members }
    }

    pub(crate) fn first(&self) -> Option<NodeId> {
        self.members.first().copied()
    }

    pub(crate) fn last(&self) -> Option<NodeId> {
        self.members.last().copied()
    }

    /// Where focus should jump when tabbing from `current`.
    ///
    /// Wraps only at the ends of the list. `None` means the host's normal
    /// focus order applies.
    pub(crate) fn wrap(&self, current: NodeId, backwards: bool) -> Option<NodeId> {
        if backwards {
            if Some(current) == self.first() {
                return self.last();
            }
        } else if Some(current) == self.last() {
            return self.first();
        }
        None
    }
}
