//! DOM Tree (arena-based allocation)
//!
//! Nodes are never freed; `detach` unlinks a subtree and later queries simply
//! stop seeing it. For page-lifetime documents that trade is cheap.

use crate::{Node, NodeId};

/// Arena-based DOM tree
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
        }
    }

    /// Root node ID
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if !id.is_valid() {
            return None;
        }
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if !id.is_valid() {
            return None;
        }
        self.nodes.get_mut(id.0 as usize)
    }

    /// Number of nodes allocated (detached nodes included)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate an element node
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(Node::element(tag))
    }

    /// Allocate a text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.alloc(Node::text(content.to_string()))
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Append a node as the last child of a parent
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || self.get(parent).is_none() || self.get(child).is_none() {
            return;
        }
        self.detach(child);

        let old_last = self.nodes[parent.0 as usize].last_child;
        {
            let c = &mut self.nodes[child.0 as usize];
            c.parent = parent;
            c.prev_sibling = old_last;
        }
        if old_last.is_valid() {
            self.nodes[old_last.0 as usize].next_sibling = child;
        } else {
            self.nodes[parent.0 as usize].first_child = child;
        }
        self.nodes[parent.0 as usize].last_child = child;
    }

    /// Insert a node before a reference child (append when reference is NONE)
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) {
        if !reference.is_valid() {
            self.append_child(parent, child);
            return;
        }
        if parent == child || self.get(parent).is_none() || self.get(child).is_none() {
            return;
        }
        if self.get(reference).map(|n| n.parent) != Some(parent) {
            return;
        }
        self.detach(child);

        let prev = self.nodes[reference.0 as usize].prev_sibling;
        {
            let c = &mut self.nodes[child.0 as usize];
            c.parent = parent;
            c.prev_sibling = prev;
            c.next_sibling = reference;
        }
        self.nodes[reference.0 as usize].prev_sibling = child;
        if prev.is_valid() {
            self.nodes[prev.0 as usize].next_sibling = child;
        } else {
            self.nodes[parent.0 as usize].first_child = child;
        }
    }

    /// Unlink a node (and its subtree) from its parent
    pub fn detach(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else { return };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);

        if prev.is_valid() {
            self.nodes[prev.0 as usize].next_sibling = next;
        } else if parent.is_valid() {
            self.nodes[parent.0 as usize].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.0 as usize].prev_sibling = prev;
        } else if parent.is_valid() {
            self.nodes[parent.0 as usize].last_child = prev;
        }

        let node = &mut self.nodes[id.0 as usize];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    /// Iterate direct children in order
    pub fn children(&self, parent: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let first = self.get(parent).map(|n| n.first_child).unwrap_or(NodeId::NONE);
        std::iter::successors(
            if first.is_valid() { Some(first) } else { None },
            move |&id| {
                let next = self.nodes[id.0 as usize].next_sibling;
                if next.is_valid() { Some(next) } else { None }
            },
        )
    }

    /// Iterate the subtree below `start` in document order (excluding `start`)
    pub fn descendants(&self, start: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            start,
            next: self.get(start).map(|n| n.first_child).unwrap_or(NodeId::NONE),
        }
    }

    /// Check whether `node` is `ancestor` or sits below it
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = node;
        while cursor.is_valid() {
            if cursor == ancestor {
                return true;
            }
            cursor = match self.get(cursor) {
                Some(n) => n.parent,
                None => return false,
            };
        }
        false
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Pre-order subtree iterator
pub struct Descendants<'a> {
    tree: &'a DomTree,
    start: NodeId,
    next: NodeId,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.next.is_valid() {
            return None;
        }
        let current = self.next;
        let node = self.tree.get(current)?;

        // First child, else next sibling, else climb until a sibling exists
        self.next = if node.first_child.is_valid() {
            node.first_child
        } else {
            let mut cursor = current;
            loop {
                if cursor == self.start {
                    break NodeId::NONE;
                }
                let n = match self.tree.get(cursor) {
                    Some(n) => n,
                    None => break NodeId::NONE,
                };
                if n.next_sibling.is_valid() {
                    break n.next_sibling;
                }
                if !n.parent.is_valid() || n.parent == self.start {
                    break NodeId::NONE;
                }
                cursor = n.parent;
            }
        };

        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_children() {
        let mut tree = DomTree::new();
        let body = tree.create_element("body");
        let a = tree.create_element("div");
        let b = tree.create_element("div");
        tree.append_child(tree.root(), body);
        tree.append_child(body, a);
        tree.append_child(body, b);

        let kids: Vec<_> = tree.children(body).collect();
        assert_eq!(kids, vec![a, b]);
        assert_eq!(tree.get(a).unwrap().parent, body);
    }

    #[test]
    fn test_insert_before() {
        let mut tree = DomTree::new();
        let parent = tree.create_element("ul");
        let a = tree.create_element("li");
        let c = tree.create_element("li");
        tree.append_child(parent, a);
        tree.append_child(parent, c);

        let b = tree.create_element("li");
        tree.insert_before(parent, b, c);

        let kids: Vec<_> = tree.children(parent).collect();
        assert_eq!(kids, vec![a, b, c]);
    }

    #[test]
    fn test_detach_middle_child() {
        let mut tree = DomTree::new();
        let parent = tree.create_element("div");
        let a = tree.create_element("p");
        let b = tree.create_element("p");
        let c = tree.create_element("p");
        for id in [a, b, c] {
            tree.append_child(parent, id);
        }

        tree.detach(b);
        let kids: Vec<_> = tree.children(parent).collect();
        assert_eq!(kids, vec![a, c]);
        assert!(!tree.get(b).unwrap().parent.is_valid());
    }

    #[test]
    fn test_descendants_order() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let a = tree.create_element("section");
        let a1 = tree.create_element("h2");
        let a2 = tree.create_element("p");
        let b = tree.create_element("section");
        tree.append_child(root, a);
        tree.append_child(a, a1);
        tree.append_child(a, a2);
        tree.append_child(root, b);

        let order: Vec<_> = tree.descendants(root).collect();
        assert_eq!(order, vec![a, a1, a2, b]);

        let sub: Vec<_> = tree.descendants(a).collect();
        assert_eq!(sub, vec![a1, a2]);
    }

    #[test]
    fn test_contains() {
        let mut tree = DomTree::new();
        let outer = tree.create_element("div");
        let inner = tree.create_element("span");
        tree.append_child(tree.root(), outer);
        tree.append_child(outer, inner);

        assert!(tree.contains(outer, inner));
        assert!(tree.contains(outer, outer));
        assert!(!tree.contains(inner, outer));
    }
}
