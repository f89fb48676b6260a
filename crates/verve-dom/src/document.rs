//! Document - High-level document API
//!
//! Wraps the arena tree with the lookups and mutations page scripting needs:
//! id/selector queries, class, attribute and inline-style edits, text content,
//! focus, and host-assigned geometry.

use std::collections::HashMap;

use crate::{DomTree, ElementData, NodeData, NodeId, Rect, SelectorList, Viewport};

/// HTML Document
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
    /// Page-coordinate rectangles assigned by the host
    geometry: HashMap<NodeId, Rect>,
    /// Currently focused element
    focused: Option<NodeId>,
}

impl Document {
    /// Create a new document with the html/head/body skeleton
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        let root = tree.root();
        tree.append_child(root, html);
        tree.append_child(html, head);
        tree.append_child(html, body);

        Self {
            tree,
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
            geometry: HashMap::new(),
            focused: None,
        }
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Serialized origin of the document URL ("null" when opaque)
    pub fn origin(&self) -> Option<String> {
        url::Url::parse(&self.url)
            .ok()
            .map(|u| u.origin().ascii_serialization())
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Allocate an element node
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.tree.create_element(tag)
    }

    /// Allocate a text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.tree.create_text(content)
    }

    /// Append a node as the last child of a parent
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.tree.append_child(parent, child);
    }

    /// Unlink a subtree, dropping its geometry and focus
    pub fn detach(&mut self, id: NodeId) {
        let mut subtree = vec![id];
        subtree.extend(self.tree.descendants(id));
        for node in &subtree {
            self.geometry.remove(node);
        }
        if let Some(focused) = self.focused {
            if subtree.contains(&focused) {
                self.focused = None;
            }
        }
        self.tree.detach(id);
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    /// Get element data for a node
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.tree.get(id)?.as_element()
    }

    /// Get mutable element data for a node
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.tree.get_mut(id)?.as_element_mut()
    }

    /// Tag name of an element
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.tag.as_str())
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.descendants(self.tree.root()).find(|&node| {
            self.element(node)
                .is_some_and(|e| e.id.as_deref() == Some(id))
        })
    }

    /// First element matching a selector string
    pub fn query(&self, selector: &str) -> Option<NodeId> {
        self.query_all(selector).into_iter().next()
    }

    /// All elements matching a selector string, in document order
    pub fn query_all(&self, selector: &str) -> Vec<NodeId> {
        let Some(list) = SelectorList::parse(selector) else {
            tracing::warn!("Ignoring unparseable selector: {}", selector);
            return Vec::new();
        };
        self.query_list(&list)
    }

    /// All elements matching a parsed selector list
    pub fn query_list(&self, list: &SelectorList) -> Vec<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .filter(|&id| self.matches_selector(id, list))
            .collect()
    }

    /// Check a node against a parsed selector list
    pub fn matches_selector(&self, id: NodeId, list: &SelectorList) -> bool {
        let Some(elem) = self.element(id) else {
            return false;
        };
        list.selectors.iter().any(|sel| {
            let Some((subject, ancestors)) = sel.split_subject() else {
                return false;
            };
            if !subject.matches(elem) {
                return false;
            }
            // Remaining compounds must match successively higher ancestors
            let mut cursor = self.parent(id);
            'compounds: for compound in ancestors.iter().rev() {
                while cursor.is_valid() {
                    let matched = self.element(cursor).is_some_and(|e| compound.matches(e));
                    cursor = self.parent(cursor);
                    if matched {
                        continue 'compounds;
                    }
                }
                return false;
            }
            true
        })
    }

    /// Nearest ancestor (including self) matching a selector list
    pub fn closest(&self, id: NodeId, list: &SelectorList) -> Option<NodeId> {
        let mut cursor = id;
        while cursor.is_valid() {
            if self.matches_selector(cursor, list) {
                return Some(cursor);
            }
            cursor = self.parent(cursor);
        }
        None
    }

    /// Parent of a node
    pub fn parent(&self, id: NodeId) -> NodeId {
        self.tree.get(id).map(|n| n.parent).unwrap_or(NodeId::NONE)
    }

    /// Iterate direct children
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.tree.children(id)
    }

    /// Check whether `node` is `ancestor` or sits below it
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.tree.contains(ancestor, node)
    }

    // ------------------------------------------------------------------
    // Text
    // ------------------------------------------------------------------

    /// Concatenated text of a node's subtree
    pub fn text_content(&self, id: NodeId) -> String {
        match self.tree.get(id).map(|n| &n.data) {
            Some(NodeData::Text(t)) => t.clone(),
            Some(_) => {
                let mut out = String::new();
                for node in self.tree.descendants(id) {
                    if let Some(t) = self.tree.get(node).and_then(|n| n.as_text()) {
                        out.push_str(t);
                    }
                }
                out
            }
            None => String::new(),
        }
    }

    /// Replace a node's children with a single text node
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        if self.tree.get(id).is_none() {
            return;
        }
        let children: Vec<NodeId> = self.tree.children(id).collect();
        for child in children {
            self.detach(child);
        }
        let t = self.tree.create_text(text);
        self.tree.append_child(id, t);
    }

    // ------------------------------------------------------------------
    // Attributes, classes, styles
    // ------------------------------------------------------------------

    /// Get an attribute value
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.attr(name)
    }

    /// Set an attribute
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(e) = self.element_mut(id) {
            e.set_attr(name, value);
        }
    }

    /// Remove an attribute
    pub fn remove_attr(&mut self, id: NodeId, name: &str) {
        if let Some(e) = self.element_mut(id) {
            e.remove_attr(name);
        }
    }

    /// Check for a class
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_class(class))
    }

    /// Add a class
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(e) = self.element_mut(id) {
            e.add_class(class);
        }
    }

    /// Remove a class
    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(e) = self.element_mut(id) {
            e.remove_class(class);
        }
    }

    /// Toggle a class, returning whether it is now present
    pub fn toggle_class(&mut self, id: NodeId, class: &str) -> bool {
        self.element_mut(id)
            .map(|e| e.toggle_class(class))
            .unwrap_or(false)
    }

    /// Get an inline style property
    pub fn style(&self, id: NodeId, prop: &str) -> Option<&str> {
        self.element(id)?.style(prop)
    }

    /// Set an inline style property
    pub fn set_style(&mut self, id: NodeId, prop: &str, value: &str) {
        if let Some(e) = self.element_mut(id) {
            e.set_style(prop, value);
        }
    }

    /// Remove an inline style property
    pub fn remove_style(&mut self, id: NodeId, prop: &str) {
        if let Some(e) = self.element_mut(id) {
            e.remove_style(prop);
        }
    }

    // ------------------------------------------------------------------
    // Geometry and focus
    // ------------------------------------------------------------------

    /// Assign a page-coordinate rectangle to a node
    pub fn set_rect(&mut self, id: NodeId, rect: Rect) {
        if self.tree.get(id).is_some() {
            self.geometry.insert(id, rect);
        }
    }

    /// Page-coordinate rectangle of a node
    pub fn rect(&self, id: NodeId) -> Option<Rect> {
        self.geometry.get(&id).copied()
    }

    /// Distance from page top to the node
    pub fn offset_top(&self, id: NodeId) -> Option<f32> {
        self.rect(id).map(|r| r.y)
    }

    /// Height of the node
    pub fn offset_height(&self, id: NodeId) -> Option<f32> {
        self.rect(id).map(|r| r.height)
    }

    /// Viewport-relative rectangle of a node
    pub fn bounding_client_rect(&self, id: NodeId, viewport: &Viewport) -> Option<Rect> {
        self.rect(id).map(|r| Rect {
            x: r.x,
            y: r.y - viewport.scroll_y,
            width: r.width,
            height: r.height,
        })
    }

    /// Move focus to an element
    pub fn focus(&mut self, id: NodeId) {
        if self.element(id).is_some() {
            self.focused = Some(id);
        }
    }

    /// Clear focus
    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// Currently focused element
    pub fn active_element(&self) -> Option<NodeId> {
        self.focused
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, NodeId, NodeId) {
        let mut doc = Document::new("https://example.com/page");
        let body = doc.body();
        let nav = doc.create_element("nav");
        doc.set_attr(nav, "class", "navbar");
        doc.append_child(body, nav);

        let menu = doc.create_element("ul");
        doc.set_attr(menu, "class", "nav-menu");
        doc.append_child(nav, menu);

        let link = doc.create_element("a");
        doc.set_attr(link, "href", "#services");
        doc.append_child(menu, link);

        (doc, menu, link)
    }

    #[test]
    fn test_get_element_by_id() {
        let (mut doc, menu, _) = sample();
        doc.set_attr(menu, "id", "primary-menu");
        assert_eq!(doc.get_element_by_id("primary-menu"), Some(menu));
        assert_eq!(doc.get_element_by_id("missing"), None);
    }

    #[test]
    fn test_query_descendant() {
        let (doc, _, link) = sample();
        assert_eq!(doc.query_all(".nav-menu a"), vec![link]);
        assert_eq!(doc.query(".navbar .nav-menu a"), Some(link));
        assert!(doc.query_all(".footer a").is_empty());
    }

    #[test]
    fn test_closest() {
        let (doc, menu, link) = sample();
        let list = SelectorList::parse(".nav-menu").unwrap();
        assert_eq!(doc.closest(link, &list), Some(menu));
        assert_eq!(doc.closest(menu, &list), Some(menu));

        let missing = SelectorList::parse(".hero").unwrap();
        assert_eq!(doc.closest(link, &missing), None);
    }

    #[test]
    fn test_text_content_roundtrip() {
        let (mut doc, _, link) = sample();
        doc.set_text_content(link, "Services");
        assert_eq!(doc.text_content(link), "Services");

        doc.set_text_content(link, "Work");
        assert_eq!(doc.text_content(link), "Work");
        // Old text node was detached, not duplicated
        assert_eq!(doc.children(link).count(), 1);
    }

    #[test]
    fn test_detach_clears_geometry_and_focus() {
        let (mut doc, menu, link) = sample();
        doc.set_rect(link, Rect::new(0.0, 10.0, 80.0, 20.0));
        doc.focus(link);

        doc.detach(menu);
        assert_eq!(doc.rect(link), None);
        assert_eq!(doc.active_element(), None);
        assert!(doc.query_all(".nav-menu a").is_empty());
    }

    #[test]
    fn test_bounding_client_rect_subtracts_scroll() {
        let (mut doc, _, link) = sample();
        doc.set_rect(link, Rect::new(0.0, 900.0, 80.0, 20.0));

        let mut vp = Viewport::new(1280.0, 720.0);
        vp.scroll_y = 850.0;
        let r = doc.bounding_client_rect(link, &vp).unwrap();
        assert_eq!(r.y, 50.0);
    }

    #[test]
    fn test_origin() {
        let doc = Document::new("https://chetna.example.com/index.html");
        assert_eq!(doc.origin().as_deref(), Some("https://chetna.example.com"));
    }
}
