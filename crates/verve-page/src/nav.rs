//! Mobile navigation
//!
//! The hamburger menu is a single boolean projected onto the DOM: the
//! `active` classes and `aria-expanded` always follow `open`, so the
//! markup can never disagree with the state that drives it.

use verve_dom::{Document, NodeId};

use crate::focus::FocusTrap;

const TOGGLE_LABEL: &str = "Toggle navigation menu";

pub(crate) struct NavMenu {
    toggle: NodeId,
    menu: NodeId,
    trap: FocusTrap,
    open: bool,
}

impl NavMenu {
    /// Wire up the hamburger and menu, labeling the toggle for assistive
    /// tech. `None` when the page has no navigation.
    pub(crate) fn attach(doc: &mut Document) -> Option<Self> {
        let toggle = doc.query(".hamburger")?;
        let menu = doc.query(".nav-menu")?;
        let trap = FocusTrap::capture(doc, menu);
        doc.set_attr(toggle, "aria-label", TOGGLE_LABEL);
        let nav = Self { toggle, menu, trap, open: false };
        nav.render(doc);
        Some(nav)
    }

    pub(crate) fn is_open(&self) -> bool {
        self.open
    }

    pub(crate) fn toggle_button(&self) -> NodeId {
        self.toggle
    }

    pub(crate) fn menu(&self) -> NodeId {
        self.menu
    }

    pub(crate) fn toggle(&mut self, doc: &mut Document) {
        self.open = !self.open;
        self.render(doc);
    }

    /// Close if open. Safe to call from any path that should collapse the
    /// menu (link follow, Escape).
    pub(crate) fn close(&mut self, doc: &mut Document) {
        if self.open {
            self.open = false;
            self.render(doc);
        }
    }

    /// Wrap keyboard focus at the ends of the menu while it is open.
    /// Returns true when focus moved and the host should drop the Tab.
    pub(crate) fn wrap_focus(&self, doc: &mut Document, backwards: bool) -> bool {
        if !self.open {
            return false;
        }
        let Some(current) = doc.active_element() else {
            return false;
        };
        if !doc.contains(self.menu, current) {
            return false;
        }
        match self.trap.wrap(current, backwards) {
            Some(next) => {
                doc.focus(next);
                true
            }
            None => false,
        }
    }

    fn render(&self, doc: &mut Document) {
        for node in [self.toggle, self.menu] {
            if self.open {
                doc.add_class(node, "active");
            } else {
                doc.remove_class(node, "active");
            }
        }
        let expanded = if self.open { "true" } else { "false" };
        doc.set_attr(self.toggle, "aria-expanded", expanded);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav_doc() -> (Document, NodeId, NodeId, Vec<NodeId>) {
        let mut doc = Document::default();
        let toggle = doc.create_element("button");
        doc.set_attr(toggle, "class", "hamburger");
        doc.append_child(doc.body(), toggle);
        let menu = doc.create_element("ul");
        doc.set_attr(menu, "class", "nav-menu");
        doc.append_child(doc.body(), menu);
        let mut links = Vec::new();
        for _ in 0..3 {
            let a = doc.create_element("a");
            doc.append_child(menu, a);
            links.push(a);
        }
        (doc, toggle, menu, links)
    }

    #[test]
    fn test_toggle_renders_state() {
        let (mut doc, toggle, menu, _) = nav_doc();
        let mut nav = NavMenu::attach(&mut doc).unwrap();
        assert_eq!(doc.attr(toggle, "aria-expanded"), Some("false"));
        assert_eq!(doc.attr(toggle, "aria-label"), Some(TOGGLE_LABEL));

        nav.toggle(&mut doc);
        assert!(doc.has_class(toggle, "active"));
        assert!(doc.has_class(menu, "active"));
        assert_eq!(doc.attr(toggle, "aria-expanded"), Some("true"));

        nav.toggle(&mut doc);
        assert!(!doc.has_class(menu, "active"));
        assert_eq!(doc.attr(toggle, "aria-expanded"), Some("false"));
    }

    #[test]
    fn test_close_is_idempotent() {
        let (mut doc, toggle, _, _) = nav_doc();
        let mut nav = NavMenu::attach(&mut doc).unwrap();
        nav.close(&mut doc);
        nav.close(&mut doc);
        assert!(!nav.is_open());
        assert_eq!(doc.attr(toggle, "aria-expanded"), Some("false"));
    }

    #[test]
    fn test_focus_wraps_only_when_open() {
        let (mut doc, _, _, links) = nav_doc();
        let mut nav = NavMenu::attach(&mut doc).unwrap();
        doc.focus(links[2]);
        assert!(!nav.wrap_focus(&mut doc, false));

        nav.toggle(&mut doc);
        assert!(nav.wrap_focus(&mut doc, false));
        assert_eq!(doc.active_element(), Some(links[0]));

        assert!(nav.wrap_focus(&mut doc, true));
        assert_eq!(doc.active_element(), Some(links[2]));
    }

    #[test]
    fn test_focus_outside_menu_untrapped() {
        let (mut doc, toggle, _, _) = nav_doc();
        let mut nav = NavMenu::attach(&mut doc).unwrap();
        nav.toggle(&mut doc);
        doc.focus(toggle);
        assert!(!nav.wrap_focus(&mut doc, false));
    }
}
