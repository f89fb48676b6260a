//! Notifications
//!
//! Transient message cards in the top-right corner. At most one is alive at
//! a time; every timer carries the serial of the notice it was armed for,
//! so callbacks for a replaced notice fall through harmlessly.

use verve_dom::{Document, NodeId, SelectorList};
use verve_runtime::{Millis, TimerQueue};

use crate::controller::Effect;

pub(crate) const SLIDE_IN_MS: Millis = 100;
pub(crate) const AUTO_DISMISS_MS: Millis = 5000;
pub(crate) const REMOVE_MS: Millis = 300;

const OFFSCREEN: &str = "translateX(450px)";
const ONSCREEN: &str = "translateX(0)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Severity {
    Success,
    Error,
}

impl Severity {
    fn class_suffix(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }

    fn colors(self) -> (&'static str, &'static str) {
        match self {
            Severity::Success => ("#00d4aa", "#00b894"),
            Severity::Error => ("#e74c3c", "#c0392b"),
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Severity::Success => "\u{2713}",
            Severity::Error => "\u{2715}",
        }
    }
}

struct ActiveNotice {
    serial: u64,
    node: NodeId,
    dismissing: bool,
}

pub(crate) struct NotificationPresenter {
    current: Option<ActiveNotice>,
    next_serial: u64,
    close_selector: SelectorList,
}

impl Default for NotificationPresenter {
    fn default() -> Self {
        Self {
            current: None,
            next_serial: 1,
            close_selector: SelectorList::parse(".notification-close").unwrap_or_default(),
        }
    }
}

impl NotificationPresenter {
    /// Show a notice, replacing whatever is on screen. Returns its serial.
    pub(crate) fn show(
        &mut self,
        doc: &mut Document,
        timers: &mut TimerQueue<Effect>,
        severity: Severity,
        message: &str,
    ) -> u64 {
        if let Some(old) = self.current.take() {
            doc.detach(old.node);
        }
        let serial = self.next_serial;
        self.next_serial += 1;

        let node = build_notice(doc, severity, message);
        let body = doc.body();
        doc.append_child(body, node);

        timers.set_timeout(Effect::NotifySlideIn { serial }, SLIDE_IN_MS);
        timers.set_timeout(Effect::NotifyExpire { serial }, AUTO_DISMISS_MS);
        self.current = Some(ActiveNotice { serial, node, dismissing: false });
        tracing::debug!("Notification {} shown: {}", serial, message);
        serial
    }

    /// Slide the notice into view. Stale serials and notices already on
    /// their way out are left alone.
    pub(crate) fn slide_in(&mut self, doc: &mut Document, serial: u64) {
        if let Some(cur) = &self.current {
            if cur.serial == serial && !cur.dismissing {
                doc.set_style(cur.node, "transform", ONSCREEN);
            }
        }
    }

    /// Auto-dismiss fired for a notice.
    pub(crate) fn expire(
        &mut self,
        doc: &mut Document,
        timers: &mut TimerQueue<Effect>,
        serial: u64,
    ) {
        self.begin_dismiss(doc, timers, serial);
    }

    /// The user clicked the close control of the current notice.
    pub(crate) fn dismiss_current(&mut self, doc: &mut Document, timers: &mut TimerQueue<Effect>) {
        if let Some(serial) = self.current.as_ref().map(|c| c.serial) {
            self.begin_dismiss(doc, timers, serial);
        }
    }

    /// Final removal once the slide-out transition has played.
    pub(crate) fn remove(&mut self, doc: &mut Document, serial: u64) {
        if let Some(cur) = self.current.take_if(|c| c.serial == serial) {
            doc.detach(cur.node);
        }
    }

    pub(crate) fn current_node(&self) -> Option<NodeId> {
        self.current.as_ref().map(|c| c.node)
    }

    /// Whether a click landed on the close control of the current notice.
    pub(crate) fn close_button_hit(&self, doc: &Document, target: NodeId) -> bool {
        let Some(cur) = &self.current else {
            return false;
        };
        doc.contains(cur.node, target) && doc.closest(target, &self.close_selector).is_some()
    }

    fn begin_dismiss(&mut self, doc: &mut Document, timers: &mut TimerQueue<Effect>, serial: u64) {
        let Some(cur) = self.current.as_mut() else {
            return;
        };
        if cur.serial != serial || cur.dismissing {
            return;
        }
        cur.dismissing = true;
        doc.set_style(cur.node, "transform", OFFSCREEN);
        timers.set_timeout(Effect::NotifyRemove { serial }, REMOVE_MS);
    }
}

fn build_notice(doc: &mut Document, severity: Severity, message: &str) -> NodeId {
    let node = doc.create_element("div");
    let class = format!("notification notification-{}", severity.class_suffix());
    doc.set_attr(node, "class", &class);

    let content = doc.create_element("div");
    doc.set_attr(content, "class", "notification-content");
    doc.set_style(content, "display", "flex");
    doc.set_style(content, "align-items", "center");
    doc.set_style(content, "gap", "0.75rem");

    let icon = doc.create_element("div");
    doc.set_attr(icon, "class", "notification-icon");
    doc.set_text_content(icon, severity.icon());

    let text = doc.create_element("span");
    doc.set_attr(text, "class", "notification-message");
    doc.set_text_content(text, message);

    let close = doc.create_element("button");
    doc.set_attr(close, "class", "notification-close");
    doc.set_attr(close, "aria-label", "Close notification");
    doc.set_text_content(close, "\u{00d7}");

    doc.append_child(content, icon);
    doc.append_child(content, text);
    doc.append_child(content, close);
    doc.append_child(node, content);

    let (background, border) = severity.colors();
    for (name, value) in [
        ("position", "fixed"),
        ("top", "100px"),
        ("right", "20px"),
        ("z-index", "1000"),
        ("max-width", "400px"),
        ("padding", "1rem 1.5rem"),
        ("border-radius", "0.75rem"),
        ("box-shadow", "0 10px 40px rgba(0, 0, 0, 0.2)"),
        ("color", "white"),
        ("transform", OFFSCREEN),
        ("transition", "all 0.3s cubic-bezier(0.4, 0, 0.2, 1)"),
    ] {
        doc.set_style(node, name, value);
    }
    doc.set_style(node, "background", background);
    doc.set_style(node, "border", &format!("1px solid {}", border));
    node
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Document, TimerQueue<Effect>, NotificationPresenter) {
        (Document::default(), TimerQueue::new(), NotificationPresenter::default())
    }

    #[test]
    fn test_show_builds_offscreen_card() {
        let (mut doc, mut timers, mut notices) = setup();
        notices.show(&mut doc, &mut timers, Severity::Success, "Saved");

        let node = notices.current_node().unwrap();
        assert!(doc.has_class(node, "notification"));
        assert!(doc.has_class(node, "notification-success"));
        assert_eq!(doc.style(node, "transform"), Some(OFFSCREEN));
        assert_eq!(doc.style(node, "background"), Some("#00d4aa"));
        let message = doc.query(".notification-message").unwrap();
        assert_eq!(doc.text_content(message), "Saved");
    }

    #[test]
    fn test_slide_in_and_expiry() {
        let (mut doc, mut timers, mut notices) = setup();
        let serial = notices.show(&mut doc, &mut timers, Severity::Error, "Nope");
        let node = notices.current_node().unwrap();

        notices.slide_in(&mut doc, serial);
        assert_eq!(doc.style(node, "transform"), Some(ONSCREEN));

        notices.expire(&mut doc, &mut timers, serial);
        assert_eq!(doc.style(node, "transform"), Some(OFFSCREEN));

        notices.remove(&mut doc, serial);
        assert!(notices.current_node().is_none());
        assert!(doc.query(".notification").is_none());
    }

    #[test]
    fn test_replacement_drops_stale_timers() {
        let (mut doc, mut timers, mut notices) = setup();
        let first = notices.show(&mut doc, &mut timers, Severity::Success, "one");
        let second = notices.show(&mut doc, &mut timers, Severity::Success, "two");

        // Stale callbacks for the replaced notice change nothing
        notices.slide_in(&mut doc, first);
        let node = notices.current_node().unwrap();
        assert_eq!(doc.style(node, "transform"), Some(OFFSCREEN));
        notices.remove(&mut doc, first);
        assert!(notices.current_node().is_some());

        notices.slide_in(&mut doc, second);
        assert_eq!(doc.style(node, "transform"), Some(ONSCREEN));
        // Only one card in the tree
        assert_eq!(doc.query_all(".notification").len(), 1);
    }

    #[test]
    fn test_double_dismiss_is_noop() {
        let (mut doc, mut timers, mut notices) = setup();
        let serial = notices.show(&mut doc, &mut timers, Severity::Success, "bye");
        assert!(timers.has_pending());

        notices.dismiss_current(&mut doc, &mut timers);
        notices.expire(&mut doc, &mut timers, serial);
        notices.remove(&mut doc, serial);
        notices.remove(&mut doc, serial);
        assert!(notices.current_node().is_none());
    }

    #[test]
    fn test_slide_in_after_dismiss_ignored() {
        let (mut doc, mut timers, mut notices) = setup();
        let serial = notices.show(&mut doc, &mut timers, Severity::Success, "quick");
        notices.dismiss_current(&mut doc, &mut timers);

        // The 100ms reveal timer fires after the user already closed it
        notices.slide_in(&mut doc, serial);
        let node = notices.current_node().unwrap();
        assert_eq!(doc.style(node, "transform"), Some(OFFSCREEN));
    }

    #[test]
    fn test_close_button_hit() {
        let (mut doc, mut timers, mut notices) = setup();
        notices.show(&mut doc, &mut timers, Severity::Success, "hi");
        let close = doc.query(".notification-close").unwrap();
        let message = doc.query(".notification-message").unwrap();
        assert!(notices.close_button_hit(&doc, close));
        assert!(!notices.close_button_hit(&doc, message));
    }
}
