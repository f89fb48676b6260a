//! Interactive flourishes
//!
//! Hover lift on cards, the pointer-cursor affordance, click ripples on
//! buttons, and the staggered float of the hero cards.

use verve_dom::{Document, NodeId, SelectorList, Viewport};
use verve_runtime::{Millis, TimerQueue};

use crate::controller::Effect;

pub(crate) const RIPPLE_MS: Millis = 600;

const CARD_SELECTOR: &str = ".service-card, .portfolio-item, .testimonial-card, .why-me-item";
const CURSOR_SELECTOR: &str = "a, button, .service-card, .portfolio-item, .testimonial-card";
const BUTTON_SELECTOR: &str = ".btn";

const RIPPLE_KEYFRAMES: &str = "@keyframes ripple { to { transform: scale(4); opacity: 0; } }";

pub(crate) struct InteractiveEffects {
    cards: SelectorList,
    cursor_targets: SelectorList,
    buttons: SelectorList,
}

impl Default for InteractiveEffects {
    fn default() -> Self {
        Self {
            cards: SelectorList::parse(CARD_SELECTOR).unwrap_or_default(),
            cursor_targets: SelectorList::parse(CURSOR_SELECTOR).unwrap_or_default(),
            buttons: SelectorList::parse(BUTTON_SELECTOR).unwrap_or_default(),
        }
    }
}

impl InteractiveEffects {
    pub(crate) fn attach(doc: &mut Document) -> Self {
        inject_ripple_keyframes(doc);
        stagger_floating_cards(doc);
        Self::default()
    }

    /// Lift a card and switch the cursor when the pointer lands on an
    /// interactive element.
    pub(crate) fn pointer_enter(&self, doc: &mut Document, target: NodeId) {
        if let Some(card) = doc.closest(target, &self.cards) {
            doc.set_style(card, "transform", "translateY(-8px) scale(1.02)");
        }
        if doc.closest(target, &self.cursor_targets).is_some() {
            let body = doc.body();
            doc.set_style(body, "cursor", "pointer");
        }
    }

    pub(crate) fn pointer_leave(&self, doc: &mut Document, target: NodeId) {
        if let Some(card) = doc.closest(target, &self.cards) {
            doc.set_style(card, "transform", "translateY(0) scale(1)");
        }
        if doc.closest(target, &self.cursor_targets).is_some() {
            let body = doc.body();
            doc.set_style(body, "cursor", "default");
        }
    }

    /// Spawn a ripple on the button under a click, sized to its largest
    /// edge and centered on the pointer.
    pub(crate) fn click_ripple(
        &self,
        doc: &mut Document,
        timers: &mut TimerQueue<Effect>,
        viewport: &Viewport,
        target: NodeId,
        x: f32,
        y: f32,
    ) -> Option<NodeId> {
        let button = doc.closest(target, &self.buttons)?;
        let rect = doc.bounding_client_rect(button, viewport)?;
        let size = rect.width.max(rect.height);
        let left = x - rect.x - size / 2.0;
        let top = y - rect.y - size / 2.0;

        let ripple = doc.create_element("span");
        for (name, value) in [
            ("position", "absolute"),
            ("background", "rgba(255, 255, 255, 0.3)"),
            ("border-radius", "50%"),
            ("transform", "scale(0)"),
            ("animation", "ripple 0.6s linear"),
            ("pointer-events", "none"),
            ("z-index", "1"),
        ] {
            doc.set_style(ripple, name, value);
        }
        doc.set_style(ripple, "width", &format!("{}px", size));
        doc.set_style(ripple, "height", &format!("{}px", size));
        doc.set_style(ripple, "left", &format!("{}px", left));
        doc.set_style(ripple, "top", &format!("{}px", top));

        doc.set_style(button, "position", "relative");
        doc.set_style(button, "overflow", "hidden");
        doc.append_child(button, ripple);

        timers.set_timeout(Effect::RippleExpire { ripple }, RIPPLE_MS);
        Some(ripple)
    }
}

/// One shared `<style>` for the ripple animation, added the first time the
/// effects attach.
fn inject_ripple_keyframes(doc: &mut Document) {
    let already = doc
        .query_all("style")
        .into_iter()
        .any(|node| doc.text_content(node) == RIPPLE_KEYFRAMES);
    if already {
        return;
    }
    let style = doc.create_element("style");
    doc.set_text_content(style, RIPPLE_KEYFRAMES);
    let head = doc.head();
    doc.append_child(head, style);
}

fn stagger_floating_cards(doc: &mut Document) {
    for (index, card) in doc.query_all(".floating-card").into_iter().enumerate() {
        doc.set_style(card, "animation-delay", &format!("{}s", index * 2));
    }
}
