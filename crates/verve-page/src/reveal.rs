//! Visibility reveals
//!
//! Content blocks fade in once when they first become meaningfully visible;
//! whole sections slide up at half visibility and stay revealed for good.

use std::collections::HashSet;

use verve_dom::{Document, NodeId, Viewport};
use verve_runtime::IntersectionWatcher;

const CONTENT_SELECTOR: &str = ".service-card, .portfolio-item, .testimonial-card, \
     .why-me-item, .about-content, .contact-content, .section-header";
const CONTENT_THRESHOLD: f32 = 0.1;
const SECTION_THRESHOLD: f32 = 0.5;

pub(crate) struct RevealEffects {
    content: IntersectionWatcher,
    sections: IntersectionWatcher,
    /// Content blocks that already ran their one-shot reveal.
    revealed: HashSet<NodeId>,
}

impl Default for RevealEffects {
    fn default() -> Self {
        Self {
            content: IntersectionWatcher::new(vec![CONTENT_THRESHOLD]),
            sections: IntersectionWatcher::new(vec![SECTION_THRESHOLD]),
            revealed: HashSet::new(),
        }
    }
}

impl RevealEffects {
    pub(crate) fn attach(doc: &mut Document) -> Self {
        let mut fx = Self::default();
        for node in doc.query_all(CONTENT_SELECTOR) {
            doc.add_class(node, "loading");
            fx.content.observe(node);
        }
        for section in doc.query_all("section") {
            doc.set_style(section, "opacity", "0");
            doc.set_style(section, "transform", "translateY(20px)");
            doc.set_style(section, "transition", "all 0.6s cubic-bezier(0.4, 0, 0.2, 1)");
            fx.sections.observe(section);
        }
        fx
    }

    /// Re-evaluate visibility and apply any pending reveals.
    pub(crate) fn sweep(&mut self, doc: &mut Document, viewport: &Viewport) {
        for crossing in self.content.sweep(doc, viewport) {
            if crossing.ratio >= CONTENT_THRESHOLD && self.revealed.insert(crossing.target) {
                doc.add_class(crossing.target, "fade-in-up");
                self.content.unobserve(crossing.target);
            }
        }
        for crossing in self.sections.sweep(doc, viewport) {
            // Sections reveal but never fade back out.
            if crossing.ratio >= SECTION_THRESHOLD {
                doc.set_style(crossing.target, "opacity", "1");
                doc.set_style(crossing.target, "transform", "translateY(0)");
            }
        }
    }
}
