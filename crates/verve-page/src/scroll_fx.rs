//! Scroll-reactive effects
//!
//! Navbar styling past the fold, the floating scroll-to-top control, hero
//! parallax, and the eased scroll animation used for anchor navigation.

use verve_dom::{Document, NodeId};
use verve_runtime::Millis;

/// Scroll depth past which the navbar picks up its `scrolled` styling.
pub(crate) const NAVBAR_SCROLLED_AT: f32 = 50.0;
/// Scroll depth past which the scroll-to-top control becomes visible.
pub(crate) const SCROLL_TOP_SHOWS_AT: f32 = 500.0;
/// Fixed-header allowance subtracted from anchor targets.
pub(crate) const ANCHOR_OFFSET: f32 = 80.0;

const PARALLAX_FACTOR: f32 = 0.3;
const SMOOTH_SCROLL_MS: Millis = 500;

struct SmoothScroll {
    from: f32,
    to: f32,
    started: Millis,
}

/// Scroll position styling plus the in-flight scroll animation, if any.
#[derive(Default)]
pub(crate) struct ScrollEffects {
    navbar: Option<NodeId>,
    hero: Option<NodeId>,
    hero_pattern: Option<NodeId>,
    to_top: Option<NodeId>,
    anim: Option<SmoothScroll>,
}

impl ScrollEffects {
    pub(crate) fn attach(doc: &mut Document) -> Self {
        let navbar = doc.query(".navbar");
        let hero = doc.query(".hero");
        let hero_pattern = doc.query(".hero-pattern");
        let to_top = Some(build_scroll_top_button(doc));
        Self { navbar, hero, hero_pattern, to_top, anim: None }
    }

    pub(crate) fn to_top_button(&self) -> Option<NodeId> {
        self.to_top
    }

    /// Restyle everything that depends on the scroll position.
    pub(crate) fn on_scroll(&mut self, doc: &mut Document, y: f32) {
        if let Some(navbar) = self.navbar {
            if y > NAVBAR_SCROLLED_AT {
                doc.add_class(navbar, "scrolled");
            } else {
                doc.remove_class(navbar, "scrolled");
            }
        }
        if let Some(button) = self.to_top {
            if y > SCROLL_TOP_SHOWS_AT {
                doc.set_style(button, "opacity", "1");
                doc.set_style(button, "visibility", "visible");
            } else {
                doc.set_style(button, "opacity", "0");
                doc.set_style(button, "visibility", "hidden");
            }
        }
        if let (Some(hero), Some(pattern)) = (self.hero, self.hero_pattern) {
            // The pattern freezes once the hero has scrolled out.
            if let Some(height) = doc.offset_height(hero) {
                if y < height {
                    let speed = y * PARALLAX_FACTOR;
                    doc.set_style(pattern, "transform", &format!("translateY({}px)", speed));
                }
            }
        }
    }

    /// Begin an eased scroll from `from` to `to`.
    pub(crate) fn scroll_to(&mut self, now: Millis, from: f32, to: f32) {
        self.anim = Some(SmoothScroll { from, to: to.max(0.0), started: now });
    }

    /// Drop the animation, leaving the scroll position where it is.
    pub(crate) fn cancel_scroll(&mut self) {
        self.anim = None;
    }

    pub(crate) fn is_scrolling(&self) -> bool {
        self.anim.is_some()
    }

    /// Advance the animation. Returns the new scroll position while moving,
    /// the final position on the frame it completes, `None` when idle.
    pub(crate) fn tick_scroll(&mut self, now: Millis) -> Option<f32> {
        let anim = self.anim.as_ref()?;
        let elapsed = now.saturating_sub(anim.started);
        if elapsed >= SMOOTH_SCROLL_MS {
            let to = anim.to;
            self.anim = None;
            return Some(to);
        }
        let t = elapsed as f32 / SMOOTH_SCROLL_MS as f32;
        Some(anim.from + (anim.to - anim.from) * ease_in_out(t))
    }
}

fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

fn build_scroll_top_button(doc: &mut Document) -> NodeId {
    let button = doc.create_element("button");
    doc.set_attr(button, "class", "scroll-to-top");
    doc.set_attr(button, "aria-label", "Scroll to top");
    let arrow = doc.create_text("\u{2191}");
    doc.append_child(button, arrow);
    for (name, value) in [
        ("position", "fixed"),
        ("bottom", "2rem"),
        ("right", "2rem"),
        ("width", "50px"),
        ("height", "50px"),
        ("border-radius", "50%"),
        ("background", "linear-gradient(135deg, #00d4aa, #00b894)"),
        ("color", "white"),
        ("border", "none"),
        ("cursor", "pointer"),
        ("box-shadow", "0 4px 20px rgba(0, 212, 170, 0.3)"),
        ("opacity", "0"),
        ("visibility", "hidden"),
        ("transition", "all 0.3s cubic-bezier(0.4, 0, 0.2, 1)"),
        ("z-index", "999"),
    ] {
        doc.set_style(button, name, value);
    }
    let body = doc.body();
    doc.append_child(body, button);
    button
}
