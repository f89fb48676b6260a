//! Page controller
//!
//! Owns every behavior on the page and the virtual clock that drives them.
//! The host feeds events through [`PageController::dispatch`] and advances
//! time with [`PageController::step`]; everything else is internal.

use verve_dom::{Document, NodeId, SelectorList, Viewport};
use verve_runtime::{Millis, TimerQueue};

use crate::assets::{self, LazyImages};
use crate::counters::CounterSet;
use crate::effects::InteractiveEffects;
use crate::events::{Event, Key, Reaction};
use crate::form::{ContactForm, FixedDelayBackend, SubmitBackend, SubmitOutcome, SUCCESS_MESSAGE};
use crate::meta::{self, SiteProfile};
use crate::nav::NavMenu;
use crate::notify::{NotificationPresenter, Severity};
use crate::perf::{self, LoadTiming};
use crate::reveal::RevealEffects;
use crate::scroll_fx::{ANCHOR_OFFSET, ScrollEffects};
use crate::worker::WorkerRegistry;

const WORKER_SCRIPT: &str = "/sw.js";

/// Deferred work carried by the timer queue.
#[derive(Debug, Clone)]
pub(crate) enum Effect {
    NotifySlideIn { serial: u64 },
    NotifyExpire { serial: u64 },
    NotifyRemove { serial: u64 },
    CounterTick { target: NodeId },
    RippleExpire { ripple: NodeId },
}

pub struct PageController {
    viewport: Viewport,
    timers: TimerQueue<Effect>,
    nav: Option<NavMenu>,
    scroll_fx: ScrollEffects,
    reveal: RevealEffects,
    counters: CounterSet,
    lazy: LazyImages,
    form: Option<ContactForm>,
    notices: NotificationPresenter,
    flourish: InteractiveEffects,
    workers: WorkerRegistry,
    profile: SiteProfile,
    pending_backend: Option<Box<dyn SubmitBackend>>,
    anchor_links: SelectorList,
    links: SelectorList,
    attached: bool,
}

impl PageController {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            timers: TimerQueue::new(),
            nav: None,
            scroll_fx: ScrollEffects::default(),
            reveal: RevealEffects::default(),
            counters: CounterSet::default(),
            lazy: LazyImages::default(),
            form: None,
            notices: NotificationPresenter::default(),
            flourish: InteractiveEffects::default(),
            workers: WorkerRegistry::default(),
            profile: SiteProfile::default(),
            pending_backend: None,
            anchor_links: SelectorList::parse("a[href^=\"#\"]").unwrap_or_default(),
            links: SelectorList::parse("a").unwrap_or_default(),
            attached: false,
        }
    }

    /// Replace the default submission backend. Takes effect at attach.
    pub fn set_backend(&mut self, backend: Box<dyn SubmitBackend>) {
        self.pending_backend = Some(backend);
    }

    /// Replace the structured-data profile. Takes effect at attach.
    pub fn set_profile(&mut self, profile: SiteProfile) {
        self.profile = profile;
    }

    /// Wire every behavior to the document and run the first visibility
    /// sweep so above-the-fold content reveals immediately.
    pub fn attach(&mut self, doc: &mut Document) {
        if self.attached {
            return;
        }
        self.attached = true;

        self.nav = NavMenu::attach(doc);
        self.scroll_fx = ScrollEffects::attach(doc);
        self.reveal = RevealEffects::attach(doc);
        self.counters = CounterSet::attach(doc);
        self.lazy = LazyImages::attach(doc);
        let backend = self
            .pending_backend
            .take()
            .unwrap_or_else(|| Box::new(FixedDelayBackend::new()));
        self.form = ContactForm::attach(doc, backend);
        self.flourish = InteractiveEffects::attach(doc);
        if let Err(err) = meta::inject_structured_data(doc, &self.profile) {
            tracing::warn!("Structured data skipped: {}", err);
        }
        self.sweep(doc);
        tracing::info!("Page behaviors attached");
    }

    /// Route one host event through every behavior that cares about it.
    pub fn dispatch(&mut self, doc: &mut Document, event: Event) -> Reaction {
        let mut reaction = Reaction::default();
        match event {
            Event::Click { target, x, y } => self.handle_click(doc, target, x, y, &mut reaction),
            Event::KeyDown { key, shift } => self.handle_key(doc, key, shift, &mut reaction),
            Event::PointerEnter { target } => self.flourish.pointer_enter(doc, target),
            Event::PointerLeave { target } => self.flourish.pointer_leave(doc, target),
            Event::Scroll { y } => {
                // A host scroll overrides any animated scroll in flight.
                self.scroll_fx.cancel_scroll();
                self.apply_scroll(doc, y);
            }
            Event::Submit { form } => self.handle_submit(doc, form, &mut reaction),
            Event::ImageError { target } => assets::hide_broken_image(doc, target),
            Event::Loaded { timing } => self.handle_loaded(timing),
        }
        reaction
    }

    /// Advance the clock: fire due timers, poll the form backend, move the
    /// animated scroll, then re-evaluate visibility.
    pub fn step(&mut self, doc: &mut Document, now: Millis) {
        for effect in self.timers.advance(now) {
            self.apply_effect(doc, effect);
        }
        if let Some(form) = self.form.as_mut() {
            if let Some(outcome) = form.poll(doc, now) {
                match outcome {
                    SubmitOutcome::Success => {
                        self.notices
                            .show(doc, &mut self.timers, Severity::Success, SUCCESS_MESSAGE);
                    }
                    SubmitOutcome::Error(message) => {
                        self.notices
                            .show(doc, &mut self.timers, Severity::Error, &message);
                    }
                }
            }
        }
        if let Some(y) = self.scroll_fx.tick_scroll(now) {
            self.apply_scroll(doc, y);
        }
        self.sweep(doc);
    }

    // ------------------------------------------------------------------
    // Host-visible state
    // ------------------------------------------------------------------

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn scroll_y(&self) -> f32 {
        self.viewport.scroll_y
    }

    pub fn now(&self) -> Millis {
        self.timers.now()
    }

    pub fn has_pending_timers(&self) -> bool {
        self.timers.has_pending()
    }

    pub fn is_nav_open(&self) -> bool {
        self.nav.as_ref().is_some_and(NavMenu::is_open)
    }

    pub fn is_scroll_animating(&self) -> bool {
        self.scroll_fx.is_scrolling()
    }

    pub fn is_form_submitting(&self) -> bool {
        self.form.as_ref().is_some_and(ContactForm::is_submitting)
    }

    /// The notification currently on screen, if any.
    pub fn notification(&self) -> Option<NodeId> {
        self.notices.current_node()
    }

    pub fn worker_registrations(&self) -> &WorkerRegistry {
        &self.workers
    }

    // ------------------------------------------------------------------
    // Event handling
    // ------------------------------------------------------------------

    fn handle_click(
        &mut self,
        doc: &mut Document,
        target: NodeId,
        x: f32,
        y: f32,
        reaction: &mut Reaction,
    ) {
        if self.notices.close_button_hit(doc, target) {
            self.notices.dismiss_current(doc, &mut self.timers);
        }

        if let Some(nav) = self.nav.as_mut() {
            if doc.contains(nav.toggle_button(), target) {
                nav.toggle(doc);
            } else if let Some(link) = doc.closest(target, &self.links) {
                if doc.contains(nav.menu(), link) {
                    nav.close(doc);
                }
            }
        }

        if let Some(anchor) = doc.closest(target, &self.anchor_links) {
            reaction.prevent();
            let href = doc.attr(anchor, "href").unwrap_or("").to_string();
            let destination = href
                .strip_prefix('#')
                .filter(|id| !id.is_empty())
                .and_then(|id| doc.get_element_by_id(id))
                .and_then(|section| doc.offset_top(section));
            match destination {
                Some(top) => {
                    let to = (top - ANCHOR_OFFSET).max(0.0);
                    let now = self.timers.now();
                    self.scroll_fx.scroll_to(now, self.viewport.scroll_y, to);
                }
                None => tracing::debug!("Ignoring anchor with no destination: {}", href),
            }
        }

        if let Some(button) = self.scroll_fx.to_top_button() {
            if doc.contains(button, target) {
                let now = self.timers.now();
                self.scroll_fx.scroll_to(now, self.viewport.scroll_y, 0.0);
            }
        }

        self.flourish
            .click_ripple(doc, &mut self.timers, &self.viewport, target, x, y);
    }

    fn handle_key(&mut self, doc: &mut Document, key: Key, shift: bool, reaction: &mut Reaction) {
        match key {
            Key::Escape => {
                if let Some(nav) = self.nav.as_mut() {
                    nav.close(doc);
                }
            }
            Key::Tab => {
                if let Some(nav) = &self.nav {
                    if nav.wrap_focus(doc, shift) {
                        reaction.prevent();
                    }
                }
            }
            Key::Other => {}
        }
    }

    fn handle_submit(&mut self, doc: &mut Document, form_node: NodeId, reaction: &mut Reaction) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        if form.node() != form_node {
            return;
        }
        reaction.prevent();
        let now = self.timers.now();
        match form.submit(doc, now) {
            Some(Err(err)) => {
                let message = err.to_string();
                self.notices
                    .show(doc, &mut self.timers, Severity::Error, &message);
            }
            Some(Ok(())) => tracing::info!("Contact form submitted"),
            None => tracing::debug!("Submission ignored while one is in flight"),
        }
    }

    fn handle_loaded(&mut self, timing: LoadTiming) {
        perf::log_load(&timing);
        // Registration failure never disturbs the page.
        match self.workers.register(WORKER_SCRIPT) {
            Ok(registration) => {
                tracing::info!("Worker registered with scope {}", registration.scope);
            }
            Err(err) => tracing::warn!("Worker registration failed: {}", err),
        }
    }

    // ------------------------------------------------------------------
    // Shared plumbing
    // ------------------------------------------------------------------

    fn apply_effect(&mut self, doc: &mut Document, effect: Effect) {
        match effect {
            Effect::NotifySlideIn { serial } => self.notices.slide_in(doc, serial),
            Effect::NotifyExpire { serial } => {
                self.notices.expire(doc, &mut self.timers, serial);
            }
            Effect::NotifyRemove { serial } => self.notices.remove(doc, serial),
            Effect::CounterTick { target } => {
                self.counters.tick(doc, target, &mut self.timers);
            }
            Effect::RippleExpire { ripple } => doc.detach(ripple),
        }
    }

    fn apply_scroll(&mut self, doc: &mut Document, y: f32) {
        self.viewport.scroll_y = y.max(0.0);
        let scroll_y = self.viewport.scroll_y;
        self.scroll_fx.on_scroll(doc, scroll_y);
        self.sweep(doc);
    }

    fn sweep(&mut self, doc: &mut Document) {
        self.reveal.sweep(doc, &self.viewport);
        self.counters.sweep(doc, &self.viewport, &mut self.timers);
        self.lazy.sweep(doc, &self.viewport);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verve_dom::Rect;

    fn minimal_page() -> Document {
        let mut doc = Document::new("https://example.com/");
        let nav = doc.create_element("nav");
        doc.set_attr(nav, "class", "navbar");
        doc.append_child(doc.body(), nav);
        let toggle = doc.create_element("button");
        doc.set_attr(toggle, "class", "hamburger");
        doc.append_child(nav, toggle);
        let menu = doc.create_element("ul");
        doc.set_attr(menu, "class", "nav-menu");
        doc.append_child(nav, menu);

        let services = doc.create_element("section");
        doc.set_attr(services, "id", "services");
        doc.append_child(doc.body(), services);
        doc.set_rect(services, Rect::new(0.0, 1200.0, 1280.0, 800.0));
        doc
    }

    fn controller() -> PageController {
        PageController::new(Viewport::new(1280.0, 720.0))
    }

    #[test]
    fn test_attach_is_idempotent() {
        let mut doc = minimal_page();
        let mut page = controller();
        page.attach(&mut doc);
        page.attach(&mut doc);
        assert_eq!(doc.query_all("script[type=\"application/ld+json\"]").len(), 1);
        assert_eq!(doc.query_all(".scroll-to-top").len(), 1);
    }

    #[test]
    fn test_anchor_click_starts_animated_scroll() {
        let mut doc = minimal_page();
        let link = doc.create_element("a");
        doc.set_attr(link, "href", "#services");
        doc.append_child(doc.body(), link);

        let mut page = controller();
        page.attach(&mut doc);
        let reaction = page.dispatch(&mut doc, Event::Click { target: link, x: 0.0, y: 0.0 });
        assert!(reaction.default_prevented);
        assert!(page.is_scroll_animating());

        // Settles at the section top minus the fixed-header allowance
        page.step(&mut doc, 500);
        assert_eq!(page.scroll_y(), 1120.0);
        assert!(!page.is_scroll_animating());
    }

    #[test]
    fn test_unresolvable_anchor_is_swallowed() {
        let mut doc = minimal_page();
        let link = doc.create_element("a");
        doc.set_attr(link, "href", "#nowhere");
        doc.append_child(doc.body(), link);

        let mut page = controller();
        page.attach(&mut doc);
        let reaction = page.dispatch(&mut doc, Event::Click { target: link, x: 0.0, y: 0.0 });
        assert!(reaction.default_prevented);
        assert!(!page.is_scroll_animating());
        assert_eq!(page.scroll_y(), 0.0);
    }

    #[test]
    fn test_host_scroll_cancels_animation() {
        let mut doc = minimal_page();
        let link = doc.create_element("a");
        doc.set_attr(link, "href", "#services");
        doc.append_child(doc.body(), link);

        let mut page = controller();
        page.attach(&mut doc);
        page.dispatch(&mut doc, Event::Click { target: link, x: 0.0, y: 0.0 });
        page.dispatch(&mut doc, Event::Scroll { y: 60.0 });
        assert!(!page.is_scroll_animating());
        assert_eq!(page.scroll_y(), 60.0);
    }

    #[test]
    fn test_escape_closes_menu() {
        let mut doc = minimal_page();
        let toggle = doc.query(".hamburger").unwrap();
        let mut page = controller();
        page.attach(&mut doc);

        page.dispatch(&mut doc, Event::Click { target: toggle, x: 0.0, y: 0.0 });
        assert!(page.is_nav_open());
        page.dispatch(&mut doc, Event::KeyDown { key: Key::Escape, shift: false });
        assert!(!page.is_nav_open());
        assert_eq!(doc.attr(toggle, "aria-expanded"), Some("false"));
    }

    #[test]
    fn test_loaded_registers_worker() {
        let mut doc = minimal_page();
        let mut page = controller();
        page.attach(&mut doc);
        page.dispatch(
            &mut doc,
            Event::Loaded { timing: LoadTiming::default() },
        );
        assert_eq!(page.worker_registrations().len(), 1);
    }
}
