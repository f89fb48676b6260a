//! Input events
//!
//! The synthetic events a host feeds into the controller, and the reaction
//! it gets back. Coordinates are viewport-relative, matching what a real
//! input layer would report.

use verve_dom::NodeId;

use crate::perf::LoadTiming;

/// Key identity for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Tab,
    Other,
}

/// A synthetic input event.
#[derive(Debug, Clone)]
pub enum Event {
    /// Pointer press on an element, at viewport coordinates.
    Click { target: NodeId, x: f32, y: f32 },
    /// Key press with the shift modifier state.
    KeyDown { key: Key, shift: bool },
    /// Pointer moved onto an element.
    PointerEnter { target: NodeId },
    /// Pointer moved off an element.
    PointerLeave { target: NodeId },
    /// The host scrolled the page to a new vertical position.
    Scroll { y: f32 },
    /// Submission requested on a form element.
    Submit { form: NodeId },
    /// An image resource failed to load.
    ImageError { target: NodeId },
    /// The page finished loading.
    Loaded { timing: LoadTiming },
}

/// What the controller decided about an event.
#[derive(Debug, Default, Clone, Copy)]
pub struct Reaction {
    /// The host should suppress its own default handling.
    pub default_prevented: bool,
}

impl Reaction {
    pub(crate) fn prevent(&mut self) {
        self.default_prevented = true;
    }
}
