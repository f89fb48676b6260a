//! Verve Page - Page behavior controller
//!
//! Drives the client-side behaviors of a marketing page without a browser:
//! navigation state, scroll effects, visibility reveals, the contact form
//! pipeline, notifications and decorative flourishes are all explicit state,
//! advanced by host-fed events and a virtual clock.

mod assets;
mod controller;
mod counters;
mod effects;
mod events;
mod focus;
mod form;
mod meta;
mod nav;
mod notify;
mod perf;
mod reveal;
mod scroll_fx;
mod worker;

pub use controller::PageController;
pub use events::{Event, Key, Reaction};
pub use form::{
    FixedDelayBackend, FormSnapshot, SubmitBackend, SubmitOutcome, ValidationError,
    is_valid_email, validate, SUBMIT_DELAY_MS,
};
pub use meta::SiteProfile;
pub use perf::LoadTiming;
pub use worker::{WorkerError, WorkerRegistration, WorkerRegistry};
