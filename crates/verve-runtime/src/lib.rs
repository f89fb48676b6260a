//! Verve Runtime - Deterministic time substrate
//!
//! Virtual-clock timers, debouncing and viewport visibility detection. The
//! host owns the clock: it passes absolute milliseconds into `advance`/`sweep`
//! and everything fires in a reproducible order.

mod debounce;
mod intersection;
mod timers;

pub use debounce::Debouncer;
pub use intersection::{IntersectionCrossing, IntersectionWatcher};
pub use timers::{TimerId, TimerQueue};

/// Milliseconds on the host-supplied virtual clock
pub type Millis = u64;
