//! Load timing
//!
//! Navigation timing as reported by the host when the page finishes loading.

/// Millisecond timestamps from the host's navigation timeline.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoadTiming {
    pub navigation_start: f64,
    pub load_event_start: f64,
    pub load_event_end: f64,
}

impl LoadTiming {
    /// Duration of the load event, rounded to whole milliseconds.
    pub fn load_delta_ms(&self) -> i64 {
        (self.load_event_end - self.load_event_start).round() as i64
    }
}

pub(crate) fn log_load(timing: &LoadTiming) {
    tracing::info!("Page load time: {} ms", timing.load_delta_ms());
}
