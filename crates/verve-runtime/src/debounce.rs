//! Debouncing
//!
//! Collapses a burst of signals into one, delivered after a quiet period.

use crate::Millis;

/// Quiet-period gate over the virtual clock
#[derive(Debug)]
pub struct Debouncer {
    quiet: Millis,
    last_signal: Option<Millis>,
}

impl Debouncer {
    /// Create a debouncer with the given quiet period in ms
    pub fn new(quiet: Millis) -> Self {
        Self {
            quiet,
            last_signal: None,
        }
    }

    /// Record a signal at `now`, restarting the quiet period
    pub fn signal(&mut self, now: Millis) {
        self.last_signal = Some(now);
    }

    /// Report (once) whether the quiet period has passed since the last signal
    pub fn ready(&mut self, now: Millis) -> bool {
        match self.last_signal {
            Some(at) if now >= at + self.quiet => {
                self.last_signal = None;
                true
            }
            _ => false,
        }
    }

    /// Check if a signal is waiting to be delivered
    pub fn is_armed(&self) -> bool {
        self.last_signal.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_collapses_to_one() {
        let mut d = Debouncer::new(100);
        d.signal(0);
        d.signal(40);
        d.signal(80);

        assert!(!d.ready(150)); // only 70ms after the last signal
        assert!(d.ready(180));
        assert!(!d.ready(300)); // delivered once
    }

    #[test]
    fn test_idle_is_never_ready() {
        let mut d = Debouncer::new(100);
        assert!(!d.is_armed());
        assert!(!d.ready(1000));
    }
}
