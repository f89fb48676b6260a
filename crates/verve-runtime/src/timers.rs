//! Timer queue
//!
//! setTimeout/setInterval semantics over a virtual clock. Timers carry typed
//! actions instead of callbacks, so firing is just returning values and the
//! owner decides what each action means.

use crate::Millis;

/// Timer handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u32);

#[derive(Debug)]
struct Timer<T> {
    id: TimerId,
    action: T,
    /// Absolute fire time
    due: Millis,
    /// Re-arm period for intervals
    period: Option<Millis>,
}

/// Timer queue over a virtual clock
#[derive(Debug)]
pub struct TimerQueue<T> {
    timers: Vec<Timer<T>>,
    next_id: u32,
    /// Clock position of the last `advance`
    now: Millis,
}

impl<T: Clone> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            timers: Vec::new(),
            next_id: 1,
            now: 0,
        }
    }

    /// Current clock position
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Schedule a one-shot action `delay` ms from the current clock
    pub fn set_timeout(&mut self, action: T, delay: Millis) -> TimerId {
        self.schedule(action, delay, None)
    }

    /// Schedule a repeating action every `period` ms (clamped to >= 1)
    pub fn set_interval(&mut self, action: T, period: Millis) -> TimerId {
        let period = period.max(1);
        self.schedule(action, period, Some(period))
    }

    fn schedule(&mut self, action: T, delay: Millis, period: Option<Millis>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            action,
            due: self.now + delay,
            period,
        });
        id
    }

    /// Cancel a timer (no-op when already fired or unknown)
    pub fn clear(&mut self, id: TimerId) {
        self.timers.retain(|t| t.id != id);
    }

    /// Move the clock forward and return every action due by `now`.
    ///
    /// Firings come back ordered by (due time, schedule order). An interval
    /// contributes one firing per elapsed period and stays queued. The clock
    /// never moves backwards.
    pub fn advance(&mut self, now: Millis) -> Vec<T> {
        let now = now.max(self.now);
        self.now = now;

        let mut fired: Vec<(Millis, u32, T)> = Vec::new();
        for timer in self.timers.iter_mut() {
            while timer.due <= now {
                fired.push((timer.due, timer.id.0, timer.action.clone()));
                match timer.period {
                    Some(p) => timer.due += p,
                    None => break,
                }
            }
        }
        self.timers.retain(|t| t.period.is_some() || t.due > now);

        fired.sort_by_key(|&(due, id, _)| (due, id));
        fired.into_iter().map(|(_, _, action)| action).collect()
    }

    /// Check if there are pending timers
    pub fn has_pending(&self) -> bool {
        !self.timers.is_empty()
    }

    /// Milliseconds from the current clock to the next firing
    pub fn time_until_next(&self) -> Option<Millis> {
        self.timers
            .iter()
            .map(|t| t.due.saturating_sub(self.now))
            .min()
    }
}

impl<T: Clone> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_fires_once() {
        let mut q: TimerQueue<&str> = TimerQueue::new();
        q.set_timeout("a", 100);

        assert!(q.advance(99).is_empty());
        assert_eq!(q.advance(100), vec!["a"]);
        assert!(q.advance(500).is_empty());
        assert!(!q.has_pending());
    }

    #[test]
    fn test_firing_order_is_due_then_schedule() {
        let mut q: TimerQueue<&str> = TimerQueue::new();
        q.set_timeout("late", 300);
        q.set_timeout("early", 100);
        q.set_timeout("also-early", 100);

        assert_eq!(q.advance(300), vec!["early", "also-early", "late"]);
    }

    #[test]
    fn test_clear_prevents_firing() {
        let mut q: TimerQueue<&str> = TimerQueue::new();
        let keep = q.set_timeout("keep", 50);
        let gone = q.set_timeout("gone", 50);
        q.clear(gone);

        assert_eq!(q.advance(60), vec!["keep"]);
        q.clear(keep); // already fired, no-op
    }

    #[test]
    fn test_interval_fires_per_period() {
        let mut q: TimerQueue<u32> = TimerQueue::new();
        let id = q.set_interval(7, 30);

        assert_eq!(q.advance(95), vec![7, 7, 7]); // 30, 60, 90
        assert_eq!(q.advance(120), vec![7]); // 120
        assert!(q.has_pending());

        q.clear(id);
        assert!(q.advance(1000).is_empty());
    }

    #[test]
    fn test_interval_period_clamped() {
        let mut q: TimerQueue<u32> = TimerQueue::new();
        q.set_interval(1, 0);
        assert_eq!(q.advance(3).len(), 3);
    }

    #[test]
    fn test_schedule_after_advance_uses_queue_clock() {
        let mut q: TimerQueue<&str> = TimerQueue::new();
        q.advance(1000);
        q.set_timeout("x", 100);

        assert!(q.advance(1099).is_empty());
        assert_eq!(q.advance(1100), vec!["x"]);
    }

    #[test]
    fn test_clock_never_rewinds() {
        let mut q: TimerQueue<&str> = TimerQueue::new();
        q.advance(500);
        q.set_timeout("x", 10);
        assert!(q.advance(100).is_empty()); // clamped to 500
        assert_eq!(q.advance(510), vec!["x"]);
    }

    #[test]
    fn test_time_until_next() {
        let mut q: TimerQueue<&str> = TimerQueue::new();
        assert_eq!(q.time_until_next(), None);

        q.set_timeout("a", 250);
        q.set_timeout("b", 100);
        assert_eq!(q.time_until_next(), Some(100));

        q.advance(100);
        assert_eq!(q.time_until_next(), Some(150));
    }
}
