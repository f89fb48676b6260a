//! Stat counters
//!
//! Numbers in the stats strip count up from zero when they scroll into
//! view, then snap back to their exact original text so no rounding
//! artifact survives the animation.

use std::collections::HashMap;

use verve_dom::{Document, NodeId, Viewport};
use verve_runtime::{IntersectionWatcher, Millis, TimerId, TimerQueue};

use crate::controller::Effect;

const STATS_SELECTOR: &str = ".stat-number, .metric-value";
const TRIGGER_THRESHOLD: f32 = 0.5;
const TICKS: f64 = 60.0;
pub(crate) const TICK_MS: Millis = 30;

struct CounterAnim {
    target: f64,
    increment: f64,
    current: f64,
    original: String,
    timer: TimerId,
}

pub(crate) struct CounterSet {
    watcher: IntersectionWatcher,
    active: HashMap<NodeId, CounterAnim>,
}

impl Default for CounterSet {
    fn default() -> Self {
        Self {
            watcher: IntersectionWatcher::new(vec![TRIGGER_THRESHOLD]),
            active: HashMap::new(),
        }
    }
}

impl CounterSet {
    pub(crate) fn attach(doc: &Document) -> Self {
        let mut counters = Self::default();
        for node in doc.query_all(STATS_SELECTOR) {
            counters.watcher.observe(node);
        }
        counters
    }

    /// Start counting any stat that just became half visible.
    pub(crate) fn sweep(
        &mut self,
        doc: &mut Document,
        viewport: &Viewport,
        timers: &mut TimerQueue<Effect>,
    ) {
        for crossing in self.watcher.sweep(doc, viewport) {
            if crossing.ratio < TRIGGER_THRESHOLD {
                continue;
            }
            let target = crossing.target;
            // Each stat animates at most once, countable or not.
            self.watcher.unobserve(target);
            let original = doc.text_content(target);
            let Some(value) = parse_stat(&original) else {
                continue;
            };
            if value <= 0.0 {
                continue;
            }
            let timer = timers.set_interval(Effect::CounterTick { target }, TICK_MS);
            self.active.insert(
                target,
                CounterAnim {
                    target: value,
                    increment: value / TICKS,
                    current: 0.0,
                    original,
                    timer,
                },
            );
        }
    }

    /// One animation tick for a stat. Ticks for finished stats are ignored.
    pub(crate) fn tick(
        &mut self,
        doc: &mut Document,
        target: NodeId,
        timers: &mut TimerQueue<Effect>,
    ) {
        let Some(anim) = self.active.get_mut(&target) else {
            return;
        };
        anim.current += anim.increment;
        if anim.current >= anim.target {
            doc.set_text_content(target, &anim.original);
            timers.clear(anim.timer);
            self.active.remove(&target);
        } else {
            let shown = format_progress(anim.current);
            let text = replace_first_number(&anim.original, &shown);
            doc.set_text_content(target, &text);
        }
    }

    #[cfg(test)]
    fn is_animating(&self, target: NodeId) -> bool {
        self.active.contains_key(&target)
    }
}

/// Pull the leading numeric value out of a stat label, ignoring currency
/// signs and suffixes ("$1.2M" reads as 1.2, "500+" as 500).
fn parse_stat(text: &str) -> Option<f64> {
    let mut digits = String::new();
    let mut seen_dot = false;
    for c in text.chars().filter(|c| c.is_ascii_digit() || *c == '.') {
        if c == '.' {
            if seen_dot {
                break;
            }
            seen_dot = true;
        }
        digits.push(c);
    }
    digits.parse().ok()
}

/// Render an in-flight value truncated to one decimal place, dropping the
/// decimal entirely when it is zero.
fn format_progress(value: f64) -> String {
    let scaled = (value * 10.0).floor();
    let whole = (scaled / 10.0).trunc() as i64;
    let tenths = (scaled as i64).rem_euclid(10);
    if tenths == 0 {
        whole.to_string()
    } else {
        format!("{}.{}", whole, tenths)
    }
}

/// Substitute the first digit run in `original` with `shown`, keeping any
/// prefix and suffix decoration.
fn replace_first_number(original: &str, shown: &str) -> String {
    let is_numeric = |c: char| c.is_ascii_digit() || c == '.';
    let Some(start) = original.find(is_numeric) else {
        return original.to_string();
    };
    let end = original[start..]
        .find(|c: char| !is_numeric(c))
        .map(|i| start + i)
        .unwrap_or(original.len());
    format!("{}{}{}", &original[..start], shown, &original[end..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use verve_dom::Rect;

    fn stat_page(text: &str) -> (Document, NodeId) {
        let mut doc = Document::default();
        let stat = doc.create_element("span");
        doc.set_attr(stat, "class", "stat-number");
        doc.set_text_content(stat, text);
        doc.append_child(doc.body(), stat);
        doc.set_rect(stat, Rect::new(0.0, 100.0, 200.0, 50.0));
        (doc, stat)
    }

    #[test]
    fn test_parse_stat() {
        assert_eq!(parse_stat("500+"), Some(500.0));
        assert_eq!(parse_stat("$1.2M"), Some(1.2));
        assert_eq!(parse_stat("98.5%"), Some(98.5));
        assert_eq!(parse_stat("24/7"), Some(247.0));
        assert_eq!(parse_stat("N/A"), None);
        assert_eq!(parse_stat(""), None);
    }

    #[test]
    fn test_format_progress() {
        assert_eq!(format_progress(8.25), "8.2");
        assert_eq!(format_progress(500.0), "500");
        assert_eq!(format_progress(0.04), "0");
        assert_eq!(format_progress(97.99), "97.9");
    }

    #[test]
    fn test_replace_first_number() {
        assert_eq!(replace_first_number("$1.2M", "0.4"), "$0.4M");
        assert_eq!(replace_first_number("500+", "62"), "62+");
        assert_eq!(replace_first_number("plain", "1"), "plain");
    }

    #[test]
    fn test_counter_runs_and_snaps_to_original() {
        let (mut doc, stat) = stat_page("500+");
        let viewport = Viewport::new(1280.0, 720.0);
        let mut timers: TimerQueue<Effect> = TimerQueue::new();
        let mut counters = CounterSet::attach(&doc);

        counters.sweep(&mut doc, &viewport, &mut timers);
        assert!(counters.is_animating(stat));

        // First tick shows a partial value with the suffix preserved
        counters.tick(&mut doc, stat, &mut timers);
        assert_eq!(doc.text_content(stat), "8.3+");

        for _ in 0..70 {
            counters.tick(&mut doc, stat, &mut timers);
        }
        assert_eq!(doc.text_content(stat), "500+");
        assert!(!counters.is_animating(stat));
        assert!(!timers.has_pending());
    }

    #[test]
    fn test_non_numeric_stat_skipped() {
        let (mut doc, stat) = stat_page("N/A");
        let viewport = Viewport::new(1280.0, 720.0);
        let mut timers: TimerQueue<Effect> = TimerQueue::new();
        let mut counters = CounterSet::attach(&doc);

        counters.sweep(&mut doc, &viewport, &mut timers);
        assert!(!counters.is_animating(stat));
        assert!(!timers.has_pending());
        assert_eq!(doc.text_content(stat), "N/A");

        // The stat is off the watch list for good
        counters.sweep(&mut doc, &viewport, &mut timers);
        assert!(!counters.is_animating(stat));
    }

    #[test]
    fn test_stale_tick_ignored() {
        let (mut doc, stat) = stat_page("10");
        let mut timers: TimerQueue<Effect> = TimerQueue::new();
        let mut counters = CounterSet::default();
        counters.tick(&mut doc, stat, &mut timers);
        assert_eq!(doc.text_content(stat), "10");
    }
}
