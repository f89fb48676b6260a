//! Viewport intersection detection
//!
//! Threshold-crossing visibility reports for watched nodes, computed from the
//! document's host-assigned geometry. The watcher only detects; any one-shot
//! policy (stop after first reveal) belongs to the caller.

use std::collections::BTreeMap;

use verve_dom::{Document, NodeId, Viewport};

/// A visibility report for one watched node
#[derive(Debug, Clone, Copy)]
pub struct IntersectionCrossing {
    pub target: NodeId,
    /// Fraction of the node inside the viewport (0.0 to 1.0)
    pub ratio: f32,
    pub is_intersecting: bool,
}

/// Watches nodes for threshold crossings against the viewport
#[derive(Debug)]
pub struct IntersectionWatcher {
    thresholds: Vec<f32>,
    /// Last reported ratio per node (None until the first sweep)
    watched: BTreeMap<NodeId, Option<f32>>,
}

impl IntersectionWatcher {
    /// Create a watcher firing at the given ratio thresholds
    pub fn new(thresholds: Vec<f32>) -> Self {
        let thresholds = if thresholds.is_empty() {
            vec![0.0]
        } else {
            thresholds
        };
        Self {
            thresholds,
            watched: BTreeMap::new(),
        }
    }

    /// Start watching a node
    pub fn observe(&mut self, target: NodeId) {
        self.watched.entry(target).or_insert(None);
    }

    /// Stop watching a node
    pub fn unobserve(&mut self, target: NodeId) {
        self.watched.remove(&target);
    }

    /// Stop watching everything
    pub fn disconnect(&mut self) {
        self.watched.clear();
    }

    /// Check whether a node is being watched
    pub fn is_observing(&self, target: NodeId) -> bool {
        self.watched.contains_key(&target)
    }

    /// Number of watched nodes
    pub fn len(&self) -> usize {
        self.watched.len()
    }

    pub fn is_empty(&self) -> bool {
        self.watched.is_empty()
    }

    /// Recompute visibility and return crossings, in node creation order.
    ///
    /// A node reports when its ratio moved across any threshold since the
    /// last report. The first sweep after `observe` always reports, so
    /// callers see the initial state. Nodes without geometry are skipped.
    pub fn sweep(&mut self, doc: &Document, viewport: &Viewport) -> Vec<IntersectionCrossing> {
        let clip = viewport.page_rect();
        let mut crossings = Vec::new();

        for (&target, last_ratio) in self.watched.iter_mut() {
            let Some(rect) = doc.rect(target) else {
                continue;
            };
            let ratio = rect.visible_ratio(&clip);

            let should_notify = match *last_ratio {
                Some(lr) => self
                    .thresholds
                    .iter()
                    .any(|&t| (lr < t && ratio >= t) || (lr >= t && ratio < t)),
                None => true,
            };

            if should_notify {
                *last_ratio = Some(ratio);
                crossings.push(IntersectionCrossing {
                    target,
                    ratio,
                    is_intersecting: ratio > 0.0,
                });
            }
        }

        if !crossings.is_empty() {
            tracing::debug!("Visibility sweep produced {} crossings", crossings.len());
        }
        crossings
    }
}
