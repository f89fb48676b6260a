//! Image handling
//!
//! Deferred image loading driven by visibility, and the hide-on-error
//! fallback for broken images.

use verve_dom::{Document, NodeId, Viewport};
use verve_runtime::IntersectionWatcher;

pub(crate) struct LazyImages {
    watcher: IntersectionWatcher,
}

impl Default for LazyImages {
    fn default() -> Self {
        Self { watcher: IntersectionWatcher::new(vec![0.0]) }
    }
}

impl LazyImages {
    pub(crate) fn attach(doc: &Document) -> Self {
        let mut lazy = Self::default();
        for img in doc.query_all("img[data-src]") {
            lazy.watcher.observe(img);
        }
        lazy
    }

    /// Promote `data-src` to `src` for any image that touched the viewport.
    pub(crate) fn sweep(&mut self, doc: &mut Document, viewport: &Viewport) {
        for crossing in self.watcher.sweep(doc, viewport) {
            if !crossing.is_intersecting {
                continue;
            }
            let img = crossing.target;
            if let Some(src) = doc.attr(img, "data-src").map(str::to_string) {
                doc.set_attr(img, "src", &src);
                tracing::debug!("Lazy image loaded: {}", src);
            }
            doc.remove_class(img, "lazy");
            self.watcher.unobserve(img);
        }
    }
}

/// Hide an image that failed to load so no broken glyph shows.
pub(crate) fn hide_broken_image(doc: &mut Document, target: NodeId) {
    if doc.tag(target) != Some("img") {
        return;
    }
    doc.set_style(target, "display", "none");
    let src = doc.attr(target, "src").unwrap_or("").to_string();
    tracing::warn!("Image failed to load: {}", src);
}
