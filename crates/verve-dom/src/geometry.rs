//! Geometry primitives
//!
//! Page-coordinate rectangles plus the scrolling viewport. Layout itself is
//! the host's job; the engine only consumes the rectangles it is given.

/// Axis-aligned rectangle in page coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Calculate intersection with another rect
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right > x && bottom > y {
            Some(Rect {
                x,
                y,
                width: right - x,
                height: bottom - y,
            })
        } else {
            None
        }
    }

    /// Fraction of this rect covered by `clip` (0.0 when this rect is empty)
    pub fn visible_ratio(&self, clip: &Rect) -> f32 {
        if self.area() <= 0.0 {
            return 0.0;
        }
        self.intersect(clip)
            .map(|i| i.area() / self.area())
            .unwrap_or(0.0)
    }
}

/// Scrolling viewport over the page
#[derive(Debug, Clone, Copy, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Vertical scroll offset in page coordinates
    pub scroll_y: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            scroll_y: 0.0,
        }
    }

    /// The page region currently on screen
    #[inline]
    pub fn page_rect(&self) -> Rect {
        Rect {
            x: 0.0,
            y: self.scroll_y,
            width: self.width,
            height: self.height,
        }
    }
}
