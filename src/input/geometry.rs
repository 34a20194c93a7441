//! Screen rectangles for mouse bind hit testing

/// Axis-aligned screen rectangle
///
/// Containment is half-open: a point is inside when
/// `x <= px < x + width` and `y <= py < y + height`, so adjacent rectangles
/// never both claim their shared edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check if a point is inside this rectangle
    pub fn contains(&self, px: i16, py: i16) -> bool {
        let (px, py) = (i32::from(px), i32::from(py));
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// First column past the right edge
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// First row past the bottom edge
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}
