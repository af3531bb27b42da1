//! Integer rectangles used for bounding boxes and dirty regions.

use serde::{Deserialize, Serialize};

/// An integer pixel position `(x, y)`.
pub type Pos = (i32, i32);

/// An inclusive integer rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Rect {
    pub const fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// A one-pixel rectangle.
    pub const fn point((x, y): Pos) -> Self {
        Self::new(x, y, x, y)
    }

    /// The rectangle spanned by two corners, in either order.
    pub fn from_corners(a: Pos, b: Pos) -> Self {
        Self::new(a.0.min(b.0), a.1.min(b.1), a.0.max(b.0), a.1.max(b.1))
    }

    pub fn width(&self) -> i32 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> i32 {
        self.max_y - self.min_y + 1
    }

    pub fn area(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    pub fn contains(&self, (x, y): Pos) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    pub fn union(&self, other: Rect) -> Rect {
        Rect::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(self.min_x + dx, self.min_y + dy, self.max_x + dx, self.max_y + dy)
    }

    /// Intersect with a `width` x `height` buffer. `None` if nothing remains.
    pub fn clamp_to(&self, width: u32, height: u32) -> Option<Rect> {
        if width == 0 || height == 0 {
            return None;
        }
        let clamped = Rect::new(
            self.min_x.max(0),
            self.min_y.max(0),
            self.max_x.min(width as i32 - 1),
            self.max_y.min(height as i32 - 1),
        );
        if clamped.min_x > clamped.max_x || clamped.min_y > clamped.max_y {
            None
        } else {
            Some(clamped)
        }
    }
}

/// Grow an optional bounding box to include `pos`.
pub fn include(bbox: &mut Option<Rect>, pos: Pos) {
    let point = Rect::point(pos);
    *bbox = Some(match *bbox {
        Some(existing) => existing.union(point),
        None => point,
    });
}

/// Grow an optional bounding box to include `rect`.
pub fn include_rect(bbox: &mut Option<Rect>, rect: Rect) {
    *bbox = Some(match *bbox {
        Some(existing) => existing.union(rect),
        None => rect,
    });
}
