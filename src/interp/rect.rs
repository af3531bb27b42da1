use super::{direction, DiscreteInterpolator};
use crate::buffer::{Pos, Rect};

/// The one-pixel outline of the rectangle spanned by two anchors.
///
/// The walk is a closed loop starting at `start`: along the start row to the
/// finish column, along the finish column to `finish`, back along the finish
/// row, then back along the start column. Each corner is visited once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectOutline {
    start: Pos,
    finish: Pos,
}

impl RectOutline {
    pub fn new(start: Pos, finish: Pos) -> Self {
        Self { start, finish }
    }

    fn extents(&self) -> (i32, i32) {
        (
            (self.finish.0 - self.start.0).abs(),
            (self.finish.1 - self.start.1).abs(),
        )
    }

    /// The outline as four axis-aligned strips: start row, finish column,
    /// finish row, start column. Strips may overlap at the corners.
    pub fn edges(&self) -> [Rect; 4] {
        let (sx, sy) = self.start;
        let (fx, fy) = self.finish;
        [
            Rect::from_corners((sx, sy), (fx, sy)),
            Rect::from_corners((fx, sy), (fx, fy)),
            Rect::from_corners((sx, fy), (fx, fy)),
            Rect::from_corners((sx, sy), (sx, fy)),
        ]
    }
}

impl DiscreteInterpolator for RectOutline {
    fn start(&self) -> Pos {
        self.start
    }

    fn finish(&self) -> Pos {
        self.finish
    }

    fn len(&self) -> usize {
        match self.extents() {
            (0, dh) => dh as usize + 1,
            (dw, 0) => dw as usize + 1,
            (dw, dh) => 2 * (dw + dh) as usize,
        }
    }

    fn at(&self, i: usize) -> Pos {
        let (sx, sy) = self.start;
        let (fx, fy) = self.finish;
        let gx = direction(fx - sx);
        let gy = direction(fy - sy);
        let i = i.min(self.len() - 1) as i32;

        let (dw, dh) = self.extents();
        if dw == 0 {
            return (sx, sy + gy * i);
        }
        if dh == 0 {
            return (sx + gx * i, sy);
        }

        if i < dw {
            (sx + gx * i, sy)
        } else if i < dw + dh {
            (fx, sy + gy * (i - dw))
        } else if i < 2 * dw + dh {
            (fx - gx * (i - dw - dh), fy)
        } else {
            (sx, fy - gy * (i - 2 * dw - dh))
        }
    }

    fn sync_with_endpoints(&mut self, start: Pos, finish: Pos) {
        self.start = start;
        self.finish = finish;
    }
}

/// Every pixel of the rectangle spanned by two anchors, row by row from `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectFill {
    start: Pos,
    finish: Pos,
}

impl RectFill {
    pub fn new(start: Pos, finish: Pos) -> Self {
        Self { start, finish }
    }

    fn row_len(&self) -> usize {
        (self.finish.0 - self.start.0).unsigned_abs() as usize + 1
    }
}

impl DiscreteInterpolator for RectFill {
    fn start(&self) -> Pos {
        self.start
    }

    fn finish(&self) -> Pos {
        self.finish
    }

    fn len(&self) -> usize {
        self.row_len() * ((self.finish.1 - self.start.1).unsigned_abs() as usize + 1)
    }

    fn at(&self, i: usize) -> Pos {
        let i = i.min(self.len() - 1);
        let w = self.row_len();
        let gx = direction(self.finish.0 - self.start.0);
        let gy = direction(self.finish.1 - self.start.1);
        (
            self.start.0 + gx * (i % w) as i32,
            self.start.1 + gy * (i / w) as i32,
        )
    }

    fn sync_with_endpoints(&mut self, start: Pos, finish: Pos) {
        self.start = start;
        self.finish = finish;
    }
}
