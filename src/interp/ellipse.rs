use std::collections::{BTreeMap, HashSet};

use super::DiscreteInterpolator;
use crate::buffer::{Pos, Rect};

/// Quadrant geometry of an ellipse inscribed in a bounding box.
///
/// Boxes with an even pixel width (or height) have two centre columns
/// (rows); `left`/`right` (`top`/`bottom`) are those two centres and the
/// quadrants are mirrored around them. Odd sizes have `left == right`.
struct Frame {
    left: i32,
    right: i32,
    top: i32,
    bottom: i32,
    rx: i32,
    ry: i32,
}

impl Frame {
    fn new(bbox: Rect) -> Self {
        let rx = (bbox.width() - 1) / 2;
        let ry = (bbox.height() - 1) / 2;
        Self {
            left: bbox.min_x + rx,
            right: bbox.max_x - rx,
            top: bbox.min_y + ry,
            bottom: bbox.max_y - ry,
            rx,
            ry,
        }
    }

    fn is_degenerate(&self) -> bool {
        self.rx < 1 || self.ry < 1
    }
}

/// First-quadrant arc of a circle of radius `r`, from `(0, r)` to `(r, 0)`
/// unsorted. Each octant point is reflected across the diagonal so the arc is
/// exactly symmetric under swapping axes.
fn circle_quadrant(r: i32) -> Vec<Pos> {
    let mut points = Vec::new();
    let (mut x, mut y) = (0i64, r as i64);
    let mut p = 5 - 4 * r as i64;
    while x <= y {
        points.push((x as i32, y as i32));
        points.push((y as i32, x as i32));
        if p < 0 {
            p += 8 * x + 12;
        } else {
            p += 8 * (x - y) + 20;
            y -= 1;
        }
        x += 1;
    }
    points
}

/// First-quadrant arc of an ellipse with `a >= b`, via the two-region
/// midpoint algorithm. Decision variables are scaled by 4 to stay integral.
fn wide_quadrant(a: i32, b: i32) -> Vec<Pos> {
    let (a2, b2) = ((a as i64) * (a as i64), (b as i64) * (b as i64));
    let mut points = Vec::new();
    let (mut x, mut y) = (0i64, b as i64);
    let mut dx = 0i64;
    let mut dy = 2 * a2 * y;

    // region 1: |slope| < 1, x advances every step
    let mut p = 4 * b2 - 4 * a2 * b as i64 + a2;
    while dx < dy {
        points.push((x, y));
        x += 1;
        dx += 2 * b2;
        if p < 0 {
            p += 4 * (dx + b2);
        } else {
            y -= 1;
            dy -= 2 * a2;
            p += 4 * (dx - dy + b2);
        }
    }

    // region 2: |slope| > 1, y advances every step
    let mut p = b2 * (2 * x + 1) * (2 * x + 1) + 4 * a2 * (y - 1) * (y - 1) - 4 * a2 * b2;
    while y >= 0 {
        points.push((x, y));
        y -= 1;
        dy -= 2 * a2;
        if p > 0 {
            p += 4 * (a2 - dy);
        } else {
            x += 1;
            dx += 2 * b2;
            p += 4 * (dx - dy + a2);
        }
    }

    points
        .into_iter()
        .map(|(x, y)| ((x as i32).min(a), y as i32))
        .collect()
}

fn quadrant(rx: i32, ry: i32) -> Vec<Pos> {
    let mut points = if rx == ry {
        circle_quadrant(rx)
    } else if rx > ry {
        wide_quadrant(rx, ry)
    } else {
        // tall: solve with the axes swapped
        wide_quadrant(ry, rx)
            .into_iter()
            .map(|(x, y)| (y, x))
            .collect()
    };
    points.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));
    points.dedup();
    points
}

/// Row-major enumeration of a box, used when either radius is under a pixel.
fn fill_box(bbox: Rect) -> Vec<Pos> {
    (bbox.min_y..=bbox.max_y)
        .flat_map(|y| (bbox.min_x..=bbox.max_x).map(move |x| (x, y)))
        .collect()
}

/// The closed outline loop, clockwise from the top centre.
fn outline_points(bbox: Rect) -> Vec<Pos> {
    let frame = Frame::new(bbox);
    if frame.is_degenerate() {
        return fill_box(bbox);
    }

    let arc = quadrant(frame.rx, frame.ry);
    let top_right = arc.iter().map(|&(qx, qy)| (frame.right + qx, frame.top - qy));
    let bottom_right = arc
        .iter()
        .rev()
        .map(|&(qx, qy)| (frame.right + qx, frame.bottom + qy));
    let bottom_left = arc.iter().map(|&(qx, qy)| (frame.left - qx, frame.bottom + qy));
    let top_left = arc
        .iter()
        .rev()
        .map(|&(qx, qy)| (frame.left - qx, frame.top - qy));

    let mut seen = HashSet::new();
    top_right
        .chain(bottom_right)
        .chain(bottom_left)
        .chain(top_left)
        .filter(|pos| seen.insert(*pos))
        .collect()
}

fn fill_points(bbox: Rect) -> Vec<Pos> {
    let frame = Frame::new(bbox);
    if frame.is_degenerate() {
        return fill_box(bbox);
    }

    let mut spans: BTreeMap<i32, (i32, i32)> = BTreeMap::new();
    for (x, y) in outline_points(bbox) {
        spans
            .entry(y)
            .and_modify(|(lo, hi)| {
                *lo = (*lo).min(x);
                *hi = (*hi).max(x);
            })
            .or_insert((x, x));
    }
    spans
        .into_iter()
        .flat_map(|(y, (lo, hi))| (lo..=hi).map(move |x| (x, y)))
        .collect()
}

macro_rules! ellipse_interpolator {
    ($(#[$doc:meta])* $name:ident, $compute:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            start: Pos,
            finish: Pos,
            points: Vec<Pos>,
        }

        impl $name {
            pub fn new(start: Pos, finish: Pos) -> Self {
                Self {
                    start,
                    finish,
                    points: $compute(Rect::from_corners(start, finish)),
                }
            }
        }

        impl DiscreteInterpolator for $name {
            fn start(&self) -> Pos {
                self.start
            }

            fn finish(&self) -> Pos {
                self.finish
            }

            fn len(&self) -> usize {
                self.points.len()
            }

            fn at(&self, i: usize) -> Pos {
                self.points[i.min(self.points.len() - 1)]
            }

            fn sync_with_endpoints(&mut self, start: Pos, finish: Pos) {
                if (start, finish) != (self.start, self.finish) {
                    *self = Self::new(start, finish);
                }
            }
        }
    };
}

ellipse_interpolator!(
    /// The outline of the ellipse inscribed in the anchors' bounding box.
    EllipseOutline,
    outline_points
);

ellipse_interpolator!(
    /// The filled ellipse inscribed in the anchors' bounding box, row-major.
    EllipseFill,
    fill_points
);
