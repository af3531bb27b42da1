//! Discrete shape interpolators.
//!
//! Each interpolator turns a drag gesture's `start` and `finish` anchors into
//! an ordered sequence of integer pixels. `len()` is always at least 1, so a
//! zero-size gesture still yields its single anchor point.

mod ellipse;
mod line;
mod rect;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::buffer::{Pos, Rect};
use crate::error::{PaintError, Result};

pub use ellipse::{EllipseFill, EllipseOutline};
pub use line::Line;
pub use rect::{RectFill, RectOutline};

/// Common contract of every shape interpolator.
pub trait DiscreteInterpolator {
    fn start(&self) -> Pos;
    fn finish(&self) -> Pos;

    /// Number of pixels in the shape; never zero.
    fn len(&self) -> usize;

    /// The `i`th pixel. Indices past the end return the last pixel.
    fn at(&self, i: usize) -> Pos;

    /// Move the anchors and recompute.
    fn sync_with_endpoints(&mut self, start: Pos, finish: Pos);

    fn bounding_box(&self) -> Rect {
        Rect::from_corners(self.start(), self.finish())
    }

    fn points(&self) -> Points<'_, Self>
    where
        Self: Sized,
    {
        Points {
            interp: self,
            index: 0,
            len: self.len(),
        }
    }
}

/// Iterator over an interpolator's pixels in order.
pub struct Points<'a, I> {
    interp: &'a I,
    index: usize,
    len: usize,
}

impl<I: DiscreteInterpolator> Iterator for Points<'_, I> {
    type Item = Pos;

    fn next(&mut self) -> Option<Pos> {
        if self.index >= self.len {
            return None;
        }
        let pos = self.interp.at(self.index);
        self.index += 1;
        Some(pos)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.index;
        (remaining, Some(remaining))
    }
}

/// Sign of a delta, with zero treated as positive.
fn direction(delta: i32) -> i32 {
    if delta < 0 {
        -1
    } else {
        1
    }
}

/// The five shape kinds a drag gesture can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeKind {
    Line,
    RectOutline,
    RectFill,
    EllipseOutline,
    EllipseFill,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Line,
        ShapeKind::RectOutline,
        ShapeKind::RectFill,
        ShapeKind::EllipseOutline,
        ShapeKind::EllipseFill,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Line => "line",
            ShapeKind::RectOutline => "rect-outline",
            ShapeKind::RectFill => "rect-fill",
            ShapeKind::EllipseOutline => "ellipse-outline",
            ShapeKind::EllipseFill => "ellipse-fill",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeKind {
    type Err = PaintError;

    fn from_str(s: &str) -> Result<Self> {
        ShapeKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| PaintError::Parse {
                message: format!("unknown shape '{s}'"),
                help: Some(
                    "expected one of: line, rect-outline, rect-fill, ellipse-outline, ellipse-fill"
                        .to_string(),
                ),
            })
    }
}

/// Any of the five interpolators, chosen at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interpolator {
    Line(Line),
    RectOutline(RectOutline),
    RectFill(RectFill),
    EllipseOutline(EllipseOutline),
    EllipseFill(EllipseFill),
}

impl Interpolator {
    pub fn new(kind: ShapeKind, start: Pos, finish: Pos) -> Self {
        match kind {
            ShapeKind::Line => Interpolator::Line(Line::new(start, finish)),
            ShapeKind::RectOutline => Interpolator::RectOutline(RectOutline::new(start, finish)),
            ShapeKind::RectFill => Interpolator::RectFill(RectFill::new(start, finish)),
            ShapeKind::EllipseOutline => {
                Interpolator::EllipseOutline(EllipseOutline::new(start, finish))
            }
            ShapeKind::EllipseFill => Interpolator::EllipseFill(EllipseFill::new(start, finish)),
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Interpolator::Line(_) => ShapeKind::Line,
            Interpolator::RectOutline(_) => ShapeKind::RectOutline,
            Interpolator::RectFill(_) => ShapeKind::RectFill,
            Interpolator::EllipseOutline(_) => ShapeKind::EllipseOutline,
            Interpolator::EllipseFill(_) => ShapeKind::EllipseFill,
        }
    }

    fn inner(&self) -> &dyn DiscreteInterpolator {
        match self {
            Interpolator::Line(i) => i as &dyn DiscreteInterpolator,
            Interpolator::RectOutline(i) => i as &dyn DiscreteInterpolator,
            Interpolator::RectFill(i) => i as &dyn DiscreteInterpolator,
            Interpolator::EllipseOutline(i) => i as &dyn DiscreteInterpolator,
            Interpolator::EllipseFill(i) => i as &dyn DiscreteInterpolator,
        }
    }
}

impl DiscreteInterpolator for Interpolator {
    fn start(&self) -> Pos {
        self.inner().start()
    }

    fn finish(&self) -> Pos {
        self.inner().finish()
    }

    fn len(&self) -> usize {
        self.inner().len()
    }

    fn at(&self, i: usize) -> Pos {
        self.inner().at(i)
    }

    fn sync_with_endpoints(&mut self, start: Pos, finish: Pos) {
        match self {
            Interpolator::Line(i) => i.sync_with_endpoints(start, finish),
            Interpolator::RectOutline(i) => i.sync_with_endpoints(start, finish),
            Interpolator::RectFill(i) => i.sync_with_endpoints(start, finish),
            Interpolator::EllipseOutline(i) => i.sync_with_endpoints(start, finish),
            Interpolator::EllipseFill(i) => i.sync_with_endpoints(start, finish),
        }
    }
}
