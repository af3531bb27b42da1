//! Tool x tip dispatch and shift constraints.

use super::{Tip, Tool};
use crate::buffer::Pos;
use crate::interp::ShapeKind;

/// What a gesture does, resolved from the active tool and tip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Camera: pans the view, never touches the canvas.
    Pan,
    /// Paint: writes each pixel the pointer crosses.
    Freehand(Tip),
    /// Line, rectangles, ellipses: previewed while dragging, applied on release.
    Shape(ShapeKind, Tip),
    /// Bucket fill, or magic wand with the select tip.
    Bucket(Tip),
}

impl Operation {
    pub fn tip(self) -> Option<Tip> {
        match self {
            Operation::Pan => None,
            Operation::Freehand(tip) | Operation::Shape(_, tip) | Operation::Bucket(tip) => {
                Some(tip)
            }
        }
    }
}

/// Every (tool, tip) pair maps to exactly one operation.
pub fn resolve(tool: Tool, tip: Tip) -> Operation {
    match tool {
        Tool::Camera => Operation::Pan,
        Tool::Paint => Operation::Freehand(tip),
        Tool::Line => Operation::Shape(ShapeKind::Line, tip),
        Tool::RectOutline => Operation::Shape(ShapeKind::RectOutline, tip),
        Tool::RectFill => Operation::Shape(ShapeKind::RectFill, tip),
        Tool::EllipseOutline => Operation::Shape(ShapeKind::EllipseOutline, tip),
        Tool::EllipseFill => Operation::Shape(ShapeKind::EllipseFill, tip),
        Tool::BucketFill => Operation::Bucket(tip),
    }
}

fn direction(delta: i32) -> i32 {
    if delta < 0 {
        -1
    } else {
        1
    }
}

/// Apply the shift constraint to a drag endpoint.
///
/// Lines snap to whichever axis the drag is longer along. Rectangles and
/// ellipses become squares and circles sized by the longer side, keeping
/// the drag direction on both axes.
pub fn constrain(kind: ShapeKind, start: Pos, pos: Pos) -> Pos {
    let dx = pos.0 - start.0;
    let dy = pos.1 - start.1;
    match kind {
        ShapeKind::Line if dx.abs() >= dy.abs() => (pos.0, start.1),
        ShapeKind::Line => (start.0, pos.1),
        _ => {
            let side = dx.abs().max(dy.abs());
            (start.0 + direction(dx) * side, start.1 + direction(dy) * side)
        }
    }
}
