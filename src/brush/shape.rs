//! Line, rectangle and ellipse gestures.
//!
//! While the pointer is held the shape lives only in the preview overlay;
//! each move erases the previous frame and draws the new one. On release
//! the diff against the real image is computed once and executed through
//! the history.

use tracing::debug;

use super::paint::{plan_pixels, plan_selection};
use super::{constrain, BrushInfo, Modifiers, Tip, Workspace};
use crate::buffer::Pos;
use crate::canvas::Canvas;
use crate::colour::Colour;
use crate::history::Action;
use crate::interp::{DiscreteInterpolator, Interpolator, ShapeKind};

impl BrushInfo {
    /// What the preview shows for each shape pixel.
    fn preview_colour(&self, ws: &Workspace) -> Colour {
        match self.tip {
            Tip::Pencil => self.colour(self.button).to_colour(),
            Tip::Pen => self.colour(self.button).to_colour().with_alpha(255),
            Tip::Eraser | Tip::Select => ws.config.preview_marker,
        }
    }

    pub(super) fn shape_start(&mut self, ws: &mut Workspace, kind: ShapeKind, pos: Pos) {
        self.shape = Some(Interpolator::new(kind, pos, pos));
        self.redraw_shape(ws);
    }

    pub(super) fn shape_drag(
        &mut self,
        ws: &mut Workspace,
        kind: ShapeKind,
        pos: Pos,
        modifiers: Modifiers,
    ) {
        let Some(start) = self.starting_pos else {
            return;
        };
        let finish = if modifiers.shift {
            constrain(kind, start, pos)
        } else {
            pos
        };
        let Some(shape) = self.shape.as_mut() else {
            return;
        };
        if shape.finish() == finish {
            return;
        }
        shape.sync_with_endpoints(start, finish);
        self.redraw_shape(ws);
    }

    fn redraw_shape(&mut self, ws: &mut Workspace) {
        self.clear_preview(ws);
        let Some(shape) = self.shape.clone() else {
            return;
        };
        let colour = self.preview_colour(ws);
        let masked = self.tip != Tip::Select;
        for pos in shape.points() {
            if masked && !ws.canvas.selection.point_valid(pos) {
                continue;
            }
            self.draw_preview(ws, pos, colour);
        }
    }

    pub(super) fn shape_submit(&mut self, ws: &mut Workspace) -> Option<String> {
        self.clear_preview(ws);
        let shape = self.shape.take()?;
        let label = self.label();

        let action: Box<dyn Action<Canvas>> = if self.tip == Tip::Select {
            let mode = self.select_mode();
            let diff = plan_selection(ws.canvas, shape.points(), mode, label.clone());
            if diff.is_empty() {
                return None;
            }
            Box::new(diff)
        } else {
            let ink = self.colour(self.button).rgba();
            let diff = plan_pixels(
                ws.canvas,
                shape.points(),
                self.tip,
                ink,
                ws.config.eraser_background,
                label.clone(),
            );
            if diff.is_empty() {
                return None;
            }
            self.brushing_bbox = diff.bbox();
            Box::new(diff)
        };

        debug!(shape = %shape.kind(), len = shape.len(), "shape applied");
        ws.history.execute(&mut *ws.canvas, action);
        Some(label)
    }
}
