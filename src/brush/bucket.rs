//! Bucket fill and magic wand.

use tracing::debug;

use super::paint::{plan_pixels, plan_selection};
use super::{BrushInfo, Tip, Workspace};
use crate::buffer::Pos;
use crate::selection::flood;

impl BrushInfo {
    /// Find the region under `pos` and stage its edit; `bucket_submit` applies it.
    ///
    /// Shift flips the configured contiguity.
    pub(super) fn bucket_start(&mut self, ws: &mut Workspace, pos: Pos) {
        let contiguous = ws.config.contiguous_fill != self.modifiers.shift;
        let region = flood(&ws.canvas.buffer, pos, &ws.config.tolerance, contiguous);
        debug!(?pos, contiguous, found = region.len(), "bucket region");
        if region.is_empty() {
            return;
        }

        let label = self.label();
        if self.tip == Tip::Select {
            let diff = plan_selection(ws.canvas, region.points, self.select_mode(), label);
            if !diff.is_empty() {
                self.brushing_bbox = region.bbox;
                self.pending = Some(Box::new(diff));
            }
        } else {
            let ink = self.colour(self.button).rgba();
            let background = ws.config.eraser_background;
            let diff = plan_pixels(ws.canvas, region.points, self.tip, ink, background, label);
            if !diff.is_empty() {
                self.brushing_bbox = diff.bbox();
                self.pending = Some(Box::new(diff));
            }
        }
    }

    pub(super) fn bucket_submit(&mut self, ws: &mut Workspace) -> Option<String> {
        let action = self.pending.take()?;
        let label = action.describe();
        ws.history.execute(&mut *ws.canvas, action);
        Some(label)
    }
}

#[cfg(test)]
mod tests {
    use super::super::{Button, Modifiers, Tool};
    use super::*;
    use crate::buffer::{Channels, Rect};
    use crate::canvas::{Canvas, Preview};
    use crate::colour::Colour;
    use crate::config::EngineConfig;
    use crate::history::ActionHistory;

    /// 4x4 white with a black vertical wall at x = 1.
    fn walled() -> Canvas {
        let mut canvas = Canvas::blank(4, 4, Channels::Rgba, Colour::WHITE);
        for y in 0..4 {
            canvas.buffer.put((1, y), Colour::BLACK);
        }
        canvas
    }

    fn fill(canvas: &mut Canvas, tip: Tip, pos: Pos, modifiers: Modifiers) -> Option<String> {
        let mut preview = Preview::new(4, 4);
        let mut history = ActionHistory::default();
        let config = EngineConfig {
            primary: Colour::rgb(255, 0, 0),
            ..EngineConfig::default()
        };
        let mut ws = Workspace {
            canvas,
            preview: &mut preview,
            history: &mut history,
            config: &config,
        };
        let mut brush = BrushInfo::new(ws.config);
        brush.tool = Tool::BucketFill;
        brush.tip = tip;
        brush.start(&mut ws, pos, Button::Primary, modifiers);
        brush.submit(&mut ws)
    }

    #[test]
    fn test_contiguous_fill_stays_left_of_wall() {
        let mut canvas = walled();
        assert!(fill(&mut canvas, Tip::Pen, (0, 0), Modifiers::NONE).is_some());
        assert_eq!(canvas.buffer.get((0, 3)), Some(Colour::rgb(255, 0, 0)));
        assert_eq!(canvas.buffer.get((2, 0)), Some(Colour::WHITE));
    }

    #[test]
    fn test_shift_fills_globally() {
        let mut canvas = walled();
        fill(&mut canvas, Tip::Pen, (0, 0), Modifiers::SHIFT);
        assert_eq!(canvas.buffer.get((3, 3)), Some(Colour::rgb(255, 0, 0)));
        assert_eq!(canvas.buffer.get((1, 0)), Some(Colour::BLACK));
    }

    #[test]
    fn test_magic_wand_selects_region() {
        let mut canvas = walled();
        fill(&mut canvas, Tip::Select, (3, 0), Modifiers::NONE);
        assert_eq!(canvas.selection.len(), 8);
        assert_eq!(canvas.selection.bounding_box(), Some(Rect::new(2, 0, 3, 3)));
        assert_eq!(canvas.buffer.get((3, 0)), Some(Colour::WHITE));
    }

    #[test]
    fn test_fill_with_same_colour_records_nothing() {
        let mut canvas = Canvas::blank(4, 4, Channels::Rgba, Colour::rgb(255, 0, 0));
        assert_eq!(fill(&mut canvas, Tip::Pen, (0, 0), Modifiers::NONE), None);
    }
}
