//! Dragging the selected region.
//!
//! `begin_selection_move` arms the move (`SubimgReady`). A plain press then
//! lifts the selected pixels into a floating copy that follows the pointer
//! together with the outline (`MovingSubimg`); a ctrl press moves only the
//! outline (`MovingSelOutline`). Releasing returns to `SubimgReady`, and
//! `commit_selection_move` stamps the float down as one history entry.

use std::collections::HashSet;

use tracing::{debug, warn};

use super::{BrushInfo, BrushState, Floating, Modifiers, Workspace};
use crate::buffer::{copy_path_to_vec, Path, Pos, RectPath};
use crate::canvas::{Canvas, PixelChange, PixelDiff, SelectionDiff};
use crate::colour::Colour;
use crate::history::Action;

impl BrushInfo {
    /// Arm a selection move. Fails (returning `false`) with an empty selection
    /// or while another gesture is live.
    pub fn begin_selection_move(&mut self, ws: &mut Workspace) -> bool {
        if self.state != BrushState::Neutral {
            return false;
        }
        if ws.canvas.selection.is_empty() {
            warn!("nothing selected to move");
            return false;
        }
        self.forget();
        self.selection_before = Some(ws.canvas.selection.iter().collect());
        self.state = BrushState::SubimgReady;
        debug!(pixels = ws.canvas.selection.len(), "selection move armed");
        true
    }

    pub fn move_press(&mut self, ws: &mut Workspace, pos: Pos, modifiers: Modifiers) {
        if self.state != BrushState::SubimgReady {
            return;
        }
        self.move_anchor = Some(pos);
        if modifiers.ctrl {
            self.state = BrushState::MovingSelOutline;
        } else {
            if self.floating.is_none() {
                self.lift(ws);
            }
            self.state = BrushState::MovingSubimg;
        }
    }

    pub fn move_drag(&mut self, ws: &mut Workspace, pos: Pos) {
        let Some(anchor) = self.move_anchor else {
            return;
        };
        let (dx, dy) = (pos.0 - anchor.0, pos.1 - anchor.1);
        if (dx, dy) == (0, 0) {
            return;
        }
        self.move_anchor = Some(pos);

        match self.state {
            BrushState::MovingSubimg => {
                if let Some(floating) = self.floating.as_mut() {
                    floating.offset = (floating.offset.0 + dx, floating.offset.1 + dy);
                }
                self.shift_outline(ws, dx, dy);
                self.redraw_floating(ws);
            }
            BrushState::MovingSelOutline => self.shift_outline(ws, dx, dy),
            _ => {}
        }
    }

    pub fn move_release(&mut self) {
        if matches!(
            self.state,
            BrushState::MovingSubimg | BrushState::MovingSelOutline
        ) {
            self.move_anchor = None;
            self.state = BrushState::SubimgReady;
        }
    }

    /// Stamp the floating pixels and record the move. Returns the history
    /// label when anything changed.
    pub fn commit_selection_move(&mut self, ws: &mut Workspace) -> Option<String> {
        if !matches!(
            self.state,
            BrushState::SubimgReady | BrushState::MovingSubimg | BrushState::MovingSelOutline
        ) {
            return None;
        }
        self.clear_preview(ws);

        if let Some(floating) = self.floating.take() {
            let (dx, dy) = floating.offset;
            let buffer = &mut ws.canvas.buffer;
            for ((x, y), raw) in floating.pixels {
                let dest = (x + dx, y + dy);
                if let Some(old) = buffer.raw(dest) {
                    self.single_color_diff.entry(dest).or_insert(old);
                    buffer.set_raw(dest, raw);
                }
            }
        }

        let label = "Move selection".to_string();
        let canvas = &*ws.canvas;
        let changes: Vec<PixelChange> = self
            .single_color_diff
            .iter()
            .filter_map(|(&pos, &before)| {
                let after = canvas.buffer.raw(pos)?;
                Some(PixelChange { pos, before, after })
            })
            .collect();
        let pixels = PixelDiff::new(label.clone(), canvas.buffer.handle(), changes);
        let before = self.selection_before.take().unwrap_or_default();
        let after: HashSet<Pos> = canvas.selection.iter().collect();
        let outline = SelectionDiff::between(label.clone(), &before, &after);

        let mut actions: Vec<Box<dyn Action<Canvas>>> = Vec::new();
        if let Some(bbox) = pixels.bbox() {
            ws.canvas.mark_dirty(bbox);
            self.brushing_bbox = Some(bbox);
        }
        if !pixels.is_empty() {
            actions.push(Box::new(pixels));
        }
        if !outline.is_empty() {
            actions.push(Box::new(outline));
        }
        debug!(entries = actions.len(), "selection move commit");

        let recorded = self.push_actions(ws, label, actions);
        self.forget();
        recorded
    }

    /// Put the lifted pixels and the outline back where they started.
    pub(super) fn move_cancel(&mut self, ws: &mut Workspace) {
        self.clear_preview(ws);
        for (&pos, &before) in &self.single_color_diff {
            ws.canvas.buffer.set_raw(pos, before);
        }
        if let Some(before) = self.selection_before.take() {
            ws.canvas.selection.clear();
            ws.canvas.selection.extend(before);
        }
        if let Some(bbox) = self.brushing_bbox {
            ws.canvas.mark_dirty(bbox);
        }
    }

    /// Copy the selected pixels out of the image, leaving cleared pixels behind.
    fn lift(&mut self, ws: &mut Workspace) {
        let canvas = &mut *ws.canvas;
        let Some(bbox) = canvas.selection.bounding_box() else {
            return;
        };
        let path = RectPath::new(bbox);
        let channels = canvas.buffer.channels();
        let bytes = copy_path_to_vec(&canvas.buffer, &path);

        let hole = if channels.has_alpha() {
            Colour::TRANSPARENT
        } else {
            ws.config.eraser_background
        };
        let mut pixels = Vec::new();
        for (pos, chunk) in path.iter().zip(bytes.chunks_exact(channels.count())) {
            if !canvas.selection.contains(pos) {
                continue;
            }
            let mut raw = [0u8; 4];
            raw[..chunk.len()].copy_from_slice(chunk);
            pixels.push((pos, raw));
            self.single_color_diff.entry(pos).or_insert(raw);
            canvas.buffer.put(pos, hole);
        }
        canvas.mark_dirty(bbox);
        self.brushing_bbox = Some(bbox);
        debug!(pixels = pixels.len(), "selection lifted");

        self.floating = Some(Floating {
            pixels,
            offset: (0, 0),
        });
        self.redraw_floating(ws);
    }

    fn redraw_floating(&mut self, ws: &mut Workspace) {
        self.clear_preview(ws);
        let Some(floating) = self.floating.as_ref() else {
            return;
        };
        let channels = ws.canvas.buffer.channels();
        let (dx, dy) = floating.offset;
        let stamps: Vec<_> = floating
            .pixels
            .iter()
            .map(|&((x, y), raw)| ((x + dx, y + dy), channels.decode(raw)))
            .collect();
        for (pos, colour) in stamps {
            self.draw_preview(ws, pos, colour);
        }
    }

    /// Move the outline by a delta, recomputed from its starting shape so
    /// members pushed off the canvas come back when dragged back.
    fn shift_outline(&mut self, ws: &mut Workspace, dx: i32, dy: i32) {
        self.outline_offset = (self.outline_offset.0 + dx, self.outline_offset.1 + dy);
        let Some(before) = self.selection_before.as_ref() else {
            return;
        };
        let (ox, oy) = self.outline_offset;
        let selection = &mut ws.canvas.selection;
        selection.clear();
        selection.extend(before.iter().map(|&(x, y)| (x + ox, y + oy)));
    }
}
