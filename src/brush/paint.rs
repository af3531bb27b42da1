//! Per-pixel writes and freehand strokes.

use std::collections::{BTreeMap, HashSet};

use tracing::trace;

use super::{BrushInfo, Operation, SelectMode, Tip, Workspace};
use crate::buffer::{include, Channels, Pos, Rect};
use crate::canvas::{Canvas, PixelChange, PixelDiff, SelectionDiff};
use crate::colour::{over_pixel, Colour, Rgba};
use crate::history::Action;
use crate::interp::{DiscreteInterpolator, Line};

/// The colour a paint tip leaves on a pixel that held `old`. `None` for the
/// select tip, which never writes pixels.
pub(super) fn paint_value(
    tip: Tip,
    ink: Rgba,
    old: Colour,
    channels: Channels,
    eraser_background: Colour,
) -> Option<Colour> {
    match tip {
        Tip::Pencil => Some(over_pixel(ink, old)),
        Tip::Pen => Some(Colour::from_rgba(ink).with_alpha(255)),
        Tip::Eraser if channels.has_alpha() => Some(old.with_alpha(0)),
        Tip::Eraser => Some(eraser_background),
        Tip::Select => None,
    }
}

/// The pixel diff of applying `tip` once at each of `points`.
///
/// Duplicate points, positions off the canvas and positions outside a
/// non-empty selection are skipped. Nothing is written.
pub(super) fn plan_pixels(
    canvas: &Canvas,
    points: impl IntoIterator<Item = Pos>,
    tip: Tip,
    ink: Rgba,
    eraser_background: Colour,
    label: String,
) -> PixelDiff {
    let buffer = &canvas.buffer;
    let channels = buffer.channels();
    let mut seen = HashSet::new();
    let changes: Vec<PixelChange> = points
        .into_iter()
        .filter(|&pos| canvas.selection.point_valid(pos) && seen.insert(pos))
        .filter_map(|pos| {
            let before = buffer.raw(pos)?;
            let old = channels.decode(before);
            let new = paint_value(tip, ink, old, channels, eraser_background)?;
            Some(PixelChange {
                pos,
                before,
                after: channels.encode(new),
            })
        })
        .collect();
    PixelDiff::new(label, buffer.handle(), changes)
}

/// The selection diff of applying `mode` to `points`.
pub(super) fn plan_selection(
    canvas: &Canvas,
    points: impl IntoIterator<Item = Pos>,
    mode: SelectMode,
    label: String,
) -> SelectionDiff {
    let selection = &canvas.selection;
    let before: HashSet<Pos> = selection.iter().collect();
    let touched = points.into_iter().filter(|&pos| canvas.buffer.in_bounds(pos));
    let after: HashSet<Pos> = match mode {
        SelectMode::Replace => touched.collect(),
        SelectMode::Add => before.iter().copied().chain(touched).collect(),
        SelectMode::Remove => {
            let removed: HashSet<Pos> = touched.collect();
            before.difference(&removed).copied().collect()
        }
    };
    SelectionDiff::between(label, &before, &after)
}

impl BrushInfo {
    pub(super) fn freehand_start(&mut self, ws: &mut Workspace, pos: Pos) {
        if self.tip == Tip::Select && self.select_mode() == SelectMode::Replace {
            for old in ws.canvas.selection.clear() {
                self.selection_diff.entry(old).or_insert(true);
            }
        }

        // shift-click continues from where the last stroke ended
        match self.last_gesture_end {
            Some(from) if self.modifiers.shift => {
                let line = Line::new(from, pos);
                for p in line.points() {
                    self.brush(ws, p);
                }
            }
            _ => self.brush(ws, pos),
        }
    }

    pub(super) fn freehand_drag(&mut self, ws: &mut Workspace, pos: Pos) {
        let Some(from) = self.last_pos else {
            self.brush(ws, pos);
            return;
        };
        // bridge gaps between pointer samples
        for p in Line::new(from, pos).points().skip(1) {
            self.brush(ws, p);
        }
    }

    /// Apply the active tip at one pixel, recording the change.
    pub fn brush(&mut self, ws: &mut Workspace, pos: Pos) {
        let Operation::Freehand(tip) = self.operation() else {
            return;
        };
        let canvas = &mut *ws.canvas;
        if !canvas.buffer.in_bounds(pos) {
            return;
        }

        if tip == Tip::Select {
            let was = canvas.selection.contains(pos);
            let changed = match self.select_mode() {
                SelectMode::Replace | SelectMode::Add => canvas.selection.add(pos),
                SelectMode::Remove => canvas.selection.remove(pos),
            };
            if changed {
                self.selection_diff.entry(pos).or_insert(was);
                include(&mut self.brushing_bbox, pos);
            }
            return;
        }

        if !canvas.selection.point_valid(pos) || self.two_color_diff.contains_key(&pos) {
            return;
        }
        let Some(before) = canvas.buffer.raw(pos) else {
            return;
        };
        let channels = canvas.buffer.channels();
        let ink = self.colour(self.button).rgba();
        let old = channels.decode(before);
        let Some(new) = paint_value(tip, ink, old, channels, ws.config.eraser_background) else {
            return;
        };
        let after = channels.encode(new);
        trace!(?pos, ?tip, "brush");

        match tip {
            Tip::Pencil => {
                self.two_color_diff.insert(pos, (after, before));
            }
            _ => {
                self.single_color_diff.entry(pos).or_insert(before);
            }
        }
        canvas.buffer.set_raw(pos, after);
        canvas.mark_dirty(Rect::point(pos));
        include(&mut self.brushing_bbox, pos);
    }

    pub(super) fn freehand_submit(&mut self, ws: &mut Workspace) -> Option<String> {
        let actions = self.stroke_actions(ws.canvas);
        let label = self.label();
        self.push_actions(ws, label, actions)
    }

    /// Turn the captured maps into history actions describing what the
    /// stroke already did.
    pub(super) fn stroke_actions(&self, canvas: &Canvas) -> Vec<Box<dyn Action<Canvas>>> {
        let label = self.label();
        let handle = canvas.buffer.handle();
        let mut actions: Vec<Box<dyn Action<Canvas>>> = Vec::new();

        let mut changes: BTreeMap<Pos, PixelChange> = BTreeMap::new();
        for (&pos, &(after, before)) in &self.two_color_diff {
            changes.insert(pos, PixelChange { pos, before, after });
        }
        for (&pos, &before) in &self.single_color_diff {
            if let Some(after) = canvas.buffer.raw(pos) {
                changes.insert(pos, PixelChange { pos, before, after });
            }
        }
        let pixels = PixelDiff::new(label.clone(), handle, changes.into_values());
        if !pixels.is_empty() {
            actions.push(Box::new(pixels));
        }

        let (mut added, mut removed) = (Vec::new(), Vec::new());
        for (&pos, &was) in &self.selection_diff {
            match (was, canvas.selection.contains(pos)) {
                (false, true) => added.push(pos),
                (true, false) => removed.push(pos),
                _ => {}
            }
        }
        let selection = SelectionDiff::new(label, added, removed);
        if !selection.is_empty() {
            actions.push(Box::new(selection));
        }

        actions
    }

    /// Put back every pixel and membership the live stroke changed.
    pub(super) fn revert_stroke(&mut self, ws: &mut Workspace) {
        let canvas = &mut *ws.canvas;
        for (&pos, &(_, before)) in &self.two_color_diff {
            canvas.buffer.set_raw(pos, before);
        }
        for (&pos, &before) in &self.single_color_diff {
            canvas.buffer.set_raw(pos, before);
        }
        for (&pos, &was) in &self.selection_diff {
            if was {
                canvas.selection.add(pos);
            } else {
                canvas.selection.remove(pos);
            }
        }
        if let Some(bbox) = self.brushing_bbox {
            canvas.mark_dirty(bbox);
        }
    }
}
