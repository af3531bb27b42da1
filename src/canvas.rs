//! The editable image and the reversible edits recorded against it.

use std::collections::HashSet;

use tracing::debug;

use crate::buffer::{include, include_rect, BufferHandle, Channels, PixelBuffer, Pos, Rect};
use crate::colour::Colour;
use crate::history::Action;
use crate::selection::Selection;

/// The image buffer together with its selection.
#[derive(Debug, Clone)]
pub struct Canvas {
    pub buffer: PixelBuffer,
    pub selection: Selection,
    dirty: Option<Rect>,
}

impl Canvas {
    pub fn new(buffer: PixelBuffer) -> Self {
        let selection = Selection::new(buffer.width(), buffer.height());
        Self {
            buffer,
            selection,
            dirty: None,
        }
    }

    pub fn blank(width: u32, height: u32, channels: Channels, background: Colour) -> Self {
        Self::new(PixelBuffer::filled(width, height, channels, background))
    }

    /// Swap in a new buffer. Handles to the old buffer stop matching and the
    /// selection is reset to the new size.
    pub fn replace(&mut self, buffer: PixelBuffer) {
        self.selection = Selection::new(buffer.width(), buffer.height());
        self.buffer = buffer;
        self.dirty = self.buffer.bounds();
    }

    /// Record that `rect` of the image changed.
    pub fn mark_dirty(&mut self, rect: Rect) {
        include_rect(&mut self.dirty, rect);
    }

    pub fn take_dirty(&mut self) -> Option<Rect> {
        self.dirty.take()
    }
}

/// An overlay the same size as the canvas holding in-progress shapes.
#[derive(Debug, Clone)]
pub struct Preview {
    pub buffer: PixelBuffer,
    dirty: Option<Rect>,
}

impl Preview {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            buffer: PixelBuffer::new(width, height, Channels::Rgba),
            dirty: None,
        }
    }

    pub fn draw(&mut self, pos: Pos, colour: Colour) {
        if self.buffer.put(pos, colour) {
            include(&mut self.dirty, pos);
        }
    }

    pub fn erase(&mut self, pos: Pos) {
        self.draw(pos, Colour::TRANSPARENT);
    }

    pub fn take_dirty(&mut self) -> Option<Rect> {
        self.dirty.take()
    }
}

/// One pixel's raw bytes before and after an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelChange {
    pub pos: Pos,
    pub before: [u8; 4],
    pub after: [u8; 4],
}

/// A bit-exact record of pixel edits on one buffer.
///
/// Holds a `BufferHandle`, not the buffer. If the canvas buffer has since
/// been replaced or invalidated, replaying is a no-op.
#[derive(Debug, Clone)]
pub struct PixelDiff {
    label: String,
    handle: BufferHandle,
    changes: Vec<PixelChange>,
}

impl PixelDiff {
    /// Build a diff, dropping entries whose bytes did not change.
    pub fn new(
        label: impl Into<String>,
        handle: BufferHandle,
        changes: impl IntoIterator<Item = PixelChange>,
    ) -> Self {
        Self {
            label: label.into(),
            handle,
            changes: changes
                .into_iter()
                .filter(|c| c.before != c.after)
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn changes(&self) -> &[PixelChange] {
        &self.changes
    }

    pub fn bbox(&self) -> Option<Rect> {
        let mut bbox = None;
        for change in &self.changes {
            include(&mut bbox, change.pos);
        }
        bbox
    }

    fn apply(&self, canvas: &mut Canvas, pick: impl Fn(&PixelChange) -> [u8; 4]) {
        if !canvas.buffer.accepts(self.handle) {
            debug!(action = %self.label, "buffer replaced, skipping stale pixel diff");
            return;
        }
        for change in &self.changes {
            canvas.buffer.set_raw(change.pos, pick(change));
        }
        if let Some(bbox) = self.bbox() {
            canvas.mark_dirty(bbox);
        }
    }
}

impl Action<Canvas> for PixelDiff {
    fn forward(&self, canvas: &mut Canvas) {
        self.apply(canvas, |c| c.after);
    }

    fn backward(&self, canvas: &mut Canvas) {
        self.apply(canvas, |c| c.before);
    }

    fn describe(&self) -> String {
        self.label.clone()
    }

    fn memory_size(&self) -> usize {
        self.changes.len() * std::mem::size_of::<PixelChange>()
    }
}

/// Membership changes to the selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionDiff {
    label: String,
    added: Vec<Pos>,
    removed: Vec<Pos>,
}

impl SelectionDiff {
    pub fn new(label: impl Into<String>, added: Vec<Pos>, removed: Vec<Pos>) -> Self {
        Self {
            label: label.into(),
            added,
            removed,
        }
    }

    /// The changes that turn membership set `before` into `after`.
    pub fn between(label: impl Into<String>, before: &HashSet<Pos>, after: &HashSet<Pos>) -> Self {
        let mut added: Vec<Pos> = after.difference(before).copied().collect();
        let mut removed: Vec<Pos> = before.difference(after).copied().collect();
        added.sort_by_key(|&(x, y)| (y, x));
        removed.sort_by_key(|&(x, y)| (y, x));
        Self::new(label, added, removed)
    }

    pub fn added(&self) -> &[Pos] {
        &self.added
    }

    pub fn removed(&self) -> &[Pos] {
        &self.removed
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

impl Action<Canvas> for SelectionDiff {
    fn forward(&self, canvas: &mut Canvas) {
        for &pos in &self.removed {
            canvas.selection.remove(pos);
        }
        for &pos in &self.added {
            canvas.selection.add(pos);
        }
    }

    fn backward(&self, canvas: &mut Canvas) {
        for &pos in &self.added {
            canvas.selection.remove(pos);
        }
        for &pos in &self.removed {
            canvas.selection.add(pos);
        }
    }

    fn describe(&self) -> String {
        self.label.clone()
    }

    fn memory_size(&self) -> usize {
        (self.added.len() + self.removed.len()) * std::mem::size_of::<Pos>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(canvas: &Canvas, pos: Pos, colour: Colour) -> PixelChange {
        PixelChange {
            pos,
            before: canvas.buffer.raw(pos).unwrap(),
            after: canvas.buffer.channels().encode(colour),
        }
    }

    #[test]
    fn test_pixel_diff_round_trip() {
        let mut canvas = Canvas::blank(3, 3, Channels::Rgba, Colour::WHITE);
        let original = canvas.buffer.as_bytes().to_vec();
        let diff = PixelDiff::new(
            "Pen",
            canvas.buffer.handle(),
            [change(&canvas, (0, 0), Colour::BLACK), change(&canvas, (2, 1), Colour::BLACK)],
        );
        diff.forward(&mut canvas);
        assert_eq!(canvas.buffer.get((2, 1)), Some(Colour::BLACK));
        assert_eq!(canvas.take_dirty(), Some(Rect::new(0, 0, 2, 1)));
        diff.backward(&mut canvas);
        assert_eq!(canvas.buffer.as_bytes(), &original[..]);
    }

    #[test]
    fn test_unchanged_pixels_are_dropped() {
        let canvas = Canvas::blank(2, 2, Channels::Rgb, Colour::WHITE);
        let diff = PixelDiff::new("Pen", canvas.buffer.handle(), [change(&canvas, (1, 1), Colour::WHITE)]);
        assert!(diff.is_empty());
    }

    #[test]
    fn test_stale_diff_is_a_no_op() {
        let mut canvas = Canvas::blank(2, 2, Channels::Rgba, Colour::WHITE);
        let diff = PixelDiff::new("Pen", canvas.buffer.handle(), [change(&canvas, (0, 0), Colour::BLACK)]);
        canvas.replace(PixelBuffer::filled(2, 2, Channels::Rgba, Colour::WHITE));
        diff.forward(&mut canvas);
        assert_eq!(canvas.buffer.get((0, 0)), Some(Colour::WHITE));
    }

    #[test]
    fn test_diff_is_stale_after_replacing_with_a_copy() {
        let mut canvas = Canvas::blank(2, 2, Channels::Rgba, Colour::WHITE);
        let snapshot = canvas.buffer.clone();
        let diff = PixelDiff::new("Pen", canvas.buffer.handle(), [change(&canvas, (0, 0), Colour::BLACK)]);
        canvas.replace(snapshot);
        diff.forward(&mut canvas);
        assert_eq!(canvas.buffer.get((0, 0)), Some(Colour::WHITE));
        diff.backward(&mut canvas);
        assert_eq!(canvas.buffer.get((0, 0)), Some(Colour::WHITE));
    }

    #[test]
    fn test_selection_diff_between() {
        let mut canvas = Canvas::blank(4, 4, Channels::Rgba, Colour::WHITE);
        canvas.selection.extend([(0, 0), (1, 0)]);
        let before: HashSet<Pos> = canvas.selection.iter().collect();
        let after: HashSet<Pos> = [(1, 0), (2, 0)].into_iter().collect();
        let diff = SelectionDiff::between("Select", &before, &after);
        assert_eq!(diff.added(), &[(2, 0)]);
        assert_eq!(diff.removed(), &[(0, 0)]);

        diff.forward(&mut canvas);
        assert_eq!(canvas.selection.sorted(), vec![(1, 0), (2, 0)]);
        diff.backward(&mut canvas);
        assert_eq!(canvas.selection.sorted(), vec![(0, 0), (1, 0)]);
    }
}
