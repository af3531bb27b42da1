//! Sequential traversal over geometric subsets of a buffer.
//!
//! A `Path` is a cursor contract: `first`/`last` give the endpoints and
//! `next`/`prev` step along the path, returning `None` past either end.
//! Bulk operations (`copy_path` and friends) walk two paths in lockstep
//! one pixel at a time.

use super::rect::{Pos, Rect};
use super::{Channels, PixelBuffer};
use crate::colour::Colour;
use crate::error::{PaintError, Result};

pub trait Path {
    fn first(&self) -> Pos;
    fn last(&self) -> Pos;
    fn next(&self, cursor: Pos) -> Option<Pos>;
    fn prev(&self, cursor: Pos) -> Option<Pos>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn iter(&self) -> PathIter<'_, Self>
    where
        Self: Sized,
    {
        PathIter {
            path: self,
            cursor: Some(self.first()),
            remaining: self.len(),
        }
    }
}

/// Forward iterator over a path.
pub struct PathIter<'a, P: Path> {
    path: &'a P,
    cursor: Option<Pos>,
    remaining: usize,
}

impl<P: Path> Iterator for PathIter<'_, P> {
    type Item = Pos;

    fn next(&mut self) -> Option<Pos> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.cursor?;
        self.remaining -= 1;
        self.cursor = self.path.next(current);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

fn step_towards(from: i32, to: i32) -> i32 {
    (to - from).signum()
}

/// A horizontal run from `x0` to `x1` inclusive, in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HorizontalRun {
    pub y: i32,
    pub x0: i32,
    pub x1: i32,
}

impl HorizontalRun {
    pub fn new(y: i32, x0: i32, x1: i32) -> Self {
        Self { y, x0, x1 }
    }

    fn contains(&self, (x, y): Pos) -> bool {
        y == self.y && x >= self.x0.min(self.x1) && x <= self.x0.max(self.x1)
    }
}

impl Path for HorizontalRun {
    fn first(&self) -> Pos {
        (self.x0, self.y)
    }

    fn last(&self) -> Pos {
        (self.x1, self.y)
    }

    fn next(&self, cursor: Pos) -> Option<Pos> {
        if cursor.0 == self.x1 || !self.contains(cursor) {
            return None;
        }
        Some((cursor.0 + step_towards(self.x0, self.x1), self.y))
    }

    fn prev(&self, cursor: Pos) -> Option<Pos> {
        if cursor.0 == self.x0 || !self.contains(cursor) {
            return None;
        }
        Some((cursor.0 - step_towards(self.x0, self.x1), self.y))
    }

    fn len(&self) -> usize {
        (self.x1 - self.x0).unsigned_abs() as usize + 1
    }
}

/// A vertical run from `y0` to `y1` inclusive, in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerticalRun {
    pub x: i32,
    pub y0: i32,
    pub y1: i32,
}

impl VerticalRun {
    pub fn new(x: i32, y0: i32, y1: i32) -> Self {
        Self { x, y0, y1 }
    }

    fn contains(&self, (x, y): Pos) -> bool {
        x == self.x && y >= self.y0.min(self.y1) && y <= self.y0.max(self.y1)
    }
}

impl Path for VerticalRun {
    fn first(&self) -> Pos {
        (self.x, self.y0)
    }

    fn last(&self) -> Pos {
        (self.x, self.y1)
    }

    fn next(&self, cursor: Pos) -> Option<Pos> {
        if cursor.1 == self.y1 || !self.contains(cursor) {
            return None;
        }
        Some((self.x, cursor.1 + step_towards(self.y0, self.y1)))
    }

    fn prev(&self, cursor: Pos) -> Option<Pos> {
        if cursor.1 == self.y0 || !self.contains(cursor) {
            return None;
        }
        Some((self.x, cursor.1 - step_towards(self.y0, self.y1)))
    }

    fn len(&self) -> usize {
        (self.y1 - self.y0).unsigned_abs() as usize + 1
    }
}

/// Every pixel of a rectangle, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectPath {
    pub rect: Rect,
}

impl RectPath {
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }
}

impl Path for RectPath {
    fn first(&self) -> Pos {
        (self.rect.min_x, self.rect.min_y)
    }

    fn last(&self) -> Pos {
        (self.rect.max_x, self.rect.max_y)
    }

    fn next(&self, (x, y): Pos) -> Option<Pos> {
        if !self.rect.contains((x, y)) || (x, y) == self.last() {
            None
        } else if x < self.rect.max_x {
            Some((x + 1, y))
        } else {
            Some((self.rect.min_x, y + 1))
        }
    }

    fn prev(&self, (x, y): Pos) -> Option<Pos> {
        if !self.rect.contains((x, y)) || (x, y) == self.first() {
            None
        } else if x > self.rect.min_x {
            Some((x - 1, y))
        } else {
            Some((self.rect.max_x, y - 1))
        }
    }

    fn len(&self) -> usize {
        self.rect.area()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Horizontal(HorizontalRun),
    Vertical(VerticalRun),
}

impl Side {
    fn as_path(&self) -> &dyn Path {
        match self {
            Side::Horizontal(run) => run as &dyn Path,
            Side::Vertical(run) => run as &dyn Path,
        }
    }

    fn contains(&self, pos: Pos) -> bool {
        match self {
            Side::Horizontal(run) => run.contains(pos),
            Side::Vertical(run) => run.contains(pos),
        }
    }
}

/// The outline of a rectangle, clockwise from the top-left corner.
///
/// Built from up to four straight runs that share no pixels: the top edge
/// owns both top corners, the right edge owns the bottom-right corner, the
/// bottom edge owns the bottom-left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingPath {
    rect: Rect,
    sides: Vec<Side>,
}

impl RingPath {
    pub fn new(rect: Rect) -> Self {
        let mut ring = Self {
            rect,
            sides: Vec::with_capacity(4),
        };
        ring.rebuild();
        ring
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    fn rebuild(&mut self) {
        let Rect {
            min_x,
            min_y,
            max_x,
            max_y,
        } = self.rect;
        self.sides.clear();
        self.sides
            .push(Side::Horizontal(HorizontalRun::new(min_y, min_x, max_x)));
        if max_y > min_y {
            self.sides
                .push(Side::Vertical(VerticalRun::new(max_x, min_y + 1, max_y)));
            if max_x > min_x {
                self.sides
                    .push(Side::Horizontal(HorizontalRun::new(max_y, max_x - 1, min_x)));
                if max_y - 1 >= min_y + 1 {
                    self.sides
                        .push(Side::Vertical(VerticalRun::new(min_x, max_y - 1, min_y + 1)));
                }
            }
        }
    }

    /// Move the ring one pixel inward. Returns `false` (unchanged) if nothing is left inside.
    pub fn shrink(&mut self) -> bool {
        if self.rect.width() <= 2 || self.rect.height() <= 2 {
            return false;
        }
        self.rect = Rect::new(
            self.rect.min_x + 1,
            self.rect.min_y + 1,
            self.rect.max_x - 1,
            self.rect.max_y - 1,
        );
        self.rebuild();
        true
    }

    /// Move the ring one pixel outward, clamped to a `width` x `height` buffer.
    /// Returns `false` if it already covers the whole buffer.
    pub fn grow(&mut self, width: u32, height: u32) -> bool {
        let grown = Rect::new(
            self.rect.min_x - 1,
            self.rect.min_y - 1,
            self.rect.max_x + 1,
            self.rect.max_y + 1,
        );
        match grown.clamp_to(width, height) {
            Some(clamped) if clamped != self.rect => {
                self.rect = clamped;
                self.rebuild();
                true
            }
            _ => false,
        }
    }

    fn side_of(&self, pos: Pos) -> Option<usize> {
        self.sides.iter().position(|side| side.contains(pos))
    }
}

impl Path for RingPath {
    fn first(&self) -> Pos {
        (self.rect.min_x, self.rect.min_y)
    }

    fn last(&self) -> Pos {
        self.sides
            .last()
            .map(|side| side.as_path().last())
            .unwrap_or_else(|| self.first())
    }

    fn next(&self, cursor: Pos) -> Option<Pos> {
        let index = self.side_of(cursor)?;
        self.sides[index]
            .as_path()
            .next(cursor)
            .or_else(|| self.sides.get(index + 1).map(|side| side.as_path().first()))
    }

    fn prev(&self, cursor: Pos) -> Option<Pos> {
        let index = self.side_of(cursor)?;
        self.sides[index].as_path().prev(cursor).or_else(|| {
            index
                .checked_sub(1)
                .map(|previous| self.sides[previous].as_path().last())
        })
    }

    fn len(&self) -> usize {
        self.sides.iter().map(|side| side.as_path().len()).sum()
    }
}

fn check_channels(dest: Channels, src: Channels) -> Result<()> {
    if dest != src {
        return Err(PaintError::ChannelMismatch {
            dest: dest.into(),
            src: src.into(),
        });
    }
    Ok(())
}

/// Copy pixels from `src` along `src_path` into `dest` along `dest_path`.
///
/// Each path first skips its offset; then both advance together until
/// `length` pixels were visited or either path runs out. Positions outside
/// either buffer are skipped. Returns the number of pixels written.
pub fn copy_path<D: Path, S: Path>(
    dest: &mut PixelBuffer,
    dest_path: &D,
    src: &PixelBuffer,
    src_path: &S,
    (dest_offset, src_offset): (usize, usize),
    length: Option<usize>,
) -> Result<usize> {
    check_channels(dest.channels(), src.channels())?;

    let limit = length.unwrap_or(usize::MAX);
    let mut written = 0;
    let pairs = dest_path
        .iter()
        .skip(dest_offset)
        .zip(src_path.iter().skip(src_offset))
        .take(limit);
    for (to, from) in pairs {
        if let Some(raw) = src.raw(from) {
            if dest.set_raw(to, raw) {
                written += 1;
            }
        }
    }
    Ok(written)
}

/// Read the pixels along a path into a flat byte vector.
///
/// Out-of-bounds positions read as zero bytes so the output always holds
/// `path.len() * channels` bytes.
pub fn copy_path_to_vec<P: Path>(src: &PixelBuffer, path: &P) -> Vec<u8> {
    let n = src.channels().count();
    let mut out = Vec::with_capacity(path.len() * n);
    for pos in path.iter() {
        let raw = src.raw(pos).unwrap_or([0; 4]);
        out.extend_from_slice(&raw[..n]);
    }
    out
}

/// Write a flat byte slice along a path.
pub fn copy_slice_to_path<P: Path>(
    dest: &mut PixelBuffer,
    path: &P,
    data: &[u8],
    channels: Channels,
) -> Result<usize> {
    check_channels(dest.channels(), channels)?;

    let n = channels.count();
    let mut written = 0;
    for (pos, chunk) in path.iter().zip(data.chunks_exact(n)) {
        let mut raw = [0u8; 4];
        raw[..n].copy_from_slice(chunk);
        if dest.set_raw(pos, raw) {
            written += 1;
        }
    }
    Ok(written)
}

/// Find the nearest pixel (by rings of growing Chebyshev radius) that
/// satisfies `predicate`, searching at most `max_radius` rings out.
pub fn search_outward<F>(
    buffer: &PixelBuffer,
    centre: Pos,
    max_radius: u32,
    predicate: F,
) -> Option<Pos>
where
    F: Fn(Colour) -> bool,
{
    let colour = buffer.get(centre)?;
    if predicate(colour) {
        return Some(centre);
    }

    let mut ring = RingPath::new(Rect::point(centre));
    for _ in 0..max_radius {
        if !ring.grow(buffer.width(), buffer.height()) {
            break;
        }
        let found = ring
            .iter()
            .find(|&pos| buffer.get(pos).is_some_and(&predicate));
        if found.is_some() {
            return found;
        }
    }
    None
}
