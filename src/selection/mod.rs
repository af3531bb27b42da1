//! Pixel selection with an incrementally maintained boundary.
//!
//! The selection is a set of in-bounds pixel positions. Alongside it sits a
//! grid of unit edges, one per potential cell boundary, used to draw the
//! marching-ants border:
//!
//! - horizontal edges: `width x (height + 1)`, edge `(x, y)` lies above row `y`
//! - vertical edges: `(width + 1) x height`, edge `(x, y)` lies left of column `x`
//!
//! An edge is on exactly when the cells on its two sides differ in
//! membership (cells outside the buffer count as unselected). Its value is
//! the direction of the selected side: `+1` for below/right, `-1` for
//! above/left, `0` when off.

mod fill;
mod tolerance;

pub use fill::{flood, flood_contiguous, flood_global, Region};
pub use tolerance::{Matcher, Tolerance};

use std::collections::HashSet;

use crate::buffer::{include, include_rect, Pos, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// One lit boundary edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub orientation: Orientation,
    pub x: i32,
    pub y: i32,
    /// `+1` if the selected cell is below/right of the edge, `-1` if above/left.
    pub inside: i8,
}

fn edge_flag(before: bool, after: bool) -> i8 {
    match (before, after) {
        (false, true) => 1,
        (true, false) => -1,
        _ => 0,
    }
}

#[derive(Debug, Clone)]
pub struct Selection {
    width: u32,
    height: u32,
    points: HashSet<Pos>,
    horizontal: Vec<i8>,
    vertical: Vec<i8>,
    dirty: Option<Rect>,
}

impl Selection {
    pub fn new(width: u32, height: u32) -> Self {
        let (w, h) = (width as usize, height as usize);
        Self {
            width,
            height,
            points: HashSet::new(),
            horizontal: vec![0; w * (h + 1)],
            vertical: vec![0; (w + 1) * h],
            dirty: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.points.contains(&pos)
    }

    /// Whether a paint write at `pos` is allowed: an empty selection allows
    /// everything, otherwise only members.
    pub fn point_valid(&self, pos: Pos) -> bool {
        self.points.is_empty() || self.points.contains(&pos)
    }

    fn in_bounds(&self, (x, y): Pos) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Add a pixel. Returns `false` if it was already selected or lies outside the buffer.
    pub fn add(&mut self, pos: Pos) -> bool {
        if !self.in_bounds(pos) || !self.points.insert(pos) {
            return false;
        }
        self.refresh_edges_around(pos);
        true
    }

    /// Remove a pixel. Returns `false` if it was not selected.
    pub fn remove(&mut self, pos: Pos) -> bool {
        if !self.points.remove(&pos) {
            return false;
        }
        self.refresh_edges_around(pos);
        true
    }

    /// Add every position yielded; returns how many were newly selected.
    pub fn extend<I: IntoIterator<Item = Pos>>(&mut self, positions: I) -> usize {
        positions.into_iter().filter(|&pos| self.add(pos)).count()
    }

    /// Deselect everything, returning the previous members.
    pub fn clear(&mut self) -> Vec<Pos> {
        if let Some(bbox) = self.bounding_box() {
            include_rect(&mut self.dirty, bbox);
        }
        self.horizontal.fill(0);
        self.vertical.fill(0);
        self.points.drain().collect()
    }

    pub fn select_all(&mut self) -> usize {
        let (w, h) = (self.width as i32, self.height as i32);
        self.extend((0..h).flat_map(|y| (0..w).map(move |x| (x, y))))
    }

    /// Shift every member by `(dx, dy)`. Members pushed outside the buffer are dropped.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        let moved: Vec<Pos> = self
            .clear()
            .into_iter()
            .map(|(x, y)| (x + dx, y + dy))
            .collect();
        self.extend(moved);
    }

    pub fn bounding_box(&self) -> Option<Rect> {
        let mut bbox = None;
        for &pos in &self.points {
            include(&mut bbox, pos);
        }
        bbox
    }

    pub fn iter(&self) -> impl Iterator<Item = Pos> + '_ {
        self.points.iter().copied()
    }

    /// Members in row-major order.
    pub fn sorted(&self) -> Vec<Pos> {
        let mut points: Vec<Pos> = self.points.iter().copied().collect();
        points.sort_by_key(|&(x, y)| (y, x));
        points
    }

    /// Flag of the horizontal edge above row `y` at column `x`.
    pub fn horizontal_edge(&self, x: i32, y: i32) -> i8 {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 > self.height {
            return 0;
        }
        self.horizontal[y as usize * self.width as usize + x as usize]
    }

    /// Flag of the vertical edge left of column `x` at row `y`.
    pub fn vertical_edge(&self, x: i32, y: i32) -> i8 {
        if x < 0 || y < 0 || x as u32 > self.width || y as u32 >= self.height {
            return 0;
        }
        self.vertical[y as usize * (self.width as usize + 1) + x as usize]
    }

    /// Every lit edge, horizontal edges first, each group row-major.
    pub fn boundary_edges(&self) -> Vec<Edge> {
        let w = self.width as usize;
        let horizontal = self.horizontal.iter().enumerate().filter(|(_, f)| **f != 0).map(
            |(i, &inside)| Edge {
                orientation: Orientation::Horizontal,
                x: (i % w) as i32,
                y: (i / w) as i32,
                inside,
            },
        );
        let vertical = self.vertical.iter().enumerate().filter(|(_, f)| **f != 0).map(
            |(i, &inside)| Edge {
                orientation: Orientation::Vertical,
                x: (i % (w + 1)) as i32,
                y: (i / (w + 1)) as i32,
                inside,
            },
        );
        horizontal.chain(vertical).collect()
    }

    /// Take the rectangle of cells whose edges changed since the last call.
    pub fn take_dirty(&mut self) -> Option<Rect> {
        self.dirty.take()
    }

    fn refresh_edges_around(&mut self, (x, y): Pos) {
        let w = self.width as usize;
        let (ux, uy) = (x as usize, y as usize);

        let above = self.contains((x, y - 1));
        let here = self.contains((x, y));
        let below = self.contains((x, y + 1));
        let left = self.contains((x - 1, y));
        let right = self.contains((x + 1, y));

        self.horizontal[uy * w + ux] = edge_flag(above, here);
        self.horizontal[(uy + 1) * w + ux] = edge_flag(here, below);
        self.vertical[uy * (w + 1) + ux] = edge_flag(left, here);
        self.vertical[uy * (w + 1) + ux + 1] = edge_flag(here, right);

        include(&mut self.dirty, (x, y));
    }

    /// Whether the edge grids match a full recompute from the member set.
    #[cfg(test)]
    fn edges_consistent(&self) -> bool {
        let (w, h) = (self.width as i32, self.height as i32);
        let horizontal_ok = (0..=h).all(|y| {
            (0..w).all(|x| {
                self.horizontal_edge(x, y)
                    == edge_flag(self.contains((x, y - 1)), self.contains((x, y)))
            })
        });
        let vertical_ok = (0..h).all(|y| {
            (0..=w).all(|x| {
                self.vertical_edge(x, y) == edge_flag(self.contains((x - 1, y)), self.contains((x, y)))
            })
        });
        horizontal_ok && vertical_ok
    }
}
