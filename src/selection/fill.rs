//! Flood fill region search.

use rayon::prelude::*;

use super::tolerance::Tolerance;
use crate::buffer::{include, PixelBuffer, Pos, Rect};

/// Pixels found by a fill search, with their bounding box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Region {
    pub points: Vec<Pos>,
    pub bbox: Option<Rect>,
}

impl Region {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn from_points(points: Vec<Pos>) -> Self {
        let mut bbox = None;
        for &pos in &points {
            include(&mut bbox, pos);
        }
        Self { points, bbox }
    }
}

/// Contiguous or global fill from `seed`, matching against the seed's colour.
pub fn flood(buffer: &PixelBuffer, seed: Pos, tolerance: &Tolerance, contiguous: bool) -> Region {
    if contiguous {
        flood_contiguous(buffer, seed, tolerance)
    } else {
        flood_global(buffer, seed, tolerance)
    }
}

/// 4-connected walk from `seed`.
///
/// A neighbour is marked visited before it is pushed, so every pixel enters
/// the stack at most once and the walk terminates even when every pixel
/// matches. Points come out in visiting order.
pub fn flood_contiguous(buffer: &PixelBuffer, seed: Pos, tolerance: &Tolerance) -> Region {
    let Some(seed_colour) = buffer.get(seed) else {
        return Region::default();
    };
    let matcher = tolerance.matcher(seed_colour);
    let width = buffer.width() as usize;
    let index = |(x, y): Pos| y as usize * width + x as usize;

    let mut visited = vec![false; width * buffer.height() as usize];
    let mut stack = vec![seed];
    visited[index(seed)] = true;
    let mut points = Vec::new();

    while let Some((x, y)) = stack.pop() {
        points.push((x, y));
        for next in [(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)] {
            if !buffer.in_bounds(next) || visited[index(next)] {
                continue;
            }
            visited[index(next)] = true;
            if buffer.get(next).is_some_and(|c| matcher.matches(c)) {
                stack.push(next);
            }
        }
    }

    Region::from_points(points)
}

/// Every pixel in the buffer matching the seed colour, regardless of
/// connectivity. Rows are scanned in parallel; output is row-major.
pub fn flood_global(buffer: &PixelBuffer, seed: Pos, tolerance: &Tolerance) -> Region {
    let Some(seed_colour) = buffer.get(seed) else {
        return Region::default();
    };
    let matcher = tolerance.matcher(seed_colour);
    let width = buffer.width() as i32;

    let rows: Vec<Vec<Pos>> = (0..buffer.height() as i32)
        .into_par_iter()
        .map(|y| {
            (0..width)
                .filter(|&x| buffer.get((x, y)).is_some_and(|c| matcher.matches(c)))
                .map(|x| (x, y))
                .collect()
        })
        .collect();

    Region::from_points(rows.into_iter().flatten().collect())
}
