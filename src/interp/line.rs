use super::{direction, DiscreteInterpolator};
use crate::buffer::Pos;

/// A straight line between two anchors.
///
/// The dominant axis advances one pixel per step; the minor axis follows the
/// same fraction, rounded with ties going down so a 2:1 slope does not pile
/// two pixels onto the same diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    start: Pos,
    finish: Pos,
}

impl Line {
    pub fn new(start: Pos, finish: Pos) -> Self {
        Self { start, finish }
    }

    fn steps(&self) -> i64 {
        let dx = (self.finish.0 - self.start.0).unsigned_abs();
        let dy = (self.finish.1 - self.start.1).unsigned_abs();
        dx.max(dy) as i64
    }
}

/// `num / den` rounded to nearest, halves rounding down.
fn div_round_half_down(num: i64, den: i64) -> i64 {
    let q = num / den;
    let r = num % den;
    if 2 * r > den {
        q + 1
    } else {
        q
    }
}

impl DiscreteInterpolator for Line {
    fn start(&self) -> Pos {
        self.start
    }

    fn finish(&self) -> Pos {
        self.finish
    }

    fn len(&self) -> usize {
        self.steps() as usize + 1
    }

    fn at(&self, i: usize) -> Pos {
        let steps = self.steps();
        if steps == 0 {
            return self.start;
        }
        let i = (i as i64).min(steps);

        let dx = self.finish.0 - self.start.0;
        let dy = self.finish.1 - self.start.1;
        let offset = |delta: i32| {
            let along = div_round_half_down(i * delta.unsigned_abs() as i64, steps);
            direction(delta) * along as i32
        };
        (self.start.0 + offset(dx), self.start.1 + offset(dy))
    }

    fn sync_with_endpoints(&mut self, start: Pos, finish: Pos) {
        self.start = start;
        self.finish = finish;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_and_endpoints() {
        for (start, finish) in [((0, 0), (5, 2)), ((4, 9), (-3, 1)), ((2, 2), (2, -6))] {
            let line = Line::new(start, finish);
            let dx = (finish.0 - start.0).abs() as usize;
            let dy = (finish.1 - start.1).abs() as usize;
            assert_eq!(line.len(), dx.max(dy) + 1);
            assert_eq!(line.at(0), start);
            assert_eq!(line.at(line.len() - 1), finish);
        }
    }

    #[test]
    fn test_halves_round_down() {
        // dy/dx = 1/2: the midpoint x=1 lands on y=0.5 and must stay at 0
        let line = Line::new((0, 0), (2, 1));
        let points: Vec<Pos> = line.points().collect();
        assert_eq!(points, vec![(0, 0), (1, 0), (2, 1)]);
    }

    #[test]
    fn test_steep_line_steps_every_row() {
        let line = Line::new((0, 0), (1, 4));
        let points: Vec<Pos> = line.points().collect();
        assert_eq!(points, vec![(0, 0), (0, 1), (0, 2), (1, 3), (1, 4)]);
    }

    #[test]
    fn test_consecutive_points_are_adjacent() {
        let line = Line::new((-7, 3), (12, -5));
        let points: Vec<Pos> = line.points().collect();
        for pair in points.windows(2) {
            assert!((pair[1].0 - pair[0].0).abs() <= 1);
            assert!((pair[1].1 - pair[0].1).abs() <= 1);
        }
    }

    #[test]
    fn test_index_past_end_clamps() {
        let line = Line::new((0, 0), (3, 0));
        assert_eq!(line.at(99), (3, 0));
    }
}
