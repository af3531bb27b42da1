//! Shape command implementation.
//!
//! Prints the pixels an interpolator produces, as an ASCII grid over the
//! bounding box of the two anchors.

use clap::Args;

use crate::buffer::Pos;
use crate::error::{PaintError, Result};
use crate::interp::{DiscreteInterpolator, Interpolator, ShapeKind};

/// Print a shape interpolator as ASCII
#[derive(Args, Debug)]
pub struct ShapeArgs {
    /// line, rect-outline, rect-fill, ellipse-outline or ellipse-fill
    pub kind: ShapeKind,

    /// Start anchor as x,y
    #[arg(value_parser = parse_pos, allow_hyphen_values = true)]
    pub start: Pos,

    /// Finish anchor as x,y
    #[arg(value_parser = parse_pos, allow_hyphen_values = true)]
    pub finish: Pos,

    /// Also list the points in visiting order
    #[arg(long)]
    pub order: bool,
}

/// Largest grid `shape` will print.
pub const MAX_GRID_CELLS: u64 = 1 << 20;

pub fn run(args: ShapeArgs) -> Result<()> {
    let shape = Interpolator::new(args.kind, args.start, args.finish);
    check_grid(&shape)?;
    print!("{}", ascii(&shape));
    if args.order {
        for (i, (x, y)) in shape.points().enumerate() {
            println!("{i:>4}: {x},{y}");
        }
    }
    Ok(())
}

/// Parse an `x,y` anchor.
pub fn parse_pos(s: &str) -> Result<Pos> {
    let invalid = || PaintError::Parse {
        message: format!("Invalid position: {}", s),
        help: Some("Use x,y, e.g. 3,-2".to_string()),
    };
    let (x, y) = s.split_once(',').ok_or_else(invalid)?;
    let x = x.trim().parse().map_err(|_| invalid())?;
    let y = y.trim().parse().map_err(|_| invalid())?;
    Ok((x, y))
}

/// Refuse anchor boxes too large to print as a grid.
pub fn check_grid<I: DiscreteInterpolator>(shape: &I) -> Result<()> {
    let bbox = shape.bounding_box();
    let cells = bbox.width() as u64 * bbox.height() as u64;
    if cells > MAX_GRID_CELLS {
        return Err(PaintError::Parse {
            message: format!(
                "Shape box {}x{} is too large to print",
                bbox.width(),
                bbox.height()
            ),
            help: Some(format!("Keep the box under {} cells", MAX_GRID_CELLS)),
        });
    }
    Ok(())
}

/// Render the shape as rows of `#` (visited) and `.` (not visited).
pub fn ascii<I: DiscreteInterpolator>(shape: &I) -> String {
    let bbox = shape.bounding_box();
    let width = bbox.width() as usize;
    let mut rows = vec![vec!['.'; width]; bbox.height() as usize];
    for (x, y) in shape.points() {
        if bbox.contains((x, y)) {
            rows[(y - bbox.min_y) as usize][(x - bbox.min_x) as usize] = '#';
        }
    }
    let mut out = String::with_capacity((width + 1) * rows.len());
    for row in rows {
        out.extend(row);
        out.push('\n');
    }
    out
}
