//! ASCII snapshots of the shape interpolators.

use insta::assert_snapshot;
use pxpaint::cli::shape::ascii;
use pxpaint::{DiscreteInterpolator, Interpolator, ShapeKind};

fn render(kind: ShapeKind, start: (i32, i32), finish: (i32, i32)) -> String {
    ascii(&Interpolator::new(kind, start, finish)).trim_end().to_string()
}

#[test]
fn test_shallow_line() {
    assert_snapshot!(render(ShapeKind::Line, (0, 0), (5, 2)), @r"
    ##....
    ..##..
    ....##
    ");
}

#[test]
fn test_rect_outline() {
    assert_snapshot!(render(ShapeKind::RectOutline, (4, 3), (0, 0)), @r"
    #####
    #...#
    #...#
    #####
    ");
}

#[test]
fn test_small_circle() {
    assert_snapshot!(render(ShapeKind::EllipseOutline, (0, 0), (4, 4)), @r"
    .###.
    #...#
    #...#
    #...#
    .###.
    ");
}

#[test]
fn test_small_filled_circle() {
    assert_snapshot!(render(ShapeKind::EllipseFill, (0, 0), (4, 4)), @r"
    .###.
    #####
    #####
    #####
    .###.
    ");
}

#[test]
fn test_degenerate_shapes_are_single_points() {
    for kind in ShapeKind::ALL {
        let shape = Interpolator::new(kind, (2, 2), (2, 2));
        assert_eq!(shape.len(), 1, "{kind}");
        assert_eq!(shape.at(0), (2, 2), "{kind}");
    }
}

#[test]
fn test_every_shape_stays_in_anchor_box() {
    for kind in ShapeKind::ALL {
        let shape = Interpolator::new(kind, (7, -3), (-2, 4));
        let bbox = shape.bounding_box();
        assert!(shape.points().all(|p| bbox.contains(p)), "{kind}");
    }
}
