//! End-to-end behaviour of the paint engine through its public API.

use std::collections::HashSet;

use pretty_assertions::assert_eq;
use pxpaint::colour::{over, Rgb, Rgba};
use pxpaint::interp::{EllipseOutline, Line, RectFill};
use pxpaint::selection::flood_contiguous;
use pxpaint::{
    Button, Channels, Colour, ColourFrame, DiscreteInterpolator, EngineConfig, Modifiers,
    PixelBuffer, Rect, Selection, Session, Tip, Tolerance, Tool,
};

fn white_session(width: u32, height: u32) -> Session {
    Session::blank(width, height, Channels::Rgba, Colour::WHITE, EngineConfig::default())
}

fn half_red() -> ColourFrame {
    ColourFrame::from_rgb(Rgb::new(1.0, 0.0, 0.0), 0.5)
}

#[test]
fn test_pencil_scenario_on_white() {
    let mut session = white_session(4, 4);
    session.set_colour(Button::Primary, half_red());
    session.pointer_press((1, 1), Button::Primary, Modifiers::NONE);
    session.pointer_release((1, 1));

    assert_eq!(session.buffer().raw((1, 1)), Some([255, 128, 128, 255]));
    assert_eq!(session.brush().brushing_bbox(), Some(Rect::new(1, 1, 1, 1)));

    session.undo();
    assert_eq!(session.buffer().raw((1, 1)), Some([255, 255, 255, 255]));
}

#[test]
fn test_pencil_stroke_undo_redo_is_bit_exact() {
    let mut session = white_session(8, 8);
    session.set_colour(Button::Primary, half_red());
    let before = session.buffer().as_bytes().to_vec();

    session.pointer_press((0, 0), Button::Primary, Modifiers::NONE);
    session.pointer_move((7, 3), Modifiers::NONE);
    session.pointer_move((2, 7), Modifiers::NONE);
    session.pointer_release((2, 7));
    let after = session.buffer().as_bytes().to_vec();
    assert_ne!(before, after);

    session.undo();
    assert_eq!(session.buffer().as_bytes(), &before[..]);
    session.redo();
    assert_eq!(session.buffer().as_bytes(), &after[..]);
}

#[test]
fn test_pencil_blends_each_pixel_once_per_stroke() {
    let mut session = white_session(5, 1);
    session.set_colour(Button::Primary, half_red());
    // back and forth over the same pixels
    session.pointer_press((0, 0), Button::Primary, Modifiers::NONE);
    session.pointer_move((4, 0), Modifiers::NONE);
    session.pointer_move((0, 0), Modifiers::NONE);
    session.pointer_release((0, 0));
    for x in 0..5 {
        assert_eq!(session.buffer().raw((x, 0)), Some([255, 128, 128, 255]));
    }
}

#[test]
fn test_fast_drag_leaves_no_gaps() {
    let mut session = white_session(10, 10);
    session.set_tip(Tip::Pen);
    session.pointer_press((0, 0), Button::Primary, Modifiers::NONE);
    session.pointer_release((9, 9));
    for i in 0..10 {
        assert_eq!(session.buffer().get((i, i)), Some(Colour::BLACK));
    }
}

#[test]
fn test_history_capacity_evicts_oldest() {
    let config = EngineConfig {
        history_capacity: 3,
        ..EngineConfig::default()
    };
    let mut session = Session::blank(4, 1, Channels::Rgba, Colour::WHITE, config);
    session.set_tip(Tip::Pen);
    for x in 0..4 {
        session.pointer_press((x, 0), Button::Primary, Modifiers::NONE);
        session.pointer_release((x, 0));
    }
    assert_eq!(session.history().undo_count(), 3);
    while session.undo().is_some() {}
    // the first dot is no longer recoverable
    assert_eq!(session.buffer().get((0, 0)), Some(Colour::BLACK));
    assert_eq!(session.buffer().get((1, 0)), Some(Colour::WHITE));
}

#[test]
fn test_new_edit_clears_redo() {
    let mut session = white_session(4, 1);
    session.set_tip(Tip::Pen);
    session.pointer_press((0, 0), Button::Primary, Modifiers::NONE);
    session.pointer_release((0, 0));
    session.undo();
    assert!(session.history().can_redo());
    session.pointer_press((1, 0), Button::Primary, Modifiers::NONE);
    session.pointer_release((1, 0));
    assert!(!session.history().can_redo());
}

#[test]
fn test_click_outside_canvas_records_nothing() {
    let mut session = white_session(4, 4);
    session.pointer_press((-5, -5), Button::Primary, Modifiers::NONE);
    assert_eq!(session.pointer_release((-5, -5)), None);
    assert!(!session.history().can_undo());
}

#[test]
fn test_paint_is_clipped_to_selection() {
    let mut session = white_session(4, 4);
    session.set_tool(Tool::RectFill);
    session.set_tip(Tip::Select);
    session.pointer_press((1, 1), Button::Primary, Modifiers::NONE);
    session.pointer_release((2, 2));
    assert_eq!(session.canvas().selection.len(), 4);

    session.set_tip(Tip::Pen);
    session.pointer_press((0, 0), Button::Primary, Modifiers::NONE);
    session.pointer_release((3, 3));
    assert_eq!(session.buffer().get((0, 0)), Some(Colour::WHITE));
    assert_eq!(session.buffer().get((1, 1)), Some(Colour::BLACK));
    assert_eq!(session.buffer().get((2, 2)), Some(Colour::BLACK));
    assert_eq!(session.buffer().get((3, 3)), Some(Colour::WHITE));
}

#[test]
fn test_stale_history_entries_are_dropped_on_new_image() {
    let mut session = white_session(4, 4);
    session.pointer_press((0, 0), Button::Primary, Modifiers::NONE);
    session.pointer_release((0, 0));
    session.new_image(PixelBuffer::filled(4, 4, Channels::Rgba, Colour::BLACK));
    assert_eq!(session.undo(), None);
    assert!(session.buffer().as_bytes().chunks(4).all(|p| p == [0, 0, 0, 255]));
}

#[test]
fn test_over_identities() {
    let bg = Rgba::new(Rgb::new(0.1, 0.7, 0.3), 0.6);
    let opaque = Rgba::new(Rgb::new(0.9, 0.2, 0.5), 1.0);
    assert_eq!(over(opaque, bg), opaque);

    let clear = Rgba::new(Rgb::new(0.9, 0.2, 0.5), 0.0);
    assert_eq!(over(clear, bg).colour, bg.colour);
}

#[test]
fn test_colour_space_round_trips() {
    for r in (0..=255u8).step_by(15) {
        for g in (0..=255u8).step_by(17) {
            for b in (0..=255u8).step_by(51) {
                let rgb = Rgb::from_bytes([r, g, b]);
                for back in [rgb.to_hsv().to_rgb(), rgb.to_hsl().to_rgb()] {
                    let [r2, g2, b2] = back.to_bytes();
                    assert!(r.abs_diff(r2) <= 1, "{r},{g},{b}");
                    assert!(g.abs_diff(g2) <= 1, "{r},{g},{b}");
                    assert!(b.abs_diff(b2) <= 1, "{r},{g},{b}");
                }
            }
        }
    }
}

#[test]
fn test_line_endpoints_and_length() {
    for (start, finish) in [((0, 0), (7, 3)), ((5, 5), (-2, 9)), ((3, 3), (3, 3))] {
        let line = Line::new(start, finish);
        let dx = (finish.0 - start.0).abs();
        let dy = (finish.1 - start.1).abs();
        assert_eq!(line.len(), dx.max(dy) as usize + 1);
        assert_eq!(line.at(0), start);
        assert_eq!(line.at(line.len() - 1), finish);
    }
}

#[test]
fn test_rect_fill_visits_every_cell_once() {
    let fill = RectFill::new((4, -1), (-2, 3));
    let points: Vec<_> = fill.points().collect();
    let unique: HashSet<_> = points.iter().copied().collect();
    assert_eq!(points.len(), 7 * 5);
    assert_eq!(unique.len(), points.len());
}

#[test]
fn test_circle_is_rotation_symmetric() {
    let circle = EllipseOutline::new((0, 0), (10, 10));
    let points: HashSet<_> = circle.points().collect();
    // rotate 90 degrees about (5, 5)
    let rotated: HashSet<_> = points.iter().map(|&(x, y)| (10 - y, x)).collect();
    assert_eq!(points, rotated);
}

#[test]
fn test_selection_add_remove_are_idempotent() {
    let mut selection = Selection::new(3, 3);
    assert!(selection.add((1, 1)));
    let edges = selection.boundary_edges();
    assert!(!selection.add((1, 1)));
    assert_eq!(selection.boundary_edges(), edges);
    assert!(selection.remove((1, 1)));
    assert!(!selection.remove((1, 1)));
    assert!(selection.is_empty());
}

#[test]
fn test_uniform_flood_covers_buffer_once() {
    let buffer = PixelBuffer::filled(7, 5, Channels::Rgb, Colour::rgb(3, 4, 5));
    let region = flood_contiguous(&buffer, (0, 0), &Tolerance::exact());
    let unique: HashSet<_> = region.points.iter().copied().collect();
    assert_eq!(region.len(), 35);
    assert_eq!(unique.len(), 35);
}
