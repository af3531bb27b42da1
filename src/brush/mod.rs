//! Per-gesture brush controller.
//!
//! `BrushInfo` owns the active tool and tip and everything a live gesture
//! accumulates: anchors, the dirty rectangle and the reversible diff. A
//! gesture runs `start` on press, `drag` (which calls `brush` for every
//! pixel the pointer crosses) while held, and `submit` on release; `cancel`
//! rolls the gesture back in place.
//!
//! The canvas, preview overlay, history and config are borrowed per call
//! through a `Workspace`; the brush never stores them.

mod bucket;
mod dispatch;
mod moving;
mod paint;
mod shape;

pub use dispatch::{constrain, resolve, Operation};

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::buffer::{search_outward, Pos, Rect};
use crate::canvas::{Canvas, Preview};
use crate::colour::{Colour, ColourFrame};
use crate::config::EngineConfig;
use crate::history::{Action, ActionHistory, CompositeAction};
use crate::interp::{Interpolator, ShapeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tool {
    Camera,
    #[default]
    Paint,
    Line,
    RectOutline,
    RectFill,
    EllipseOutline,
    EllipseFill,
    BucketFill,
}

impl Tool {
    /// The shape a drag with this tool draws, if any.
    pub fn shape(self) -> Option<ShapeKind> {
        match resolve(self, Tip::Pencil) {
            Operation::Shape(kind, _) => Some(kind),
            _ => None,
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tool::Camera => "Camera",
            Tool::Paint => "Paint",
            Tool::Line => "Line",
            Tool::RectOutline => "Rectangle",
            Tool::RectFill => "Filled rectangle",
            Tool::EllipseOutline => "Ellipse",
            Tool::EllipseFill => "Filled ellipse",
            Tool::BucketFill => "Bucket fill",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tip {
    /// Alpha-blends the ink over the pixel.
    #[default]
    Pencil,
    /// Writes the ink opaque, ignoring its alpha.
    Pen,
    /// Clears alpha to zero.
    Eraser,
    /// Adds or removes selection membership.
    Select,
}

impl fmt::Display for Tip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tip::Pencil => "Pencil",
            Tip::Pen => "Pen",
            Tip::Eraser => "Eraser",
            Tip::Select => "Select",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BrushState {
    #[default]
    Neutral,
    Brushing,
    Pipette,
    SubimgReady,
    MovingSubimg,
    MovingSelOutline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Button {
    #[default]
    Primary,
    Secondary,
}

/// Held modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Constrain to axis, square or circle; global bucket fill.
    pub shift: bool,
    /// Add to the selection instead of replacing; move only the outline.
    pub ctrl: bool,
    /// Pipette.
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
    };
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: false,
    };
    pub const CTRL: Modifiers = Modifiers {
        shift: false,
        ctrl: true,
        alt: false,
    };
    pub const ALT: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: true,
    };
}

/// How a select-tip gesture changes the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectMode {
    Replace,
    Add,
    Remove,
}

impl SelectMode {
    pub fn from_input(button: Button, modifiers: Modifiers) -> Self {
        match (button, modifiers.ctrl) {
            (Button::Secondary, _) => SelectMode::Remove,
            (Button::Primary, true) => SelectMode::Add,
            (Button::Primary, false) => SelectMode::Replace,
        }
    }
}

/// Everything a gesture mutates, borrowed for the duration of one call.
pub struct Workspace<'a> {
    pub canvas: &'a mut Canvas,
    pub preview: &'a mut Preview,
    pub history: &'a mut ActionHistory<Canvas>,
    pub config: &'a EngineConfig,
}

/// Lifted pixels following the pointer during a selection move.
struct Floating {
    pixels: Vec<(Pos, [u8; 4])>,
    offset: (i32, i32),
}

pub struct BrushInfo {
    pub tool: Tool,
    pub tip: Tip,
    pub primary: ColourFrame,
    pub secondary: ColourFrame,

    state: BrushState,
    button: Button,
    modifiers: Modifiers,
    starting_pos: Option<Pos>,
    last_pos: Option<Pos>,
    last_gesture_end: Option<Pos>,
    brushing_bbox: Option<Rect>,

    /// Pen and eraser: position -> raw bytes before the gesture.
    single_color_diff: BTreeMap<Pos, [u8; 4]>,
    /// Pencil: position -> (raw after, raw before).
    two_color_diff: BTreeMap<Pos, ([u8; 4], [u8; 4])>,
    /// Select: position -> membership before the gesture.
    selection_diff: BTreeMap<Pos, bool>,

    shape: Option<Interpolator>,
    preview_drawn: Vec<Pos>,
    pending: Option<Box<dyn Action<Canvas>>>,

    floating: Option<Floating>,
    move_anchor: Option<Pos>,
    outline_offset: (i32, i32),
    selection_before: Option<HashSet<Pos>>,
}

impl BrushInfo {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            tool: Tool::default(),
            tip: Tip::default(),
            primary: ColourFrame::from_colour(config.primary),
            secondary: ColourFrame::from_colour(config.secondary),
            state: BrushState::Neutral,
            button: Button::Primary,
            modifiers: Modifiers::NONE,
            starting_pos: None,
            last_pos: None,
            last_gesture_end: None,
            brushing_bbox: None,
            single_color_diff: BTreeMap::new(),
            two_color_diff: BTreeMap::new(),
            selection_diff: BTreeMap::new(),
            shape: None,
            preview_drawn: Vec::new(),
            pending: None,
            floating: None,
            move_anchor: None,
            outline_offset: (0, 0),
            selection_before: None,
        }
    }

    pub fn state(&self) -> BrushState {
        self.state
    }

    pub fn operation(&self) -> Operation {
        resolve(self.tool, self.tip)
    }

    pub fn starting_pos(&self) -> Option<Pos> {
        self.starting_pos
    }

    pub fn last_pos(&self) -> Option<Pos> {
        self.last_pos
    }

    /// Dirty rectangle of the current (or just finished) gesture.
    pub fn brushing_bbox(&self) -> Option<Rect> {
        self.brushing_bbox
    }

    /// The in-progress shape, while a shape gesture is live.
    pub fn shape(&self) -> Option<&Interpolator> {
        self.shape.as_ref()
    }

    pub fn colour(&self, button: Button) -> ColourFrame {
        match button {
            Button::Primary => self.primary,
            Button::Secondary => self.secondary,
        }
    }

    pub fn set_colour(&mut self, button: Button, colour: ColourFrame) {
        match button {
            Button::Primary => self.primary = colour,
            Button::Secondary => self.secondary = colour,
        }
    }

    fn label(&self) -> String {
        format!("{} ({})", self.tool, self.tip)
    }

    fn select_mode(&self) -> SelectMode {
        SelectMode::from_input(self.button, self.modifiers)
    }

    /// Begin a gesture at `pos`.
    pub fn start(&mut self, ws: &mut Workspace, pos: Pos, button: Button, modifiers: Modifiers) {
        if self.state != BrushState::Neutral {
            return;
        }
        self.forget();
        self.state = BrushState::Brushing;
        self.button = button;
        self.modifiers = modifiers;
        self.starting_pos = Some(pos);
        self.last_pos = Some(pos);

        let operation = self.operation();
        debug!(?operation, ?pos, ?button, "gesture start");
        match operation {
            Operation::Pan => {}
            Operation::Freehand(_) => self.freehand_start(ws, pos),
            Operation::Shape(kind, _) => self.shape_start(ws, kind, pos),
            Operation::Bucket(_) => self.bucket_start(ws, pos),
        }
    }

    /// Move the live gesture to `pos`.
    pub fn drag(&mut self, ws: &mut Workspace, pos: Pos, modifiers: Modifiers) {
        if self.state != BrushState::Brushing {
            return;
        }
        match self.operation() {
            Operation::Freehand(_) => self.freehand_drag(ws, pos),
            Operation::Shape(kind, _) => self.shape_drag(ws, kind, pos, modifiers),
            Operation::Pan | Operation::Bucket(_) => {}
        }
        self.last_pos = Some(pos);
    }

    /// Finish the gesture and record it. Returns the history label, if an
    /// entry was recorded.
    pub fn submit(&mut self, ws: &mut Workspace) -> Option<String> {
        if self.state != BrushState::Brushing {
            return None;
        }
        let recorded = match self.operation() {
            Operation::Pan => None,
            Operation::Freehand(_) => self.freehand_submit(ws),
            Operation::Shape(..) => self.shape_submit(ws),
            Operation::Bucket(_) => self.bucket_submit(ws),
        };
        debug!(recorded = ?recorded, bbox = ?self.brushing_bbox, "gesture submit");
        self.last_gesture_end = self.last_pos;
        self.state = BrushState::Neutral;
        self.clear_gesture();
        recorded
    }

    /// Roll the live gesture back and return to neutral.
    ///
    /// This is the per-gesture reset: captured pixels and selection changes
    /// are restored in place before the gesture data is dropped. Use
    /// [`BrushInfo::forget`] only when the canvas already reflects the
    /// outcome.
    pub fn cancel(&mut self, ws: &mut Workspace) {
        match self.state {
            BrushState::Brushing => {
                debug!(operation = ?self.operation(), "gesture cancel");
                self.clear_preview(ws);
                self.revert_stroke(ws);
            }
            BrushState::SubimgReady | BrushState::MovingSubimg | BrushState::MovingSelOutline => {
                debug!("selection move cancel");
                self.move_cancel(ws);
            }
            BrushState::Neutral | BrushState::Pipette => {}
        }
        self.forget();
    }

    /// Drop all gesture data without touching the canvas.
    pub(crate) fn forget(&mut self) {
        self.state = BrushState::Neutral;
        self.starting_pos = None;
        self.last_pos = None;
        self.brushing_bbox = None;
        self.clear_gesture();
        self.floating = None;
        self.move_anchor = None;
        self.outline_offset = (0, 0);
        self.selection_before = None;
    }

    fn clear_gesture(&mut self) {
        self.single_color_diff.clear();
        self.two_color_diff.clear();
        self.selection_diff.clear();
        self.shape = None;
        self.preview_drawn.clear();
        self.pending = None;
    }

    /// Record `actions` as one history entry without re-running them.
    fn push_actions(
        &mut self,
        ws: &mut Workspace,
        label: String,
        mut actions: Vec<Box<dyn Action<Canvas>>>,
    ) -> Option<String> {
        let action = match actions.len() {
            0 => return None,
            1 => actions.pop()?,
            _ => Box::new(CompositeAction::new(label.clone(), actions)),
        };
        ws.history.push(action);
        Some(label)
    }

    fn clear_preview(&mut self, ws: &mut Workspace) {
        for pos in self.preview_drawn.drain(..) {
            ws.preview.erase(pos);
        }
    }

    fn draw_preview(&mut self, ws: &mut Workspace, pos: Pos, colour: Colour) {
        if ws.preview.buffer.in_bounds(pos) {
            ws.preview.draw(pos, colour);
            self.preview_drawn.push(pos);
        }
    }

    pub fn enter_pipette(&mut self) {
        if self.state == BrushState::Neutral {
            self.state = BrushState::Pipette;
        }
    }

    pub fn leave_pipette(&mut self) {
        if self.state == BrushState::Pipette {
            self.state = BrushState::Neutral;
        }
    }

    /// Pick the colour under `pos` into the button's slot.
    ///
    /// With a search radius configured, the nearest non-transparent pixel
    /// within that many rings is used instead.
    pub fn sample(&mut self, ws: &Workspace, pos: Pos, button: Button) -> Option<Colour> {
        let buffer = &ws.canvas.buffer;
        let radius = ws.config.pipette_search_radius;
        let colour = if radius == 0 {
            buffer.get(pos)
        } else {
            search_outward(buffer, pos, radius, |c| !c.is_transparent())
                .and_then(|found| buffer.get(found))
        }?;
        debug!(?pos, %colour, "pipette sample");
        self.set_colour(button, ColourFrame::from_colour(colour));
        Some(colour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Channels;

    struct Fixture {
        canvas: Canvas,
        preview: Preview,
        history: ActionHistory<Canvas>,
        config: EngineConfig,
    }

    impl Fixture {
        fn new(width: u32, height: u32) -> Self {
            Self {
                canvas: Canvas::blank(width, height, Channels::Rgba, Colour::WHITE),
                preview: Preview::new(width, height),
                history: ActionHistory::default(),
                config: EngineConfig::default(),
            }
        }

        fn ws(&mut self) -> Workspace<'_> {
            Workspace {
                canvas: &mut self.canvas,
                preview: &mut self.preview,
                history: &mut self.history,
                config: &self.config,
            }
        }
    }

    #[test]
    fn test_select_mode_from_input() {
        assert_eq!(SelectMode::from_input(Button::Primary, Modifiers::NONE), SelectMode::Replace);
        assert_eq!(SelectMode::from_input(Button::Primary, Modifiers::CTRL), SelectMode::Add);
        assert_eq!(SelectMode::from_input(Button::Secondary, Modifiers::CTRL), SelectMode::Remove);
    }

    #[test]
    fn test_tool_shapes() {
        assert_eq!(Tool::Line.shape(), Some(ShapeKind::Line));
        assert_eq!(Tool::Paint.shape(), None);
        assert_eq!(Tool::BucketFill.shape(), None);
    }

    #[test]
    fn test_camera_records_nothing() {
        let mut fx = Fixture::new(4, 4);
        let mut brush = BrushInfo::new(&fx.config);
        brush.tool = Tool::Camera;
        brush.start(&mut fx.ws(), (1, 1), Button::Primary, Modifiers::NONE);
        assert_eq!(brush.state(), BrushState::Brushing);
        brush.drag(&mut fx.ws(), (3, 3), Modifiers::NONE);
        assert_eq!(brush.submit(&mut fx.ws()), None);
        assert_eq!(brush.state(), BrushState::Neutral);
        assert!(!fx.history.can_undo());
    }

    #[test]
    fn test_cancel_rolls_stroke_back_in_place() {
        let mut fx = Fixture::new(4, 4);
        let mut brush = BrushInfo::new(&fx.config);
        brush.tip = Tip::Pen;
        let before = fx.canvas.buffer.as_bytes().to_vec();
        brush.start(&mut fx.ws(), (0, 0), Button::Primary, Modifiers::NONE);
        brush.drag(&mut fx.ws(), (3, 0), Modifiers::NONE);
        assert_eq!(fx.canvas.buffer.get((3, 0)), Some(Colour::BLACK));

        brush.cancel(&mut fx.ws());
        assert_eq!(fx.canvas.buffer.as_bytes(), &before[..]);
        assert_eq!(brush.state(), BrushState::Neutral);
        assert_eq!(brush.submit(&mut fx.ws()), None);
        assert!(!fx.history.can_undo());
    }

    #[test]
    fn test_start_is_ignored_mid_gesture() {
        let mut fx = Fixture::new(4, 4);
        let mut brush = BrushInfo::new(&fx.config);
        brush.start(&mut fx.ws(), (0, 0), Button::Primary, Modifiers::NONE);
        brush.start(&mut fx.ws(), (3, 3), Button::Primary, Modifiers::NONE);
        assert_eq!(brush.starting_pos(), Some((0, 0)));
    }

    #[test]
    fn test_pipette_samples_into_slot() {
        let mut fx = Fixture::new(4, 4);
        fx.canvas.buffer.put((2, 2), Colour::rgb(10, 20, 30));
        let mut brush = BrushInfo::new(&fx.config);
        brush.enter_pipette();
        assert_eq!(brush.state(), BrushState::Pipette);
        let picked = brush.sample(&fx.ws(), (2, 2), Button::Secondary);
        assert_eq!(picked, Some(Colour::rgb(10, 20, 30)));
        assert_eq!(brush.secondary.to_colour(), Colour::rgb(10, 20, 30));
        brush.leave_pipette();
        assert_eq!(brush.state(), BrushState::Neutral);
    }

    #[test]
    fn test_pipette_search_radius() {
        let mut fx = Fixture::new(5, 5);
        fx.canvas.buffer.fill(Colour::TRANSPARENT);
        fx.canvas.buffer.put((4, 2), Colour::rgb(0, 0, 255));
        fx.config.pipette_search_radius = 2;
        let mut brush = BrushInfo::new(&fx.config);
        assert_eq!(brush.sample(&fx.ws(), (2, 2), Button::Primary), Some(Colour::rgb(0, 0, 255)));
        fx.config.pipette_search_radius = 1;
        assert_eq!(brush.sample(&fx.ws(), (2, 2), Button::Primary), None);
    }
}
