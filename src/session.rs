//! One open image and everything that edits it.
//!
//! A `Session` owns the canvas, the preview overlay, the undo history and the
//! brush, and turns raw pointer and keyboard events into brush calls. A
//! renderer drains `take_damage` once per frame to learn what to redraw.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::brush::{BrushInfo, BrushState, Button, Modifiers, Tip, Tool, Workspace};
use crate::buffer::{Channels, PixelBuffer, Pos, Rect};
use crate::canvas::{Canvas, Preview, SelectionDiff};
use crate::colour::{Colour, ColourFrame};
use crate::config::EngineConfig;
use crate::history::{ActionHistory, FnAction};

/// Regions that changed since the last `take_damage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Damage {
    pub image: Option<Rect>,
    pub preview: Option<Rect>,
    pub selection: Option<Rect>,
}

impl Damage {
    pub fn is_empty(&self) -> bool {
        self.image.is_none() && self.preview.is_none() && self.selection.is_none()
    }
}

pub struct Session {
    config: EngineConfig,
    canvas: Canvas,
    preview: Preview,
    history: ActionHistory<Canvas>,
    brush: BrushInfo,
    modifiers: Modifiers,
}

impl Session {
    pub fn new(buffer: PixelBuffer, config: EngineConfig) -> Self {
        let preview = Preview::new(buffer.width(), buffer.height());
        let history = ActionHistory::new(config.history_capacity);
        let brush = BrushInfo::new(&config);
        Self {
            config,
            canvas: Canvas::new(buffer),
            preview,
            history,
            brush,
            modifiers: Modifiers::NONE,
        }
    }

    /// A session on a fresh canvas filled with `background`.
    pub fn blank(
        width: u32,
        height: u32,
        channels: Channels,
        background: Colour,
        config: EngineConfig,
    ) -> Self {
        Self::new(
            PixelBuffer::filled(width, height, channels, background),
            config,
        )
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.canvas.buffer
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    pub fn history(&self) -> &ActionHistory<Canvas> {
        &self.history
    }

    pub fn brush(&self) -> &BrushInfo {
        &self.brush
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    fn split(&mut self) -> (&mut BrushInfo, Workspace<'_>) {
        (
            &mut self.brush,
            Workspace {
                canvas: &mut self.canvas,
                preview: &mut self.preview,
                history: &mut self.history,
                config: &self.config,
            },
        )
    }

    fn is_neutral(&self) -> bool {
        self.brush.state() == BrushState::Neutral
    }

    /// Switch tool. Ignored while a gesture is live.
    pub fn set_tool(&mut self, tool: Tool) -> bool {
        if !self.is_neutral() {
            return false;
        }
        self.brush.tool = tool;
        true
    }

    /// Switch tip. Ignored while a gesture is live.
    pub fn set_tip(&mut self, tip: Tip) -> bool {
        if !self.is_neutral() {
            return false;
        }
        self.brush.tip = tip;
        true
    }

    pub fn set_colour(&mut self, button: Button, colour: ColourFrame) {
        self.brush.set_colour(button, colour);
    }

    pub fn pointer_press(&mut self, pos: Pos, button: Button, modifiers: Modifiers) {
        self.modifiers = modifiers;
        let (brush, mut ws) = self.split();
        if brush.state() == BrushState::Pipette && !modifiers.alt {
            brush.leave_pipette();
        }
        match brush.state() {
            BrushState::Neutral if modifiers.alt => {
                brush.enter_pipette();
                brush.sample(&ws, pos, button);
            }
            BrushState::Neutral => brush.start(&mut ws, pos, button, modifiers),
            BrushState::Pipette => {
                brush.sample(&ws, pos, button);
            }
            BrushState::SubimgReady => brush.move_press(&mut ws, pos, modifiers),
            BrushState::Brushing | BrushState::MovingSubimg | BrushState::MovingSelOutline => {}
        }
    }

    pub fn pointer_move(&mut self, pos: Pos, modifiers: Modifiers) {
        self.modifiers = modifiers;
        let (brush, mut ws) = self.split();
        match brush.state() {
            BrushState::Brushing => brush.drag(&mut ws, pos, modifiers),
            BrushState::MovingSubimg | BrushState::MovingSelOutline => brush.move_drag(&mut ws, pos),
            _ => {}
        }
    }

    /// Release the pointer. Returns the label of the history entry the
    /// gesture recorded, if any.
    pub fn pointer_release(&mut self, pos: Pos) -> Option<String> {
        let modifiers = self.modifiers;
        let (brush, mut ws) = self.split();
        match brush.state() {
            BrushState::Brushing => {
                brush.drag(&mut ws, pos, modifiers);
                brush.submit(&mut ws)
            }
            BrushState::MovingSubimg | BrushState::MovingSelOutline => {
                brush.move_drag(&mut ws, pos);
                brush.move_release();
                None
            }
            _ => None,
        }
    }

    /// Modifier keys changed without pointer motion.
    ///
    /// Alt toggles the pipette from neutral; shift re-constrains a live shape.
    pub fn modifiers_changed(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
        let (brush, mut ws) = self.split();
        match brush.state() {
            BrushState::Neutral if modifiers.alt => brush.enter_pipette(),
            BrushState::Pipette if !modifiers.alt => brush.leave_pipette(),
            BrushState::Brushing if brush.shape().is_some() => {
                if let Some(pos) = brush.last_pos() {
                    brush.drag(&mut ws, pos, modifiers);
                }
            }
            _ => {}
        }
    }

    /// Abandon the live gesture or selection move.
    pub fn cancel(&mut self) {
        let (brush, mut ws) = self.split();
        brush.cancel(&mut ws);
    }

    /// Undo the last entry. Refused while a gesture is live.
    pub fn undo(&mut self) -> Option<String> {
        if !self.is_neutral() {
            debug!(state = ?self.brush.state(), "undo refused mid-gesture");
            return None;
        }
        self.history.undo(&mut self.canvas)
    }

    /// Redo the last undone entry. Refused while a gesture is live.
    pub fn redo(&mut self) -> Option<String> {
        if !self.is_neutral() {
            debug!(state = ?self.brush.state(), "redo refused mid-gesture");
            return None;
        }
        self.history.redo(&mut self.canvas)
    }

    /// Replace the image. History is cleared, since no earlier entry can
    /// apply to the new buffer.
    pub fn new_image(&mut self, buffer: PixelBuffer) {
        self.cancel();
        info!(
            width = buffer.width(),
            height = buffer.height(),
            channels = buffer.channels().count(),
            "new image"
        );
        self.preview = Preview::new(buffer.width(), buffer.height());
        let action = FnAction::new(
            "New image",
            move |canvas: &mut Canvas| canvas.replace(buffer.clone()),
            |_: &mut Canvas| {},
        );
        self.history
            .execute_no_undo(&mut self.canvas, Box::new(action));
        self.brush.forget();
    }

    pub fn begin_selection_move(&mut self) -> bool {
        let (brush, mut ws) = self.split();
        brush.begin_selection_move(&mut ws)
    }

    pub fn commit_selection_move(&mut self) -> Option<String> {
        let (brush, mut ws) = self.split();
        brush.commit_selection_move(&mut ws)
    }

    /// Select every pixel as one undoable step.
    pub fn select_all(&mut self) -> Option<String> {
        let everything: HashSet<Pos> = self
            .canvas
            .buffer
            .bounds()
            .map(|r| {
                (r.min_y..=r.max_y)
                    .flat_map(|y| (r.min_x..=r.max_x).map(move |x| (x, y)))
                    .collect()
            })
            .unwrap_or_default();
        self.replace_selection("Select all", everything)
    }

    /// Drop the selection as one undoable step.
    pub fn clear_selection(&mut self) -> Option<String> {
        self.replace_selection("Deselect", HashSet::new())
    }

    fn replace_selection(&mut self, label: &str, after: HashSet<Pos>) -> Option<String> {
        if !self.is_neutral() {
            return None;
        }
        let before: HashSet<Pos> = self.canvas.selection.iter().collect();
        let diff = SelectionDiff::between(label, &before, &after);
        if diff.is_empty() {
            return None;
        }
        self.history.execute(&mut self.canvas, Box::new(diff));
        Some(label.to_string())
    }

    /// Drain the accumulated dirty rectangles.
    pub fn take_damage(&mut self) -> Damage {
        Damage {
            image: self.canvas.take_dirty(),
            preview: self.preview.take_dirty(),
            selection: self.canvas.selection.take_dirty(),
        }
    }
}
