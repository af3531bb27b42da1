//! pxpaint - raster paint engine
//!
//! Colour models, flat pixel buffers, shape interpolators, selections with
//! flood fill, a gesture-driven brush and a bounded undo history, tied
//! together by `Session`.

pub mod brush;
pub mod buffer;
pub mod canvas;
pub mod cli;
pub mod colour;
pub mod config;
pub mod error;
pub mod history;
pub mod interp;
pub mod output;
pub mod png;
pub mod script;
pub mod selection;
pub mod session;

pub use brush::{BrushInfo, BrushState, Button, Modifiers, Operation, SelectMode, Tip, Tool};
pub use buffer::{Channels, Path, PixelBuffer, Pos, Rect};
pub use canvas::{Canvas, PixelDiff, Preview, SelectionDiff};
pub use colour::{Colour, ColourFrame, Hsl, Hsv, Rgb, Rgba};
pub use config::EngineConfig;
pub use error::{PaintError, Result};
pub use history::{Action, ActionHistory, CompositeAction, FnAction, InverseAction};
pub use interp::{DiscreteInterpolator, Interpolator, ShapeKind};
pub use script::{Script, Step};
pub use selection::{Region, Selection, Tolerance};
pub use session::{Damage, Session};
