//! Replayable paint scripts (`*.paint.json`, `*.paint.yaml`).
//!
//! A script describes a starting canvas and a list of input steps. Replaying
//! it drives a `Session` exactly as pointer and keyboard events would, which
//! makes scripts usable both as fixtures and as a batch drawing format.
//!
//! ```yaml
//! canvas: { width: 4, height: 4, background: white }
//! steps:
//!   - { op: colour, colour: "#ff0000", alpha: 0.5 }
//!   - { op: stroke, points: [[1, 1]] }
//!   - { op: undo }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;
use walkdir::WalkDir;

use crate::brush::{Button, Modifiers, Tip, Tool};
use crate::buffer::{Channels, PixelBuffer, Pos};
use crate::colour::{Colour, ColourFrame};
use crate::config::EngineConfig;
use crate::error::{PaintError, Result};
use crate::png::read_png;
use crate::session::Session;

/// File suffixes recognised as scripts when walking directories.
pub const SCRIPT_SUFFIXES: [&str; 3] = [".paint.json", ".paint.yaml", ".paint.yml"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub canvas: CanvasSpec,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// The starting image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSpec {
    pub width: u32,
    pub height: u32,
    pub channels: Channels,
    pub background: Colour,
    /// Image to start from instead of a blank canvas, relative to the script.
    pub source: Option<PathBuf>,
}

impl Default for CanvasSpec {
    fn default() -> Self {
        Self {
            width: 16,
            height: 16,
            channels: Channels::Rgba,
            background: Colour::WHITE,
            source: None,
        }
    }
}

fn default_white() -> Colour {
    Colour::WHITE
}

/// One input event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Step {
    Tool {
        tool: Tool,
    },
    Tip {
        tip: Tip,
    },
    /// Set a colour slot. `alpha` overrides the colour's own alpha with an
    /// exact float.
    Colour {
        #[serde(default)]
        button: Button,
        colour: Colour,
        #[serde(default)]
        alpha: Option<f32>,
    },
    Press {
        at: Pos,
        #[serde(default)]
        button: Button,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Move {
        at: Pos,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Release {
        at: Pos,
    },
    /// Press at the first point, move through the rest, release at the last.
    Stroke {
        points: Vec<Pos>,
        #[serde(default)]
        button: Button,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Modifiers {
        modifiers: Modifiers,
    },
    Cancel,
    Undo,
    Redo,
    SelectAll,
    Deselect,
    BeginMove,
    CommitMove,
    NewCanvas {
        width: u32,
        height: u32,
        #[serde(default)]
        channels: Channels,
        #[serde(default = "default_white")]
        background: Colour,
    },
}

impl Script {
    /// Load a script, choosing JSON or YAML by extension.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PaintError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read script: {}", e),
        })?;
        let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| PaintError::Parse {
            message: format!("Invalid script: {}", e),
            help: Some("Each step needs an \"op\" field, e.g. {\"op\": \"undo\"}".to_string()),
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| PaintError::Parse {
            message: format!("Invalid script: {}", e),
            help: Some("Each step needs an `op` field, e.g. `- { op: undo }`".to_string()),
        })
    }

    /// Build the starting session. `base` resolves a relative `source`.
    pub fn session(&self, config: EngineConfig, base: &Path) -> Result<Session> {
        let spec = &self.canvas;
        let buffer = match &spec.source {
            Some(source) => read_png(&base.join(source))?,
            None => PixelBuffer::filled(spec.width, spec.height, spec.channels, spec.background),
        };
        Ok(Session::new(buffer, config))
    }

    /// Replay every step on a new session and return it.
    pub fn run(&self, config: EngineConfig, base: &Path) -> Result<Session> {
        let mut session = self.session(config, base)?;
        for (index, step) in self.steps.iter().enumerate() {
            debug!(index, ?step, "replay step");
            step.apply(&mut session);
        }
        Ok(session)
    }
}

impl Step {
    pub fn apply(&self, session: &mut Session) {
        match self {
            Step::Tool { tool } => {
                session.set_tool(*tool);
            }
            Step::Tip { tip } => {
                session.set_tip(*tip);
            }
            Step::Colour {
                button,
                colour,
                alpha,
            } => {
                let mut frame = ColourFrame::from_colour(*colour);
                if let Some(alpha) = alpha {
                    frame.set_alpha(*alpha);
                }
                session.set_colour(*button, frame);
            }
            Step::Press {
                at,
                button,
                modifiers,
            } => session.pointer_press(*at, *button, *modifiers),
            Step::Move { at, modifiers } => session.pointer_move(*at, *modifiers),
            Step::Release { at } => {
                session.pointer_release(*at);
            }
            Step::Stroke {
                points,
                button,
                modifiers,
            } => {
                let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
                    return;
                };
                session.pointer_press(first, *button, *modifiers);
                for &pos in points.iter().skip(1) {
                    session.pointer_move(pos, *modifiers);
                }
                session.pointer_release(last);
            }
            Step::Modifiers { modifiers } => session.modifiers_changed(*modifiers),
            Step::Cancel => session.cancel(),
            Step::Undo => {
                session.undo();
            }
            Step::Redo => {
                session.redo();
            }
            Step::SelectAll => {
                session.select_all();
            }
            Step::Deselect => {
                session.clear_selection();
            }
            Step::BeginMove => {
                session.begin_selection_move();
            }
            Step::CommitMove => {
                session.commit_selection_move();
            }
            Step::NewCanvas {
                width,
                height,
                channels,
                background,
            } => session.new_image(PixelBuffer::filled(*width, *height, *channels, *background)),
        }
    }
}

/// Whether `path` names a script file.
pub fn is_script(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| SCRIPT_SUFFIXES.iter().any(|s| name.ends_with(s)))
}

/// Expand directories into the scripts they contain (recursively, sorted);
/// plain files are kept as given.
pub fn discover_scripts(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut scripts = Vec::new();
    for path in paths {
        if !path.is_dir() {
            scripts.push(path.clone());
            continue;
        }
        let mut found: Vec<PathBuf> = WalkDir::new(path)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && is_script(e.path()))
            .map(|e| e.into_path())
            .collect();
        found.sort();
        scripts.extend(found);
    }
    scripts
}

/// Output file name for a script: `art/logo.paint.yaml` -> `logo.png`.
pub fn output_name(path: &Path) -> String {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("out");
    let stem = SCRIPT_SUFFIXES
        .iter()
        .find_map(|s| name.strip_suffix(s))
        .or_else(|| path.file_stem().and_then(|s| s.to_str()))
        .unwrap_or(name);
    format!("{}.png", stem)
}
