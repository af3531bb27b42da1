//! Replay command implementation.
//!
//! Runs paint scripts through a session and writes each final image as PNG.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::EngineConfig;
use crate::error::{PaintError, Result};
use crate::output::{display_path, plural, Printer};
use crate::png::write_png;
use crate::script::{discover_scripts, output_name, Script};

/// Replay paint scripts and write the resulting images
#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Script files, or directories to search for *.paint.json / *.paint.yaml
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Output directory
    #[arg(long, short, default_value = "dist")]
    pub output: PathBuf,

    /// Scale factor for output (integer upscaling)
    #[arg(long, default_value = "1")]
    pub scale: u32,
}

pub fn run(args: ReplayArgs, config: &EngineConfig) -> Result<()> {
    let printer = Printer::new();
    let scripts = discover_scripts(&args.paths);
    if scripts.is_empty() {
        printer.warning("Skipping", "no paint scripts found");
        return Ok(());
    }

    check_collisions(&scripts, &args.output)?;

    if !args.output.exists() {
        fs::create_dir_all(&args.output).map_err(|e| PaintError::Io {
            path: args.output.clone(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    for script in &scripts {
        let written = replay_file(script, &args.output, args.scale, config)?;
        printer.status(
            "Wrote",
            &printer.cyan(&display_path(&written)),
        );
    }
    printer.info(
        "Finished",
        &format!(
            "{} to {}",
            plural(scripts.len(), "script", "scripts"),
            display_path(&args.output)
        ),
    );
    Ok(())
}

/// Fail before writing anything if two scripts map to the same PNG.
pub fn check_collisions(scripts: &[PathBuf], output_dir: &Path) -> Result<()> {
    let mut claimed: HashMap<String, &PathBuf> = HashMap::new();
    for script in scripts {
        let name = output_name(script);
        if let Some(first) = claimed.get(&name) {
            return Err(PaintError::OutputCollision {
                output: output_dir.join(&name),
                first: (*first).clone(),
                second: script.clone(),
            });
        }
        claimed.insert(name, script);
    }
    Ok(())
}

/// Replay one script into `output_dir`. Returns the written PNG path.
pub fn replay_file(
    path: &Path,
    output_dir: &Path,
    scale: u32,
    config: &EngineConfig,
) -> Result<PathBuf> {
    let printer = Printer::new();
    let script = Script::load(path)?;
    printer.status(
        "Replaying",
        &format!(
            "{} {}",
            display_path(path),
            printer.dim(&format!("({})", plural(script.steps.len(), "step", "steps")))
        ),
    );

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    let session = script.run(config.clone(), base)?;
    let undo = session.history().undo_count();
    if undo > 0 {
        printer.info("History", &plural(undo, "entry", "entries"));
    }

    let out = output_dir.join(output_name(path));
    write_png(session.buffer(), &out, scale)?;
    Ok(out)
}
