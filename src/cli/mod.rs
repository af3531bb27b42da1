pub mod completions;
pub mod replay;
pub mod shape;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// pxpaint - raster paint engine
#[derive(Parser, Debug)]
#[command(name = "pxpaint")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Engine config file (defaults to ./pxpaint.yaml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay paint scripts and write the resulting images
    Replay(replay::ReplayArgs),

    /// Print a shape interpolator as ASCII
    Shape(shape::ShapeArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
