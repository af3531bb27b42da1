use std::path::Path;

use clap::Parser;
use miette::Result;
use pxpaint::cli::{Cli, Commands};
use pxpaint::EngineConfig;
use tracing_subscriber::filter::LevelFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Replay(args) => {
            let config = EngineConfig::discover(cli.config.as_deref(), Path::new("."))?;
            pxpaint::cli::replay::run(args, &config)?
        }
        Commands::Shape(args) => pxpaint::cli::shape::run(args)?,
        Commands::Completions(args) => pxpaint::cli::completions::run(args)?,
    }

    Ok(())
}
