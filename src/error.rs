use miette::Diagnostic;
use thiserror::Error;

/// Main error type for pxpaint operations
#[derive(Error, Diagnostic, Debug)]
pub enum PaintError {
    #[error("IO error: {0}")]
    #[diagnostic(code(pxpaint::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(pxpaint::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Channel count mismatch: destination has {dest} channels, source has {src}")]
    #[diagnostic(
        code(pxpaint::buffer::channels),
        help("Both buffers must use the same pixel layout before copying")
    )]
    ChannelMismatch { dest: u8, src: u8 },

    #[error("Buffer size mismatch: expected {expected} bytes, got {actual}")]
    #[diagnostic(code(pxpaint::buffer::size))]
    BufferSize { expected: usize, actual: usize },

    #[error("Unsupported channel count: {0}")]
    #[diagnostic(code(pxpaint::buffer::channels), help("Use 1, 2, 3 or 4 channels per pixel"))]
    InvalidChannels(u8),

    #[error("Parse error: {message}")]
    #[diagnostic(code(pxpaint::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Output collision: {first} and {second} both write {output}")]
    #[diagnostic(
        code(pxpaint::replay::collision),
        help("Rename one of the scripts or replay them into separate directories")
    )]
    OutputCollision {
        output: std::path::PathBuf,
        first: std::path::PathBuf,
        second: std::path::PathBuf,
    },

    #[error("Image error: {message}")]
    #[diagnostic(code(pxpaint::image))]
    Image { message: String },
}

pub type Result<T> = std::result::Result<T, PaintError>;
