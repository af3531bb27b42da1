//! Flat pixel buffers and path traversal.
//!
//! A `PixelBuffer` is a row-major byte array with 1 to 4 channels per pixel.
//! Coordinates are signed so brush paths can run past the canvas edge; reads
//! outside the buffer return `None` and writes outside it are ignored.

mod path;
mod rect;

pub use path::{
    copy_path, copy_path_to_vec, copy_slice_to_path, search_outward, HorizontalRun, Path,
    PathIter, RectPath, RingPath, VerticalRun,
};
pub use rect::{include, include_rect, Pos, Rect};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::colour::Colour;
use crate::error::{PaintError, Result};

/// Pixel layout: channels per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Channels {
    Gray = 1,
    GrayAlpha = 2,
    Rgb = 3,
    #[default]
    Rgba = 4,
}

impl Channels {
    pub fn count(self) -> usize {
        self as usize
    }

    pub fn has_alpha(self) -> bool {
        matches!(self, Channels::GrayAlpha | Channels::Rgba)
    }

    /// Narrow a colour to this layout. Unused trailing bytes are zero.
    pub fn encode(self, colour: Colour) -> [u8; 4] {
        match self {
            Channels::Gray => [luma(colour), 0, 0, 0],
            Channels::GrayAlpha => [luma(colour), colour.a, 0, 0],
            Channels::Rgb => [colour.r, colour.g, colour.b, 0],
            Channels::Rgba => colour.to_array(),
        }
    }

    /// Expand raw pixel bytes to a colour. Missing alpha reads as opaque.
    pub fn decode(self, raw: [u8; 4]) -> Colour {
        match self {
            Channels::Gray => Colour::rgb(raw[0], raw[0], raw[0]),
            Channels::GrayAlpha => Colour::new(raw[0], raw[0], raw[0], raw[1]),
            Channels::Rgb => Colour::rgb(raw[0], raw[1], raw[2]),
            Channels::Rgba => Colour::from_array(raw),
        }
    }
}

impl TryFrom<u8> for Channels {
    type Error = PaintError;

    fn try_from(count: u8) -> Result<Self> {
        match count {
            1 => Ok(Channels::Gray),
            2 => Ok(Channels::GrayAlpha),
            3 => Ok(Channels::Rgb),
            4 => Ok(Channels::Rgba),
            other => Err(PaintError::InvalidChannels(other)),
        }
    }
}

impl From<Channels> for u8 {
    fn from(channels: Channels) -> Self {
        channels as u8
    }
}

/// Rec.601 luma, rounded.
fn luma(colour: Colour) -> u8 {
    let y = 0.299 * colour.r as f32 + 0.587 * colour.g as f32 + 0.114 * colour.b as f32;
    y.round().clamp(0.0, 255.0) as u8
}

/// Identity of one buffer allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(Uuid);

/// A non-owning reference to a buffer's contents at a point in time.
///
/// History entries hold these instead of the buffer. If the buffer has been
/// replaced (new id) or invalidated (new generation) the handle no longer
/// matches and the entry becomes a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle {
    pub id: BufferId,
    pub generation: u64,
}

/// A flat, row-major pixel buffer.
///
/// A clone is a new allocation with its own id, so handles taken from the
/// original never match it.
#[derive(Debug)]
pub struct PixelBuffer {
    id: BufferId,
    generation: u64,
    width: u32,
    height: u32,
    channels: Channels,
    data: Vec<u8>,
}

impl Clone for PixelBuffer {
    fn clone(&self) -> Self {
        Self {
            id: BufferId(Uuid::new_v4()),
            generation: 0,
            width: self.width,
            height: self.height,
            channels: self.channels,
            data: self.data.clone(),
        }
    }
}

impl PixelBuffer {
    /// Create a zero-filled buffer.
    pub fn new(width: u32, height: u32, channels: Channels) -> Self {
        Self {
            id: BufferId(Uuid::new_v4()),
            generation: 0,
            width,
            height,
            channels,
            data: vec![0; width as usize * height as usize * channels.count()],
        }
    }

    /// Create a buffer with every pixel set to `colour`.
    pub fn filled(width: u32, height: u32, channels: Channels, colour: Colour) -> Self {
        let mut buffer = Self::new(width, height, channels);
        buffer.fill(colour);
        buffer
    }

    /// Wrap existing bytes. The length must be `width * height * channels`.
    pub fn from_raw(width: u32, height: u32, channels: Channels, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * channels.count();
        if data.len() != expected {
            return Err(PaintError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        let mut buffer = Self::new(0, 0, channels);
        buffer.width = width;
        buffer.height = height;
        buffer.data = data;
        Ok(buffer)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> Channels {
        self.channels
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// The full buffer as a rectangle, or `None` for an empty buffer.
    pub fn bounds(&self) -> Option<Rect> {
        Rect::new(0, 0, self.width as i32 - 1, self.height as i32 - 1).clamp_to(self.width, self.height)
    }

    pub fn handle(&self) -> BufferHandle {
        BufferHandle {
            id: self.id,
            generation: self.generation,
        }
    }

    /// Whether a handle taken earlier still refers to this buffer's contents.
    pub fn accepts(&self, handle: BufferHandle) -> bool {
        self.handle() == handle
    }

    /// Detach every outstanding handle, e.g. after the contents were replaced wholesale.
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }

    pub fn in_bounds(&self, (x, y): Pos) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Byte offset of an in-bounds pixel.
    pub fn offset(&self, x: u32, y: u32) -> usize {
        (x as usize + y as usize * self.width as usize) * self.channels.count()
    }

    /// Raw channel bytes of a pixel; trailing unused bytes are zero.
    pub fn raw(&self, pos: Pos) -> Option<[u8; 4]> {
        if !self.in_bounds(pos) {
            return None;
        }
        let offset = self.offset(pos.0 as u32, pos.1 as u32);
        let mut raw = [0u8; 4];
        let n = self.channels.count();
        raw[..n].copy_from_slice(&self.data[offset..offset + n]);
        Some(raw)
    }

    /// Overwrite a pixel's raw bytes. Returns `false` if out of bounds.
    pub fn set_raw(&mut self, pos: Pos, raw: [u8; 4]) -> bool {
        if !self.in_bounds(pos) {
            return false;
        }
        let offset = self.offset(pos.0 as u32, pos.1 as u32);
        let n = self.channels.count();
        self.data[offset..offset + n].copy_from_slice(&raw[..n]);
        true
    }

    pub fn get(&self, pos: Pos) -> Option<Colour> {
        self.raw(pos).map(|raw| self.channels.decode(raw))
    }

    /// Write a colour, narrowed to this buffer's layout. Returns `false` if out of bounds.
    pub fn put(&mut self, pos: Pos, colour: Colour) -> bool {
        let raw = self.channels.encode(colour);
        self.set_raw(pos, raw)
    }

    pub fn fill(&mut self, colour: Colour) {
        let raw = self.channels.encode(colour);
        let n = self.channels.count();
        for chunk in self.data.chunks_exact_mut(n) {
            chunk.copy_from_slice(&raw[..n]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_invariant() {
        for channels in [Channels::Gray, Channels::GrayAlpha, Channels::Rgb, Channels::Rgba] {
            let buffer = PixelBuffer::new(5, 3, channels);
            assert_eq!(buffer.as_bytes().len(), 5 * 3 * channels.count());
        }
    }

    #[test]
    fn test_offset_addressing() {
        let buffer = PixelBuffer::new(4, 4, Channels::Rgb);
        assert_eq!(buffer.offset(0, 0), 0);
        assert_eq!(buffer.offset(1, 0), 3);
        assert_eq!(buffer.offset(2, 3), (2 + 3 * 4) * 3);
    }

    #[test]
    fn test_from_raw_checks_size() {
        assert!(PixelBuffer::from_raw(2, 2, Channels::Rgba, vec![0; 16]).is_ok());
        let err = PixelBuffer::from_raw(2, 2, Channels::Rgba, vec![0; 15]).unwrap_err();
        assert!(matches!(err, PaintError::BufferSize { expected: 16, actual: 15 }));
    }

    #[test]
    fn test_out_of_bounds_is_ignored() {
        let mut buffer = PixelBuffer::filled(2, 2, Channels::Rgba, Colour::WHITE);
        assert!(!buffer.put((-1, 0), Colour::BLACK));
        assert!(!buffer.put((2, 1), Colour::BLACK));
        assert_eq!(buffer.get((5, 5)), None);
        assert!(buffer.as_bytes().iter().all(|&b| b == 255));
    }

    #[test]
    fn test_gray_layouts() {
        let mut buffer = PixelBuffer::new(1, 1, Channels::GrayAlpha);
        buffer.put((0, 0), Colour::new(255, 255, 255, 40));
        assert_eq!(buffer.raw((0, 0)), Some([255, 40, 0, 0]));
        assert_eq!(buffer.get((0, 0)), Some(Colour::new(255, 255, 255, 40)));

        let mut gray = PixelBuffer::new(1, 1, Channels::Gray);
        gray.put((0, 0), Colour::rgb(90, 90, 90));
        assert_eq!(gray.get((0, 0)), Some(Colour::rgb(90, 90, 90)));
    }

    #[test]
    fn test_handles_track_replacement() {
        let mut buffer = PixelBuffer::new(2, 2, Channels::Rgba);
        let handle = buffer.handle();
        assert!(buffer.accepts(handle));
        buffer.invalidate();
        assert!(!buffer.accepts(handle));

        let other = PixelBuffer::new(2, 2, Channels::Rgba);
        assert!(!other.accepts(buffer.handle()));
    }

    #[test]
    fn test_clone_is_a_new_identity() {
        let buffer = PixelBuffer::filled(2, 2, Channels::Rgba, Colour::WHITE);
        let copy = buffer.clone();
        assert_eq!(copy.as_bytes(), buffer.as_bytes());
        assert!(!copy.accepts(buffer.handle()));
        assert!(!buffer.accepts(copy.handle()));
    }

    #[test]
    fn test_channels_from_count() {
        assert_eq!(Channels::try_from(3).unwrap(), Channels::Rgb);
        assert!(Channels::try_from(0).is_err());
        assert!(Channels::try_from(5).is_err());
    }
}
