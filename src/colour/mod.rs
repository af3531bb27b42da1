//! Colour model.
//!
//! - `Colour` - 8-bit RGBA pixel values and parsing
//! - `Rgb` / `Hsv` / `Hsl` (+ `Alpha`) - normalised colour spaces
//! - `ColourFrame` - all three spaces cached side by side
//! - `over` - alpha compositing

mod composite;
mod frame;
mod pixel;
mod space;

pub use composite::{over, over_pixel};
pub use frame::ColourFrame;
pub use pixel::Colour;
pub use space::{from_byte, to_byte, wrap_hue, Alpha, Hsl, Hsla, Hsv, Hsva, Rgb, Rgba};
