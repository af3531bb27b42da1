//! Alpha compositing.

use super::space::{Rgb, Rgba};
use super::Colour;

/// Composite `fg` over `bg` with straight (unpremultiplied) alpha.
///
/// When the resulting alpha is zero the colour channels keep the background
/// values instead of dividing by zero.
pub fn over(fg: Rgba, bg: Rgba) -> Rgba {
    let a_fg = fg.alpha;
    let a_bg = bg.alpha;
    if a_fg <= 0.0 {
        return bg;
    }
    let bg_weight = a_bg * (1.0 - a_fg);
    let alpha = (a_fg + bg_weight).clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return Rgba::new(bg.colour, 0.0);
    }

    let channel = |f: f32, b: f32| ((f * a_fg + b * bg_weight) / alpha).clamp(0.0, 1.0);
    let colour = Rgb::new(
        channel(fg.colour.r, bg.colour.r),
        channel(fg.colour.g, bg.colour.g),
        channel(fg.colour.b, bg.colour.b),
    );
    Rgba::new(colour, alpha)
}

/// Composite a normalised foreground over an 8-bit pixel.
pub fn over_pixel(fg: Rgba, bg: Colour) -> Colour {
    Colour::from_rgba(over(fg, bg.to_rgba()))
}
