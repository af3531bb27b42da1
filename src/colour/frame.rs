//! Cached multi-space colour.

use super::space::{Hsl, Hsla, Hsv, Hsva, Rgb, Rgba};
use super::Colour;

/// A colour held in RGB, HSV and HSL at once, plus alpha.
///
/// Every setter recomputes the other two spaces immediately, so reading any
/// representation is a field access. HSV and HSL convert into each other
/// directly, which keeps the hue of greys stable while a picker drags
/// saturation through zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColourFrame {
    rgb: Rgb,
    hsv: Hsv,
    hsl: Hsl,
    alpha: f32,
}

impl Default for ColourFrame {
    fn default() -> Self {
        Self::from_rgb(Rgb::default(), 1.0)
    }
}

impl ColourFrame {
    pub fn from_rgb(rgb: Rgb, alpha: f32) -> Self {
        let mut frame = Self {
            rgb,
            hsv: Hsv::default(),
            hsl: Hsl::default(),
            alpha: alpha.clamp(0.0, 1.0),
        };
        frame.set_rgb(rgb);
        frame
    }

    pub fn from_hsv(hsv: Hsv, alpha: f32) -> Self {
        let mut frame = Self::from_rgb(Rgb::default(), alpha);
        frame.set_hsv(hsv);
        frame
    }

    pub fn from_hsl(hsl: Hsl, alpha: f32) -> Self {
        let mut frame = Self::from_rgb(Rgb::default(), alpha);
        frame.set_hsl(hsl);
        frame
    }

    pub fn from_colour(colour: Colour) -> Self {
        let rgba = colour.to_rgba();
        Self::from_rgb(rgba.colour, rgba.alpha)
    }

    pub fn rgb(&self) -> Rgb {
        self.rgb
    }

    pub fn hsv(&self) -> Hsv {
        self.hsv
    }

    pub fn hsl(&self) -> Hsl {
        self.hsl
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn rgba(&self) -> Rgba {
        Rgba::new(self.rgb, self.alpha)
    }

    pub fn hsva(&self) -> Hsva {
        Hsva::new(self.hsv, self.alpha)
    }

    pub fn hsla(&self) -> Hsla {
        Hsla::new(self.hsl, self.alpha)
    }

    pub fn set_rgb(&mut self, rgb: Rgb) {
        self.rgb = rgb;
        self.hsv = rgb.to_hsv();
        self.hsl = rgb.to_hsl();
    }

    pub fn set_hsv(&mut self, hsv: Hsv) {
        self.hsv = hsv;
        self.rgb = hsv.to_rgb();
        self.hsl = hsv.to_hsl();
    }

    pub fn set_hsl(&mut self, hsl: Hsl) {
        self.hsl = hsl;
        self.rgb = hsl.to_rgb();
        self.hsv = hsl.to_hsv();
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    /// Quantise to an 8-bit colour.
    pub fn to_colour(&self) -> Colour {
        Colour::from_rgba(self.rgba())
    }
}

impl From<Colour> for ColourFrame {
    fn from(colour: Colour) -> Self {
        Self::from_colour(colour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_rgb_updates_other_spaces() {
        let mut frame = ColourFrame::default();
        frame.set_rgb(Rgb::new(0.0, 0.0, 1.0));
        assert_eq!(frame.hsv().hue_degrees(), 240);
        assert_eq!(frame.hsl().lightness_byte(), 128);
        assert_eq!(frame.hsv().value_byte(), 255);
    }

    #[test]
    fn test_setting_hsv_updates_rgb_and_hsl() {
        let frame = ColourFrame::from_hsv(Hsv::from_degrees(120, 255, 255), 1.0);
        assert_eq!(frame.rgb().to_bytes(), [0, 255, 0]);
        assert_eq!(frame.hsl().hue_degrees(), 120);
        assert_eq!(frame.hsl().saturation_byte(), 255);
    }

    #[test]
    fn test_setting_hsl_updates_rgb_and_hsv() {
        let frame = ColourFrame::from_hsl(Hsl::new(0.0, 1.0, 0.25), 0.5);
        assert_eq!(frame.rgb().to_bytes(), [128, 0, 0]);
        assert_eq!(frame.hsv().saturation_byte(), 255);
        assert_eq!(frame.to_colour(), Colour::new(128, 0, 0, 128));
    }

    #[test]
    fn test_alpha_is_clamped() {
        let mut frame = ColourFrame::from_colour(Colour::WHITE);
        frame.set_alpha(2.0);
        assert_eq!(frame.alpha(), 1.0);
        frame.set_alpha(-1.0);
        assert_eq!(frame.alpha(), 0.0);
    }
}
