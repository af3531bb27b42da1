//! Normalised RGB, HSV and HSL colour spaces.
//!
//! All components live in `[0, 1]`. Hue is a fraction of the full circle, so
//! `0.5` is cyan and `1.0` wraps back to red. The integer accessors expose the
//! pixel-scale domains used by pickers and tolerance bands: hue in degrees
//! `[0, 359]`, everything else in `[0, 255]`.
//!
//! The forward conversions use the usual max/min/chroma construction. The
//! inverse conversions pick one of six 60° sextants and permute three
//! intermediate channel values into place.

use serde::{Deserialize, Serialize};

/// Denominators smaller than this are treated as zero.
const EPSILON: f32 = 1e-6;

/// Quantise a normalised channel to a byte, rounding to nearest.
pub fn to_byte(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Expand a byte channel to the normalised range.
pub fn from_byte(value: u8) -> f32 {
    value as f32 / 255.0
}

/// Wrap a hue into `[0, 1)`.
///
/// Hue exactly `1.0` (or any whole turn) maps to `0.0`, and non-finite input
/// maps to `0.0`, so sextant selection always sees a valid index.
pub fn wrap_hue(hue: f32) -> f32 {
    if !hue.is_finite() {
        return 0.0;
    }
    let wrapped = hue.rem_euclid(1.0);
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}

fn hue_to_degrees(hue: f32) -> u16 {
    let degrees = (wrap_hue(hue) * 360.0).round() as u16;
    if degrees >= 360 {
        0
    } else {
        degrees
    }
}

fn sextant(hue: f32) -> (usize, f32) {
    let scaled = wrap_hue(hue) * 6.0;
    let index = (scaled.floor() as usize).min(5);
    (index, scaled - index as f32)
}

/// Hue of an RGB triple given its max channel and chroma.
fn hue_of(r: f32, g: f32, b: f32, max: f32, chroma: f32) -> f32 {
    if chroma <= 0.0 {
        return 0.0;
    }
    let sixths = if max == r {
        (g - b) / chroma
    } else if max == g {
        (b - r) / chroma + 2.0
    } else {
        (r - g) / chroma + 4.0
    };
    let hue = sixths / 6.0;
    if hue < 0.0 {
        hue + 1.0
    } else {
        hue
    }
}

/// A normalised RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// A normalised HSV colour.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

/// A normalised HSL colour.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

/// A colour paired with a normalised alpha.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Alpha<C> {
    pub colour: C,
    pub alpha: f32,
}

pub type Rgba = Alpha<Rgb>;
pub type Hsva = Alpha<Hsv>;
pub type Hsla = Alpha<Hsl>;

impl<C> Alpha<C> {
    pub const fn new(colour: C, alpha: f32) -> Self {
        Self { colour, alpha }
    }

    /// Alpha as a byte.
    pub fn alpha_byte(&self) -> u8 {
        to_byte(self.alpha)
    }
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from 8-bit channels.
    pub fn from_bytes([r, g, b]: [u8; 3]) -> Self {
        Self::new(from_byte(r), from_byte(g), from_byte(b))
    }

    /// Quantise to 8-bit channels.
    pub fn to_bytes(self) -> [u8; 3] {
        [to_byte(self.r), to_byte(self.g), to_byte(self.b)]
    }

    fn extrema(self) -> (f32, f32) {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        (max, min)
    }

    pub fn to_hsv(self) -> Hsv {
        let (max, min) = self.extrema();
        let chroma = max - min;
        let h = hue_of(self.r, self.g, self.b, max, chroma);
        let s = if max <= 0.0 { 0.0 } else { chroma / max };
        Hsv::new(h, s, max)
    }

    pub fn to_hsl(self) -> Hsl {
        let (max, min) = self.extrema();
        let chroma = max - min;
        let h = hue_of(self.r, self.g, self.b, max, chroma);
        let l = (max + min) / 2.0;
        let denominator = 1.0 - (max + min - 1.0).abs();
        let s = if denominator < EPSILON {
            0.0
        } else {
            (chroma / denominator).min(1.0)
        };
        Hsl::new(h, s, l)
    }
}

impl Hsv {
    pub const fn new(h: f32, s: f32, v: f32) -> Self {
        Self { h, s, v }
    }

    /// Build from pixel-scale values: hue in degrees, saturation and value as bytes.
    pub fn from_degrees(hue: u16, saturation: u8, value: u8) -> Self {
        Self::new(
            (hue % 360) as f32 / 360.0,
            from_byte(saturation),
            from_byte(value),
        )
    }

    pub fn hue_degrees(&self) -> u16 {
        hue_to_degrees(self.h)
    }

    pub fn saturation_byte(&self) -> u8 {
        to_byte(self.s)
    }

    pub fn value_byte(&self) -> u8 {
        to_byte(self.v)
    }

    pub fn to_rgb(self) -> Rgb {
        let (index, fraction) = sextant(self.h);
        let v = self.v;
        let min = v * (1.0 - self.s);
        let pre = v * (1.0 - self.s * fraction);
        let post = v * (1.0 - self.s * (1.0 - fraction));
        let (r, g, b) = match index {
            0 => (v, post, min),
            1 => (pre, v, min),
            2 => (min, v, post),
            3 => (min, pre, v),
            4 => (post, min, v),
            _ => (v, min, pre),
        };
        Rgb::new(r, g, b)
    }

    /// Convert straight to HSL, keeping the hue even for greys.
    pub fn to_hsl(self) -> Hsl {
        let l = self.v * (1.0 - self.s / 2.0);
        let span = l.min(1.0 - l);
        let s = if span < EPSILON {
            0.0
        } else {
            ((self.v - l) / span).clamp(0.0, 1.0)
        };
        Hsl::new(self.h, s, l)
    }
}

impl Hsl {
    pub const fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }

    /// Build from pixel-scale values: hue in degrees, saturation and lightness as bytes.
    pub fn from_degrees(hue: u16, saturation: u8, lightness: u8) -> Self {
        Self::new(
            (hue % 360) as f32 / 360.0,
            from_byte(saturation),
            from_byte(lightness),
        )
    }

    pub fn hue_degrees(&self) -> u16 {
        hue_to_degrees(self.h)
    }

    pub fn saturation_byte(&self) -> u8 {
        to_byte(self.s)
    }

    pub fn lightness_byte(&self) -> u8 {
        to_byte(self.l)
    }

    pub fn to_rgb(self) -> Rgb {
        let (index, _) = sextant(self.h);
        let chroma = (1.0 - (2.0 * self.l - 1.0).abs()) * self.s;
        let scaled = wrap_hue(self.h) * 6.0;
        let x = chroma * (1.0 - ((scaled % 2.0) - 1.0).abs());
        let m = self.l - chroma / 2.0;
        let (c1, c2, c3) = (chroma + m, x + m, m);
        let (r, g, b) = match index {
            0 => (c1, c2, c3),
            1 => (c2, c1, c3),
            2 => (c3, c1, c2),
            3 => (c3, c2, c1),
            4 => (c2, c3, c1),
            _ => (c1, c3, c2),
        };
        Rgb::new(r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0))
    }

    /// Convert straight to HSV, keeping the hue even for greys.
    pub fn to_hsv(self) -> Hsv {
        let v = self.l + self.s * self.l.min(1.0 - self.l);
        let s = if v < EPSILON {
            0.0
        } else {
            (2.0 * (1.0 - self.l / v)).clamp(0.0, 1.0)
        };
        Hsv::new(self.h, s, v)
    }
}

impl From<Rgb> for Hsv {
    fn from(rgb: Rgb) -> Self {
        rgb.to_hsv()
    }
}

impl From<Rgb> for Hsl {
    fn from(rgb: Rgb) -> Self {
        rgb.to_hsl()
    }
}

impl From<Hsv> for Rgb {
    fn from(hsv: Hsv) -> Self {
        hsv.to_rgb()
    }
}

impl From<Hsl> for Rgb {
    fn from(hsl: Hsl) -> Self {
        hsl.to_rgb()
    }
}
