//! 8-bit RGBA colour type and parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::space::{from_byte, to_byte, Rgb, Rgba};
use crate::error::{PaintError, Result};

/// An 8-bit RGBA colour value, as stored in pixel buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Create a new colour from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Fully transparent colour.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Parse a colour string: a CSS colour name (`"teal"`) or a hex value.
    ///
    /// Hex supports `#RGB`, `#RGBA`, `#RRGGBB` and `#RRGGBBAA`, with or
    /// without the leading `#`.
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if !trimmed.starts_with('#') {
            if let Some(named) = palette::named::from_str(&trimmed.to_ascii_lowercase()) {
                return Ok(Self::rgb(named.red, named.green, named.blue));
            }
        }
        Self::from_hex(trimmed)
    }

    /// Parse a hex colour string.
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);
        let digits: Vec<u8> = hex
            .chars()
            .map(parse_hex_digit)
            .collect::<Result<_>>()?;

        match *digits.as_slice() {
            [r, g, b] => Ok(Self::rgb(r << 4 | r, g << 4 | g, b << 4 | b)),
            [r, g, b, a] => Ok(Self::new(r << 4 | r, g << 4 | g, b << 4 | b, a << 4 | a)),
            [r1, r0, g1, g0, b1, b0] => Ok(Self::rgb(r1 << 4 | r0, g1 << 4 | g0, b1 << 4 | b0)),
            [r1, r0, g1, g0, b1, b0, a1, a0] => Ok(Self::new(
                r1 << 4 | r0,
                g1 << 4 | g0,
                b1 << 4 | b0,
                a1 << 4 | a0,
            )),
            _ => Err(PaintError::Parse {
                message: format!("Invalid colour: {}", s),
                help: Some(
                    "Use a CSS colour name or #RGB, #RGBA, #RRGGBB, #RRGGBBAA".to_string(),
                ),
            }),
        }
    }

    /// Convert to an RGBA byte array.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Build from an RGBA byte array.
    pub fn from_array([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }

    /// Same colour with a different alpha.
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Normalised float form.
    pub fn to_rgba(self) -> Rgba {
        Rgba::new(Rgb::from_bytes([self.r, self.g, self.b]), from_byte(self.a))
    }

    /// Quantise a normalised colour back to bytes.
    pub fn from_rgba(rgba: Rgba) -> Self {
        let [r, g, b] = rgba.colour.to_bytes();
        Self::new(r, g, b, to_byte(rgba.alpha))
    }

    /// Check if the colour is fully transparent.
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Check if the colour is fully opaque.
    pub fn is_opaque(self) -> bool {
        self.a == 255
    }
}

impl FromStr for Colour {
    type Err = PaintError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Colour {
    type Error = PaintError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<Colour> for String {
    fn from(colour: Colour) -> Self {
        colour.to_string()
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Parse a single hex digit.
fn parse_hex_digit(c: char) -> Result<u8> {
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or_else(|| PaintError::Parse {
            message: format!("Invalid hex digit: {}", c),
            help: None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_lengths() {
        assert_eq!(Colour::from_hex("#FF0000").unwrap(), Colour::rgb(255, 0, 0));
        assert_eq!(Colour::from_hex("#ABC").unwrap(), Colour::rgb(0xAA, 0xBB, 0xCC));
        assert_eq!(Colour::from_hex("#FF000080").unwrap(), Colour::new(255, 0, 0, 128));
        assert_eq!(Colour::from_hex("#F008").unwrap(), Colour::new(255, 0, 0, 136));
        assert_eq!(Colour::from_hex("1a1a2e").unwrap(), Colour::rgb(0x1a, 0x1a, 0x2e));
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(Colour::from_hex("#GGG").is_err());
        assert!(Colour::from_hex("#12345").is_err());
        assert!(Colour::from_hex("").is_err());
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(Colour::parse("red").unwrap(), Colour::rgb(255, 0, 0));
        assert_eq!(Colour::parse("White").unwrap(), Colour::WHITE);
        assert_eq!(Colour::parse("#00ff00").unwrap(), Colour::rgb(0, 255, 0));
        assert!(Colour::parse("not-a-colour").is_err());
    }

    #[test]
    fn test_display_round_trips() {
        let c = Colour::new(18, 52, 86, 120);
        assert_eq!(c.to_string(), "#12345678");
        assert_eq!(c.to_string().parse::<Colour>().unwrap(), c);
        assert_eq!(Colour::rgb(255, 0, 0).to_string(), "#FF0000");
    }

    #[test]
    fn test_float_round_trip_is_exact() {
        for v in 0..=255u8 {
            let c = Colour::new(v, 255 - v, v / 2, v);
            assert_eq!(Colour::from_rgba(c.to_rgba()), c);
        }
    }
}
