//! Colour similarity bands for flood fill and magic-wand selection.

use serde::{Deserialize, Serialize};

use crate::colour::{Colour, ColourFrame};

/// Slack absorbed by every band so exact float ties still match.
const EPSILON: f32 = 1e-6;

/// Per-channel symmetric bands, each in normalised units.
///
/// A disabled (`None`) band is ignored. A candidate matches when every
/// enabled band contains it; with no band enabled only an exact colour
/// match passes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerance {
    pub red: Option<f32>,
    pub green: Option<f32>,
    pub blue: Option<f32>,
    pub alpha: Option<f32>,
    pub hue: Option<f32>,
    pub saturation_hsv: Option<f32>,
    pub value: Option<f32>,
    pub saturation_hsl: Option<f32>,
    pub lightness: Option<f32>,
}

impl Tolerance {
    /// Exact matching only.
    pub fn exact() -> Self {
        Self::default()
    }

    /// The same band on red, green, blue and alpha.
    pub fn rgba(band: f32) -> Self {
        Self {
            red: Some(band),
            green: Some(band),
            blue: Some(band),
            alpha: Some(band),
            ..Self::default()
        }
    }

    pub fn is_exact(&self) -> bool {
        self.bands().iter().all(Option::is_none)
    }

    fn bands(&self) -> [Option<f32>; 9] {
        [
            self.red,
            self.green,
            self.blue,
            self.alpha,
            self.hue,
            self.saturation_hsv,
            self.value,
            self.saturation_hsl,
            self.lightness,
        ]
    }

    /// Prepare a predicate against a fixed seed colour.
    pub fn matcher(&self, seed: Colour) -> Matcher {
        Matcher {
            tolerance: *self,
            seed,
            seed_frame: ColourFrame::from_colour(seed),
            exact: self.is_exact(),
        }
    }
}

fn within(band: Option<f32>, a: f32, b: f32) -> bool {
    band.map_or(true, |band| (a - b).abs() <= band + EPSILON)
}

/// Hue distance measured the short way round the circle.
fn within_hue(band: Option<f32>, a: f32, b: f32) -> bool {
    band.map_or(true, |band| {
        let d = (a - b).abs().rem_euclid(1.0);
        d.min(1.0 - d) <= band + EPSILON
    })
}

/// A tolerance bound to a seed colour.
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    tolerance: Tolerance,
    seed: Colour,
    seed_frame: ColourFrame,
    exact: bool,
}

impl Matcher {
    pub fn seed(&self) -> Colour {
        self.seed
    }

    pub fn matches(&self, candidate: Colour) -> bool {
        if self.exact {
            return candidate == self.seed;
        }

        let t = &self.tolerance;
        let seed = &self.seed_frame;
        let other = ColourFrame::from_colour(candidate);
        let (sr, cr) = (seed.rgb(), other.rgb());
        let (sv, cv) = (seed.hsv(), other.hsv());
        let (sl, cl) = (seed.hsl(), other.hsl());

        within(t.red, sr.r, cr.r)
            && within(t.green, sr.g, cr.g)
            && within(t.blue, sr.b, cr.b)
            && within(t.alpha, seed.alpha(), other.alpha())
            && within_hue(t.hue, sv.h, cv.h)
            && within(t.saturation_hsv, sv.s, cv.s)
            && within(t.value, sv.v, cv.v)
            && within(t.saturation_hsl, sl.s, cl.s)
            && within(t.lightness, sl.l, cl.l)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_when_no_band_enabled() {
        let matcher = Tolerance::exact().matcher(Colour::rgb(10, 20, 30));
        assert!(matcher.matches(Colour::rgb(10, 20, 30)));
        assert!(!matcher.matches(Colour::rgb(10, 20, 31)));
        assert!(!matcher.matches(Colour::new(10, 20, 30, 254)));
    }

    #[test]
    fn test_rgba_band() {
        let matcher = Tolerance::rgba(0.1).matcher(Colour::rgb(100, 100, 100));
        assert!(matcher.matches(Colour::rgb(120, 90, 100)));
        assert!(!matcher.matches(Colour::rgb(140, 100, 100)));
    }

    #[test]
    fn test_only_enabled_bands_apply() {
        let tolerance = Tolerance {
            value: Some(0.05),
            ..Tolerance::default()
        };
        let matcher = tolerance.matcher(Colour::rgb(255, 0, 0));
        // same value, completely different hue
        assert!(matcher.matches(Colour::rgb(0, 0, 255)));
        assert!(!matcher.matches(Colour::rgb(100, 0, 0)));
    }

    #[test]
    fn test_hue_band_wraps() {
        let tolerance = Tolerance {
            hue: Some(0.05),
            ..Tolerance::default()
        };
        // hue ~0.99 vs hue 0.0
        let matcher = tolerance.matcher(Colour::rgb(255, 0, 10));
        assert!(matcher.matches(Colour::rgb(255, 0, 0)));
        assert!(matcher.matches(Colour::rgb(255, 10, 0)));
        assert!(!matcher.matches(Colour::rgb(0, 255, 0)));
    }
}
