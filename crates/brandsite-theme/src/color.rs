//! Color token validation and derivation.
//!
//! Every derivation accepts arbitrary strings. Malformed tokens yield `None`
//! (rendered as `unknown`) so a partially valid theme still produces output.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("valid hex color pattern"));

/// Luminance above which dark text is used.
pub const CONTRAST_THRESHOLD: f64 = 128.0;

/// Dark foreground for light backgrounds.
pub const BLACK: &str = "#000000";

/// Light foreground for dark backgrounds.
pub const WHITE: &str = "#ffffff";

/// Sentinel rendered in place of a value derived from an invalid token.
pub const UNKNOWN: &str = "unknown";

/// An 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Perceptual luminance on the 0-255 scale.
    pub fn luminance(self) -> f64 {
        0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b)
    }
}

/// Hue (0-360), saturation (0-100) and lightness (0-100).
///
/// Components are kept unrounded; `Display` rounds them into the
/// `"H S% L%"` form used by CSS custom properties.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl Hsl {
    /// Convert back to 8-bit RGB.
    pub fn to_rgb(self) -> Rgb {
        let s = self.saturation / 100.0;
        let l = self.lightness / 100.0;

        if s == 0.0 {
            let v = channel(l);
            return Rgb::new(v, v, v);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        let h = self.hue / 360.0;

        Rgb::new(
            channel(hue_to_rgb(p, q, h + 1.0 / 3.0)),
            channel(hue_to_rgb(p, q, h)),
            channel(hue_to_rgb(p, q, h - 1.0 / 3.0)),
        )
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}% {}%",
            self.hue.round(),
            self.saturation.round(),
            self.lightness.round()
        )
    }
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

fn channel(unit: f64) -> u8 {
    (unit * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Check that a token is a `#` followed by exactly six hex digits.
pub fn validate_color(token: &str) -> bool {
    HEX_COLOR.is_match(token)
}

/// Parse a valid token into its channels.
pub fn parse_hex(token: &str) -> Option<Rgb> {
    if !validate_color(token) {
        return None;
    }
    let r = u8::from_str_radix(&token[1..3], 16).ok()?;
    let g = u8::from_str_radix(&token[3..5], 16).ok()?;
    let b = u8::from_str_radix(&token[5..7], 16).ok()?;
    Some(Rgb::new(r, g, b))
}

/// Convert a token to HSL, or `None` when it is malformed.
pub fn to_hsl(token: &str) -> Option<Hsl> {
    let rgb = parse_hex(token)?;
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let lightness = (max + min) / 2.0;

    if max == min {
        return Some(Hsl {
            hue: 0.0,
            saturation: 0.0,
            lightness: lightness * 100.0,
        });
    }

    let d = max - min;
    let saturation = if lightness > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let hue = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Some(Hsl {
        hue: hue / 6.0 * 360.0,
        saturation: saturation * 100.0,
        lightness: lightness * 100.0,
    })
}

/// Pick black or white text for legibility on the given background.
pub fn contrast_foreground(token: &str) -> Option<&'static str> {
    let rgb = parse_hex(token)?;
    if rgb.luminance() > CONTRAST_THRESHOLD {
        Some(BLACK)
    } else {
        Some(WHITE)
    }
}
