//! Colors and the 240-scaled HSL color space
//!
//! HSL here follows the classic Windows color picker: hue runs 0-239,
//! saturation and lightness 0-240, while RGB channels stay 0-255.

use serde::{Deserialize, Serialize};

/// Number of hue units in a full turn
pub const HUE_RANGE: f64 = 240.0;
/// Upper bound of saturation and lightness
pub const SL_RANGE: f64 = 240.0;
/// Hue units per sector of the hexagonal hue model
const SECTOR: f64 = HUE_RANGE / 6.0;

/// RGBA color, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

const fn opaque() -> u8 {
    255
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Build a color from wider integers, clamping each channel to 0-255
    pub fn clamped(r: i32, g: i32, b: i32, a: i32) -> Self {
        Self {
            r: r.clamp(0, 255) as u8,
            g: g.clamp(0, 255) as u8,
            b: b.clamp(0, 255) as u8,
            a: a.clamp(0, 255) as u8,
        }
    }

    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub const fn from_array(c: [u8; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }

    /// Same color with a different alpha
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Round and clamp a float channel into 0-255. NaN maps to 0.
#[inline]
pub fn clamp_channel(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

// ============================================================================
// HSL
// ============================================================================

/// HSL color in the 240-scaled space.
///
/// Components are kept as floats so a round trip through HSL is lossless up
/// to RGB rounding; `to_integer` gives the whole-number triple a user sees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    /// Create an HSL value: hue wraps into [0, 240), saturation and
    /// lightness clamp to [0, 240]. Non-finite components become 0.
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
        let mut h = finite(h).rem_euclid(HUE_RANGE);
        if h >= HUE_RANGE {
            h = 0.0;
        }
        Self {
            h,
            s: finite(s).clamp(0.0, SL_RANGE),
            l: finite(l).clamp(0.0, SL_RANGE),
        }
    }

    /// From whole-number components as typed into a color picker
    /// (h clamped to 0-239, s and l to 0-240)
    pub fn from_integer(h: i32, s: i32, l: i32) -> Self {
        Self::new(
            f64::from(h.clamp(0, 239)),
            f64::from(s.clamp(0, 240)),
            f64::from(l.clamp(0, 240)),
        )
    }

    /// Whole-number triple (h 0-239, s 0-240, l 0-240)
    pub fn to_integer(&self) -> (u8, u8, u8) {
        let h = (self.h.round() as u32 % HUE_RANGE as u32) as u8;
        let s = self.s.round().clamp(0.0, SL_RANGE) as u8;
        let l = self.l.round().clamp(0.0, SL_RANGE) as u8;
        (h, s, l)
    }
}

/// Convert RGB (0-255) to 240-scaled HSL
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Hsl {
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;

    let mx = r.max(g).max(b);
    let mn = r.min(g).min(b);
    let d = mx - mn;
    let l = (mx + mn) / 2.0;

    let mut h = if d == 0.0 {
        0.0
    } else if mx == r {
        ((g - b) / d) % 6.0
    } else if mx == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    h *= SECTOR;
    if h < 0.0 {
        h += HUE_RANGE;
    }

    // d == 0 covers l == 0 and l == 1, where the denominator vanishes
    let s = if d == 0.0 {
        0.0
    } else {
        d / (1.0 - (2.0 * l - 1.0).abs())
    };

    Hsl::new(h, s * SL_RANGE, l * SL_RANGE)
}

/// Convert 240-scaled HSL to RGB (0-255)
pub fn hsl_to_rgb(hsl: Hsl) -> (u8, u8, u8) {
    let h = hsl.h;
    let s = hsl.s / SL_RANGE;
    let l = hsl.l / SL_RANGE;

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / SECTOR) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r1, g1, b1) = match h {
        h if h < SECTOR => (c, x, 0.0),
        h if h < 2.0 * SECTOR => (x, c, 0.0),
        h if h < 3.0 * SECTOR => (0.0, c, x),
        h if h < 4.0 * SECTOR => (0.0, x, c),
        h if h < 5.0 * SECTOR => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    (
        clamp_channel((r1 + m) * 255.0),
        clamp_channel((g1 + m) * 255.0),
        clamp_channel((b1 + m) * 255.0),
    )
}

// ============================================================================
// Small conversions used by the canvas collaborators
// ============================================================================

/// Pack RGB as 0xRRGGBB
#[inline]
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> u32 {
    u32::from(r) << 16 | u32::from(g) << 8 | u32::from(b)
}

/// Unpack 0xRRGGBB (upper byte ignored)
#[inline]
pub fn hex_to_rgb(hex: u32) -> (u8, u8, u8) {
    ((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

/// Channel average
#[inline]
pub fn rgb_to_gray(r: u8, g: u8, b: u8) -> u8 {
    ((u16::from(r) + u16::from(g) + u16::from(b)) / 3) as u8
}

/// Text color that stays readable on top of `bg`
pub fn contrast_text_color(bg: Color) -> Color {
    if rgb_to_gray(bg.r, bg.g, bg.b) < 128 {
        Color::WHITE
    } else {
        Color::BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primaries_map_to_sector_starts() {
        assert_eq!(rgb_to_hsl(255, 0, 0).to_integer(), (0, 240, 120));
        assert_eq!(rgb_to_hsl(0, 255, 0).to_integer(), (80, 240, 120));
        assert_eq!(rgb_to_hsl(0, 0, 255).to_integer(), (160, 240, 120));
    }

    #[test]
    fn grays_have_no_hue_or_saturation() {
        for v in [0u8, 1, 128, 254, 255] {
            let hsl = rgb_to_hsl(v, v, v);
            assert_eq!(hsl.h, 0.0);
            assert_eq!(hsl.s, 0.0);
        }
        assert_eq!(rgb_to_hsl(255, 255, 255).to_integer(), (0, 0, 240));
        assert_eq!(rgb_to_hsl(0, 0, 0).to_integer(), (0, 0, 0));
    }

    #[test]
    fn negative_hue_wraps_into_range() {
        // Magenta-ish red: g < b with red max gives a negative sector offset
        let hsl = rgb_to_hsl(255, 0, 64);
        assert!(hsl.h > 200.0 && hsl.h < 240.0, "hue {}", hsl.h);
    }

    #[test]
    fn hsl_to_rgb_picker_defaults() {
        assert_eq!(hsl_to_rgb(Hsl::from_integer(0, 240, 120)), (255, 0, 0));
        assert_eq!(hsl_to_rgb(Hsl::from_integer(239, 240, 240)), (255, 255, 255));
        assert_eq!(hsl_to_rgb(Hsl::from_integer(40, 240, 120)), (255, 255, 0));
    }

    #[test]
    fn hsl_new_clamps_and_wraps() {
        let hsl = Hsl::new(250.0, 300.0, -5.0);
        assert!((hsl.h - 10.0).abs() < 1e-9);
        assert_eq!(hsl.s, 240.0);
        assert_eq!(hsl.l, 0.0);
        assert_eq!(Hsl::new(f64::NAN, 10.0, 10.0).h, 0.0);
        assert_eq!(Hsl::new(239.7, 0.0, 0.0).to_integer().0, 0);
    }

    #[test]
    fn hex_and_gray_helpers() {
        assert_eq!(rgb_to_hex(0x12, 0x34, 0x56), 0x123456);
        assert_eq!(hex_to_rgb(0xFF123456), (0x12, 0x34, 0x56));
        assert_eq!(rgb_to_gray(30, 60, 90), 60);
        assert_eq!(contrast_text_color(Color::BLACK), Color::WHITE);
        assert_eq!(contrast_text_color(Color::WHITE), Color::BLACK);
    }

    #[test]
    fn clamped_color_saturates() {
        assert_eq!(Color::clamped(-4, 300, 12, 999), Color::new(0, 255, 12, 255));
        assert_eq!(clamp_channel(f64::NAN), 0);
        assert_eq!(clamp_channel(254.6), 255);
    }
}
