//! Color compositing
//!
//! Each primitive contributes an RGB color with a coverage derived from its
//! local distance. Coverage is composited into the running color channel with
//! [`blend`].

use serde::{Deserialize, Serialize};

/// RGB color with coverage in `a`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Zero color, zero coverage (the cleared color channel)
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const GREY: Self = Self::new(0.5, 0.5, 0.5, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build from an RGB triple and a coverage value
    pub const fn from_rgb(rgb: [f32; 3], a: f32) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2], a)
    }

    pub fn rgb(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Clamp every channel to `[0, 1]`
    pub fn clamped(self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
            self.a.clamp(0.0, 1.0),
        )
    }

    /// Quantize to 8-bit RGBA
    pub fn to_rgba8(self) -> [u8; 4] {
        let c = self.clamped();
        [
            (c.r * 255.0) as u8,
            (c.g * 255.0) as u8,
            (c.b * 255.0) as u8,
            (c.a * 255.0) as u8,
        ]
    }
}

impl From<[f32; 4]> for Rgba {
    fn from(c: [f32; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

/// How coverage accumulates when compositing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlphaMode {
    /// `a = front.a + back.a`: total coverage, saturating at 1
    #[default]
    Additive,
    /// `a = front.a + back.a * (1 - front.a)`: conventional "over"
    Over,
}

/// Composite `front` over `back` with additive coverage.
///
/// `rgb = front.rgb * front.a + back.rgb * (1 - front.a)`,
/// `a = front.a + back.a`, all channels clamped to `[0, 1]`.
pub fn blend(back: Rgba, front: Rgba) -> Rgba {
    blend_with(back, front, AlphaMode::Additive)
}

/// Composite `front` over `back` with the given coverage accumulation
pub fn blend_with(back: Rgba, front: Rgba, mode: AlphaMode) -> Rgba {
    let fa = front.a;
    let a = match mode {
        AlphaMode::Additive => fa + back.a,
        AlphaMode::Over => fa + back.a * (1.0 - fa),
    };
    Rgba::new(
        front.r * fa + back.r * (1.0 - fa),
        front.g * fa + back.g * (1.0 - fa),
        front.b * fa + back.b * (1.0 - fa),
        a,
    )
    .clamped()
}

/// Coverage of a primitive at local signed distance `d`.
///
/// Full coverage up to the edge thickness `t`, then a `|t / d^f|` glow that
/// falls off with exponent `f`.
#[inline]
pub fn coverage(d: f32, t: f32, f: f32) -> f32 {
    if d < t { 1.0 } else { (t / d.powf(f)).abs() }
}

// ============================================================================
// Tests
// ============================================================================
