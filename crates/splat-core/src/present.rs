//! Final presentation pass
//!
//! Turns the accumulated distance field into visible pixels: a fill inside
//! the shape, a border band around the zero crossing, background elsewhere.

use image::{ImageBuffer, Rgba as ImageRgba, RgbaImage};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::accumulate::AccumulatorState;
use crate::color::Rgba;
use crate::field::Field;
use crate::{Error, Result};

/// What is shown inside the shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillMode {
    /// The configured fill color
    #[default]
    Solid,
    /// The composited color channel, fully opaque
    Accumulated,
}

/// Colors and thresholds of the presentation pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Presentation {
    pub fill: Rgba,
    pub border: Rgba,
    pub background: Rgba,
    /// Half-width of the border band around `d = 0`; zero disables it
    pub border_width: f32,
    /// Gamma exponent applied as `rgb^(1/gamma)`, if any
    pub gamma: Option<f32>,
    pub fill_mode: FillMode,
}

impl Default for Presentation {
    fn default() -> Self {
        Self {
            fill: Rgba::GREY,
            border: Rgba::BLACK,
            background: Rgba::TRANSPARENT,
            border_width: 0.02,
            gamma: None,
            fill_mode: FillMode::Solid,
        }
    }
}

impl Presentation {
    /// Standard display gamma
    pub const GAMMA: f32 = 2.2;

    pub fn with_gamma(mut self, gamma: f32) -> Self {
        self.gamma = Some(gamma);
        self
    }

    pub fn with_border_width(mut self, width: f32) -> Self {
        self.border_width = width;
        self
    }

    pub fn with_fill_mode(mut self, mode: FillMode) -> Self {
        self.fill_mode = mode;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.border_width.is_finite() && self.border_width >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "border width must be finite and non-negative, got {}",
                self.border_width
            )));
        }
        if let Some(g) = self.gamma {
            if !(g.is_finite() && g > 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "gamma must be positive, got {g}"
                )));
            }
        }
        Ok(())
    }

    /// Shade a pixel from its accumulated distance and color
    pub fn shade(&self, d: f32, color: Rgba) -> Rgba {
        let c = if self.border_width > 0.0 && d.abs() <= self.border_width {
            self.border
        } else if d <= 0.0 {
            match self.fill_mode {
                FillMode::Solid => self.fill,
                FillMode::Accumulated => Rgba::from_rgb(color.rgb(), 1.0),
            }
        } else {
            self.background
        };

        match self.gamma {
            Some(g) => {
                let inv = 1.0 / g;
                Rgba::new(c.r.powf(inv), c.g.powf(inv), c.b.powf(inv), c.a).clamped()
            }
            None => c.clamped(),
        }
    }

    /// Shade every pixel of `state`
    pub fn present(&self, state: &AccumulatorState) -> Field<Rgba> {
        let (width, height) = state.dimensions();
        let pixels: Vec<Rgba> = state
            .distance()
            .as_slice()
            .par_iter()
            .zip(state.color().as_slice().par_iter())
            .map(|(&d, &c)| self.shade(d, c))
            .collect();

        Field::from_vec_unchecked(width, height, pixels)
    }
}

/// Convert a presented field to an 8-bit image, top row first
pub fn to_image(field: &Field<Rgba>) -> RgbaImage {
    let (width, height) = field.dimensions();
    ImageBuffer::from_fn(width, height, |x, y| {
        let c = field
            .get(x, height - 1 - y)
            .copied()
            .unwrap_or(Rgba::TRANSPARENT);
        ImageRgba(c.to_rgba8())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulate::CLEAR_DISTANCE;
    use crate::field::Resolution;
    use approx::assert_relative_eq;

    #[test]
    fn shade_regions() {
        let p = Presentation::default();
        assert_eq!(p.shade(-0.5, Rgba::TRANSPARENT), p.fill);
        assert_eq!(p.shade(-0.01, Rgba::TRANSPARENT), p.border);
        assert_eq!(p.shade(0.0, Rgba::TRANSPARENT), p.border);
        assert_eq!(p.shade(0.015, Rgba::TRANSPARENT), p.border);
        assert_eq!(p.shade(0.5, Rgba::TRANSPARENT), p.background);
    }

    #[test]
    fn zero_border_width_disables_border() {
        let p = Presentation::default().with_border_width(0.0);
        assert_eq!(p.shade(0.0, Rgba::TRANSPARENT), p.fill);
        assert_eq!(p.shade(1e-6, Rgba::TRANSPARENT), p.background);
    }

    #[test]
    fn accumulated_fill_uses_color_channel() {
        let p = Presentation::default().with_fill_mode(FillMode::Accumulated);
        let c = p.shade(-0.5, Rgba::new(0.2, 0.4, 0.6, 0.3));
        assert_eq!(c, Rgba::new(0.2, 0.4, 0.6, 1.0));
    }

    #[test]
    fn gamma_brightens_midtones() {
        let p = Presentation::default().with_gamma(Presentation::GAMMA);
        let c = p.shade(-0.5, Rgba::TRANSPARENT);
        assert_relative_eq!(c.r, 0.5f32.powf(1.0 / 2.2), epsilon = 1e-6);
        assert_relative_eq!(c.a, 1.0);
    }

    #[test]
    fn validate_rejects_bad_values() {
        assert!(Presentation::default().validate().is_ok());
        assert!(Presentation::default().with_border_width(-1.0).validate().is_err());
        assert!(Presentation::default().with_gamma(0.0).validate().is_err());
    }

    #[test]
    fn empty_state_presents_background() {
        let res = Resolution::from_power(3).unwrap_or_default();
        let state = AccumulatorState::new(res, CLEAR_DISTANCE);
        let p = Presentation {
            background: Rgba::new(0.1, 0.2, 0.3, 1.0),
            ..Presentation::default()
        };
        let out = p.present(&state);
        assert!(out.iter().all(|&c| c == p.background));
    }

    #[test]
    fn image_is_flipped_to_top_row_first() {
        let mut data = vec![Rgba::BLACK; 4];
        data[0] = Rgba::WHITE; // bottom-left
        let field = Field::from_vec(2, 2, data).unwrap_or_else(|_| Field::new(2, 2, Rgba::BLACK));
        let img = to_image(&field);
        assert_eq!(img.get_pixel(0, 1).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
    }
}
