//! Splat primitives and the per-splat parameters

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::color::{AlphaMode, Rgba};
use crate::ops::BlendMode;

/// Signed distance from `p` to a circle of radius `r` centered at the origin
#[inline]
pub fn sdf_circle(p: Vec2, r: f32) -> f32 {
    p.length() - r
}

/// A circle splatted into the accumulator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    /// Center in screen space (`-1..1` on both axes)
    pub center: Vec2,
    pub radius: f32,
    /// RGB color, 0-1
    pub color: [f32; 3],
    #[serde(default)]
    pub mode: BlendMode,
    /// Per-frame displacement applied by [`Primitive::step`]
    #[serde(default)]
    pub velocity: Vec2,
}

impl Primitive {
    /// White union circle at rest
    pub fn circle(center: Vec2, radius: f32) -> Self {
        Self {
            center,
            radius,
            color: [1.0, 1.0, 1.0],
            mode: BlendMode::Union,
            velocity: Vec2::ZERO,
        }
    }

    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }

    pub fn with_mode(mut self, mode: BlendMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Local signed distance at screen-space point `p`
    #[inline]
    pub fn distance(&self, p: Vec2) -> f32 {
        sdf_circle(p - self.center, self.radius)
    }

    /// Color sample contributed at local distance `d`
    #[inline]
    pub fn sample(&self, d: f32, params: &SplatParams) -> Rgba {
        Rgba::from_rgb(
            self.color,
            crate::color::coverage(d, params.edge_thickness, params.falloff),
        )
    }

    /// Advance the position by one frame of velocity
    pub fn step(&mut self) {
        self.center += self.velocity;
    }
}

/// Parameters shared by every splat of a pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplatParams {
    /// Blend radius of the rounded operators
    pub smoothing: f32,
    /// Distance below which coverage is full. Must be positive: at zero the
    /// falloff evaluates `0 / 0` on the edge itself.
    pub edge_thickness: f32,
    /// Exponent of the coverage falloff past the edge
    pub falloff: f32,
    pub alpha_mode: AlphaMode,
}

impl Default for SplatParams {
    fn default() -> Self {
        Self {
            smoothing: 0.04,
            edge_thickness: 0.01,
            falloff: 2.0,
            alpha_mode: AlphaMode::Additive,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn circle_distance_is_signed() {
        let c = Primitive::circle(Vec2::new(0.3, 0.0), 0.3);
        assert_relative_eq!(c.distance(Vec2::new(0.3, 0.0)), -0.3, epsilon = 1e-6);
        assert_relative_eq!(c.distance(Vec2::ZERO), 0.0, epsilon = 1e-6);
        assert_relative_eq!(c.distance(Vec2::new(1.0, 0.0)), 0.4, epsilon = 1e-6);
    }

    #[test]
    fn step_integrates_velocity() {
        let mut c = Primitive::circle(Vec2::ZERO, 0.1).with_velocity(Vec2::new(0.01, -0.02));
        c.step();
        c.step();
        assert_relative_eq!(c.center.x, 0.02, epsilon = 1e-6);
        assert_relative_eq!(c.center.y, -0.04, epsilon = 1e-6);
    }

    #[test]
    fn sample_carries_color_and_coverage() {
        let c = Primitive::circle(Vec2::ZERO, 0.1).with_color([0.2, 0.4, 0.6]);
        let s = c.sample(-0.05, &SplatParams::default());
        assert_eq!(s.rgb(), [0.2, 0.4, 0.6]);
        assert_relative_eq!(s.a, 1.0);
    }

    #[test]
    fn primitive_json_defaults_mode_and_velocity() {
        let json = r#"{ "center": [0.5, -0.5], "radius": 0.2, "color": [1.0, 0.0, 0.0] }"#;
        let p: Primitive = serde_json::from_str(json).unwrap();
        assert_eq!(p.mode, BlendMode::Union);
        assert_eq!(p.velocity, Vec2::ZERO);
        assert_relative_eq!(p.radius, 0.2);
    }
}
