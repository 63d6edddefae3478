//! Uniform buffer layouts shared with the generated WGSL
//!
//! Field order and padding follow WGSL uniform layout rules; every struct is
//! a multiple of 16 bytes.

use bytemuck::{Pod, Zeroable};
use splat_core::color::AlphaMode;
use splat_core::present::{FillMode, Presentation};
use splat_core::primitive::{Primitive, SplatParams};

/// Per-splat uniforms for the accumulate pass
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SplatUniforms {
    pub center: [f32; 2],
    pub radius: f32,
    pub smoothing: f32,
    pub color: [f32; 3],
    pub edge_thickness: f32,
    pub falloff: f32,
    /// 0 = additive, 1 = over
    pub alpha_mode: u32,
    pub viewport: [f32; 2],
}

impl SplatUniforms {
    pub fn new(primitive: &Primitive, params: &SplatParams, viewport: [f32; 2]) -> Self {
        Self {
            center: primitive.center.to_array(),
            radius: primitive.radius,
            smoothing: params.smoothing,
            color: primitive.color,
            edge_thickness: params.edge_thickness,
            falloff: params.falloff,
            alpha_mode: match params.alpha_mode {
                AlphaMode::Additive => 0,
                AlphaMode::Over => 1,
            },
            viewport,
        }
    }
}

/// Uniforms for the presentation pass
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PresentUniforms {
    pub fill: [f32; 4],
    pub border: [f32; 4],
    pub background: [f32; 4],
    pub border_width: f32,
    /// 0 disables gamma correction
    pub gamma: f32,
    /// 0 = solid, 1 = accumulated
    pub fill_mode: u32,
    pub _padding: u32,
}

impl From<&Presentation> for PresentUniforms {
    fn from(p: &Presentation) -> Self {
        Self {
            fill: p.fill.to_array(),
            border: p.border.to_array(),
            background: p.background.to_array(),
            border_width: p.border_width,
            gamma: p.gamma.unwrap_or(0.0),
            fill_mode: match p.fill_mode {
                FillMode::Solid => 0,
                FillMode::Accumulated => 1,
            },
            _padding: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use splat_core::prelude::Vec2;

    #[test]
    fn sizes_are_16_byte_multiples() {
        assert_eq!(std::mem::size_of::<SplatUniforms>(), 48);
        assert_eq!(std::mem::size_of::<PresentUniforms>(), 64);
    }

    #[test]
    fn splat_uniforms_from_primitive() {
        let prim = Primitive::circle(Vec2::new(0.25, -0.5), 0.1).with_color([1.0, 0.5, 0.0]);
        let params = SplatParams {
            alpha_mode: AlphaMode::Over,
            ..SplatParams::default()
        };
        let u = SplatUniforms::new(&prim, &params, [512.0, 512.0]);
        assert_eq!(u.center, [0.25, -0.5]);
        assert_eq!(u.color, [1.0, 0.5, 0.0]);
        assert_eq!(u.alpha_mode, 1);
        assert_eq!(bytemuck::bytes_of(&u).len(), 48);
    }

    #[test]
    fn present_uniforms_encode_optional_gamma() {
        let off = PresentUniforms::from(&Presentation::default());
        assert_eq!(off.gamma, 0.0);
        let on = PresentUniforms::from(&Presentation::default().with_gamma(2.2));
        assert_eq!(on.gamma, 2.2);
    }
}
