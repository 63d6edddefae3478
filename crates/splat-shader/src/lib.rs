//! Splat Shader - WGSL sources and uniform layouts for GPU splatting
//!
//! The GPU path mirrors `splat-core` pass for pass: one accumulate draw per
//! primitive into a pair of float targets, ping-ponged, then a presentation
//! draw. This crate only produces shader text and `Pod` uniform structs; it
//! does not talk to a GPU.
//!
//! ## Example
//!
//! ```rust
//! use splat_core::prelude::*;
//! use splat_shader::{SplatUniforms, build_splat_shader};
//!
//! let circle = Primitive::circle(Vec2::ZERO, 0.25);
//! let shader = build_splat_shader(circle.mode);
//! let uniforms = SplatUniforms::new(&circle, &SplatParams::default(), [512.0, 512.0]);
//!
//! assert!(shader.contains("op_union_round"));
//! assert_eq!(bytemuck::bytes_of(&uniforms).len(), 48);
//! ```

mod uniforms;
mod wgsl;

pub use uniforms::{PresentUniforms, SplatUniforms};
pub use wgsl::{
    COMPOSITE, OP_DIFFERENCE_ROUND, OP_UNION_ROUND, SD_CIRCLE, build_present_shader,
    build_splat_shader, operator_source,
};
