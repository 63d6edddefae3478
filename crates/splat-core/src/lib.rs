//! # Splat Core
//!
//! Signed distance field splatting of circles.
//!
//! Circles are splatted one at a time into a pair of floating-point buffers:
//! a distance field merged with rounded union/difference operators, and a
//! color channel composited with each circle's edge coverage. A final pass
//! shades the distance field with a fill, a border band and a background.
//!
//! ## Quick Start
//!
//! ```rust
//! use splat_core::prelude::*;
//!
//! let scene = Scene::new(vec![
//!     Primitive::circle(Vec2::new(-0.3, 0.0), 0.3),
//!     Primitive::circle(Vec2::new(0.3, 0.0), 0.3),
//! ]);
//!
//! let renderer = Renderer::new(Resolution::from_power(6)?);
//! let (d, _color) = renderer.sample(&scene, Vec2::ZERO);
//! assert!(d < 0.0);
//! let image = renderer.render(&scene)?;
//! assert_eq!(image.width(), 64);
//! # Ok::<(), splat_core::Error>(())
//! ```
//!
//! ## Conventions
//!
//! - **Screen space**: `-1..1` on both axes, `+y` up
//! - **Pixels**: row 0 is the bottom row; images are flipped on export
//! - **Precision**: `f32` throughout, matching the GPU path
//! - **Non-finite input**: not rejected; a NaN radius or center yields NaN
//!   distances from that splat on, infinities follow the float arithmetic

pub mod accumulate;
pub mod color;
pub mod field;
pub mod ops;
pub mod present;
pub mod primitive;
pub mod render;
pub mod scene;

mod error;

pub use error::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    // Operators
    pub use crate::ops::{BlendMode, difference_round, merge, union_round};

    // Compositing
    pub use crate::color::{AlphaMode, Rgba, blend, blend_with, coverage};

    // Buffers and passes
    pub use crate::accumulate::{AccumulatorState, CLEAR_DISTANCE, accumulate, splat_pixel};
    pub use crate::field::{Field, Resolution};
    pub use crate::present::{FillMode, Presentation, to_image};

    // Scene description
    pub use crate::primitive::{Primitive, SplatParams};
    pub use crate::render::Renderer;
    pub use crate::scene::Scene;

    // Math (re-export glam)
    pub use glam::Vec2;

    // Error handling
    pub use crate::{Error, Result};
}
