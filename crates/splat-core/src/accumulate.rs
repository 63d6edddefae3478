//! Accumulator state and the per-primitive splat pass
//!
//! Each splat reads the previous distance/color pair of every pixel, merges
//! the primitive's local distance with [`merge`](crate::ops::merge) and
//! composites its color sample behind the accumulated color. Pixels are
//! independent, so rows are processed in parallel with Rayon; primitives are
//! applied strictly in the order given.

use glam::Vec2;
use rayon::prelude::*;

use crate::color::{Rgba, blend_with};
use crate::field::{Field, Resolution, pixel_center};
use crate::ops::merge;
use crate::primitive::{Primitive, SplatParams};
use crate::Result;

/// Distance value of an empty accumulator
pub const CLEAR_DISTANCE: f32 = 1.0;

/// Accumulated distance and color for every pixel of a grid
#[derive(Debug, Clone, PartialEq)]
pub struct AccumulatorState {
    distance: Field<f32>,
    color: Field<Rgba>,
}

impl AccumulatorState {
    /// Cleared state at `resolution`
    pub fn new(resolution: Resolution, clear_distance: f32) -> Self {
        Self {
            distance: Field::square(resolution, clear_distance),
            color: Field::square(resolution, Rgba::TRANSPARENT),
        }
    }

    /// Pair existing buffers; both must share the same dimensions
    pub fn from_parts(distance: Field<f32>, color: Field<Rgba>) -> Result<Self> {
        distance.ensure_same_dimensions(&color)?;
        Ok(Self { distance, color })
    }

    pub fn into_parts(self) -> (Field<f32>, Field<Rgba>) {
        (self.distance, self.color)
    }

    /// Reset to `clear_distance` and zero coverage
    pub fn clear(&mut self, clear_distance: f32) {
        self.distance.fill(clear_distance);
        self.color.fill(Rgba::TRANSPARENT);
    }

    pub fn distance(&self) -> &Field<f32> {
        &self.distance
    }

    pub fn color(&self) -> &Field<Rgba> {
        &self.color
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.distance.dimensions()
    }

    /// Distance and color of pixel `(x, y)`
    pub fn get(&self, x: u32, y: u32) -> Option<(f32, Rgba)> {
        Some((*self.distance.get(x, y)?, *self.color.get(x, y)?))
    }

    /// Splat `primitive` into a new state, leaving `self` untouched
    pub fn splat(&self, primitive: &Primitive, params: &SplatParams) -> Self {
        let mut next = self.clone();
        self.splat_pixels(&mut next, primitive, params);
        next
    }

    /// Splat `primitive` over `self`, writing the result into `next`
    pub fn splat_into(
        &self,
        next: &mut AccumulatorState,
        primitive: &Primitive,
        params: &SplatParams,
    ) -> Result<()> {
        self.distance.ensure_same_dimensions(&next.distance)?;
        self.splat_pixels(next, primitive, params);
        Ok(())
    }

    fn splat_pixels(&self, next: &mut AccumulatorState, primitive: &Primitive, params: &SplatParams) {
        let (width, height) = self.dimensions();
        let row = width as usize;
        if row == 0 {
            return;
        }

        next.distance
            .as_mut_slice()
            .par_chunks_mut(row)
            .zip(next.color.as_mut_slice().par_chunks_mut(row))
            .zip(self.distance.as_slice().par_chunks(row))
            .zip(self.color.as_slice().par_chunks(row))
            .enumerate()
            .for_each(|(y, (((d_out, c_out), d_in), c_in))| {
                for x in 0..row {
                    let p = pixel_center(x as u32, y as u32, width, height);
                    let (d, c) = splat_pixel(d_in[x], c_in[x], primitive, params, p);
                    d_out[x] = d;
                    c_out[x] = c;
                }
            });
    }
}

/// Merge one primitive into a single pixel's accumulated `(distance, color)`.
///
/// The accumulated color stays in front; the primitive's sample is composited
/// behind it, so earlier primitives win once coverage saturates.
#[inline]
pub fn splat_pixel(
    distance: f32,
    color: Rgba,
    primitive: &Primitive,
    params: &SplatParams,
    p: Vec2,
) -> (f32, Rgba) {
    let local = primitive.distance(p);
    let d = merge(distance, local, params.smoothing, primitive.mode);
    let c = blend_with(primitive.sample(local, params), color, params.alpha_mode);
    (d, c)
}

/// Apply `primitives` in order, ping-ponging between `state` and a scratch buffer
pub fn accumulate(
    state: AccumulatorState,
    primitives: &[Primitive],
    params: &SplatParams,
) -> AccumulatorState {
    let mut front = state;
    let mut back = front.clone();
    for primitive in primitives {
        front.splat_pixels(&mut back, primitive, params);
        std::mem::swap(&mut front, &mut back);
    }
    tracing::debug!(
        primitives = primitives.len(),
        width = front.dimensions().0,
        "accumulated splats"
    );
    front
}

/// Fold `primitives` at a single screen-space point, starting from a cleared pixel
pub fn sample_point(
    primitives: &[Primitive],
    params: &SplatParams,
    clear_distance: f32,
    p: Vec2,
) -> (f32, Rgba) {
    primitives
        .iter()
        .fold((clear_distance, Rgba::TRANSPARENT), |(d, c), prim| {
            splat_pixel(d, c, prim, params, p)
        })
}
