//! Distance accumulation operators
//!
//! Merge a primitive's local distance `b` into the running distance `a`.
//! All operators are branch-light scalar functions and never clamp their
//! output. Non-finite inputs are not rejected. A NaN operand makes the result
//! NaN (`f32::min`/`max` alone would drop it); infinities follow the float
//! arithmetic.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// How a primitive is merged into the accumulated distance field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlendMode {
    /// Add the primitive to the shape
    #[default]
    Union,
    /// Carve the primitive out of the shape
    Difference,
}

impl BlendMode {
    /// Name of the matching shader operator
    pub fn op_name(self) -> &'static str {
        match self {
            Self::Union => "op_union_round",
            Self::Difference => "op_difference_round",
        }
    }
}

/// Hard union (`min`)
#[inline]
pub fn union(a: f32, b: f32) -> f32 {
    if a.is_nan() || b.is_nan() {
        return f32::NAN;
    }
    a.min(b)
}

/// Hard difference, `a` minus `b`
#[inline]
pub fn difference(a: f32, b: f32) -> f32 {
    if a.is_nan() || b.is_nan() {
        return f32::NAN;
    }
    a.max(-b)
}

/// Rounded union with blend radius `r`.
///
/// `max(r, min(a, b)) - |max(r - (a, b), 0)|`
///
/// The result never exceeds `min(a, b) + r`. With `r == 0` this is exactly
/// [`union`]; the rounded expression alone would report `-|(a, b)|` where both
/// inputs are inside.
#[inline]
pub fn union_round(a: f32, b: f32, r: f32) -> f32 {
    if r == 0.0 || a.is_nan() || b.is_nan() {
        return union(a, b);
    }
    let u = Vec2::new(r - a, r - b).max(Vec2::ZERO);
    r.max(a.min(b)) - u.length()
}

/// Rounded difference (`a` minus `b`) with blend radius `r`.
///
/// `min(-r, max(a, -b)) + |max((r + a, r - b), 0)|`
///
/// With `r == 0` this is exactly [`difference`].
#[inline]
pub fn difference_round(a: f32, b: f32, r: f32) -> f32 {
    if r == 0.0 || a.is_nan() || b.is_nan() {
        return difference(a, b);
    }
    let u = Vec2::new(r + a, r - b).max(Vec2::ZERO);
    (-r).min(a.max(-b)) + u.length()
}

/// Merge `b` into `a` using `mode` with blend radius `r`
#[inline]
pub fn merge(a: f32, b: f32, r: f32, mode: BlendMode) -> f32 {
    match mode {
        BlendMode::Union => union_round(a, b, r),
        BlendMode::Difference => difference_round(a, b, r),
    }
}

// ============================================================================
// Tests
// ============================================================================
