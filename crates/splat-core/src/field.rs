//! Fixed-size 2D grids of samples

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Largest supported grid power (4096 x 4096)
pub const MAX_POWER: u32 = 12;

/// Square power-of-two grid size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Resolution {
    power: u32,
}

impl Resolution {
    /// Grid of `2^power` pixels per side
    pub fn from_power(power: u32) -> Result<Self> {
        if power == 0 || power > MAX_POWER {
            return Err(Error::InvalidConfig(format!(
                "grid power must be in 1..={MAX_POWER}, got {power}"
            )));
        }
        Ok(Self { power })
    }

    /// Grid of `size` pixels per side; `size` must be a power of two
    pub fn from_size(size: u32) -> Result<Self> {
        if !size.is_power_of_two() {
            return Err(Error::InvalidConfig(format!(
                "grid size must be a power of two, got {size}"
            )));
        }
        Self::from_power(size.trailing_zeros())
    }

    pub fn power(self) -> u32 {
        self.power
    }

    /// Pixels per side
    pub fn size(self) -> u32 {
        1 << self.power
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self { power: 9 }
    }
}

impl TryFrom<u32> for Resolution {
    type Error = Error;

    fn try_from(power: u32) -> Result<Self> {
        Self::from_power(power)
    }
}

impl From<Resolution> for u32 {
    fn from(r: Resolution) -> u32 {
        r.power
    }
}

/// Row-major grid of samples; row 0 is the bottom row
#[derive(Debug, Clone, PartialEq)]
pub struct Field<T> {
    width: u32,
    height: u32,
    data: Vec<T>,
}

impl<T: Clone> Field<T> {
    /// Grid filled with `value`
    pub fn new(width: u32, height: u32, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width as usize * height as usize],
        }
    }

    /// Square grid at `resolution` filled with `value`
    pub fn square(resolution: Resolution, value: T) -> Self {
        Self::new(resolution.size(), resolution.size(), value)
    }

    /// Reset every sample to `value`
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }
}

impl<T> Field<T> {
    /// Wrap existing samples; `data` must hold exactly `width * height` values
    pub fn from_vec(width: u32, height: u32, data: Vec<T>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::InvalidConfig(format!(
                "field of {width}x{height} needs {expected} samples, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Caller guarantees `data.len() == width * height`
    pub(crate) fn from_vec_unchecked(width: u32, height: u32, data: Vec<T>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize);
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn get(&self, x: u32, y: u32) -> Option<&T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(self.index(x, y))
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Screen-space (`-1..1`) position of the center of pixel `(x, y)`
    pub fn pixel_center(&self, x: u32, y: u32) -> Vec2 {
        pixel_center(x, y, self.width, self.height)
    }

    /// Fail unless `other` has the same dimensions as `self`
    pub fn ensure_same_dimensions<U>(&self, other: &Field<U>) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                found: other.dimensions(),
            });
        }
        Ok(())
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Screen-space position of the center of pixel `(x, y)` in a `width x height` grid
#[inline]
pub fn pixel_center(x: u32, y: u32, width: u32, height: u32) -> Vec2 {
    let uv = Vec2::new(
        (x as f32 + 0.5) / width as f32,
        (y as f32 + 0.5) / height as f32,
    );
    uv * 2.0 - Vec2::ONE
}
