//! CPU renderer: clear, splat every primitive in order, present

use glam::Vec2;
use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::accumulate::{AccumulatorState, CLEAR_DISTANCE, accumulate, sample_point};
use crate::color::Rgba;
use crate::field::{Field, Resolution};
use crate::present::{Presentation, to_image};
use crate::primitive::SplatParams;
use crate::scene::Scene;
use crate::{Error, Result};

/// Everything needed to turn a scene into pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Renderer {
    pub resolution: Resolution,
    pub params: SplatParams,
    pub presentation: Presentation,
    /// Distance an empty pixel reports
    pub clear_distance: f32,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            resolution: Resolution::default(),
            params: SplatParams::default(),
            presentation: Presentation::default(),
            clear_distance: CLEAR_DISTANCE,
        }
    }
}

impl Renderer {
    pub fn new(resolution: Resolution) -> Self {
        Self {
            resolution,
            ..Self::default()
        }
    }

    pub fn with_params(mut self, params: SplatParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_presentation(mut self, presentation: Presentation) -> Self {
        self.presentation = presentation;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let p = &self.params;
        if !(p.smoothing.is_finite() && p.smoothing >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "smoothing radius must be finite and non-negative, got {}",
                p.smoothing
            )));
        }
        // Zero thickness turns full-coverage pixels (d == 0) into 0/0
        if !(p.edge_thickness.is_finite() && p.edge_thickness > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "edge thickness must be finite and positive, got {}",
                p.edge_thickness
            )));
        }
        if !p.falloff.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "falloff must be finite, got {}",
                p.falloff
            )));
        }
        self.presentation.validate()?;
        // An empty pixel must shade as background, outside fill and border
        if !(self.clear_distance.is_finite()
            && self.clear_distance > self.presentation.border_width)
        {
            return Err(Error::InvalidConfig(format!(
                "clear distance must be finite and greater than the border width {}, got {}",
                self.presentation.border_width, self.clear_distance
            )));
        }
        Ok(())
    }

    /// Fresh cleared accumulator at this renderer's resolution
    pub fn cleared(&self) -> AccumulatorState {
        AccumulatorState::new(self.resolution, self.clear_distance)
    }

    /// Splat every primitive of `scene`, in order, into a cleared accumulator
    pub fn accumulate(&self, scene: &Scene) -> AccumulatorState {
        accumulate(self.cleared(), &scene.primitives, &self.params)
    }

    /// Accumulate and shade `scene`
    pub fn present(&self, scene: &Scene) -> Field<Rgba> {
        self.presentation.present(&self.accumulate(scene))
    }

    /// Accumulate, shade and convert `scene` to an image
    pub fn render(&self, scene: &Scene) -> Result<RgbaImage> {
        self.validate()?;
        let size = self.resolution.size();
        tracing::info!(primitives = scene.len(), size, "rendering scene");
        Ok(to_image(&self.present(scene)))
    }

    /// Accumulated `(distance, color)` at screen-space point `p`
    pub fn sample(&self, scene: &Scene, p: Vec2) -> (f32, Rgba) {
        sample_point(&scene.primitives, &self.params, self.clear_distance, p)
    }

    /// Render `frames` frames, stepping the scene's motion before each one
    pub fn animate<F>(&self, scene: &mut Scene, frames: usize, mut on_frame: F) -> Result<()>
    where
        F: FnMut(usize, RgbaImage) -> Result<()>,
    {
        self.validate()?;
        for frame in 0..frames {
            scene.step();
            let image = to_image(&self.present(scene));
            tracing::debug!(frame, "frame rendered");
            on_frame(frame, image)?;
        }
        Ok(())
    }
}
