//! Ordered primitive lists
//!
//! A scene owns the primitives in the order they are splatted. Scenes can be
//! seeded deterministically, grown one click at a time, advanced by their
//! velocities, and stored as JSON.

use std::fs;
use std::path::Path;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::ops::BlendMode;
use crate::primitive::Primitive;

/// Radius of a spawned primitive
pub const SPAWN_RADIUS: f32 = 0.01;
/// Largest speed component of a spawned primitive, per frame
pub const SPAWN_SPEED: f32 = 0.01;
/// Largest radius in a seeded row
pub const ROW_MAX_RADIUS: f32 = 0.1;

/// Primitives in splat order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub primitives: Vec<Primitive>,
}

impl Scene {
    pub fn new(primitives: Vec<Primitive>) -> Self {
        Self { primitives }
    }

    /// A row of `2 * count + 1` circles spread along the x axis, with random
    /// colors and radii drawn from a PCG stream seeded with `seed`
    pub fn seeded_row(count: u32, seed: u64) -> Self {
        if count == 0 {
            return Self::default();
        }
        let mut rng = Pcg32::seed_from_u64(seed);
        let n = count as i32;
        let primitives = (-n..=n)
            .map(|i| {
                let x = i as f32 / n as f32;
                Primitive::circle(Vec2::new(x, 0.0), rng.random_range(0.0..ROW_MAX_RADIUS))
                    .with_color(random_color(&mut rng))
            })
            .collect();
        Self { primitives }
    }

    /// Append a small moving circle at `position`; carves when `subtract` is set
    pub fn spawn<R: Rng>(&mut self, position: Vec2, subtract: bool, rng: &mut R) {
        let velocity = Vec2::new(
            rng.random_range(-SPAWN_SPEED..=SPAWN_SPEED),
            rng.random_range(-SPAWN_SPEED..=SPAWN_SPEED),
        );
        let mode = if subtract {
            BlendMode::Difference
        } else {
            BlendMode::Union
        };
        self.primitives.push(
            Primitive::circle(position, SPAWN_RADIUS)
                .with_color(random_color(rng))
                .with_velocity(velocity)
                .with_mode(mode),
        );
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    /// Advance every primitive by one frame
    pub fn step(&mut self) {
        for p in &mut self.primitives {
            p.step();
        }
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

fn random_color<R: Rng>(rng: &mut R) -> [f32; 3] {
    [rng.random(), rng.random(), rng.random()]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn seeded_row_layout() {
        let scene = Scene::seeded_row(40, 7);
        assert_eq!(scene.len(), 81);
        assert_relative_eq!(scene.primitives[0].center.x, -1.0);
        assert_relative_eq!(scene.primitives[40].center.x, 0.0);
        assert_relative_eq!(scene.primitives[80].center.x, 1.0);
        for p in &scene.primitives {
            assert!((0.0..ROW_MAX_RADIUS).contains(&p.radius));
            assert_eq!(p.mode, BlendMode::Union);
        }
    }

    #[test]
    fn seeded_row_is_deterministic() {
        assert_eq!(Scene::seeded_row(10, 42), Scene::seeded_row(10, 42));
        assert_ne!(Scene::seeded_row(10, 42), Scene::seeded_row(10, 43));
        assert!(Scene::seeded_row(0, 1).is_empty());
    }

    #[test]
    fn spawn_appends_small_moving_circle() {
        let mut scene = Scene::default();
        let mut rng = Pcg32::seed_from_u64(3);
        scene.spawn(Vec2::new(0.5, 0.5), false, &mut rng);
        scene.spawn(Vec2::new(-0.5, 0.5), true, &mut rng);

        assert_eq!(scene.len(), 2);
        assert_relative_eq!(scene.primitives[0].radius, SPAWN_RADIUS);
        assert_eq!(scene.primitives[0].mode, BlendMode::Union);
        assert_eq!(scene.primitives[1].mode, BlendMode::Difference);
        let v = scene.primitives[0].velocity;
        assert!(v.x.abs() <= SPAWN_SPEED && v.y.abs() <= SPAWN_SPEED);
    }

    #[test]
    fn step_moves_everything() {
        let mut scene = Scene::new(vec![
            Primitive::circle(Vec2::ZERO, 0.1).with_velocity(Vec2::X * 0.1),
            Primitive::circle(Vec2::ONE, 0.1),
        ]);
        scene.step();
        assert_relative_eq!(scene.primitives[0].center.x, 0.1);
        assert_eq!(scene.primitives[1].center, Vec2::ONE);
    }

    #[test]
    fn save_and_load() {
        let path = std::env::temp_dir().join("splat_scene_test.json");
        let scene = Scene::seeded_row(3, 9);
        scene.save(&path).unwrap();
        let loaded = Scene::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, scene);
    }

    #[test]
    fn load_reports_bad_json() {
        let path = std::env::temp_dir().join("splat_scene_bad.json");
        fs::write(&path, "{ not json").unwrap();
        let result = Scene::load(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(crate::Error::Json(_))));
    }
}
