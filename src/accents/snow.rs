use std::f32::consts::TAU;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;
use crate::math::Vec3;

/// Floats per flake in the GPU buffer: position(3)
pub const SNOW_STRIDE: usize = 3;

/// Vertical band of the initial distribution
const INITIAL_BAND: f32 = 30.0;
/// Centre of the initial distribution
const INITIAL_CENTER: f32 = 5.0;
/// Reference frame rate the per-frame speeds were tuned at
const REFERENCE_FPS: f32 = 60.0;
const SWAY_AMPLITUDE: f32 = 0.005;

/// Snowfall parameters
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SnowSpec {
    pub count: usize,
    /// Horizontal extent, flakes live in `[-spread/2, spread/2)` on x and z
    pub spread: f32,
    /// Height a flake respawns at after passing the floor
    pub spawn_height: f32,
    pub floor: f32,
    pub size: f32,
    pub opacity: f32,
}

impl Default for SnowSpec {
    fn default() -> Self {
        Self {
            count: 400,
            spread: 25.0,
            spawn_height: 15.0,
            floor: -10.0,
            size: 0.12,
            opacity: 0.5,
        }
    }
}

/// A single snowflake
#[derive(Debug, Clone, PartialEq)]
struct Flake {
    position: Vec3,
    /// Units per frame at 60 Hz
    fall_speed: f32,
    sway_speed: f32,
    x_phase: f32,
    z_phase: f32,
}

/// Ambient snowfall. Independent of the tree arrangement.
#[derive(Debug, Clone)]
pub struct SnowField {
    flakes: Vec<Flake>,
    spec: SnowSpec,
    rng: ChaCha8Rng,
}

impl SnowField {
    /// Create the field with its own random stream split off `rng`
    pub fn new<R: Rng + ?Sized>(spec: &SnowSpec, rng: &mut R) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(rng.gen());

        let flakes = (0..spec.count)
            .map(|_| Flake {
                position: Vec3::new(
                    (rng.gen::<f32>() - 0.5) * spec.spread,
                    (rng.gen::<f32>() - 0.5) * INITIAL_BAND + INITIAL_CENTER,
                    (rng.gen::<f32>() - 0.5) * spec.spread,
                ),
                fall_speed: 0.01 + rng.gen::<f32>() * 0.03,
                sway_speed: 0.5 + rng.gen::<f32>() * 0.5,
                x_phase: rng.gen::<f32>() * TAU,
                z_phase: rng.gen::<f32>() * TAU,
            })
            .collect();

        Self {
            flakes,
            spec: spec.clone(),
            rng,
        }
    }

    /// Advance every flake by one frame
    pub fn update(&mut self, time: f32, dt: f32) {
        let frames = dt.max(0.0) * REFERENCE_FPS;
        let half = self.spec.spread / 2.0;

        for flake in &mut self.flakes {
            flake.position.y -= flake.fall_speed * frames;

            if flake.position.y < self.spec.floor {
                flake.position.y = self.spec.spawn_height;
                flake.position.x = self.rng.gen::<f32>() * self.spec.spread - half;
                flake.position.z = self.rng.gen::<f32>() * self.spec.spread - half;
            }

            flake.position.x += (time * flake.sway_speed + flake.x_phase).cos() * SWAY_AMPLITUDE;
            flake.position.z += (time * flake.sway_speed + flake.z_phase).sin() * SWAY_AMPLITUDE;
        }
    }

    /// Get particle data for GPU upload, 3 floats per flake
    pub fn particle_data(&self) -> Vec<f32> {
        self.flakes
            .iter()
            .flat_map(|f| f.position.to_array())
            .collect()
    }

    pub fn spec(&self) -> &SnowSpec {
        &self.spec
    }

    pub fn count(&self) -> usize {
        self.flakes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> SnowField {
        SnowField::new(&SnowSpec::default(), &mut ChaCha8Rng::seed_from_u64(3))
    }

    #[test]
    fn test_initial_distribution() {
        let snow = field();
        assert_eq!(snow.count(), 400);
        for f in &snow.flakes {
            assert!(f.position.x.abs() <= 12.5);
            assert!(f.position.z.abs() <= 12.5);
            assert!((-10.0..=20.0).contains(&f.position.y));
            assert!((0.01..=0.04).contains(&f.fall_speed));
            assert!((0.5..=1.0).contains(&f.sway_speed));
        }
    }

    #[test]
    fn test_falls_at_per_frame_speed() {
        let mut snow = field();
        snow.flakes.truncate(1);
        snow.flakes[0].position.y = 0.0;
        snow.flakes[0].fall_speed = 0.02;

        snow.update(0.0, 1.0 / 60.0);
        assert!((snow.flakes[0].position.y + 0.02).abs() < 1e-6);

        // Two frames' worth of time in one step falls twice as far
        snow.update(0.0, 2.0 / 60.0);
        assert!((snow.flakes[0].position.y + 0.06).abs() < 1e-5);
    }

    #[test]
    fn test_wraps_below_floor() {
        let mut snow = field();
        snow.flakes.truncate(1);
        snow.flakes[0].position = Vec3::new(100.0, -9.995, 100.0);
        snow.flakes[0].fall_speed = 0.03;

        snow.update(1.0, 1.0 / 60.0);
        let p = snow.flakes[0].position;
        assert_eq!(p.y, 15.0);
        // Resampled inside the spread, plus at most one sway step
        assert!(p.x.abs() <= 12.5 + 0.005);
        assert!(p.z.abs() <= 12.5 + 0.005);
    }

    #[test]
    fn test_stays_within_vertical_bounds() {
        let mut snow = field();
        let dt = 1.0 / 60.0;
        for frame in 0..2000 {
            snow.update(frame as f32 * dt, dt);
        }
        for f in &snow.flakes {
            assert!(f.position.y >= -10.0 - 0.04);
            assert!(f.position.y <= 20.0);
        }
    }

    #[test]
    fn test_particle_data_format() {
        let snow = field();
        let data = snow.particle_data();
        assert_eq!(data.len(), snow.count() * SNOW_STRIDE);
        assert_eq!(&data[0..3], &snow.flakes[0].position.to_array());
    }

    #[test]
    fn test_zero_count() {
        let spec = SnowSpec {
            count: 0,
            ..SnowSpec::default()
        };
        let mut snow = SnowField::new(&spec, &mut ChaCha8Rng::seed_from_u64(1));
        snow.update(0.0, 0.016);
        assert!(snow.particle_data().is_empty());
    }
}
