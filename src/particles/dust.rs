//! Shader-driven dust field
//!
//! Tens of thousands of glowing sprites share the ornaments' layout and
//! morph formula, but all per-particle work happens in the vertex stage.
//! The CPU only advances one progress value and publishes two uniforms.

use rand::Rng;
use serde::Deserialize;
use crate::animation::{morph, MorphProgress, DUST_RATE};
use crate::layout::{generate, LayoutParams, ParticleRecord};
use crate::math::{Mat4, Vec3};
use crate::scene::Arrangement;

/// Floats per particle in the attribute buffer:
/// tree_pos(3) + scatter_pos(3) + color(3) + phase(1) + speed(1) + size(1)
pub const DUST_STRIDE: usize = 12;

/// Dust field parameters
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DustSpec {
    pub count: usize,
    pub radius: f32,
    pub height: f32,
    pub angular_jitter: f32,
    /// Sprite base size range, `[min_size, max_size)`
    pub min_size: f32,
    pub max_size: f32,
}

impl Default for DustSpec {
    fn default() -> Self {
        Self {
            count: 14_000,
            radius: 5.2,  // wraps just outside the ornaments
            height: 14.0, // reaches up around the star
            angular_jitter: 0.2,
            min_size: 0.05,
            max_size: 0.45,
        }
    }
}

/// Per-frame inputs of the dust vertex stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DustUniforms {
    pub time: f32,
    pub progress: f32,
}

/// Static dust attributes plus the field's own smoothed progress
#[derive(Debug, Clone)]
pub struct DustField {
    records: Vec<ParticleRecord>,
    sizes: Vec<f32>,
    progress: MorphProgress,
    time: f32,
}

impl DustField {
    pub fn new<R: Rng + ?Sized>(spec: &DustSpec, rate: f32, rng: &mut R) -> Self {
        let params = LayoutParams::new(spec.count, spec.radius, spec.height)
            .with_jitter(spec.angular_jitter);
        let records = generate(&params, rng);
        let sizes = (0..records.len())
            .map(|_| spec.min_size + rng.gen::<f32>() * (spec.max_size - spec.min_size))
            .collect();

        Self {
            records,
            sizes,
            progress: MorphProgress::new(rate),
            time: 0.0,
        }
    }

    /// Advance the smoothed progress. Constant cost regardless of particle count.
    pub fn update(&mut self, arrangement: Arrangement, time: f32, dt: f32) {
        self.progress.advance(arrangement, dt);
        self.time = time;
    }

    pub fn uniforms(&self) -> DustUniforms {
        DustUniforms {
            time: self.time,
            progress: self.progress.value(),
        }
    }

    /// Interleaved attribute buffer, uploaded once
    pub fn attribute_data(&self) -> Vec<f32> {
        let mut data = Vec::with_capacity(self.records.len() * DUST_STRIDE);

        for (record, &size) in self.records.iter().zip(&self.sizes) {
            data.extend_from_slice(&record.tree_position.to_array());
            data.extend_from_slice(&record.scatter_position.to_array());
            data.extend_from_slice(&record.color.to_array());
            data.push(record.animation_phase);
            data.push(record.animation_speed);
            data.push(size);
        }

        data
    }

    /// Model-space position the vertex stage computes for particle `index`
    pub fn particle_position(&self, index: usize) -> Option<Vec3> {
        let record = self.records.get(index)?;
        let uniforms = self.uniforms();
        Some(morph::morph_position(
            record.scatter_position,
            record.tree_position,
            uniforms.progress,
            uniforms.time,
            record.animation_speed,
            record.animation_phase,
        ))
    }

    /// Point size the vertex stage computes for particle `index` under `model_view`
    pub fn particle_point_size(&self, index: usize, model_view: &Mat4) -> Option<f32> {
        let position = self.particle_position(index)?;
        let view_depth = model_view.transform_point(position).z;
        let size = *self.sizes.get(index)?;
        Some(morph::point_size(size, view_depth, self.progress.value()))
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn progress(&self) -> f32 {
        self.progress.value()
    }
}

impl Default for DustField {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            sizes: Vec::new(),
            progress: MorphProgress::new(DUST_RATE),
            time: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn field(count: usize) -> DustField {
        let spec = DustSpec {
            count,
            ..DustSpec::default()
        };
        DustField::new(&spec, DUST_RATE, &mut ChaCha8Rng::seed_from_u64(7))
    }

    #[test]
    fn test_attribute_layout() {
        let field = field(100);
        let data = field.attribute_data();
        assert_eq!(data.len(), 100 * DUST_STRIDE);

        let r = &field.records[3];
        let row = &data[3 * DUST_STRIDE..4 * DUST_STRIDE];
        assert_eq!(&row[0..3], &r.tree_position.to_array());
        assert_eq!(&row[3..6], &r.scatter_position.to_array());
        assert_eq!(&row[6..9], &r.color.to_array());
        assert_eq!(row[9], r.animation_phase);
        assert_eq!(row[10], r.animation_speed);
    }

    #[test]
    fn test_sizes_in_range() {
        let field = field(500);
        assert!(field.sizes.iter().all(|&s| (0.05..=0.45).contains(&s)));
    }

    #[test]
    fn test_uniforms_track_frame() {
        let mut field = field(10);
        field.update(Arrangement::Scattered, 4.0, 0.1);
        let uniforms = field.uniforms();
        assert_eq!(uniforms.time, 4.0);
        assert!((uniforms.progress - 0.85).abs() < 1e-6);
    }

    #[test]
    fn test_lags_behind_ornaments() {
        let mut dust = field(1);
        let mut ornament = MorphProgress::new(crate::animation::ORNAMENT_RATE);
        for _ in 0..20 {
            dust.update(Arrangement::Scattered, 0.0, 1.0 / 60.0);
            ornament.advance(Arrangement::Scattered, 1.0 / 60.0);
        }
        assert!(dust.progress() > ornament.value());
    }

    #[test]
    fn test_particle_position_matches_shared_formula() {
        let mut field = field(20);
        field.update(Arrangement::Scattered, 2.0, 0.2);

        let r = field.records[5].clone();
        let expected = morph::morph_position(
            r.scatter_position,
            r.tree_position,
            field.progress(),
            2.0,
            r.animation_speed,
            r.animation_phase,
        );
        assert_eq!(field.particle_position(5), Some(expected));
        assert_eq!(field.particle_position(20), None);
    }

    #[test]
    fn test_point_size_pops_mid_transition() {
        let mut field = field(5);
        let view = Mat4::translation(0.0, 0.0, -40.0);
        let rest = field.particle_point_size(0, &view).unwrap();

        // dt * rate = 0.5 puts progress at exactly 0.5
        field.update(Arrangement::Scattered, 0.0, 1.0 / 3.0);
        assert!((field.progress() - 0.5).abs() < 1e-5);
        let popped = field.particle_point_size(0, &view).unwrap();

        // Depth changes too, so compare against the formula directly
        let depth = view.transform_point(field.particle_position(0).unwrap()).z;
        let expected = field.sizes[0] * (300.0 / -depth) * 1.5;
        assert!((popped - expected).abs() < 1e-4);
        assert!(rest > 0.0);
    }

    #[test]
    fn test_empty_field() {
        let field = DustField::default();
        assert_eq!(field.count(), 0);
        assert!(field.attribute_data().is_empty());
        assert!(field.particle_position(0).is_none());
    }
}
