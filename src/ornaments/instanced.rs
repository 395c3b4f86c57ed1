//! CPU side of an instanced ornament layer
//!
//! Every frame each instance is re-derived from its record and the layer's
//! smoothed progress, then written into a flat matrix buffer that the
//! render pipeline uploads in one call.

use rand::Rng;
use crate::animation::{morph, MorphProgress, ORNAMENT_RATE};
use crate::layout::{generate, ParticleRecord};
use crate::math::Mat4;
use crate::scene::Arrangement;
use super::layers::{GeometryKind, LayerSpec, MaterialKind};

/// Floats per instance transform
pub const MATRIX_STRIDE: usize = 16;
/// Floats per instance colour
pub const COLOR_STRIDE: usize = 3;

/// One group of rigid instances sharing a geometry/material pair
#[derive(Debug, Clone)]
pub struct OrnamentLayer {
    name: String,
    geometry: GeometryKind,
    material: MaterialKind,
    records: Vec<ParticleRecord>,
    progress: MorphProgress,
    matrices: Vec<f32>,
    colors: Vec<f32>,
}

impl OrnamentLayer {
    /// Build a layer with every instance placed on the assembled tree
    pub fn new(
        name: &str,
        geometry: GeometryKind,
        material: MaterialKind,
        records: Vec<ParticleRecord>,
        rate: f32,
    ) -> Self {
        let mut matrices = Vec::with_capacity(records.len() * MATRIX_STRIDE);
        let mut colors = Vec::with_capacity(records.len() * COLOR_STRIDE);

        for record in &records {
            let m = Mat4::compose(record.tree_position, record.rotation, record.scale);
            matrices.extend_from_slice(m.as_slice());
            colors.extend_from_slice(&record.color.to_array());
        }

        Self {
            name: name.to_string(),
            geometry,
            material,
            records,
            progress: MorphProgress::new(rate),
            matrices,
            colors,
        }
    }

    /// Generate a fresh layer from a preset
    pub fn from_spec<R: Rng + ?Sized>(spec: &LayerSpec, rate: f32, rng: &mut R) -> Self {
        let records = generate(&spec.layout_params(), rng);
        Self::new(&spec.name, spec.geometry, spec.material, records, rate)
    }

    /// Advance progress and rewrite every instance transform.
    ///
    /// `time` is total elapsed time, `dt` the frame delta.
    pub fn update(&mut self, arrangement: Arrangement, time: f32, dt: f32) {
        let progress = self.progress.advance(arrangement, dt);
        let pop = morph::scale_pop(progress, morph::INSTANCE_POP);

        for (record, slot) in self
            .records
            .iter()
            .zip(self.matrices.chunks_exact_mut(MATRIX_STRIDE))
        {
            let position = morph::morph_position(
                record.scatter_position,
                record.tree_position,
                progress,
                time,
                record.animation_speed,
                record.animation_phase,
            );
            let rotation = morph::spin(record.rotation, progress, time);
            let m = Mat4::compose(position, rotation, record.scale * pop);
            slot.copy_from_slice(m.as_slice());
        }
    }

    /// Transform of instance `index` as last written
    pub fn instance_matrix(&self, index: usize) -> Option<Mat4> {
        let start = index * MATRIX_STRIDE;
        let slice = self.matrices.get(start..start + MATRIX_STRIDE)?;
        let mut data = [0.0; MATRIX_STRIDE];
        data.copy_from_slice(slice);
        Some(Mat4 { data })
    }

    /// Instance transforms, 16 floats each, column-major
    pub fn matrix_data(&self) -> &[f32] {
        &self.matrices
    }

    /// Instance colours, 3 floats each
    pub fn color_data(&self) -> &[f32] {
        &self.colors
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn geometry(&self) -> GeometryKind {
        self.geometry
    }

    pub fn material(&self) -> MaterialKind {
        self.material
    }

    pub fn records(&self) -> &[ParticleRecord] {
        &self.records
    }

    pub fn progress(&self) -> f32 {
        self.progress.value()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Generate every layer in order from one random source
pub fn build_layers<R: Rng + ?Sized>(specs: &[LayerSpec], rate: f32, rng: &mut R) -> Vec<OrnamentLayer> {
    specs
        .iter()
        .map(|spec| OrnamentLayer::from_spec(spec, rate, rng))
        .collect()
}

impl Default for OrnamentLayer {
    fn default() -> Self {
        Self::new("empty", GeometryKind::Sphere, MaterialKind::Metal, Vec::new(), ORNAMENT_RATE)
    }
}
