//! Ornament layer presets
//!
//! Each layer is one generated group drawn with one geometry/material pair.

use serde::Deserialize;
use crate::layout::LayoutParams;
use crate::math::Rgb;
use crate::mesh::{shapes, Mesh};

/// Shared geometry for a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryKind {
    Sphere,
    Box,
    Gem,
    Star,
}

impl GeometryKind {
    pub const ALL: [GeometryKind; 4] = [
        GeometryKind::Sphere,
        GeometryKind::Box,
        GeometryKind::Gem,
        GeometryKind::Star,
    ];

    pub fn build_mesh(self) -> Mesh {
        match self {
            GeometryKind::Sphere => shapes::sphere(0.25, 32, 32),
            GeometryKind::Box => shapes::cuboid(0.4),
            GeometryKind::Gem => shapes::icosahedron(0.3),
            GeometryKind::Star => shapes::star_prism(5, 1.0, 0.4, 0.3),
        }
    }
}

/// Surface treatment shared by a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialKind {
    Metal,
    Satin,
    Crystal,
    Glow,
    Gold,
}

/// Uniform values for the ornament shader
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialParams {
    /// Multiplied with the per-instance colour
    pub tint: Rgb,
    pub roughness: f32,
    pub metalness: f32,
    pub emissive: Rgb,
    pub emissive_intensity: f32,
}

impl MaterialKind {
    pub fn params(self) -> MaterialParams {
        let black = Rgb::new(0.0, 0.0, 0.0);
        match self {
            MaterialKind::Metal => MaterialParams {
                tint: Rgb::WHITE,
                roughness: 0.1,
                metalness: 0.9,
                emissive: black,
                emissive_intensity: 0.0,
            },
            MaterialKind::Satin => MaterialParams {
                tint: Rgb::WHITE,
                roughness: 0.3,
                metalness: 0.4,
                emissive: black,
                emissive_intensity: 0.0,
            },
            MaterialKind::Crystal => MaterialParams {
                tint: Rgb::WHITE,
                roughness: 0.05,
                metalness: 0.9,
                emissive: Rgb::from_u32(0xFFD1DC),
                emissive_intensity: 0.1,
            },
            MaterialKind::Glow => MaterialParams {
                tint: Rgb::from_u32(0xFFD700),
                roughness: 0.5,
                metalness: 0.0,
                emissive: Rgb::from_u32(0xFF6000),
                emissive_intensity: 2.0,
            },
            MaterialKind::Gold => MaterialParams {
                tint: Rgb::from_u32(0xFFD700),
                roughness: 0.1,
                metalness: 1.0,
                emissive: Rgb::from_u32(0xFFD700),
                emissive_intensity: 0.8,
            },
        }
    }
}

/// Description of one ornament layer
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LayerSpec {
    pub name: String,
    pub count: usize,
    pub radius: f32,
    pub height: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    /// Fixed colour, otherwise each instance picks from the palette
    #[serde(default)]
    pub color: Option<Rgb>,
    #[serde(default)]
    pub angular_jitter: f32,
    pub geometry: GeometryKind,
    pub material: MaterialKind,
}

impl LayerSpec {
    #[allow(clippy::too_many_arguments)]
    fn preset(
        name: &str,
        count: usize,
        radius: f32,
        height: f32,
        scale: (f32, f32),
        color: Option<u32>,
        angular_jitter: f32,
        geometry: GeometryKind,
        material: MaterialKind,
    ) -> Self {
        Self {
            name: name.to_string(),
            count,
            radius,
            height,
            min_scale: scale.0,
            max_scale: scale.1,
            color: color.map(Rgb::from_u32),
            angular_jitter,
            geometry,
            material,
        }
    }

    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams::new(self.count, self.radius, self.height)
            .with_scale(self.min_scale, self.max_scale)
            .with_color(self.color)
            .with_jitter(self.angular_jitter)
    }
}

/// The stock ornament set, bottom layer first
pub fn default_layers() -> Vec<LayerSpec> {
    use GeometryKind as G;
    use MaterialKind as M;

    vec![
        LayerSpec::preset("metal-spheres", 300, 4.0, 12.0, (0.2, 0.4), None, 0.0, G::Sphere, M::Metal),
        LayerSpec::preset("white-spheres", 250, 4.5, 12.0, (0.15, 0.3), Some(0xFFFFFF), 0.5, G::Sphere, M::Metal),
        LayerSpec::preset("gold-spheres", 300, 4.3, 11.5, (0.2, 0.35), Some(0xFFD700), 1.0, G::Sphere, M::Metal),
        LayerSpec::preset("glowing-orbs", 50, 3.5, 10.0, (0.5, 0.8), Some(0xFF8C00), 1.5, G::Sphere, M::Glow),
        LayerSpec::preset("gift-boxes", 200, 3.8, 10.5, (0.8, 1.4), None, 0.5, G::Box, M::Satin),
        LayerSpec::preset("giant-boxes", 50, 4.0, 9.0, (1.5, 2.2), None, 2.0, G::Box, M::Satin),
        LayerSpec::preset("deep-pink-boxes", 40, 4.2, 9.5, (1.8, 2.5), Some(0xFF69B4), 3.0, G::Box, M::Satin),
        LayerSpec::preset("gems", 150, 4.2, 11.0, (0.4, 1.0), None, 1.0, G::Gem, M::Crystal),
    ]
}
