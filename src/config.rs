//! Scene configuration
//!
//! Every field has a default, so a YAML document only needs to name the
//! values it changes. An empty document yields the stock scene.

use serde::Deserialize;
use crate::accents::{SnowSpec, StarSpec};
use crate::animation::{DUST_RATE, ORNAMENT_RATE};
use crate::error::EngineResult;
use crate::math::{Rgb, Vec3};
use crate::ornaments::{default_layers, LayerSpec};
use crate::particles::DustSpec;

/// Fixed perspective camera looking at the origin
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraSpec {
    pub position: Vec3,
    /// Vertical field of view
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraSpec {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 25.0),
            fov_degrees: 35.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Linear distance fog towards the background colour
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FogSpec {
    pub near: f32,
    pub far: f32,
}

impl Default for FogSpec {
    fn default() -> Self {
        Self { near: 20.0, far: 50.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Layout seed, host entropy when absent
    pub seed: Option<u64>,
    pub ornament_rate: f32,
    pub dust_rate: f32,
    pub star_rate: f32,
    pub layers: Vec<LayerSpec>,
    pub dust: DustSpec,
    pub snow: SnowSpec,
    pub star: StarSpec,
    /// Vertical offset of the whole formation
    pub scene_offset_y: f32,
    pub camera: CameraSpec,
    pub background: Rgb,
    pub fog: FogSpec,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: None,
            ornament_rate: ORNAMENT_RATE,
            dust_rate: DUST_RATE,
            star_rate: DUST_RATE,
            layers: default_layers(),
            dust: DustSpec::default(),
            snow: SnowSpec::default(),
            star: StarSpec::default(),
            scene_offset_y: -2.0,
            camera: CameraSpec::default(),
            background: Rgb::from_u32(0x1A050A),
            fog: FogSpec::default(),
        }
    }
}

impl SceneConfig {
    /// Parse from YAML
    pub fn from_yaml(yaml: &str) -> EngineResult<Self> {
        // serde_yaml reads an empty document as unit, not as an empty map
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: SceneConfig = serde_yaml::from_str(yaml)?;
        if config.layers.is_empty() {
            log::warn!("scene config has no ornament layers");
        } else {
            log::debug!(
                "scene config: {} layers, {} ornaments",
                config.layers.len(),
                config.ornament_count()
            );
        }
        Ok(config)
    }

    /// Total ornament instances across all layers
    pub fn ornament_count(&self) -> usize {
        self.layers.iter().map(|l| l.count).sum()
    }
}
