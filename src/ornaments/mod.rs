//! Instanced ornament layers (spheres, gift boxes, gems)

pub mod instanced;
pub mod layers;

pub use instanced::{build_layers, OrnamentLayer, COLOR_STRIDE, MATRIX_STRIDE};
pub use layers::{default_layers, GeometryKind, LayerSpec, MaterialKind, MaterialParams};
