//! Procedural layout of ornament and dust particles
//!
//! Every particle gets two homes: a slot on a bottom-heavy conical spiral
//! (the assembled tree) and a point in a spherical cloud around it.

pub mod generator;
pub mod palette;

pub use generator::{generate, LayoutParams, ParticleRecord};
