//! Arrangement transitions
//!
//! [`MorphProgress`] smooths each animator toward its arrangement target and
//! [`morph`] holds the per-particle formulas shared with the dust shader.

pub mod morph;
mod progress;

pub use progress::{MorphProgress, DUST_RATE, ORNAMENT_RATE};
