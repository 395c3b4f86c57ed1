//! Per-animator smoothed morph progress

use crate::scene::Arrangement;

/// Rate constant for instanced ornament layers
pub const ORNAMENT_RATE: f32 = 2.0;
/// Rate constant for the dust field and the top star
pub const DUST_RATE: f32 = 1.5;

/// Blend weight toward the tree arrangement (1 = assembled, 0 = scattered).
///
/// Each animator owns one of these; they are never shared, so layers with
/// different rates drift apart visually during a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphProgress {
    value: f32,
    rate: f32,
}

impl MorphProgress {
    /// Starts assembled, matching the initial arrangement
    pub fn new(rate: f32) -> Self {
        Self { value: 1.0, rate }
    }

    pub fn with_value(mut self, value: f32) -> Self {
        self.value = value.clamp(0.0, 1.0);
        self
    }

    /// Exponential approach toward the arrangement's target.
    ///
    /// The step weight `dt * rate` is clamped to [0, 1] so a long frame lands
    /// on the target instead of overshooting it.
    pub fn advance(&mut self, arrangement: Arrangement, dt: f32) -> f32 {
        let target = arrangement.target();
        let weight = (dt * self.rate).clamp(0.0, 1.0);
        self.value = (self.value + (target - self.value) * weight).clamp(0.0, 1.0);
        self.value
    }

    pub fn value(&self) -> f32 {
        self.value
    }
}
