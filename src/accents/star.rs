use serde::Deserialize;
use crate::animation::MorphProgress;
use crate::math::{Euler, Mat4, Vec3};
use crate::scene::Arrangement;

/// Star placement for both arrangements
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StarSpec {
    /// Tucked inside the scattered cloud, scale 0
    pub hidden: Vec3,
    /// Crowning the assembled tree
    pub displayed: Vec3,
    pub displayed_scale: f32,
    /// Radians per second around y
    pub spin_speed: f32,
}

impl Default for StarSpec {
    fn default() -> Self {
        Self {
            hidden: Vec3::new(0.0, 2.0, 0.0),
            displayed: Vec3::new(0.0, 6.5, 0.0),
            displayed_scale: 0.8,
            spin_speed: 0.8,
        }
    }
}

/// The emblem on top of the tree
///
/// Grows in and rises as the tree assembles, shrinks to nothing when it
/// scatters, and always spins slowly.
#[derive(Debug, Clone)]
pub struct TopStar {
    spec: StarSpec,
    progress: MorphProgress,
    time: f32,
}

impl TopStar {
    pub fn new(spec: &StarSpec, rate: f32) -> Self {
        Self {
            spec: spec.clone(),
            progress: MorphProgress::new(rate),
            time: 0.0,
        }
    }

    pub fn update(&mut self, arrangement: Arrangement, time: f32, dt: f32) {
        self.progress.advance(arrangement, dt);
        self.time = time;
    }

    pub fn position(&self) -> Vec3 {
        self.spec.hidden.lerp(&self.spec.displayed, self.progress.value())
    }

    pub fn scale(&self) -> f32 {
        self.spec.displayed_scale * self.progress.value()
    }

    pub fn rotation(&self) -> Euler {
        Euler::new(0.0, self.time * self.spec.spin_speed, 0.0)
    }

    /// Current model transform
    pub fn transform(&self) -> Mat4 {
        Mat4::compose(self.position(), self.rotation(), self.scale())
    }

    pub fn progress(&self) -> f32 {
        self.progress.value()
    }

    /// Scale 0 draws nothing visible
    pub fn is_visible(&self) -> bool {
        self.scale() > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star() -> TopStar {
        TopStar::new(&StarSpec::default(), 1.5)
    }

    #[test]
    fn test_starts_displayed() {
        let star = star();
        assert_eq!(star.position(), Vec3::new(0.0, 6.5, 0.0));
        assert!((star.scale() - 0.8).abs() < 1e-6);
        assert!(star.is_visible());
    }

    #[test]
    fn test_hides_when_scattered() {
        let mut star = star();
        let dt = 1.0 / 60.0;
        for i in 0..900 {
            star.update(Arrangement::Scattered, i as f32 * dt, dt);
        }
        assert!((star.position().y - 2.0).abs() < 1e-3);
        assert!(star.scale() < 1e-3);
    }

    #[test]
    fn test_halfway() {
        let mut star = star();
        // dt * rate = 0.5
        star.update(Arrangement::Scattered, 0.0, 1.0 / 3.0);
        assert!((star.position().y - 4.25).abs() < 1e-4);
        assert!((star.scale() - 0.4).abs() < 1e-4);
    }

    #[test]
    fn test_spins_with_time() {
        let mut star = star();
        star.update(Arrangement::Tree, 2.0, 0.016);
        assert!((star.rotation().y - 1.6).abs() < 1e-6);

        let m = star.transform();
        assert_eq!(m.position(), Vec3::new(0.0, 6.5, 0.0));
        assert!((m.uniform_scale() - 0.8).abs() < 1e-5);
    }
}
