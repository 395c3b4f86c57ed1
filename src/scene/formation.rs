use rand::Rng;
use crate::accents::{SnowField, TopStar};
use crate::config::SceneConfig;
use crate::ornaments::{build_layers, OrnamentLayer};
use crate::particles::DustField;
use super::state::{Arrangement, SceneState};

/// Every animated group in the scene plus the arrangement they follow
///
/// Owns no GPU state, so it runs natively in tests.
#[derive(Debug, Clone)]
pub struct Formation {
    state: SceneState,
    layers: Vec<OrnamentLayer>,
    star: TopStar,
    dust: DustField,
    snow: SnowField,
    /// Seconds since start, kept wide so long sessions keep sub-frame steps
    time: f64,
}

impl Formation {
    /// Generate all groups from `rng`, in a fixed order: ornament layers,
    /// then dust, then snow.
    pub fn new<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Self {
        let layers = build_layers(&config.layers, config.ornament_rate, rng);
        let dust = DustField::new(&config.dust, config.dust_rate, rng);
        let snow = SnowField::new(&config.snow, rng);
        let star = TopStar::new(&config.star, config.star_rate);

        Self {
            state: SceneState::new(),
            layers,
            star,
            dust,
            snow,
            time: 0.0,
        }
    }

    /// Advance every animator by one frame
    pub fn update(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.time += f64::from(dt);
        let time = self.time as f32;
        let arrangement = self.state.arrangement();

        for layer in &mut self.layers {
            layer.update(arrangement, time, dt);
        }
        self.star.update(arrangement, time, dt);
        self.dust.update(arrangement, time, dt);
        self.snow.update(time, dt);
    }

    pub fn toggle(&mut self) -> Arrangement {
        self.state.toggle()
    }

    pub fn arrangement(&self) -> Arrangement {
        self.state.arrangement()
    }

    pub fn is_assembled(&self) -> bool {
        self.state.is_assembled()
    }

    pub fn layers(&self) -> &[OrnamentLayer] {
        &self.layers
    }

    pub fn star(&self) -> &TopStar {
        &self.star
    }

    pub fn dust(&self) -> &DustField {
        &self.dust
    }

    pub fn snow(&self) -> &SnowField {
        &self.snow
    }

    pub fn time(&self) -> f64 {
        self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accents::SnowSpec;
    use crate::particles::DustSpec;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn small_config() -> SceneConfig {
        SceneConfig {
            dust: DustSpec {
                count: 200,
                ..DustSpec::default()
            },
            snow: SnowSpec {
                count: 20,
                ..SnowSpec::default()
            },
            ..SceneConfig::default()
        }
    }

    fn formation() -> Formation {
        Formation::new(&small_config(), &mut ChaCha8Rng::seed_from_u64(2024))
    }

    #[test]
    fn test_starts_assembled() {
        let f = formation();
        assert!(f.is_assembled());
        assert_eq!(f.arrangement().as_str(), "TREE");
        assert_eq!(f.layers().len(), 8);
        assert_eq!(f.dust().count(), 200);
        assert_eq!(f.snow().count(), 20);
        assert!(f.layers().iter().all(|l| l.progress() == 1.0));
    }

    #[test]
    fn test_toggle_drives_every_animator() {
        let mut f = formation();
        assert_eq!(f.toggle(), Arrangement::Scattered);
        f.update(0.1);

        // Different rates, same direction
        let ornament = f.layers()[0].progress();
        assert!((ornament - 0.8).abs() < 1e-5);
        assert!((f.dust().progress() - 0.85).abs() < 1e-5);
        assert!((f.star().progress() - 0.85).abs() < 1e-5);
    }

    #[test]
    fn test_reversal_mid_flight() {
        let mut f = formation();
        f.toggle();
        for _ in 0..30 {
            f.update(1.0 / 60.0);
        }
        let low = f.layers()[0].progress();
        assert!(low < 1.0);

        f.toggle();
        f.update(1.0 / 60.0);
        assert!(f.layers()[0].progress() > low);
    }

    #[test]
    fn test_double_toggle_restores_state() {
        let mut f = formation();
        f.toggle();
        f.toggle();
        assert!(f.is_assembled());
    }

    #[test]
    fn test_time_accumulates_and_ignores_negative_dt() {
        let mut f = formation();
        f.update(0.5);
        f.update(-1.0);
        f.update(0.25);
        assert!((f.time() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_clock_resolves_frames_after_a_day() {
        let mut f = formation();
        f.update(86_400.0);
        let before = f.time();
        f.update(0.001);
        assert!((f.time() - before - 0.001).abs() < 1e-6);
    }

    #[test]
    fn test_same_seed_same_scene() {
        let a = formation();
        let b = formation();
        for (x, y) in a.layers().iter().zip(b.layers()) {
            assert_eq!(x.records(), y.records());
        }
        assert_eq!(a.dust().attribute_data(), b.dust().attribute_data());
        assert_eq!(a.snow().particle_data(), b.snow().particle_data());
    }

    #[test]
    fn test_empty_layer_config() {
        let config = SceneConfig {
            layers: Vec::new(),
            ..small_config()
        };
        let mut f = Formation::new(&config, &mut ChaCha8Rng::seed_from_u64(1));
        f.update(0.016);
        assert!(f.layers().is_empty());
    }
}
