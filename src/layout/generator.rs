use std::f32::consts::{PI, TAU};
use rand::Rng;
use crate::math::{Euler, Rgb, Vec3};
use super::palette;

/// Full turns of the spiral from base to apex
pub const SPIRAL_TURNS: f32 = 25.0;
/// Exponent of the bottom-heavy height warp
pub const HEIGHT_WARP: f32 = 1.2;
/// Maximum outward surface noise at the base of the cone
pub const SURFACE_NOISE: f32 = 0.3;
/// Radius band of the scattered cloud, `[min, min + span)`
pub const SCATTER_RADIUS_MIN: f32 = 15.0;
pub const SCATTER_RADIUS_SPAN: f32 = 10.0;

/// Parameters for one generated group
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutParams {
    /// Number of records to generate
    pub count: usize,
    /// Cone radius at the base
    pub base_radius: f32,
    /// Total cone height, centred on y = 0
    pub height: f32,
    /// Lower bound of the per-instance scale
    pub min_scale: f32,
    /// Upper bound (exclusive) of the per-instance scale
    pub max_scale: f32,
    /// Fixed colour for every record, otherwise picked from the palette
    pub color: Option<Rgb>,
    /// 0 = perfect spiral, larger values randomise the azimuth
    pub angular_jitter: f32,
}

impl LayoutParams {
    pub fn new(count: usize, base_radius: f32, height: f32) -> Self {
        Self {
            count,
            base_radius,
            height,
            min_scale: 0.5,
            max_scale: 1.5,
            color: None,
            angular_jitter: 0.0,
        }
    }

    pub fn with_scale(mut self, min_scale: f32, max_scale: f32) -> Self {
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self
    }

    pub fn with_color(mut self, color: Option<Rgb>) -> Self {
        self.color = color;
        self
    }

    pub fn with_jitter(mut self, angular_jitter: f32) -> Self {
        self.angular_jitter = angular_jitter;
        self
    }
}

/// One generated instance. Immutable once its group is built.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleRecord {
    /// Dense index into the group's arrays, starting at 0
    pub id: usize,
    pub tree_position: Vec3,
    pub scatter_position: Vec3,
    /// Base orientation; render-time spin is added on top
    pub rotation: Euler,
    pub scale: f32,
    pub color: Rgb,
    /// Oscillation frequency multiplier
    pub animation_speed: f32,
    /// Oscillation offset in [0, 2π)
    pub animation_phase: f32,
}

/// Warped height parameter for index `i` of `count`
pub fn spiral_parameter(i: usize, count: usize) -> f32 {
    if count == 0 {
        return 0.0;
    }
    (i as f32 / count as f32).powf(HEIGHT_WARP)
}

/// Azimuth of the unjittered spiral at parameter `t`
pub fn spiral_angle(t: f32) -> f32 {
    t * TAU * SPIRAL_TURNS
}

/// Cone position for warped parameter `t`.
///
/// `jitter_sample` and `noise_sample` are uniform draws in [0, 1).
pub fn tree_position(
    t: f32,
    base_radius: f32,
    height: f32,
    angular_jitter: f32,
    jitter_sample: f32,
    noise_sample: f32,
) -> Vec3 {
    let y = -height / 2.0 + t * height;
    let radius = (1.0 - t) * base_radius;

    let jitter = (jitter_sample - 0.5) * TAU * angular_jitter;
    let angle = spiral_angle(t) + jitter;

    let effective_radius = radius + noise_sample * SURFACE_NOISE * (1.0 - t);
    Vec3::new(angle.cos() * effective_radius, y, angle.sin() * effective_radius)
}

/// Uniform direction on the sphere, radius in the scatter band
fn scatter_position<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let theta = rng.gen::<f32>() * TAU;
    let phi = (rng.gen::<f32>() * 2.0 - 1.0).acos();
    let radius = SCATTER_RADIUS_MIN + rng.gen::<f32>() * SCATTER_RADIUS_SPAN;
    Vec3::from_spherical(radius, theta, phi)
}

/// Generate `params.count` records in id order.
///
/// Every record consumes the same number of draws whether or not a fixed
/// colour is set, so a seed reproduces the same geometry across colour changes.
pub fn generate<R: Rng + ?Sized>(params: &LayoutParams, rng: &mut R) -> Vec<ParticleRecord> {
    let mut records = Vec::with_capacity(params.count);

    for id in 0..params.count {
        let t = spiral_parameter(id, params.count);
        let jitter_sample = rng.gen::<f32>();
        let noise_sample = rng.gen::<f32>();
        let tree_position = tree_position(
            t,
            params.base_radius,
            params.height,
            params.angular_jitter,
            jitter_sample,
            noise_sample,
        );

        let scatter_position = scatter_position(rng);

        let rotation = Euler::new(
            rng.gen::<f32>() * PI,
            rng.gen::<f32>() * PI,
            rng.gen::<f32>() * PI,
        );
        let scale = params.min_scale + rng.gen::<f32>() * (params.max_scale - params.min_scale);
        let picked = palette::pick(rng);
        let color = params.color.unwrap_or(picked);

        records.push(ParticleRecord {
            id,
            tree_position,
            scatter_position,
            rotation,
            scale,
            color,
            animation_speed: 0.2 + rng.gen::<f32>() * 0.8,
            animation_phase: rng.gen::<f32>() * TAU,
        });
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    #[test]
    fn test_count_and_dense_ids() {
        for count in [0usize, 1, 2, 17, 300] {
            let records = generate(&LayoutParams::new(count, 4.0, 12.0), &mut rng(1));
            assert_eq!(records.len(), count);
            for (i, r) in records.iter().enumerate() {
                assert_eq!(r.id, i);
            }
        }
    }

    #[test]
    fn test_zero_count_is_empty() {
        let records = generate(&LayoutParams::new(0, 4.0, 12.0), &mut rng(5));
        assert!(records.is_empty());
    }

    #[test]
    fn test_height_is_monotonic() {
        let params = LayoutParams::new(500, 5.2, 14.0);
        let records = generate(&params, &mut rng(2));
        for pair in records.windows(2) {
            assert!(pair[1].tree_position.y >= pair[0].tree_position.y);
        }
        assert_eq!(records[0].tree_position.y, -7.0);
        assert!(records[499].tree_position.y < 7.0);
    }

    #[test]
    fn test_warp_is_bottom_heavy() {
        let records = generate(&LayoutParams::new(1000, 4.0, 10.0), &mut rng(4));
        let below_middle = records.iter().filter(|r| r.tree_position.y < 0.0).count();
        // (0.5)^(1/1.2) ≈ 0.561 of the indices sit below the midline
        assert!(below_middle > 540, "only {} below middle", below_middle);
    }

    #[test]
    fn test_unjittered_angle_follows_spiral() {
        let count = 400;
        let records = generate(&LayoutParams::new(count, 4.0, 12.0), &mut rng(6));

        let mut previous = f32::NEG_INFINITY;
        for r in &records[..count - 1] {
            let expected = spiral_angle(spiral_parameter(r.id, count));
            let actual = r.tree_position.z.atan2(r.tree_position.x);
            let diff = (actual - expected).rem_euclid(TAU);
            let wrapped = diff.min(TAU - diff);
            assert!(wrapped < 1e-2, "id {} off spiral by {}", r.id, wrapped);

            assert!(expected > previous);
            previous = expected;
        }
    }

    #[test]
    fn test_jitter_breaks_spiral() {
        let count = 200;
        let records = generate(&LayoutParams::new(count, 4.0, 12.0).with_jitter(1.0), &mut rng(8));
        let off_spiral = records
            .iter()
            .filter(|r| {
                let expected = spiral_angle(spiral_parameter(r.id, count));
                let actual = r.tree_position.z.atan2(r.tree_position.x);
                let diff = (actual - expected).rem_euclid(TAU);
                diff.min(TAU - diff) > 0.1
            })
            .count();
        assert!(off_spiral > count / 2);
    }

    #[test]
    fn test_scatter_radius_band() {
        for count in [1usize, 50, 2000] {
            let records = generate(&LayoutParams::new(count, 4.0, 12.0), &mut rng(count as u64));
            for r in &records {
                let len = r.scatter_position.length();
                assert!(len >= SCATTER_RADIUS_MIN - 1e-3, "radius {}", len);
                assert!(len < SCATTER_RADIUS_MIN + SCATTER_RADIUS_SPAN, "radius {}", len);
            }
        }
    }

    #[test]
    fn test_scale_range() {
        let params = LayoutParams::new(1000, 4.0, 12.0).with_scale(0.2, 0.4);
        for r in generate(&params, &mut rng(9)) {
            assert!(r.scale >= 0.2 && r.scale < 0.4, "scale {}", r.scale);
        }
    }

    #[test]
    fn test_attribute_ranges() {
        for r in generate(&LayoutParams::new(500, 4.0, 12.0), &mut rng(10)) {
            assert!(r.animation_speed >= 0.2 && r.animation_speed <= 1.0);
            assert!(r.animation_phase >= 0.0 && r.animation_phase < TAU);
            for angle in [r.rotation.x, r.rotation.y, r.rotation.z] {
                assert!((0.0..=PI).contains(&angle));
            }
            for channel in r.color.to_array() {
                assert!((0.0..=1.0).contains(&channel));
            }
        }
    }

    #[test]
    fn test_fixed_color_overrides_palette() {
        let gold = Rgb::from_u32(0xFFD700);
        let params = LayoutParams::new(100, 4.3, 11.5).with_color(Some(gold));
        assert!(generate(&params, &mut rng(12)).iter().all(|r| r.color == gold));
    }

    #[test]
    fn test_single_record_sits_at_base() {
        let params = LayoutParams::new(1, 10.0, 20.0).with_scale(1.0, 1.0);
        let records = generate(&params, &mut rng(13));
        let r = &records[0];

        assert_eq!(r.tree_position.y, -10.0);
        assert!(r.tree_position.x >= 10.0 && r.tree_position.x <= 10.0 + SURFACE_NOISE);
        assert!(r.tree_position.z.abs() < 1e-6);
        assert_eq!(r.scale, 1.0);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let params = LayoutParams::new(64, 3.5, 10.0).with_jitter(1.5);
        assert_eq!(generate(&params, &mut rng(42)), generate(&params, &mut rng(42)));
    }

    #[test]
    fn test_surface_noise_vanishes_at_apex() {
        let p = tree_position(1.0, 4.0, 12.0, 0.0, 0.5, 0.999);
        assert!(p.x.abs() < 1e-5 && p.z.abs() < 1e-5);
        assert_eq!(p.y, 6.0);
    }
}
