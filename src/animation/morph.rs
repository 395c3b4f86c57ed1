//! Shared morph formulas
//!
//! The instanced ornaments evaluate these on the CPU every frame and the
//! dust vertex shader evaluates the same math on the GPU. [`glsl_source`]
//! emits the shader copy from the constants below, so both paths read the
//! same numbers.

use std::f32::consts::PI;
use crate::math::{Euler, Vec3};

/// Float amplitude gained when fully scattered
pub const FLOAT_SCATTER_GAIN: f32 = 2.0;
/// Float amplitude that remains when fully assembled
pub const FLOAT_REST: f32 = 0.1;
/// Vertical bob amplitude per unit of float factor
pub const FLOAT_Y_AMPLITUDE: f32 = 0.2;
/// Horizontal sway amplitude per unit of float factor
pub const FLOAT_X_AMPLITUDE: f32 = 0.1;
/// Horizontal sway frequency relative to the bob
pub const FLOAT_X_FREQUENCY: f32 = 0.5;

/// Scale pop amplitude for instanced ornaments
pub const INSTANCE_POP: f32 = 0.2;
/// Point-size pop amplitude for dust sprites
pub const SPRITE_POP: f32 = 0.5;
/// Point-size attenuation numerator
pub const SIZE_ATTENUATION: f32 = 300.0;

/// Tumble rate around x while scattered
pub const SPIN_X_RATE: f32 = 0.1;
/// Constant spin rate around y
pub const SPIN_Y_RATE: f32 = 0.2;

/// Float amplitude: large when scattered, a small residual when assembled
pub fn float_factor(progress: f32) -> f32 {
    (1.0 - progress) * FLOAT_SCATTER_GAIN + FLOAT_REST
}

/// Floating perturbation added on top of the interpolated position
pub fn float_offset(progress: f32, time: f32, speed: f32, phase: f32) -> Vec3 {
    let factor = float_factor(progress);
    Vec3::new(
        (time * speed * FLOAT_X_FREQUENCY + phase).cos() * factor * FLOAT_X_AMPLITUDE,
        (time * speed + phase).sin() * factor * FLOAT_Y_AMPLITUDE,
        0.0,
    )
}

/// Interpolated position between the two arrangements plus float
pub fn morph_position(
    scatter: Vec3,
    tree: Vec3,
    progress: f32,
    time: f32,
    speed: f32,
    phase: f32,
) -> Vec3 {
    scatter.lerp(&tree, progress) + float_offset(progress, time, speed, phase)
}

/// 1 at both endpoints, `1 + amplitude` halfway through a transition
pub fn scale_pop(progress: f32, amplitude: f32) -> f32 {
    1.0 + (progress * PI).sin() * amplitude
}

/// Base rotation plus continuous spin. The x tumble fades as the tree assembles.
pub fn spin(base: Euler, progress: f32, time: f32) -> Euler {
    Euler::new(
        base.x + time * SPIN_X_RATE * (1.0 - progress),
        base.y + time * SPIN_Y_RATE,
        base.z,
    )
}

/// Screen-space sprite size for a particle at `view_depth` (negative in front of the camera)
pub fn point_size(base_size: f32, view_depth: f32, progress: f32) -> f32 {
    base_size * (SIZE_ATTENUATION / -view_depth) * scale_pop(progress, SPRITE_POP)
}

/// GLSL mirror of the functions above
pub fn glsl_source() -> String {
    format!(
        r#"
const float MORPH_PI = {pi:?};
const float FLOAT_SCATTER_GAIN = {gain:?};
const float FLOAT_REST = {rest:?};
const float FLOAT_Y_AMPLITUDE = {y_amp:?};
const float FLOAT_X_AMPLITUDE = {x_amp:?};
const float FLOAT_X_FREQUENCY = {x_freq:?};
const float SPRITE_POP = {sprite_pop:?};
const float SIZE_ATTENUATION = {attenuation:?};

float float_factor(float progress) {{
    return (1.0 - progress) * FLOAT_SCATTER_GAIN + FLOAT_REST;
}}

vec3 float_offset(float progress, float time, float speed, float phase) {{
    float factor = float_factor(progress);
    return vec3(
        cos(time * speed * FLOAT_X_FREQUENCY + phase) * factor * FLOAT_X_AMPLITUDE,
        sin(time * speed + phase) * factor * FLOAT_Y_AMPLITUDE,
        0.0
    );
}}

vec3 morph_position(vec3 scatter_pos, vec3 tree_pos, float progress, float time, float speed, float phase) {{
    return mix(scatter_pos, tree_pos, progress) + float_offset(progress, time, speed, phase);
}}

float scale_pop(float progress, float amplitude) {{
    return 1.0 + sin(progress * MORPH_PI) * amplitude;
}}
"#,
        pi = PI,
        gain = FLOAT_SCATTER_GAIN,
        rest = FLOAT_REST,
        y_amp = FLOAT_Y_AMPLITUDE,
        x_amp = FLOAT_X_AMPLITUDE,
        x_freq = FLOAT_X_FREQUENCY,
        sprite_pop = SPRITE_POP,
        attenuation = SIZE_ATTENUATION,
    )
}
