use crate::animation::morph;

/// Attribute slots shared between the shaders and the pipeline
pub mod location {
    pub const POSITION: u32 = 0;
    pub const NORMAL: u32 = 1;
    /// First of four consecutive column slots
    pub const INSTANCE_MATRIX: u32 = 2;
    pub const INSTANCE_COLOR: u32 = 6;

    pub const TREE_POS: u32 = 0;
    pub const SCATTER_POS: u32 = 1;
    pub const COLOR: u32 = 2;
    pub const PHASE: u32 = 3;
    pub const SPEED: u32 = 4;
    pub const SIZE: u32 = 5;
}

/// Vertex shader for instanced ornaments
pub const ORNAMENT_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;
layout(location = 2) in mat4 a_instance;
layout(location = 6) in vec3 a_instance_color;

uniform mat4 u_model;
uniform mat4 u_view;
uniform mat4 u_projection;

out vec3 v_world_position;
out vec3 v_normal;
out vec3 v_color;
out float v_fog_depth;

void main() {
    mat4 model = u_model * a_instance;
    vec4 world_pos = model * vec4(a_position, 1.0);
    vec4 view_pos = u_view * world_pos;

    // Instances only carry uniform scale
    v_normal = mat3(model) * a_normal;
    v_world_position = world_pos.xyz;
    v_color = a_instance_color;
    v_fog_depth = -view_pos.z;

    gl_Position = u_projection * view_pos;
}
"#;

/// Fragment shader for ornaments: warm key, pink fill, soft ambient
pub const ORNAMENT_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec3 v_world_position;
in vec3 v_normal;
in vec3 v_color;
in float v_fog_depth;

uniform vec3 u_camera_pos;
uniform vec3 u_tint;
uniform float u_roughness;
uniform float u_metalness;
uniform vec3 u_emissive;
uniform float u_emissive_intensity;
uniform vec3 u_fog_color;
uniform float u_fog_near;
uniform float u_fog_far;

out vec4 fragColor;

const vec3 AMBIENT = vec3(1.0, 0.82, 0.86) * 0.6;
const vec3 KEY_DIR = vec3(0.667, 0.667, 0.333);
const vec3 KEY_COLOR = vec3(1.0, 0.84, 0.0) * 2.5;
const vec3 FILL_DIR = vec3(-0.436, 0.873, -0.218);
const vec3 FILL_COLOR = vec3(1.0, 0.41, 0.71) * 1.5;

vec3 light(vec3 dir, vec3 color, vec3 normal, vec3 view_dir, vec3 albedo, vec3 specular, float shininess) {
    float ndotl = max(dot(normal, dir), 0.0);
    vec3 half_dir = normalize(dir + view_dir);
    float spec = pow(max(dot(normal, half_dir), 0.0), shininess) * ndotl;
    return color * (albedo * ndotl * (1.0 - u_metalness) + specular * spec);
}

void main() {
    vec3 normal = normalize(v_normal);
    vec3 view_dir = normalize(u_camera_pos - v_world_position);

    vec3 albedo = v_color * u_tint;
    vec3 specular = mix(vec3(0.04), albedo, u_metalness);
    float shininess = mix(256.0, 8.0, u_roughness);

    // Cheap stand-in for a reflected environment: bright above, dim below
    vec3 reflected = reflect(-view_dir, normal);
    vec3 environment = mix(vec3(0.15, 0.1, 0.12), vec3(0.9, 0.85, 0.8), reflected.y * 0.5 + 0.5);
    vec3 env_term = environment * specular * (1.0 - u_roughness * 0.7);

    vec3 color = AMBIENT * albedo * (1.0 - u_metalness * 0.5);
    color += light(KEY_DIR, KEY_COLOR, normal, view_dir, albedo, specular, shininess);
    color += light(FILL_DIR, FILL_COLOR, normal, view_dir, albedo, specular, shininess);
    color += env_term;
    color += u_emissive * u_emissive_intensity;

    float fog = smoothstep(u_fog_near, u_fog_far, v_fog_depth);
    color = mix(color, u_fog_color, fog);

    fragColor = vec4(color, 1.0);
}
"#;

/// Vertex shader for the dust field. The morph itself is spliced in from
/// the shared formulas so the GPU and CPU paths use the same constants.
pub fn dust_vertex_shader() -> String {
    format!(
        r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_tree_pos;
layout(location = 1) in vec3 a_scatter_pos;
layout(location = 2) in vec3 a_color;
layout(location = 3) in float a_phase;
layout(location = 4) in float a_speed;
layout(location = 5) in float a_size;

uniform mat4 u_model;
uniform mat4 u_view;
uniform mat4 u_projection;
uniform float u_time;
uniform float u_progress;

out vec3 v_color;
{morph}
void main() {{
    vec3 position = morph_position(a_scatter_pos, a_tree_pos, u_progress, u_time, a_speed, a_phase);
    vec4 view_pos = u_view * u_model * vec4(position, 1.0);

    v_color = a_color;
    gl_Position = u_projection * view_pos;
    gl_PointSize = a_size * (SIZE_ATTENUATION / -view_pos.z) * scale_pop(u_progress, SPRITE_POP);
}}
"#,
        morph = morph::glsl_source(),
    )
}

/// Fragment shader for dust: soft round sprite with linear falloff
pub const DUST_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec3 v_color;

out vec4 fragColor;

void main() {
    vec2 coord = gl_PointCoord - vec2(0.5);
    float dist = length(coord);

    if (dist > 0.5) {
        discard;
    }

    float alpha = (0.5 - dist) * 2.0;
    fragColor = vec4(v_color, alpha);
}
"#;

/// Vertex shader for snow flakes
pub const SNOW_VERTEX_SHADER: &str = r#"#version 300 es
precision highp float;

layout(location = 0) in vec3 a_position;

uniform mat4 u_view;
uniform mat4 u_projection;
uniform float u_size;
uniform float u_point_scale;

void main() {
    vec4 view_pos = u_view * vec4(a_position, 1.0);
    gl_Position = u_projection * view_pos;
    gl_PointSize = u_size * (u_point_scale / -view_pos.z);
}
"#;

/// Fragment shader for snow flakes
pub const SNOW_FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

uniform float u_opacity;

out vec4 fragColor;

void main() {
    if (length(gl_PointCoord - vec2(0.5)) > 0.5) {
        discard;
    }
    fragColor = vec4(1.0, 1.0, 1.0, u_opacity);
}
"#;
