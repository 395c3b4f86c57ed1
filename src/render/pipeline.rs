use std::collections::HashMap;
use web_sys::{
    WebGl2RenderingContext, WebGlBuffer, WebGlProgram, WebGlUniformLocation,
    WebGlVertexArrayObject,
};
use crate::accents::{SnowField, TopStar, SNOW_STRIDE};
use crate::config::{CameraSpec, FogSpec, SceneConfig};
use crate::error::EngineResult;
use crate::math::{Mat4, Rgb, Vec3};
use crate::mesh::VERTEX_STRIDE;
use crate::ornaments::{GeometryKind, MaterialKind, OrnamentLayer, COLOR_STRIDE};
use crate::particles::{DustField, DustUniforms, DUST_STRIDE};
use super::webgl::WebGLContext;
use super::shaders::{self, location};

/// Cached uniform locations for the ornament shader
struct OrnamentUniforms {
    model: Option<WebGlUniformLocation>,
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    camera_pos: Option<WebGlUniformLocation>,
    tint: Option<WebGlUniformLocation>,
    roughness: Option<WebGlUniformLocation>,
    metalness: Option<WebGlUniformLocation>,
    emissive: Option<WebGlUniformLocation>,
    emissive_intensity: Option<WebGlUniformLocation>,
    fog_color: Option<WebGlUniformLocation>,
    fog_near: Option<WebGlUniformLocation>,
    fog_far: Option<WebGlUniformLocation>,
}

/// Cached uniform locations for the dust shader
struct DustLocations {
    model: Option<WebGlUniformLocation>,
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    time: Option<WebGlUniformLocation>,
    progress: Option<WebGlUniformLocation>,
}

/// Cached uniform locations for the snow shader
struct SnowUniforms {
    view: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    size: Option<WebGlUniformLocation>,
    point_scale: Option<WebGlUniformLocation>,
    opacity: Option<WebGlUniformLocation>,
}

/// Mesh shared by every batch drawing the same geometry
struct GeometryBuffers {
    vertex_buffer: WebGlBuffer,
    index_buffer: WebGlBuffer,
    index_count: i32,
}

/// GPU side of one instanced layer
struct InstanceBatch {
    vao: WebGlVertexArrayObject,
    matrix_buffer: WebGlBuffer,
    geometry: GeometryKind,
    material: MaterialKind,
    count: i32,
}

/// A point cloud drawn with `POINTS`
struct PointBatch {
    vao: WebGlVertexArrayObject,
    buffer: WebGlBuffer,
    count: i32,
}

/// Complete render pipeline for the ornament scene
pub struct RenderPipeline {
    ctx: WebGLContext,

    // Shaders
    ornament_program: WebGlProgram,
    dust_program: WebGlProgram,
    snow_program: WebGlProgram,

    // Uniform locations
    ornament_uniforms: OrnamentUniforms,
    dust_locations: DustLocations,
    snow_uniforms: SnowUniforms,

    geometries: HashMap<GeometryKind, GeometryBuffers>,

    // Scene batches, `None` where nothing was uploaded
    layers: Vec<Option<InstanceBatch>>,
    star: Option<InstanceBatch>,
    dust: Option<PointBatch>,
    dust_uniforms: DustUniforms,
    snow: Option<PointBatch>,
    snow_size: f32,
    snow_opacity: f32,

    // Dimensions
    width: i32,
    height: i32,

    // Fixed camera and atmosphere
    camera: CameraSpec,
    background: Rgb,
    fog: FogSpec,
    /// Transform of the morphing formation (ornaments, star, dust)
    scene_model: Mat4,
}

impl RenderPipeline {
    pub fn new(gl: WebGl2RenderingContext, width: i32, height: i32, config: &SceneConfig) -> EngineResult<Self> {
        let ctx = WebGLContext::new(gl);

        // Compile shaders
        let ornament_program = ctx.create_program(shaders::ORNAMENT_VERTEX_SHADER, shaders::ORNAMENT_FRAGMENT_SHADER)?;
        let dust_program = ctx.create_program(&shaders::dust_vertex_shader(), shaders::DUST_FRAGMENT_SHADER)?;
        let snow_program = ctx.create_program(shaders::SNOW_VERTEX_SHADER, shaders::SNOW_FRAGMENT_SHADER)?;

        // Get uniform locations
        let ornament_uniforms = OrnamentUniforms {
            model: ctx.get_uniform_location(&ornament_program, "u_model"),
            view: ctx.get_uniform_location(&ornament_program, "u_view"),
            projection: ctx.get_uniform_location(&ornament_program, "u_projection"),
            camera_pos: ctx.get_uniform_location(&ornament_program, "u_camera_pos"),
            tint: ctx.get_uniform_location(&ornament_program, "u_tint"),
            roughness: ctx.get_uniform_location(&ornament_program, "u_roughness"),
            metalness: ctx.get_uniform_location(&ornament_program, "u_metalness"),
            emissive: ctx.get_uniform_location(&ornament_program, "u_emissive"),
            emissive_intensity: ctx.get_uniform_location(&ornament_program, "u_emissive_intensity"),
            fog_color: ctx.get_uniform_location(&ornament_program, "u_fog_color"),
            fog_near: ctx.get_uniform_location(&ornament_program, "u_fog_near"),
            fog_far: ctx.get_uniform_location(&ornament_program, "u_fog_far"),
        };

        let dust_locations = DustLocations {
            model: ctx.get_uniform_location(&dust_program, "u_model"),
            view: ctx.get_uniform_location(&dust_program, "u_view"),
            projection: ctx.get_uniform_location(&dust_program, "u_projection"),
            time: ctx.get_uniform_location(&dust_program, "u_time"),
            progress: ctx.get_uniform_location(&dust_program, "u_progress"),
        };

        let snow_uniforms = SnowUniforms {
            view: ctx.get_uniform_location(&snow_program, "u_view"),
            projection: ctx.get_uniform_location(&snow_program, "u_projection"),
            size: ctx.get_uniform_location(&snow_program, "u_size"),
            point_scale: ctx.get_uniform_location(&snow_program, "u_point_scale"),
            opacity: ctx.get_uniform_location(&snow_program, "u_opacity"),
        };

        Ok(Self {
            ctx,
            ornament_program,
            dust_program,
            snow_program,
            ornament_uniforms,
            dust_locations,
            snow_uniforms,
            geometries: HashMap::new(),
            layers: Vec::new(),
            star: None,
            dust: None,
            dust_uniforms: DustUniforms { time: 0.0, progress: 1.0 },
            snow: None,
            snow_size: config.snow.size,
            snow_opacity: config.snow.opacity,
            width,
            height,
            camera: config.camera.clone(),
            background: config.background,
            fog: config.fog.clone(),
            scene_model: Mat4::translation(0.0, config.scene_offset_y, 0.0),
        })
    }

    /// Upload a geometry once and share it between batches
    fn ensure_geometry(&mut self, kind: GeometryKind) -> EngineResult<()> {
        if self.geometries.contains_key(&kind) {
            return Ok(());
        }

        let mesh = kind.build_mesh();
        let vertex_buffer = self.ctx.create_buffer_f32(&mesh.vertex_data(), WebGl2RenderingContext::STATIC_DRAW)?;
        let index_buffer = self.ctx.create_index_buffer(mesh.index_data(), WebGl2RenderingContext::STATIC_DRAW)?;
        // Keep the element binding out of whatever VAO is bound next
        self.ctx.gl.bind_buffer(WebGl2RenderingContext::ELEMENT_ARRAY_BUFFER, None);

        self.geometries.insert(kind, GeometryBuffers {
            vertex_buffer,
            index_buffer,
            index_count: mesh.index_data().len() as i32,
        });
        Ok(())
    }

    fn create_instance_batch(
        &mut self,
        geometry: GeometryKind,
        material: MaterialKind,
        matrices: &[f32],
        colors: &[f32],
    ) -> EngineResult<InstanceBatch> {
        self.ensure_geometry(geometry)?;
        let ctx = &self.ctx;
        let gl = &ctx.gl;

        let matrix_buffer = ctx.create_buffer_f32(matrices, WebGl2RenderingContext::DYNAMIC_DRAW)?;
        let color_buffer = ctx.create_buffer_f32(colors, WebGl2RenderingContext::STATIC_DRAW)?;

        let vao = ctx.create_vao()?;
        gl.bind_vertex_array(Some(&vao));

        if let Some(mesh) = self.geometries.get(&geometry) {
            gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(&mesh.vertex_buffer));
            gl.bind_buffer(WebGl2RenderingContext::ELEMENT_ARRAY_BUFFER, Some(&mesh.index_buffer));
            ctx.float_attribute(location::POSITION, 3, VERTEX_STRIDE, 0);
            ctx.float_attribute(location::NORMAL, 3, VERTEX_STRIDE, 3);
        }

        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(&matrix_buffer));
        ctx.instanced_mat4_attribute(location::INSTANCE_MATRIX);

        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(&color_buffer));
        ctx.instanced_attribute(location::INSTANCE_COLOR, 3, COLOR_STRIDE, 0);

        gl.bind_vertex_array(None);
        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, None);

        Ok(InstanceBatch {
            vao,
            matrix_buffer,
            geometry,
            material,
            count: (colors.len() / COLOR_STRIDE) as i32,
        })
    }

    /// Upload an ornament layer. Returns the slot used by [`update_layer`](Self::update_layer).
    pub fn attach_layer(&mut self, layer: &OrnamentLayer) -> EngineResult<usize> {
        let batch = if layer.is_empty() {
            log::warn!("layer '{}' has no instances, nothing uploaded", layer.name());
            None
        } else {
            Some(self.create_instance_batch(
                layer.geometry(),
                layer.material(),
                layer.matrix_data(),
                layer.color_data(),
            )?)
        };

        self.layers.push(batch);
        Ok(self.layers.len() - 1)
    }

    /// Push a layer's current transforms. No-op for an unknown or empty slot.
    pub fn update_layer(&self, slot: usize, layer: &OrnamentLayer) {
        if let Some(Some(batch)) = self.layers.get(slot) {
            self.ctx.update_buffer_f32(&batch.matrix_buffer, layer.matrix_data());
        }
    }

    pub fn attach_star(&mut self, star: &TopStar) -> EngineResult<()> {
        let batch = self.create_instance_batch(
            GeometryKind::Star,
            MaterialKind::Gold,
            star.transform().as_slice(),
            &Rgb::WHITE.to_array(),
        )?;
        self.star = Some(batch);
        Ok(())
    }

    pub fn update_star(&self, star: &TopStar) {
        if let Some(ref batch) = self.star {
            self.ctx.update_buffer_f32(&batch.matrix_buffer, star.transform().as_slice());
        }
    }

    /// Upload the static dust attributes
    pub fn attach_dust(&mut self, dust: &DustField) -> EngineResult<()> {
        if dust.count() == 0 {
            self.dust = None;
            return Ok(());
        }

        let ctx = &self.ctx;
        let gl = &ctx.gl;

        let vao = ctx.create_vao()?;
        gl.bind_vertex_array(Some(&vao));

        let buffer = ctx.create_buffer_f32(&dust.attribute_data(), WebGl2RenderingContext::STATIC_DRAW)?;
        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(&buffer));

        // tree_pos(3) + scatter_pos(3) + color(3) + phase + speed + size
        ctx.float_attribute(location::TREE_POS, 3, DUST_STRIDE, 0);
        ctx.float_attribute(location::SCATTER_POS, 3, DUST_STRIDE, 3);
        ctx.float_attribute(location::COLOR, 3, DUST_STRIDE, 6);
        ctx.float_attribute(location::PHASE, 1, DUST_STRIDE, 9);
        ctx.float_attribute(location::SPEED, 1, DUST_STRIDE, 10);
        ctx.float_attribute(location::SIZE, 1, DUST_STRIDE, 11);

        gl.bind_vertex_array(None);
        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, None);

        self.dust = Some(PointBatch {
            vao,
            buffer,
            count: dust.count() as i32,
        });
        self.dust_uniforms = dust.uniforms();
        Ok(())
    }

    /// Per-frame dust input: two floats, no buffer traffic
    pub fn set_dust_uniforms(&mut self, uniforms: DustUniforms) {
        self.dust_uniforms = uniforms;
    }

    pub fn attach_snow(&mut self, snow: &SnowField) -> EngineResult<()> {
        if snow.count() == 0 {
            self.snow = None;
            return Ok(());
        }

        let ctx = &self.ctx;
        let gl = &ctx.gl;

        let vao = ctx.create_vao()?;
        gl.bind_vertex_array(Some(&vao));

        let buffer = ctx.create_buffer_f32(&snow.particle_data(), WebGl2RenderingContext::DYNAMIC_DRAW)?;
        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(&buffer));
        ctx.float_attribute(location::POSITION, 3, SNOW_STRIDE, 0);

        gl.bind_vertex_array(None);
        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, None);

        self.snow = Some(PointBatch {
            vao,
            buffer,
            count: snow.count() as i32,
        });
        self.snow_size = snow.spec().size;
        self.snow_opacity = snow.spec().opacity;
        Ok(())
    }

    pub fn update_snow(&self, snow: &SnowField) {
        if let Some(ref batch) = self.snow {
            self.ctx.update_buffer_f32(&batch.buffer, &snow.particle_data());
        }
    }

    fn projection(&self) -> Mat4 {
        let aspect = self.width as f32 / self.height.max(1) as f32;
        Mat4::perspective(
            self.camera.fov_degrees.to_radians(),
            aspect,
            self.camera.near,
            self.camera.far,
        )
    }

    fn draw_instances(&self, batch: &InstanceBatch) {
        let Some(mesh) = self.geometries.get(&batch.geometry) else {
            return;
        };
        let gl = &self.ctx.gl;
        let u = &self.ornament_uniforms;
        let material = batch.material.params();

        let tint = material.tint;
        self.ctx.uniform_3f(u.tint.as_ref(), tint.r, tint.g, tint.b);
        self.ctx.uniform_1f(u.roughness.as_ref(), material.roughness);
        self.ctx.uniform_1f(u.metalness.as_ref(), material.metalness);
        let emissive = material.emissive;
        self.ctx.uniform_3f(u.emissive.as_ref(), emissive.r, emissive.g, emissive.b);
        self.ctx.uniform_1f(u.emissive_intensity.as_ref(), material.emissive_intensity);

        gl.bind_vertex_array(Some(&batch.vao));
        gl.draw_elements_instanced_with_i32(
            WebGl2RenderingContext::TRIANGLES,
            mesh.index_count,
            WebGl2RenderingContext::UNSIGNED_INT,
            0,
            batch.count,
        );
    }

    /// Render a frame
    pub fn render(&self, star_visible: bool) {
        let gl = &self.ctx.gl;

        let projection = self.projection();
        let view = Mat4::look_at(self.camera.position, Vec3::ZERO, Vec3::UP);
        let camera = self.camera.position;

        self.ctx.viewport(0, 0, self.width, self.height);
        let bg = self.background;
        self.ctx.clear(bg.r, bg.g, bg.b, 1.0);
        self.ctx.enable_depth_test();
        self.ctx.depth_mask(true);
        self.ctx.disable_blending();

        // Opaque ornaments, then the star with the same program
        gl.use_program(Some(&self.ornament_program));
        let u = &self.ornament_uniforms;
        self.ctx.uniform_matrix4fv(u.model.as_ref(), self.scene_model.as_slice());
        self.ctx.uniform_matrix4fv(u.view.as_ref(), view.as_slice());
        self.ctx.uniform_matrix4fv(u.projection.as_ref(), projection.as_slice());
        self.ctx.uniform_3f(u.camera_pos.as_ref(), camera.x, camera.y, camera.z);
        self.ctx.uniform_3f(u.fog_color.as_ref(), bg.r, bg.g, bg.b);
        self.ctx.uniform_1f(u.fog_near.as_ref(), self.fog.near);
        self.ctx.uniform_1f(u.fog_far.as_ref(), self.fog.far);

        for batch in self.layers.iter().flatten() {
            self.draw_instances(batch);
        }

        if star_visible {
            if let Some(ref batch) = self.star {
                self.draw_instances(batch);
            }
        }

        self.ctx.depth_mask(false);

        // Dust: additive glow
        if let Some(ref dust) = self.dust {
            gl.use_program(Some(&self.dust_program));
            self.ctx.enable_additive_blending();

            let d = &self.dust_locations;
            self.ctx.uniform_matrix4fv(d.model.as_ref(), self.scene_model.as_slice());
            self.ctx.uniform_matrix4fv(d.view.as_ref(), view.as_slice());
            self.ctx.uniform_matrix4fv(d.projection.as_ref(), projection.as_slice());
            self.ctx.uniform_1f(d.time.as_ref(), self.dust_uniforms.time);
            self.ctx.uniform_1f(d.progress.as_ref(), self.dust_uniforms.progress);

            gl.bind_vertex_array(Some(&dust.vao));
            gl.draw_arrays(WebGl2RenderingContext::POINTS, 0, dust.count);
        }

        // Snow: plain alpha, outside the formation transform
        if let Some(ref snow) = self.snow {
            gl.use_program(Some(&self.snow_program));
            self.ctx.enable_blending();

            let s = &self.snow_uniforms;
            self.ctx.uniform_matrix4fv(s.view.as_ref(), view.as_slice());
            self.ctx.uniform_matrix4fv(s.projection.as_ref(), projection.as_slice());
            self.ctx.uniform_1f(s.size.as_ref(), self.snow_size);
            self.ctx.uniform_1f(s.point_scale.as_ref(), self.height as f32 / 2.0);
            self.ctx.uniform_1f(s.opacity.as_ref(), self.snow_opacity);

            gl.bind_vertex_array(Some(&snow.vao));
            gl.draw_arrays(WebGl2RenderingContext::POINTS, 0, snow.count);
        }

        self.ctx.depth_mask(true);
        gl.bind_vertex_array(None);
    }

    /// Resize the render pipeline
    pub fn resize(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
    }

    /// Total instances across uploaded ornament layers
    pub fn instance_count(&self) -> usize {
        self.layers.iter().flatten().map(|b| b.count as usize).sum()
    }
}
