//! [`Rasterizer`] on top of three-d.
//!
//! Draw calls are recorded into a [`FrameRecorder`] first. Consecutive
//! spheres drawn with the same state end up in one instanced mesh, so the
//! asteroid belt costs a single object per frame.
//! [`GlBackend::present`] then turns the recorded batches into three-d
//! objects and renders them.

use std::collections::HashMap;
use std::f32::consts::{PI, TAU};
use std::path::Path;

use glam::{DVec2, DVec3};
use strum::EnumCount;
use three_d::core::*;
use three_d::renderer::*;

use super::{Capability, Rasterizer, StripVertex};
use crate::assets::{self, TextureLoader};
use crate::body::{Color, TextureId};
use crate::projection::Projection;

const CLEAR_COLOR: (f32, f32, f32, f32) = (0.0, 0.0, 0.03, 1.0);
const AMBIENT_INTENSITY: f32 = 0.1;
const LIGHT_INTENSITY: f32 = 1.0;
const ROUGHNESS: f32 = 0.6;

/// Radius of the cylinders that make up line loops.
const LINE_RADIUS: f32 = 0.03;
const LINE_SUBDIVISIONS: u32 = 6;

fn to_vec3(v: DVec3) -> Vec3 {
    vec3(v.x as f32, v.y as f32, v.z as f32)
}

fn to_vec2(v: DVec2) -> Vec2 {
    vec2(v.x as f32, v.y as f32)
}

fn to_srgba(color: Color) -> Srgba {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    Srgba::new_opaque(channel(color.r), channel(color.g), channel(color.b))
}

/// The state that decides which material a draw gets.
#[derive(Clone, Copy, Debug, PartialEq)]
struct DrawKey {
    lit: bool,
    depth_test: bool,
    texture: Option<TextureId>,
    color: Color,
}

impl DrawKey {
    fn render_states(&self) -> RenderStates {
        if self.depth_test {
            RenderStates::default()
        } else {
            RenderStates {
                depth_test: DepthTest::Always,
                write_mask: WriteMask::COLOR,
                ..Default::default()
            }
        }
    }
}

#[derive(Clone, Debug)]
enum Batch {
    Spheres {
        key: DrawKey,
        detail: (u32, u32),
        transformations: Vec<Mat4>,
    },
    Lines {
        key: DrawKey,
        transformations: Vec<Mat4>,
    },
    Strip {
        key: DrawKey,
        mesh: CpuMesh,
        transformation: Mat4,
    },
}

impl Batch {
    fn key(&self) -> &DrawKey {
        match self {
            Batch::Spheres { key, .. } | Batch::Lines { key, .. } | Batch::Strip { key, .. } => key,
        }
    }
}

/// Splits batches into render passes, in recording order.
///
/// three-d sorts the objects of one render call by distance to the eye.
/// That is harmless under the depth test, so runs of depth-tested batches
/// share a pass. A batch drawn without the depth test relies on its
/// position in the frame and gets a pass of its own.
fn into_passes(batches: Vec<Batch>) -> Vec<Vec<Batch>> {
    let mut passes: Vec<Vec<Batch>> = Vec::new();
    for batch in batches {
        let depth_test = batch.key().depth_test;
        match passes.last_mut() {
            Some(pass)
                if depth_test && pass.last().is_some_and(|last| last.key().depth_test) =>
            {
                pass.push(batch)
            }
            _ => passes.push(vec![batch]),
        }
    }
    passes
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct View {
    eye: Vec3,
    target: Vec3,
    up: Vec3,
}

/// Records one frame worth of draw calls, without touching the GPU.
#[derive(Clone, Debug)]
pub(crate) struct FrameRecorder {
    enabled: [bool; Capability::COUNT],
    color: Color,
    texture: Option<TextureId>,
    model: Mat4,
    stack: Vec<Mat4>,
    clear_pending: bool,
    view: Option<View>,
    light_position: Vec3,
    batches: Vec<Batch>,
}

impl Default for FrameRecorder {
    fn default() -> Self {
        Self {
            enabled: [true; Capability::COUNT],
            color: Color::WHITE,
            texture: None,
            model: Mat4::identity(),
            stack: Vec::new(),
            clear_pending: false,
            view: None,
            light_position: vec3(0.0, 0.0, 0.0),
            batches: Vec::new(),
        }
    }
}

impl FrameRecorder {
    fn key(&self) -> DrawKey {
        DrawKey {
            lit: self.is_enabled(Capability::Lighting),
            depth_test: self.is_enabled(Capability::DepthTest),
            texture: if self.is_enabled(Capability::Texturing) {
                self.texture
            } else {
                None
            },
            color: self.color,
        }
    }

    fn transform_point(&self, point: DVec3) -> Vec3 {
        (self.model * to_vec3(point).extend(1.0)).truncate()
    }

    fn take_batches(&mut self) -> Vec<Batch> {
        std::mem::take(&mut self.batches)
    }
}

impl Rasterizer for FrameRecorder {
    fn clear(&mut self) {
        self.clear_pending = true;
        self.batches.clear();
    }

    fn look_at(&mut self, eye: DVec3, target: DVec3, up: DVec3) {
        self.view = Some(View {
            eye: to_vec3(eye),
            target: to_vec3(target),
            up: to_vec3(up),
        });
        self.model = Mat4::identity();
        self.stack.clear();
    }

    fn set_light_position(&mut self, position: DVec3) {
        self.light_position = self.transform_point(position);
    }

    fn is_enabled(&self, capability: Capability) -> bool {
        self.enabled[capability.index()]
    }

    fn set_enabled(&mut self, capability: Capability, enabled: bool) {
        self.enabled[capability.index()] = enabled;
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn bound_texture(&self) -> Option<TextureId> {
        self.texture
    }

    fn bind_texture(&mut self, texture: Option<TextureId>) {
        self.texture = texture;
    }

    fn push_matrix(&mut self) {
        self.stack.push(self.model);
    }

    fn pop_matrix(&mut self) {
        match self.stack.pop() {
            Some(model) => self.model = model,
            None => tracing::warn!("matrix stack underflow"),
        }
    }

    fn translate(&mut self, offset: DVec3) {
        self.model = self.model * Mat4::from_translation(to_vec3(offset));
    }

    fn draw_sphere(&mut self, radius: f64, slices: u32, stacks: u32) {
        let key = self.key();
        let detail = (slices, stacks);
        let transformation = self.model * Mat4::from_scale(radius as f32);

        match self.batches.last_mut() {
            Some(Batch::Spheres {
                key: last_key,
                detail: last_detail,
                transformations,
            }) if *last_key == key && *last_detail == detail => {
                transformations.push(transformation);
            }
            _ => self.batches.push(Batch::Spheres {
                key,
                detail,
                transformations: vec![transformation],
            }),
        }
    }

    fn draw_line_loop(&mut self, points: &[DVec3]) {
        if points.len() < 2 {
            return;
        }

        let transformations = points
            .iter()
            .zip(points.iter().cycle().skip(1))
            .filter_map(|(&start, &end)| segment_transformation(to_vec3(start), to_vec3(end)))
            .map(|segment| self.model * segment)
            .collect();

        self.batches.push(Batch::Lines {
            key: self.key(),
            transformations,
        });
    }

    fn draw_triangle_strip(&mut self, vertices: &[StripVertex], normal: DVec3) {
        if vertices.len() < 3 {
            return;
        }

        let normal = to_vec3(normal);
        let mesh = CpuMesh {
            positions: Positions::F32(vertices.iter().map(|v| to_vec3(v.position)).collect()),
            indices: Indices::U32(strip_indices(vertices.len() as u32)),
            normals: Some(vec![normal; vertices.len()]),
            uvs: Some(vertices.iter().map(|v| to_vec2(v.uv)).collect()),
            ..Default::default()
        };

        self.batches.push(Batch::Strip {
            key: self.key(),
            mesh,
            transformation: self.model,
        });
    }
}

/// Maps the unit cylinder along +X onto the segment from `start` to `end`.
fn segment_transformation(start: Vec3, end: Vec3) -> Option<Mat4> {
    let delta = end - start;
    let length = delta.magnitude();
    if length <= f32::EPSILON {
        return None;
    }

    let rotation = Quat::from_arc(vec3(1.0, 0.0, 0.0), delta / length, Some(vec3(0.0, 1.0, 0.0)));
    Some(
        Mat4::from_translation(start)
            * Mat4::from(rotation)
            * Mat4::from_nonuniform_scale(length, LINE_RADIUS, LINE_RADIUS),
    )
}

/// Triangle indices for a strip of `count` vertices, keeping the
/// winding consistent.
fn strip_indices(count: u32) -> Vec<u32> {
    (0..count.saturating_sub(2))
        .flat_map(|i| {
            if i % 2 == 0 {
                [i, i + 1, i + 2]
            } else {
                [i + 1, i, i + 2]
            }
        })
        .collect()
}

/// A unit sphere around the origin, with texture coordinates.
///
/// `u` goes around the Y axis, `v` goes from the bottom pole (0)
/// to the top pole (1).
fn uv_sphere(slices: u32, stacks: u32) -> CpuMesh {
    let slices = slices.max(3);
    let stacks = stacks.max(2);
    let ring = slices + 1;
    let vertex_count = (ring * (stacks + 1)) as usize;

    let mut positions = Vec::with_capacity(vertex_count);
    let mut uvs = Vec::with_capacity(vertex_count);

    for stack in 0..=stacks {
        let v = stack as f32 / stacks as f32;
        let (sin_polar, cos_polar) = (PI * (1.0 - v)).sin_cos();
        for slice in 0..=slices {
            let u = slice as f32 / slices as f32;
            let (sin_azimuth, cos_azimuth) = (TAU * u).sin_cos();
            positions.push(vec3(
                sin_polar * cos_azimuth,
                cos_polar,
                sin_polar * sin_azimuth,
            ));
            uvs.push(vec2(u, v));
        }
    }

    let mut indices = Vec::with_capacity((slices * stacks * 6) as usize);
    for stack in 0..stacks {
        for slice in 0..slices {
            let a = stack * ring + slice;
            let b = a + 1;
            let c = a + ring;
            let d = c + 1;
            indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }

    CpuMesh {
        normals: Some(positions.clone()),
        positions: Positions::F32(positions),
        indices: Indices::U32(indices),
        uvs: Some(uvs),
        ..Default::default()
    }
}

/// Owns the GPU side: camera, lights, textures and mesh data.
pub(crate) struct GlBackend {
    context: Context,
    camera: Camera,
    light: PointLight,
    ambient: AmbientLight,
    textures: Vec<Texture2DRef>,
    spheres: HashMap<(u32, u32), CpuMesh>,
    line_segment: CpuMesh,
    frame: FrameRecorder,
}

impl GlBackend {
    pub(crate) fn new(context: &Context, projection: &Projection) -> Self {
        let viewport = Viewport::new_at_origo(projection.width(), projection.height());
        let camera = Camera::new_perspective(
            viewport,
            vec3(0.0, 0.0, 1.0),
            vec3(0.0, 0.0, 0.0),
            vec3(0.0, 1.0, 0.0),
            degrees(projection.field_of_view()),
            projection.z_near(),
            projection.z_far(),
        );

        Self {
            context: context.clone(),
            camera,
            light: PointLight::new(
                context,
                LIGHT_INTENSITY,
                Srgba::WHITE,
                vec3(0.0, 0.0, 0.0),
                Attenuation::default(),
            ),
            ambient: AmbientLight::new(context, AMBIENT_INTENSITY, Srgba::WHITE),
            textures: Vec::new(),
            spheres: HashMap::new(),
            line_segment: CpuMesh::cylinder(LINE_SUBDIVISIONS),
            frame: FrameRecorder::default(),
        }
    }

    /// The rasterizer the next frame is drawn into.
    pub(crate) fn frame(&mut self) -> &mut FrameRecorder {
        &mut self.frame
    }

    pub(crate) fn set_projection(&mut self, projection: &Projection) {
        self.camera.set_viewport(Viewport::new_at_origo(
            projection.width(),
            projection.height(),
        ));
        self.camera.set_perspective_projection(
            degrees(projection.field_of_view()),
            projection.z_near(),
            projection.z_far(),
        );
    }

    /// Renders everything recorded since the last call.
    pub(crate) fn present(&mut self, target: &RenderTarget<'_>) {
        if let Some(view) = self.frame.view.take() {
            self.camera.set_view(view.eye, view.target, view.up);
        }
        self.light.position = self.frame.light_position;

        if std::mem::take(&mut self.frame.clear_pending) {
            let (r, g, b, a) = CLEAR_COLOR;
            target.clear(ClearState::color_and_depth(r, g, b, a, 1.0));
        }

        for pass in into_passes(self.frame.take_batches()) {
            let mut objects: Vec<Box<dyn Object>> = Vec::with_capacity(pass.len());
            for batch in pass {
                objects.push(self.build(batch));
            }

            target.render(
                &self.camera,
                objects.iter().map(|object| object.as_ref()),
                &[&self.light, &self.ambient],
            );
        }
    }

    fn build(&mut self, batch: Batch) -> Box<dyn Object> {
        match batch {
            Batch::Spheres {
                key,
                detail: (slices, stacks),
                transformations,
            } => {
                let mesh = self
                    .spheres
                    .entry((slices, stacks))
                    .or_insert_with(|| uv_sphere(slices, stacks));
                let geometry = InstancedMesh::new(&self.context, &instances(transformations), mesh);
                self.with_material(geometry, key)
            }
            Batch::Lines {
                key,
                transformations,
            } => {
                let geometry = InstancedMesh::new(
                    &self.context,
                    &instances(transformations),
                    &self.line_segment,
                );
                self.with_material(geometry, key)
            }
            Batch::Strip {
                key,
                mesh,
                transformation,
            } => {
                let mut geometry = Mesh::new(&self.context, &mesh);
                geometry.set_transformation(transformation);
                self.with_material(geometry, key)
            }
        }
    }

    fn with_material<G: Geometry + 'static>(&self, geometry: G, key: DrawKey) -> Box<dyn Object> {
        let texture = key
            .texture
            .and_then(|id| self.textures.get(id.index()).cloned());
        let color = to_srgba(key.color);
        let render_states = key.render_states();

        if key.lit {
            let mut material = PhysicalMaterial::new_opaque(
                &self.context,
                &CpuMaterial {
                    albedo: color,
                    roughness: ROUGHNESS,
                    metallic: 0.0,
                    ..Default::default()
                },
            );
            material.albedo_texture = texture;
            material.render_states = render_states;
            Box::new(Gm::new(geometry, material))
        } else {
            let material = ColorMaterial {
                color,
                texture,
                render_states,
                is_transparent: false,
            };
            Box::new(Gm::new(geometry, material))
        }
    }
}

fn instances(transformations: Vec<Mat4>) -> Instances {
    Instances {
        transformations,
        texture_transformations: None,
        colors: None,
    }
}

impl TextureLoader for GlBackend {
    fn load(&mut self, path: &Path) -> Option<TextureId> {
        let pixels = match assets::read_pixels(path) {
            Ok(p) => p,
            Err(error) => {
                tracing::warn!(%error, "texture unavailable, drawing without it");
                return None;
            }
        };

        let cpu_texture = CpuTexture {
            name: path.display().to_string(),
            data: TextureData::RgbaU8(pixels.data),
            width: pixels.width,
            height: pixels.height,
            wrap_s: Wrapping::Repeat,
            wrap_t: Wrapping::Repeat,
            ..Default::default()
        };

        let id = TextureId(self.textures.len() as u32);
        self.textures
            .push(Texture2DRef::from_cpu_texture(&self.context, &cpu_texture));
        tracing::info!(
            path = %path.display(),
            width = pixels.width,
            height = pixels.height,
            "loaded texture"
        );
        Some(id)
    }
}
