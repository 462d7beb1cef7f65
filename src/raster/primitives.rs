//! Reusable draw routines built on top of a [`Rasterizer`].

use std::f64::consts::TAU;

use glam::{DVec2, DVec3};

use super::{Capability, CapabilityGuard, MatrixGuard, Rasterizer, StripVertex, TextureGuard};
use crate::body::{Color, TextureId};

/// Sphere tessellation, as slices around the axis and stacks along it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SphereDetail {
    pub slices: u32,
    pub stacks: u32,
}

impl SphereDetail {
    pub const STAR: Self = Self::new(40, 20);
    pub const BODY: Self = Self::new(24, 12);
    pub const ASTEROID: Self = Self::new(12, 8);
    pub const BACKGROUND: Self = Self::new(40, 20);

    pub const fn new(slices: u32, stacks: u32) -> Self {
        Self { slices, stacks }
    }
}

pub const ORBIT_SEGMENTS: usize = 128;
pub const ORBIT_COLOR: Color = Color::rgb(0.3, 0.3, 0.5);

pub const RING_SEGMENTS: usize = 128;
pub const RING_NORMAL: DVec3 = DVec3::Y;

pub const BACKGROUND_RADIUS: f64 = 150.0;

pub fn draw_sphere<R: Rasterizer + ?Sized>(raster: &mut R, radius: f64, detail: SphereDetail) {
    raster.draw_sphere(radius, detail.slices, detail.stacks);
}

/// Points on a circle of `radius` in the XZ plane, starting on +X.
pub fn circle_points(radius: f64, segments: usize) -> Vec<DVec3> {
    (0..segments)
        .map(|i| {
            let angle = TAU * i as f64 / segments as f64;
            DVec3::new(angle.cos() * radius, 0.0, angle.sin() * radius)
        })
        .collect()
}

/// Draws the outline of an orbit, unlit and untextured.
pub fn draw_orbit<R: Rasterizer + ?Sized>(raster: &mut R, radius: f64) {
    let mut raster =
        CapabilityGuard::disable(raster, &[Capability::Lighting, Capability::Texturing]);
    raster.set_color(ORBIT_COLOR);
    raster.draw_line_loop(&circle_points(radius, ORBIT_SEGMENTS));
}

/// Draws a huge textured sphere around everything, without depth testing
/// or lighting. Nothing is drawn without a texture.
pub fn draw_background<R: Rasterizer + ?Sized>(raster: &mut R, texture: Option<TextureId>) {
    let Some(texture) = texture else {
        return;
    };

    let mut raster =
        CapabilityGuard::disable(raster, &[Capability::Lighting, Capability::DepthTest]);
    let mut raster = MatrixGuard::push(&mut *raster);
    let mut raster = TextureGuard::bind(&mut *raster, Some(texture));
    raster.set_color(Color::WHITE);
    draw_sphere(&mut *raster, BACKGROUND_RADIUS, SphereDetail::BACKGROUND);
}

/// Vertices of a flat ring in the XZ plane, as a closed triangle strip.
///
/// Vertices alternate between the inner and the outer edge. `u` follows
/// the angle around the ring, `v` is 0 on the inner edge and 1 on the
/// outer one.
pub fn ring_strip(inner_radius: f64, outer_radius: f64, segments: usize) -> Vec<StripVertex> {
    let mut vertices = Vec::with_capacity((segments + 1) * 2);
    for i in 0..=segments {
        let t = i as f64 / segments as f64;
        let angle = TAU * t;
        let (sin, cos) = angle.sin_cos();

        vertices.push(StripVertex {
            position: DVec3::new(cos * inner_radius, 0.0, sin * inner_radius),
            uv: DVec2::new(t, 0.0),
        });
        vertices.push(StripVertex {
            position: DVec3::new(cos * outer_radius, 0.0, sin * outer_radius),
            uv: DVec2::new(t, 1.0),
        });
    }
    vertices
}

/// Draws a textured ring around the current origin.
/// Nothing is drawn without a texture.
pub fn draw_ring<R: Rasterizer + ?Sized>(
    raster: &mut R,
    texture: Option<TextureId>,
    inner_radius: f64,
    outer_radius: f64,
) {
    let Some(texture) = texture else {
        return;
    };

    let mut raster = TextureGuard::bind(raster, Some(texture));
    raster.draw_triangle_strip(
        &ring_strip(inner_radius, outer_radius, RING_SEGMENTS),
        RING_NORMAL,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::recording::{Command, RecordingRasterizer};

    const EPSILON: f64 = 1e-12;

    #[test]
    fn circle_has_exact_radius() {
        let points = circle_points(12.5, ORBIT_SEGMENTS);
        assert_eq!(points.len(), ORBIT_SEGMENTS);
        assert_eq!(points[0], DVec3::new(12.5, 0.0, 0.0));
        for p in points {
            assert_eq!(p.y, 0.0);
            assert!((p.length() - 12.5).abs() < EPSILON);
        }
    }

    #[test]
    fn ring_strip_layout() {
        let vertices = ring_strip(2.8, 4.9, RING_SEGMENTS);
        assert_eq!(vertices.len(), (RING_SEGMENTS + 1) * 2);

        for (i, pair) in vertices.chunks(2).enumerate() {
            let (inner, outer) = (pair[0], pair[1]);
            let u = i as f64 / RING_SEGMENTS as f64;

            assert!((inner.position.length() - 2.8).abs() < EPSILON);
            assert!((outer.position.length() - 4.9).abs() < EPSILON);
            assert_eq!(inner.position.y, 0.0);
            assert_eq!(outer.position.y, 0.0);
            assert_eq!(inner.uv, DVec2::new(u, 0.0));
            assert_eq!(outer.uv, DVec2::new(u, 1.0));
        }

        // The strip closes on itself.
        let (first, last) = (vertices[0], vertices[vertices.len() - 2]);
        assert!(first.position.distance(last.position) < 1e-9);
        assert_eq!(last.uv.x, 1.0);
    }

    #[test]
    fn orbit_is_unlit_and_untextured() {
        let mut raster = RecordingRasterizer::default();
        draw_orbit(&mut raster, 5.0);

        let [(_, state)] = raster.draws() else {
            panic!("expected a single draw: {:?}", raster.commands());
        };
        assert!(!state.lighting);
        assert!(!state.texturing);
        assert!(state.depth_test);
        assert_eq!(state.color, ORBIT_COLOR);

        assert!(raster.is_enabled(Capability::Lighting));
        assert!(raster.is_enabled(Capability::Texturing));
    }

    #[test]
    fn background_needs_a_texture() {
        let mut raster = RecordingRasterizer::default();
        draw_background(&mut raster, None);
        assert!(raster.commands().is_empty());
    }

    #[test]
    fn background_disables_depth_and_lighting() {
        let mut raster = RecordingRasterizer::default();
        draw_background(&mut raster, Some(TextureId(7)));

        let [(index, state)] = raster.draws() else {
            panic!("expected a single draw: {:?}", raster.commands());
        };
        assert_eq!(
            raster.commands()[*index],
            Command::Sphere {
                radius: BACKGROUND_RADIUS,
                slices: 40,
                stacks: 20
            }
        );
        assert!(!state.depth_test);
        assert!(!state.lighting);
        assert!(state.texturing);
        assert_eq!(state.texture, Some(TextureId(7)));
        assert_eq!(state.color, Color::WHITE);

        assert!(raster.is_enabled(Capability::DepthTest));
        assert!(raster.is_enabled(Capability::Lighting));
        assert_eq!(raster.bound_texture(), None);
        assert_eq!(raster.matrix_depth(), 0);
    }

    #[test]
    fn ring_needs_a_texture() {
        let mut raster = RecordingRasterizer::default();
        draw_ring(&mut raster, None, 1.0, 2.0);
        assert!(raster.commands().is_empty());

        draw_ring(&mut raster, Some(TextureId(2)), 1.0, 2.0);
        let [(index, state)] = raster.draws() else {
            panic!("expected a single draw: {:?}", raster.commands());
        };
        assert_eq!(state.texture, Some(TextureId(2)));
        match &raster.commands()[*index] {
            Command::TriangleStrip { vertices, normal } => {
                assert_eq!(vertices.len(), (RING_SEGMENTS + 1) * 2);
                assert_eq!(*normal, RING_NORMAL);
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(raster.bound_texture(), None);
    }
}
