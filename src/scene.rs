use glam::DVec3;

use super::asteroids::{self, Asteroid, AsteroidBand};
use super::assets::TextureLoader;
use super::body::{Color, TextureId};
use super::catalog::{self, Catalog};
use super::control::{self, CameraInput, CameraRig};
use super::kinematics::position_of;
use super::raster::primitives::{self, SphereDetail};
use super::raster::{Capability, CapabilityGuard, MatrixGuard, Rasterizer, TextureGuard};

const ASTEROID_COLOR: Color = Color::rgb(0.6, 0.6, 0.6);

/// Ring radii, relative to the size of the ring-bearing body.
const RING_INNER_SCALE: f64 = 2.0;
const RING_OUTER_SCALE: f64 = 3.5;

/// Where the light sits: inside the star.
const LIGHT_POSITION: DVec3 = DVec3::ZERO;

/// Everything that gets drawn, and the camera it gets drawn from.
#[derive(Clone, Debug)]
pub struct Scene {
    catalog: Catalog,
    asteroids: Vec<Asteroid>,
    camera: CameraRig,
    background_texture: Option<TextureId>,
    ring_texture: Option<TextureId>,
}

impl Scene {
    pub fn new(asteroid_count: usize, asteroid_seed: u64) -> Self {
        Self {
            catalog: Catalog::new(),
            asteroids: asteroids::generate(asteroid_count, asteroid_seed, &AsteroidBand::default()),
            camera: CameraRig::default(),
            background_texture: None,
            ring_texture: None,
        }
    }

    /// Loads every texture the scene uses, from `dir`.
    ///
    /// Textures that fail to load are left out; those surfaces get drawn
    /// in their flat color instead.
    pub fn load_textures(&mut self, loader: &mut impl TextureLoader, dir: &std::path::Path) {
        for body in self.catalog.entries() {
            if let Some(texture) = loader.load(&dir.join(body.texture_file))
                && let Err(error) = body.assign_texture(texture)
            {
                tracing::warn!(%error, "ignoring duplicate texture");
            }
        }

        self.ring_texture = loader.load(&dir.join(catalog::RING_TEXTURE_FILE));
        self.background_texture = loader.load(&dir.join(catalog::BACKGROUND_TEXTURE_FILE));
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn update_camera(&mut self, input: CameraInput) {
        self.camera.update(input);
    }

    /// Draws the whole scene as seen at `time` seconds.
    pub fn render_frame<R: Rasterizer + ?Sized>(&self, raster: &mut R, time: f64) {
        raster.clear();

        let eye = self.camera.eye_position(time);
        raster.look_at(eye, control::TARGET, control::UP);

        primitives::draw_background(raster, self.background_texture);

        // The view changed, so the light has to be placed again.
        raster.set_light_position(LIGHT_POSITION);

        self.draw_star(raster);
        self.draw_orbiting(raster, time);
        self.draw_asteroids(raster, time);
    }

    fn draw_star<R: Rasterizer + ?Sized>(&self, raster: &mut R) {
        let star = self.catalog.star();
        let mut raster = MatrixGuard::push(raster);
        raster.set_color(star.color);
        let mut raster = TextureGuard::bind(&mut *raster, star.texture());
        primitives::draw_sphere(&mut *raster, star.size, SphereDetail::STAR);
    }

    fn draw_orbiting<R: Rasterizer + ?Sized>(&self, raster: &mut R, time: f64) {
        for (index, body) in self.catalog.orbiting().iter().enumerate() {
            primitives::draw_orbit(raster, body.orbit_radius);

            let position = position_of(body, time);
            let mut raster = MatrixGuard::push(&mut *raster);
            raster.translate(position);

            if Catalog::is_ring_body(index) {
                primitives::draw_ring(
                    &mut *raster,
                    self.ring_texture,
                    body.size * RING_INNER_SCALE,
                    body.size * RING_OUTER_SCALE,
                );
            }

            raster.set_color(body.color);
            let mut raster = TextureGuard::bind(&mut *raster, body.texture());
            primitives::draw_sphere(&mut *raster, body.size, SphereDetail::BODY);
        }
    }

    fn draw_asteroids<R: Rasterizer + ?Sized>(&self, raster: &mut R, time: f64) {
        let mut raster = CapabilityGuard::disable(raster, &[Capability::Texturing]);
        raster.set_color(ASTEROID_COLOR);

        for asteroid in &self.asteroids {
            let mut raster = MatrixGuard::push(&mut *raster);
            raster.translate(position_of(asteroid, time));
            primitives::draw_sphere(&mut *raster, asteroid.size, SphereDetail::ASTEROID);
        }
    }
}
