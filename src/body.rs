use std::cell::OnceCell;

use thiserror::Error;

/// An sRGB display colour, each channel in `[0, 1]`. Not gamma corrected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Opaque handle to a texture that lives on the GPU.
///
/// Handles are handed out by a [`TextureLoader`](crate::assets::TextureLoader)
/// and only mean something to the rasterizer that created them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub(crate) u32);

impl TextureId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A struct representing a celestial body on a circular orbit
/// around the origin.
#[derive(Clone, Debug, PartialEq)]
pub struct CelestialBody {
    /// The name of the celestial body.
    pub name: &'static str,

    /// The distance from the origin, in scene units.
    /// Zero for the star.
    pub orbit_radius: f64,

    /// The radius of the rendered sphere, in scene units.
    pub size: f64,

    /// Orbital angle travelled per second of elapsed time, in radians.
    pub orbit_angular_speed: f64,

    /// The base color of the celestial body.
    pub color: Color,

    /// The orbital angle at time zero, in radians.
    pub phase: f64,

    /// The texture file name, relative to the asset directory.
    pub texture_file: &'static str,

    texture: OnceCell<TextureId>,
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("texture for {name} was already assigned")]
pub struct TextureAlreadyAssigned {
    pub name: &'static str,
}

impl CelestialBody {
    /// Creates a new untextured `CelestialBody`.
    pub const fn new(
        name: &'static str,
        orbit_radius: f64,
        size: f64,
        orbit_angular_speed: f64,
        color: Color,
        phase: f64,
        texture_file: &'static str,
    ) -> Self {
        Self {
            name,
            orbit_radius,
            size,
            orbit_angular_speed,
            color,
            phase,
            texture_file,
            texture: OnceCell::new(),
        }
    }

    /// The texture of this body, if one was loaded.
    pub fn texture(&self) -> Option<TextureId> {
        self.texture.get().copied()
    }

    /// Assigns the loaded texture. A body's texture can only be set once.
    pub fn assign_texture(&self, texture: TextureId) -> Result<(), TextureAlreadyAssigned> {
        self.texture
            .set(texture)
            .map_err(|_| TextureAlreadyAssigned { name: self.name })
    }
}
