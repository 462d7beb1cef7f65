//! The immediate-mode drawing interface the scene is rendered through.
//!
//! State changes made for a single draw go through the guard types in
//! this module, which put the previous state back when dropped.

use std::ops::{Deref, DerefMut};

use glam::{DVec2, DVec3};
use strum::EnumCount;
use strum_macros::{EnumCount, EnumIter};

use super::body::{Color, TextureId};

pub(crate) mod gl_backend;
pub(crate) mod primitives;
#[cfg(test)]
pub(crate) mod recording;

/// Fixed-function style rendering switches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumCount, EnumIter)]
pub enum Capability {
    DepthTest,
    Lighting,
    Texturing,
}

impl Capability {
    const fn index(self) -> usize {
        self as usize
    }
}

/// One vertex of a triangle strip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StripVertex {
    pub position: DVec3,
    pub uv: DVec2,
}

/// The low-level drawing operations needed to render the scene.
///
/// Positions are relative to the current model transform, which starts
/// out as the identity after [`Rasterizer::look_at`].
pub trait Rasterizer {
    /// Clears the color and depth buffers.
    fn clear(&mut self);

    /// Sets the view transform and resets the model transform.
    fn look_at(&mut self, eye: DVec3, target: DVec3, up: DVec3);

    /// Places the positional light, relative to the current model transform.
    fn set_light_position(&mut self, position: DVec3);

    fn is_enabled(&self, capability: Capability) -> bool;
    fn set_enabled(&mut self, capability: Capability, enabled: bool);

    fn set_color(&mut self, color: Color);

    fn bound_texture(&self) -> Option<TextureId>;
    fn bind_texture(&mut self, texture: Option<TextureId>);

    fn push_matrix(&mut self);
    fn pop_matrix(&mut self);
    fn translate(&mut self, offset: DVec3);

    /// Draws a sphere around the current origin.
    fn draw_sphere(&mut self, radius: f64, slices: u32, stacks: u32);

    /// Draws a closed loop of line segments through `points`.
    fn draw_line_loop(&mut self, points: &[DVec3]);

    /// Draws a triangle strip where every vertex shares `normal`.
    fn draw_triangle_strip(&mut self, vertices: &[StripVertex], normal: DVec3);
}

/// Sets capabilities for as long as the guard lives.
pub struct CapabilityGuard<'a, R: Rasterizer + ?Sized> {
    raster: &'a mut R,
    previous: [Option<bool>; Capability::COUNT],
}

impl<'a, R: Rasterizer + ?Sized> CapabilityGuard<'a, R> {
    pub fn set(raster: &'a mut R, changes: &[(Capability, bool)]) -> Self {
        let mut guard = Self {
            raster,
            previous: [None; Capability::COUNT],
        };
        for &(capability, enabled) in changes {
            guard.change(capability, enabled);
        }
        guard
    }

    pub fn disable(raster: &'a mut R, capabilities: &[Capability]) -> Self {
        let mut guard = Self::set(raster, &[]);
        for &capability in capabilities {
            guard.change(capability, false);
        }
        guard
    }

    fn change(&mut self, capability: Capability, enabled: bool) {
        let slot = &mut self.previous[capability.index()];
        if slot.is_none() {
            *slot = Some(self.raster.is_enabled(capability));
        }
        self.raster.set_enabled(capability, enabled);
    }
}

impl<R: Rasterizer + ?Sized> Drop for CapabilityGuard<'_, R> {
    fn drop(&mut self) {
        use strum::IntoEnumIterator;

        for capability in Capability::iter() {
            if let Some(enabled) = self.previous[capability.index()] {
                self.raster.set_enabled(capability, enabled);
            }
        }
    }
}

/// Pushes the model transform on creation and pops it on drop.
pub struct MatrixGuard<'a, R: Rasterizer + ?Sized> {
    raster: &'a mut R,
}

impl<'a, R: Rasterizer + ?Sized> MatrixGuard<'a, R> {
    pub fn push(raster: &'a mut R) -> Self {
        raster.push_matrix();
        Self { raster }
    }
}

impl<R: Rasterizer + ?Sized> Drop for MatrixGuard<'_, R> {
    fn drop(&mut self) {
        self.raster.pop_matrix();
    }
}

/// Binds a texture and unbinds it (back to no texture) on drop.
pub struct TextureGuard<'a, R: Rasterizer + ?Sized> {
    raster: &'a mut R,
}

impl<'a, R: Rasterizer + ?Sized> TextureGuard<'a, R> {
    /// Binds `texture`. With `None`, whatever is bound stays bound
    /// until the guard drops.
    pub fn bind(raster: &'a mut R, texture: Option<TextureId>) -> Self {
        if texture.is_some() {
            raster.bind_texture(texture);
        }
        Self { raster }
    }
}

impl<R: Rasterizer + ?Sized> Drop for TextureGuard<'_, R> {
    fn drop(&mut self) {
        self.raster.bind_texture(None);
    }
}

macro_rules! deref_to_raster {
    ($($guard:ident),*) => {
        $(
            impl<R: Rasterizer + ?Sized> Deref for $guard<'_, R> {
                type Target = R;
                fn deref(&self) -> &R {
                    self.raster
                }
            }

            impl<R: Rasterizer + ?Sized> DerefMut for $guard<'_, R> {
                fn deref_mut(&mut self) -> &mut R {
                    self.raster
                }
            }
        )*
    };
}

deref_to_raster!(CapabilityGuard, MatrixGuard, TextureGuard);
