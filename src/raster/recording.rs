//! A [`Rasterizer`] that records every call, for tests.

use glam::DVec3;
use strum::EnumCount;

use super::{Capability, Rasterizer, StripVertex};
use crate::body::{Color, TextureId};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Command {
    Clear,
    LookAt { eye: DVec3, target: DVec3, up: DVec3 },
    LightPosition(DVec3),
    SetEnabled(Capability, bool),
    Color(Color),
    BindTexture(Option<TextureId>),
    PushMatrix,
    PopMatrix,
    Translate(DVec3),
    Sphere { radius: f64, slices: u32, stacks: u32 },
    LineLoop(Vec<DVec3>),
    TriangleStrip { vertices: Vec<StripVertex>, normal: DVec3 },
}

/// The state a draw call was issued with.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct DrawState {
    pub depth_test: bool,
    pub lighting: bool,
    pub texturing: bool,
    pub texture: Option<TextureId>,
    pub color: Color,
    pub offset: DVec3,
}

#[derive(Clone, Debug)]
pub(crate) struct RecordingRasterizer {
    commands: Vec<Command>,
    draws: Vec<(usize, DrawState)>,
    enabled: [bool; Capability::COUNT],
    color: Color,
    texture: Option<TextureId>,
    offset: DVec3,
    stack: Vec<DVec3>,
}

impl Default for RecordingRasterizer {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            draws: Vec::new(),
            enabled: [true; Capability::COUNT],
            color: Color::WHITE,
            texture: None,
            offset: DVec3::ZERO,
            stack: Vec::new(),
        }
    }
}

impl RecordingRasterizer {
    pub(crate) fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Index of each draw command, with the state it was drawn in.
    pub(crate) fn draws(&self) -> &[(usize, DrawState)] {
        &self.draws
    }

    pub(crate) fn matrix_depth(&self) -> usize {
        self.stack.len()
    }

    pub(crate) fn position_of(&self, predicate: impl Fn(&Command) -> bool) -> Option<usize> {
        self.commands.iter().position(predicate)
    }

    fn record_draw(&mut self, command: Command) {
        let state = DrawState {
            depth_test: self.is_enabled(Capability::DepthTest),
            lighting: self.is_enabled(Capability::Lighting),
            texturing: self.is_enabled(Capability::Texturing),
            texture: self.texture,
            color: self.color,
            offset: self.offset,
        };
        self.draws.push((self.commands.len(), state));
        self.commands.push(command);
    }
}

impl Rasterizer for RecordingRasterizer {
    fn clear(&mut self) {
        self.commands.push(Command::Clear);
    }

    fn look_at(&mut self, eye: DVec3, target: DVec3, up: DVec3) {
        self.offset = DVec3::ZERO;
        self.commands.push(Command::LookAt { eye, target, up });
    }

    fn set_light_position(&mut self, position: DVec3) {
        self.commands.push(Command::LightPosition(self.offset + position));
    }

    fn is_enabled(&self, capability: Capability) -> bool {
        self.enabled[capability.index()]
    }

    fn set_enabled(&mut self, capability: Capability, enabled: bool) {
        self.enabled[capability.index()] = enabled;
        self.commands.push(Command::SetEnabled(capability, enabled));
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
        self.commands.push(Command::Color(color));
    }

    fn bound_texture(&self) -> Option<TextureId> {
        self.texture
    }

    fn bind_texture(&mut self, texture: Option<TextureId>) {
        self.texture = texture;
        self.commands.push(Command::BindTexture(texture));
    }

    fn push_matrix(&mut self) {
        self.stack.push(self.offset);
        self.commands.push(Command::PushMatrix);
    }

    fn pop_matrix(&mut self) {
        if let Some(offset) = self.stack.pop() {
            self.offset = offset;
        }
        self.commands.push(Command::PopMatrix);
    }

    fn translate(&mut self, offset: DVec3) {
        self.offset += offset;
        self.commands.push(Command::Translate(offset));
    }

    fn draw_sphere(&mut self, radius: f64, slices: u32, stacks: u32) {
        self.record_draw(Command::Sphere {
            radius,
            slices,
            stacks,
        });
    }

    fn draw_line_loop(&mut self, points: &[DVec3]) {
        self.record_draw(Command::LineLoop(points.to_vec()));
    }

    fn draw_triangle_strip(&mut self, vertices: &[StripVertex], normal: DVec3) {
        self.record_draw(Command::TriangleStrip {
            vertices: vertices.to_vec(),
            normal,
        });
    }
}
