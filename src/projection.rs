/// Vertical field of view, in degrees.
pub const FIELD_OF_VIEW: f32 = 45.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 400.0;

/// Perspective projection parameters, tracking the viewport size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    width: u32,
    height: u32,
}

impl Projection {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Updates the viewport size. Zero sizes are treated as one.
    ///
    /// Returns whether the size changed.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        let new = Self::new(width, height);
        let changed = new != *self;
        if changed {
            tracing::debug!(width = new.width, height = new.height, "viewport resized");
        }
        *self = new;
        changed
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn field_of_view(&self) -> f32 {
        FIELD_OF_VIEW
    }

    pub fn z_near(&self) -> f32 {
        Z_NEAR
    }

    pub fn z_far(&self) -> f32 {
        Z_FAR
    }
}
