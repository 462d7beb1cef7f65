// Unlike an orbit control, the azimuth is never user-driven: the
// camera spins on its own and keys only move it in/out and up/down.

use glam::DVec3;

const MIN_DISTANCE: f64 = 10.0;
const MAX_DISTANCE: f64 = 120.0;
const MIN_HEIGHT: f64 = -5.0;
const MAX_HEIGHT: f64 = 40.0;

const DISTANCE_STEP: f64 = 0.5;
const HEIGHT_STEP: f64 = 0.3;

/// Azimuthal rotation of the camera per second, in radians.
const AUTO_ROTATION_SPEED: f64 = 0.1;

/// The point the camera always looks at.
pub const TARGET: DVec3 = DVec3::ZERO;
pub const UP: DVec3 = DVec3::Y;

/// The user-adjustable part of the camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    /// Distance from the target in the orbital plane.
    pub distance: f64,
    /// Height above the orbital plane.
    pub height: f64,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            distance: 40.0,
            height: 12.0,
        }
    }
}

/// Camera inputs held down during this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CameraInput {
    pub zoom_in: bool,
    pub zoom_out: bool,
    pub raise: bool,
    pub lower: bool,
}

///
/// A camera that circles the target on its own, at a distance and height
/// the user controls.
///
#[derive(Clone, Copy, Debug, Default)]
pub struct CameraRig {
    state: CameraState,
}

impl CameraRig {
    pub fn new(state: CameraState) -> Self {
        let mut rig = Self { state };
        rig.reclamp();
        rig
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    /// Applies one frame worth of input. Must be called each frame.
    pub fn update(&mut self, input: CameraInput) {
        if input.zoom_in {
            self.state.distance -= DISTANCE_STEP;
        }
        if input.zoom_out {
            self.state.distance += DISTANCE_STEP;
        }
        if input.raise {
            self.state.height += HEIGHT_STEP;
        }
        if input.lower {
            self.state.height -= HEIGHT_STEP;
        }
        self.reclamp();
    }

    fn reclamp(&mut self) {
        self.state.distance = self.state.distance.clamp(MIN_DISTANCE, MAX_DISTANCE);
        self.state.height = self.state.height.clamp(MIN_HEIGHT, MAX_HEIGHT);
    }

    pub fn eye_position(&self, time: f64) -> DVec3 {
        eye_position(time, &self.state)
    }
}

/// Gets the camera position at `time` seconds.
///
/// The azimuth only depends on time; the state only sets the radius
/// and the height of the circle the camera travels on.
pub fn eye_position(time: f64, state: &CameraState) -> DVec3 {
    let angle = time * AUTO_ROTATION_SPEED;
    DVec3::new(
        angle.cos() * state.distance,
        state.height,
        angle.sin() * state.distance,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    const RAISE: CameraInput = CameraInput {
        zoom_in: false,
        zoom_out: false,
        raise: true,
        lower: false,
    };

    const ZOOM_IN: CameraInput = CameraInput {
        zoom_in: true,
        zoom_out: false,
        raise: false,
        lower: false,
    };

    #[test]
    fn raise_saturates() {
        let mut rig = CameraRig::default();
        for _ in 0..1000 {
            rig.update(RAISE);
        }
        assert_eq!(rig.state().height, MAX_HEIGHT);
        assert_eq!(rig.state().distance, 40.0);
    }

    #[test]
    fn zoom_in_saturates() {
        let mut rig = CameraRig::default();
        for _ in 0..1000 {
            rig.update(ZOOM_IN);
        }
        assert_eq!(rig.state().distance, MIN_DISTANCE);
    }

    #[test]
    fn lower_and_zoom_out_saturate() {
        let mut rig = CameraRig::default();
        let input = CameraInput {
            zoom_out: true,
            lower: true,
            ..Default::default()
        };
        for _ in 0..1000 {
            rig.update(input);
        }
        assert_eq!(rig.state().distance, MAX_DISTANCE);
        assert_eq!(rig.state().height, MIN_HEIGHT);
    }

    #[test]
    fn single_steps() {
        let mut rig = CameraRig::default();
        rig.update(ZOOM_IN);
        rig.update(RAISE);
        assert!((rig.state().distance - 39.5).abs() < EPSILON);
        assert!((rig.state().height - 12.3).abs() < EPSILON);

        rig.update(CameraInput::default());
        assert!((rig.state().distance - 39.5).abs() < EPSILON);
    }

    #[test]
    fn opposite_inputs_cancel() {
        let mut rig = CameraRig::default();
        rig.update(CameraInput {
            zoom_in: true,
            zoom_out: true,
            raise: true,
            lower: true,
        });
        assert!((rig.state().distance - 40.0).abs() < EPSILON);
        assert!((rig.state().height - 12.0).abs() < EPSILON);
    }

    #[test]
    fn new_clamps_state() {
        let rig = CameraRig::new(CameraState {
            distance: 500.0,
            height: -50.0,
        });
        assert_eq!(rig.state().distance, MAX_DISTANCE);
        assert_eq!(rig.state().height, MIN_HEIGHT);
    }

    #[test]
    fn default_eye_at_time_zero() {
        let eye = CameraRig::default().eye_position(0.0);
        assert!(eye.distance(DVec3::new(40.0, 12.0, 0.0)) < EPSILON);
    }

    #[test]
    fn eye_traces_circle() {
        let mut rig = CameraRig::default();
        for step in 0..200 {
            let time = step as f64 * 0.37 - 10.0;
            if step % 3 == 0 {
                rig.update(ZOOM_IN);
            }
            if step % 5 == 0 {
                rig.update(RAISE);
            }

            let state = *rig.state();
            let eye = rig.eye_position(time);
            let planar = (eye.x * eye.x + eye.z * eye.z).sqrt();
            assert!((planar - state.distance).abs() < EPSILON);
            assert_eq!(eye.y, state.height);

            // The azimuth is the same as for the default camera.
            let reference = eye_position(time, &CameraState::default());
            let (azimuth, reference_azimuth) = (eye.z.atan2(eye.x), reference.z.atan2(reference.x));
            assert!((azimuth - reference_azimuth).abs() < 1e-9);
        }
    }
}
