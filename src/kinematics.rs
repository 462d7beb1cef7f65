use glam::DVec3;

use super::asteroids::Asteroid;
use super::body::CelestialBody;

/// Anything that moves on a circular orbit around the origin,
/// parallel to the XZ plane.
pub trait Orbiting {
    /// The orbital angle at the given time, in radians.
    fn angle_at(&self, time: f64) -> f64;

    fn orbit_radius(&self) -> f64;

    /// Vertical offset from the orbital plane. Constant over time.
    fn height(&self) -> f64 {
        0.0
    }
}

impl Orbiting for CelestialBody {
    fn angle_at(&self, time: f64) -> f64 {
        self.orbit_angular_speed * time + self.phase
    }

    fn orbit_radius(&self) -> f64 {
        self.orbit_radius
    }
}

impl Orbiting for Asteroid {
    fn angle_at(&self, time: f64) -> f64 {
        self.base_angle + self.angular_speed * time
    }

    fn orbit_radius(&self) -> f64 {
        self.orbit_radius
    }

    fn height(&self) -> f64 {
        self.height_offset
    }
}

/// Gets the position of an orbiting object at `time` seconds.
///
/// Any time is valid, including negative ones.
pub fn position_of(object: &impl Orbiting, time: f64) -> DVec3 {
    let angle = object.angle_at(time);
    let radius = object.orbit_radius();
    DVec3::new(angle.cos() * radius, object.height(), angle.sin() * radius)
}
