//! Procedural asteroid belt.
//!
//! The belt is generated once from a seed and never changes afterwards.
//! Only the per-asteroid orbital angle moves with time, see
//! [`crate::kinematics`].

use std::f64::consts::TAU;
use std::ops::Range;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub const DEFAULT_COUNT: usize = 220;
pub const DEFAULT_SEED: u64 = 42;

/// A small body on a slow circular orbit with a fixed vertical offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Asteroid {
    pub orbit_radius: f64,
    pub base_angle: f64,
    pub height_offset: f64,
    pub size: f64,
    pub angular_speed: f64,
}

/// The ranges each asteroid property is drawn from.
#[derive(Clone, Debug, PartialEq)]
pub struct AsteroidBand {
    pub radius: Range<f64>,
    pub height: Range<f64>,
    pub size: Range<f64>,
    pub speed: Range<f64>,
}

impl Default for AsteroidBand {
    /// The band between the orbits of Mars (12.5) and Jupiter (16.0).
    fn default() -> Self {
        Self {
            radius: 13.0..15.5,
            height: -0.4..0.4,
            size: 0.07..0.18,
            speed: 0.1..0.35,
        }
    }
}

/// Generates `count` asteroids from `seed`.
///
/// Values are drawn per asteroid in the order radius, angle, height,
/// size, speed. The same seed always yields the same field.
pub fn generate(count: usize, seed: u64, band: &AsteroidBand) -> Vec<Asteroid> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let asteroids: Vec<Asteroid> = (0..count)
        .map(|_| Asteroid {
            orbit_radius: rng.random_range(band.radius.clone()),
            base_angle: rng.random_range(0.0..TAU),
            height_offset: rng.random_range(band.height.clone()),
            size: rng.random_range(band.size.clone()),
            angular_speed: rng.random_range(band.speed.clone()),
        })
        .collect();

    tracing::debug!(count, seed, "generated asteroid field");

    asteroids
}
