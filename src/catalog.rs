use super::body::{CelestialBody, Color};

/// Number of bodies orbiting the star.
pub const ORBITING_COUNT: usize = 8;

/// Index (among the orbiting bodies) of the body that carries a ring.
pub const RING_BODY_INDEX: usize = 5;

pub const RING_TEXTURE_FILE: &str = "saturn_ring.png";
pub const BACKGROUND_TEXTURE_FILE: &str = "space.jpeg";

const STAR: CelestialBody =
    CelestialBody::new("Sun", 0.0, 3.0, 0.0, Color::rgb(1.0, 0.95, 0.4), 0.0, "sun.jpg");

#[rustfmt::skip]
const ORBITING: [CelestialBody; ORBITING_COUNT] = [
    CelestialBody::new("Mercury", 5.0, 0.5, 1.8, Color::rgb(0.8, 0.8, 0.7), 0.0, "mercury.jpg"),
    CelestialBody::new("Venus", 7.5, 0.8, 1.4, Color::rgb(1.0, 0.8, 0.4), 1.0, "venus.jpg"),
    CelestialBody::new("Earth", 10.0, 0.9, 1.0, Color::rgb(0.2, 0.4, 1.0), 2.0, "earth.jpg"),
    CelestialBody::new("Mars", 12.5, 0.7, 0.8, Color::rgb(0.9, 0.3, 0.1), 3.0, "mars.jpg"),
    CelestialBody::new("Jupiter", 16.0, 1.8, 0.5, Color::rgb(0.9, 0.7, 0.5), 0.5, "jupiter.jpg"),
    CelestialBody::new("Saturn", 20.0, 1.4, 0.4, Color::rgb(0.9, 0.85, 0.6), 1.5, "saturn.jpg"),
    CelestialBody::new("Uranus", 24.0, 1.2, 0.3, Color::rgb(0.5, 0.9, 0.9), 2.5, "uranus.jpg"),
    CelestialBody::new("Neptune", 28.0, 1.1, 0.25, Color::rgb(0.3, 0.5, 1.0), 3.5, "neptune.jpg"),
];

/// The fixed set of bodies in the scene: the star first,
/// then the orbiting bodies from the innermost outward.
#[derive(Clone, Debug)]
pub struct Catalog {
    entries: [CelestialBody; ORBITING_COUNT + 1],
}

impl Catalog {
    pub fn new() -> Self {
        let mut entries = core::array::from_fn(|_| STAR);
        for (entry, body) in entries[1..].iter_mut().zip(ORBITING) {
            *entry = body;
        }
        Self { entries }
    }

    /// All bodies, star first.
    pub fn entries(&self) -> &[CelestialBody] {
        &self.entries
    }

    pub fn star(&self) -> &CelestialBody {
        &self.entries[0]
    }

    /// The orbiting bodies, excluding the star.
    pub fn orbiting(&self) -> &[CelestialBody] {
        &self.entries[1..]
    }

    pub fn is_ring_body(index: usize) -> bool {
        index == RING_BODY_INDEX
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_comes_first() {
        let catalog = Catalog::new();
        assert_eq!(catalog.entries().len(), 9);
        assert_eq!(catalog.star().name, "Sun");
        assert_eq!(catalog.star().orbit_radius, 0.0);
        assert_eq!(catalog.star().orbit_angular_speed, 0.0);
        assert_eq!(catalog.orbiting().len(), ORBITING_COUNT);
        assert_eq!(catalog.orbiting()[RING_BODY_INDEX].name, "Saturn");
    }

    #[test]
    fn orbits_grow_outward_and_slow_down() {
        let catalog = Catalog::new();
        let orbiting = catalog.orbiting();
        assert_eq!(orbiting.first().map(|b| b.orbit_radius), Some(5.0));
        assert_eq!(orbiting.last().map(|b| b.orbit_radius), Some(28.0));

        for pair in orbiting.windows(2) {
            assert!(pair[0].orbit_radius < pair[1].orbit_radius);
            assert!(pair[0].orbit_angular_speed > pair[1].orbit_angular_speed);
        }
    }

    #[test]
    fn catalog_starts_untextured() {
        let catalog = Catalog::new();
        assert!(catalog.entries().iter().all(|b| b.texture().is_none()));
    }
}
