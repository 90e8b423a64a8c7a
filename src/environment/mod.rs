//! The space environment seen by the satellite: upper-atmosphere density,
//! where the Sun is, and whether the Earth is in the way.

pub mod atmosphere;
pub mod ephemeris;
pub mod illumination;

pub use atmosphere::{density, densities, AtmosphereLayer};
pub use ephemeris::{sun_position, sun_positions};
pub use illumination::{is_illuminated, CylindricalShadow};
