//! Cylindrical-shadow eclipse test (Vallado, algorithm 74).
//!
//! The Earth is taken to cast a shadow that is an infinite cylinder of its
//! own radius, pointing away from the Sun. There's no penumbra and no
//! oblateness.
//!
//! The sun-satellite angle comes from an arcsine, so it lives in [0, 90]
//! degrees and doesn't distinguish the day side from the night side. A
//! satellite close to the Sun-Earth line on the sunward side is therefore
//! also reported as not illuminated. Eclipse statistics downstream are
//! calibrated against exactly this behavior.

use std::f64::consts::FRAC_PI_2;

use nalgebra::Vector3;

use crate::consts::EARTH_RADIUS_KM;
use crate::math::geometry::{clamped_asin, sin_angle};

/// Angle (radians) between the satellite and Sun position vectors, both
/// measured from the Earth's center.
pub fn sun_sat_angle(sat: &Vector3<f64>, sun: &Vector3<f64>) -> f64 {
    // Rounding can push the ratio just past 1 for (anti)parallel vectors
    clamped_asin(sin_angle(sun, sat))
}

/// Distance of the satellite from the Sun-Earth line, given the
/// sun-satellite angle.
pub fn orthogonal_distance(sat: &Vector3<f64>, zeta: f64) -> f64 {
    sat.norm() * (zeta - FRAC_PI_2).cos()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylindricalShadow {
    /// Radius of the shadowing body, in the same units as the positions
    pub radius: f64,
}

impl Default for CylindricalShadow {
    fn default() -> Self {
        CylindricalShadow {
            radius: EARTH_RADIUS_KM,
        }
    }
}

impl CylindricalShadow {
    pub fn with_radius(radius: f64) -> Self {
        CylindricalShadow { radius }
    }

    pub fn is_illuminated(&self, sat: &Vector3<f64>, sun: &Vector3<f64>) -> bool {
        let zeta = sun_sat_angle(sat, sun);
        orthogonal_distance(sat, zeta) > self.radius
    }

    /// Tests each satellite position against the Sun position in the same
    /// row.
    pub fn illuminated(&self, sats: &[Vector3<f64>], suns: &[Vector3<f64>]) -> Vec<bool> {
        debug_assert_eq!(sats.len(), suns.len());
        sats.iter()
            .zip(suns)
            .map(|(sat, sun)| self.is_illuminated(sat, sun))
            .collect()
    }
}

/// Illumination against the Earth's shadow.
pub fn is_illuminated(sat: &Vector3<f64>, sun: &Vector3<f64>) -> bool {
    CylindricalShadow::default().is_illuminated(sat, sun)
}
