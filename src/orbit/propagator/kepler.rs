use std::f64::consts::PI;

use nalgebra::{Rotation3, Vector3};

use super::{MeanElements, Propagator};
use crate::consts::EARTH_MU_KM3_S2;
use crate::error::Result;
use crate::math::anomaly::mean_to_eccentric;
use crate::math::geometry::rotation_from_angles;
use crate::orbit::state::StateVector;

/// Unperturbed two-body motion around a point mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerPropagator {
    /// Gravitational parameter, km^3/s^2
    pub mu_km: f64,
}

impl Default for KeplerPropagator {
    fn default() -> Self {
        KeplerPropagator {
            mu_km: EARTH_MU_KM3_S2,
        }
    }
}

impl KeplerPropagator {
    pub fn with_mu(mu_km: f64) -> Self {
        KeplerPropagator { mu_km }
    }
}

/// The fixed shape and orientation of a Keplerian ellipse.
#[derive(Debug, Clone, Copy)]
pub struct KeplerOrbit {
    rotation: Rotation3<f64>,
    semimajor_axis: f64,
    eccentricity: f64,
    mean_anomaly_at_epoch: f64,
    // rad/min
    mean_motion: f64,
}

impl KeplerOrbit {
    pub fn semimajor_axis(&self) -> f64 {
        self.semimajor_axis
    }

    /// Period in minutes.
    pub fn period(&self) -> f64 {
        2.0 * PI / self.mean_motion
    }
}

impl Propagator for KeplerPropagator {
    type State = KeplerOrbit;

    fn initialize(&self, elements: &MeanElements) -> Result<Self::State> {
        let n_per_sec = elements.mean_motion / 60.0;
        Ok(KeplerOrbit {
            rotation: rotation_from_angles(
                elements.inclination,
                elements.right_ascension,
                elements.argument_of_perigee,
            ),
            semimajor_axis: (self.mu_km / (n_per_sec * n_per_sec)).cbrt(),
            eccentricity: elements.eccentricity,
            mean_anomaly_at_epoch: elements.mean_anomaly,
            mean_motion: elements.mean_motion,
        })
    }

    fn propagate(&self, orbit: &Self::State, minutes: f64) -> Result<StateVector> {
        let a = orbit.semimajor_axis;
        let e = orbit.eccentricity;

        // Keep M in [-pi, pi) so the root finder starts close
        let mean_anomaly =
            (orbit.mean_anomaly_at_epoch + orbit.mean_motion * minutes + PI).rem_euclid(2.0 * PI)
                - PI;
        let ecc_anomaly = mean_to_eccentric(mean_anomaly, e)?;

        let (sin_e, cos_e) = ecc_anomaly.sin_cos();
        let b_over_a = (1.0 - e * e).sqrt();
        let radius = a * (1.0 - e * cos_e);

        // Perifocal frame, then rotate into place
        let position = Vector3::new(a * (cos_e - e), a * b_over_a * sin_e, 0.0);
        let velocity =
            Vector3::new(-sin_e, b_over_a * cos_e, 0.0) * ((self.mu_km * a).sqrt() / radius);

        Ok(StateVector::new(
            orbit.rotation * position,
            orbit.rotation * velocity,
        ))
    }
}
