use std::f64::consts::PI;

use nalgebra::Vector3;

use super::{MeanElements, Propagator};
use crate::consts::MINUTES_PER_DAY;
use crate::error::{OrbitError, Result};
use crate::orbit::state::StateVector;

/// SGP4/SDP4 via the `sgp4` crate. Drag terms are zero: the elements come
/// from a design study rather than a tracked object.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sgp4Propagator;

impl Propagator for Sgp4Propagator {
    type State = sgp4::Constants;

    fn initialize(&self, elements: &MeanElements) -> Result<Self::State> {
        let tle = sgp4::Elements {
            object_name: None,
            international_designator: None,
            norad_id: 0,
            classification: sgp4::Classification::Unclassified,
            datetime: elements.epoch,
            mean_motion_dot: 0.0,
            mean_motion_ddot: 0.0,
            drag_term: 0.0,
            element_set_number: 0,
            inclination: elements.inclination.to_degrees(),
            right_ascension: elements.right_ascension.to_degrees(),
            eccentricity: elements.eccentricity,
            argument_of_perigee: elements.argument_of_perigee.to_degrees(),
            mean_anomaly: elements.mean_anomaly.to_degrees(),
            // rad/min -> rev/day
            mean_motion: elements.mean_motion * MINUTES_PER_DAY / (2.0 * PI),
            revolution_number: 0,
            ephemeris_type: 0,
        };

        sgp4::Constants::from_elements(&tle)
            .map_err(|e| OrbitError::Propagation(format!("{:?}", e)))
    }

    fn propagate(&self, state: &Self::State, minutes: f64) -> Result<StateVector> {
        let prediction = state
            .propagate(sgp4::MinutesSinceEpoch(minutes))
            .map_err(|e| OrbitError::Propagation(format!("at t = {} min: {:?}", minutes, e)))?;

        Ok(StateVector::new(
            Vector3::from(prediction.position),
            Vector3::from(prediction.velocity),
        ))
    }
}
