//! Propagators turn a set of mean orbital elements into states at arbitrary
//! offsets from the element epoch.

use chrono::NaiveDateTime;
use tracing::debug;

use super::state::{StateVector, Trajectory};
use crate::error::Result;
use crate::time::JulianDate;

mod kepler;
mod sgp4_propagator;

pub use kepler::{KeplerOrbit, KeplerPropagator};
pub use sgp4_propagator::Sgp4Propagator;

/// Mean orbital elements at an epoch. Angles are in radians and the mean
/// motion is in radians per minute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanElements {
    pub epoch: NaiveDateTime,
    pub mean_motion: f64,
    pub eccentricity: f64,
    pub argument_of_perigee: f64,
    pub inclination: f64,
    pub mean_anomaly: f64,
    pub right_ascension: f64,
}

pub trait Propagator {
    /// Whatever the backend precomputes from the elements.
    type State;

    fn initialize(&self, elements: &MeanElements) -> Result<Self::State>;

    /// State at `minutes` after the element epoch.
    fn propagate(&self, state: &Self::State, minutes: f64) -> Result<StateVector>;
}

/// Propagates the elements to every offset in `minutes` and collects the
/// result. The first failing sample aborts the run.
pub fn propagate_grid<P: Propagator + ?Sized>(
    propagator: &P,
    elements: &MeanElements,
    minutes: &[f64],
) -> Result<Trajectory> {
    let epoch = JulianDate::from_datetime(&elements.epoch)?;
    let state = propagator.initialize(elements)?;
    let states = minutes
        .iter()
        .map(|&t| propagator.propagate(&state, t))
        .collect::<Result<Vec<_>>>()?;

    debug!(samples = states.len(), epoch = %elements.epoch, "propagated grid");
    Trajectory::new(epoch, minutes.to_vec(), states)
}
