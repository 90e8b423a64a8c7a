use std::str::FromStr;

use nalgebra::Vector3;

use crate::error::{OrbitError, Result};
use crate::time::{julian_dates_since, JulianDate};

/// Inertial position (km) and velocity (km/s).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
}

impl StateVector {
    pub fn new(position: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        StateVector { position, velocity }
    }
}

/// One of the inertial coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

impl FromStr for Axis {
    type Err = OrbitError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "x" | "0" => Ok(Axis::X),
            "y" | "1" => Ok(Axis::Y),
            "z" | "2" => Ok(Axis::Z),
            _ => Err(OrbitError::Config(format!("unknown axis {:?}", s))),
        }
    }
}

/// Evenly spaced sample offsets `0, step, 2 step, ...` up to and including
/// `span` (when `span` is a whole number of steps).
pub fn sample_grid(span: f64, step: f64) -> Vec<f64> {
    let num_steps = (span / step).round() as usize;
    (0..=num_steps).map(|i| i as f64 * step).collect()
}

/// The output of one propagation run: states sampled at a list of offsets
/// (in minutes) from an epoch.
#[derive(Debug, Clone)]
pub struct Trajectory {
    epoch: JulianDate,
    minutes: Vec<f64>,
    states: Vec<StateVector>,
}

impl Trajectory {
    /// Every sample time needs exactly one state.
    pub fn new(epoch: JulianDate, minutes: Vec<f64>, states: Vec<StateVector>) -> Result<Self> {
        if minutes.len() != states.len() {
            return Err(OrbitError::TrajectoryShape {
                times: minutes.len(),
                states: states.len(),
            });
        }
        Ok(Trajectory {
            epoch,
            minutes,
            states,
        })
    }

    pub fn epoch(&self) -> JulianDate {
        self.epoch
    }

    pub fn minutes(&self) -> &[f64] {
        &self.minutes
    }

    pub fn states(&self) -> &[StateVector] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// One coordinate of every sampled position.
    pub fn axis_values(&self, axis: Axis) -> Vec<f64> {
        self.states.iter().map(|s| s.position[axis.index()]).collect()
    }

    /// The continuous-time value of every sample.
    pub fn sample_times(&self) -> Vec<JulianDate> {
        julian_dates_since(self.epoch, &self.minutes)
    }

    /// Average of the speed over all samples, in km/s. Samples are weighted
    /// equally, whatever their spacing.
    pub fn mean_speed(&self) -> f64 {
        mean(self.states.iter().map(|s| s.velocity.norm()))
    }
}

/// Arithmetic mean; NaN for an empty iterator.
pub(crate) fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), x| (sum + x, count + 1));
    sum / count as f64
}
