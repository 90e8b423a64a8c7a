//! Orbit geometry for a batch of design points.
//!
//! Each design point is a mean altitude plus the ground offset used for the
//! slew angle. The low-fidelity path is closed-form circular-orbit geometry;
//! the high-fidelity path flies the reference element set at that altitude
//! through a propagator and measures the result.

use std::f64::consts::PI;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::crossing::OrbitCrossings;
use super::propagator::{propagate_grid, Propagator, Sgp4Propagator};
use super::state::mean;
use crate::config::SatelliteConfig;
use crate::environment::illumination::CylindricalShadow;
use crate::error::{OrbitError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fidelity {
    Low,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DesignPoint {
    /// Mean altitude above the central body, m
    pub altitude: f64,
    /// Ground offset, m
    pub ground_offset: f64,
}

impl DesignPoint {
    pub fn new(altitude: f64, ground_offset: f64) -> Self {
        DesignPoint {
            altitude,
            ground_offset,
        }
    }

    /// A design point at the configured ground offset.
    pub fn nominal(altitude: f64, config: &SatelliteConfig) -> Self {
        DesignPoint::new(altitude, config.ground_offset)
    }
}

/// Pairs up altitudes with ground offsets. Without offsets, every point gets
/// the configured one.
pub fn design_points(
    altitudes: &[f64],
    offsets: Option<&[f64]>,
    config: &SatelliteConfig,
) -> Result<Vec<DesignPoint>> {
    match offsets {
        None => Ok(altitudes
            .iter()
            .map(|&h| DesignPoint::nominal(h, config))
            .collect()),
        Some(offsets) if offsets.len() == altitudes.len() => Ok(altitudes
            .iter()
            .zip(offsets)
            .map(|(&h, &phi)| DesignPoint::new(h, phi))
            .collect()),
        Some(offsets) => Err(OrbitError::LengthMismatch {
            altitudes: altitudes.len(),
            offsets: offsets.len(),
        }),
    }
}

/// Geometry of one design point. All SI: m/s, s, s, rad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSample {
    pub speed: f64,
    pub period: f64,
    /// Mean time in shadow per orbit
    pub eclipse: f64,
    pub slew: f64,
}

/// Column-wise results, one entry per design point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrbitColumns {
    pub speed: Vec<f64>,
    pub period: Vec<f64>,
    pub eclipse: Vec<f64>,
    pub slew: Vec<f64>,
}

impl OrbitColumns {
    pub fn len(&self) -> usize {
        self.speed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.speed.is_empty()
    }

    pub fn push(&mut self, sample: OrbitSample) {
        self.speed.push(sample.speed);
        self.period.push(sample.period);
        self.eclipse.push(sample.eclipse);
        self.slew.push(sample.slew);
    }
}

impl FromIterator<OrbitSample> for OrbitColumns {
    fn from_iter<I: IntoIterator<Item = OrbitSample>>(iter: I) -> Self {
        let mut columns = OrbitColumns::default();
        for sample in iter {
            columns.push(sample);
        }
        columns
    }
}

/// Angle subtended at the satellite by a ground offset `phi`, for a satellite
/// at `altitude` above a sphere of the given radius.
pub fn slew_angle(phi: f64, altitude: f64, radius: f64) -> f64 {
    let central = phi / radius;
    (central.sin() / (1.0 - central.cos() + altitude / radius)).atan()
}

pub struct OrbitGeometryPipeline<P> {
    config: SatelliteConfig,
    propagator: P,
}

impl OrbitGeometryPipeline<Sgp4Propagator> {
    pub fn with_sgp4(config: SatelliteConfig) -> Self {
        OrbitGeometryPipeline::new(config, Sgp4Propagator)
    }
}

impl<P: Propagator> OrbitGeometryPipeline<P> {
    pub fn new(config: SatelliteConfig, propagator: P) -> Self {
        OrbitGeometryPipeline { config, propagator }
    }

    pub fn config(&self) -> &SatelliteConfig {
        &self.config
    }

    pub fn propagator(&self) -> &P {
        &self.propagator
    }

    pub fn evaluate(&self, point: &DesignPoint, fidelity: Fidelity) -> Result<OrbitSample> {
        let sample = match fidelity {
            Fidelity::Low => Ok(self.low_fidelity(point)),
            Fidelity::High => self.high_fidelity(point),
        };
        match &sample {
            Ok(s) => debug!(
                altitude = point.altitude,
                ?fidelity,
                period = s.period,
                eclipse = s.eclipse,
                "evaluated design point"
            ),
            Err(e) => warn!(
                altitude = point.altitude,
                ?fidelity,
                error = %e,
                "design point is invalid"
            ),
        }
        sample
    }

    /// Circular orbit, Earth shadow as a cylinder, satellite directly over
    /// the anti-solar point.
    fn low_fidelity(&self, point: &DesignPoint) -> OrbitSample {
        let radius = self.config.radius;
        let a = radius + point.altitude;

        let speed = (self.config.mu / a).sqrt();
        let period = 2.0 * PI * a / speed;
        let eclipse = period / PI * (radius / a).asin();

        OrbitSample {
            speed,
            period,
            eclipse,
            slew: slew_angle(point.ground_offset, point.altitude, radius),
        }
    }

    fn high_fidelity(&self, point: &DesignPoint) -> Result<OrbitSample> {
        let config = &self.config;
        let radius = config.radius;

        let elements = config.reference_elements(config.mean_motion_at(point.altitude))?;
        let trajectory = propagate_grid(&self.propagator, &elements, &config.sample_minutes())?;

        // Positions come back in km
        let shadow = CylindricalShadow::with_radius(radius / 1000.0);
        let summary = OrbitCrossings::analyze(&trajectory, config.crossing_axis, &shadow)?;

        let slew = mean(trajectory.states().iter().map(|s| {
            let altitude = s.position.norm() * 1000.0 - radius;
            slew_angle(point.ground_offset, altitude, radius)
        }));

        Ok(OrbitSample {
            speed: trajectory.mean_speed() * 1000.0,
            period: summary.period,
            eclipse: summary.eclipse,
            slew,
        })
    }

    /// Evaluates each point independently, keeping the input order. The
    /// high-fidelity path runs on the rayon thread pool.
    pub fn evaluate_batch(
        &self,
        points: &[DesignPoint],
        fidelity: Fidelity,
    ) -> Vec<Result<OrbitSample>>
    where
        P: Sync,
    {
        info!(count = points.len(), ?fidelity, "evaluating design points");
        match fidelity {
            Fidelity::Low => points.iter().map(|p| self.evaluate(p, fidelity)).collect(),
            Fidelity::High => points
                .par_iter()
                .map(|p| self.evaluate(p, fidelity))
                .collect(),
        }
    }

    /// Like `evaluate_batch`, but split into columns. Any invalid sample
    /// fails the whole batch.
    pub fn evaluate_columns(
        &self,
        points: &[DesignPoint],
        fidelity: Fidelity,
    ) -> Result<OrbitColumns>
    where
        P: Sync,
    {
        self.evaluate_batch(points, fidelity)
            .into_iter()
            .enumerate()
            .map(|(index, sample)| {
                sample.map_err(|e| OrbitError::Sample {
                    index,
                    source: Box::new(e),
                })
            })
            .collect()
    }
}
