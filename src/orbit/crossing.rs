//! Orbit boundaries from node crossings.
//!
//! An orbit starts each time the chosen position coordinate goes from
//! negative to positive. Successive crossings give the orbital periods, and
//! the samples between two crossings give that orbit's eclipse fraction.

use tracing::debug;

use super::state::{mean, Axis, Trajectory};
use crate::environment::ephemeris::sun_position;
use crate::environment::illumination::CylindricalShadow;
use crate::error::{OrbitError, Result};
use crate::math::root_finding::linear_root;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossingEvent {
    /// Index of the last sample before the crossing
    pub index: usize,
    /// Interpolated crossing time, minutes since the trajectory epoch
    pub minutes: f64,
}

/// Finds every negative-to-positive sign change in `values`. A sample that
/// is exactly zero never counts as one side of a crossing.
pub fn detect_crossings(minutes: &[f64], values: &[f64]) -> Vec<CrossingEvent> {
    debug_assert_eq!(minutes.len(), values.len());
    minutes
        .windows(2)
        .zip(values.windows(2))
        .enumerate()
        .filter(|(_, (_, v))| v[0] * v[1] < 0.0 && v[0] < v[1])
        .map(|(index, (t, v))| CrossingEvent {
            index,
            minutes: linear_root(t[0], v[0], t[1], v[1]),
        })
        .collect()
}

fn require_two(crossings: &[CrossingEvent]) -> Result<()> {
    if crossings.len() < 2 {
        return Err(OrbitError::InsufficientCrossings {
            found: crossings.len(),
        });
    }
    Ok(())
}

/// Time between consecutive crossings, in minutes.
pub fn orbit_periods(crossings: &[CrossingEvent]) -> Result<Vec<f64>> {
    require_two(crossings)?;
    Ok(crossings
        .windows(2)
        .map(|w| w[1].minutes - w[0].minutes)
        .collect())
}

/// Average period, in minutes.
pub fn mean_period(crossings: &[CrossingEvent]) -> Result<f64> {
    Ok(mean(orbit_periods(crossings)?.into_iter()))
}

/// Fraction of the samples of each orbit that are not illuminated.
///
/// Orbit `k` covers samples `crossings[k].index` up to, but not including,
/// `crossings[k + 1].index`. Every sample counts equally, whatever its
/// spacing in time.
pub fn eclipse_fractions(
    trajectory: &Trajectory,
    crossings: &[CrossingEvent],
    shadow: &CylindricalShadow,
) -> Result<Vec<f64>> {
    require_two(crossings)?;

    let times = trajectory.sample_times();
    let states = trajectory.states();
    let lit: Vec<bool> = (crossings[0].index..crossings[crossings.len() - 1].index)
        .map(|j| shadow.is_illuminated(&states[j].position, &sun_position(times[j])))
        .collect();

    let first = crossings[0].index;
    Ok(crossings
        .windows(2)
        .map(|w| {
            let (start, end) = (w[0].index, w[1].index);
            let num_lit = lit[start - first..end - first].iter().filter(|&&x| x).count();
            1.0 - num_lit as f64 / (end - start) as f64
        })
        .collect())
}

/// Everything the crossings say about one trajectory.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitSummary {
    pub crossings: Vec<CrossingEvent>,
    /// Mean orbital period, seconds
    pub period: f64,
    pub eclipse_fractions: Vec<f64>,
    /// Mean eclipse duration per orbit, seconds
    pub eclipse: f64,
}

pub struct OrbitCrossings;

impl OrbitCrossings {
    pub fn analyze(
        trajectory: &Trajectory,
        axis: Axis,
        shadow: &CylindricalShadow,
    ) -> Result<OrbitSummary> {
        let crossings = detect_crossings(trajectory.minutes(), &trajectory.axis_values(axis));
        debug!(count = crossings.len(), ?axis, "detected node crossings");

        let period = mean_period(&crossings)? * 60.0;
        let eclipse_fractions = eclipse_fractions(trajectory, &crossings, shadow)?;
        let eclipse = mean(eclipse_fractions.iter().copied()) * period;

        Ok(OrbitSummary {
            crossings,
            period,
            eclipse_fractions,
            eclipse,
        })
    }
}
