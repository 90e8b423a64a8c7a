//! Named constants describing the central body, the reference orbit and the
//! sampling grid.

use std::f64::consts::PI;
use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::error::{OrbitError, Result};
use crate::orbit::propagator::MeanElements;
use crate::orbit::state::{sample_grid, Axis};
use crate::time::Calendar;

#[derive(Debug, Clone, PartialEq)]
pub struct SatelliteConfig {
    /// Radius of the central body, m
    pub radius: f64,
    /// Gravitational parameter, m^3/s^2
    pub mu: f64,
    /// Ground offset used for the slew angle when none is given, m
    pub ground_offset: f64,

    // Reference element set. Angles in degrees.
    pub epoch_year: i32,
    pub epoch_day: f64,
    pub inclination: f64,
    pub right_ascension: f64,
    pub eccentricity: f64,
    pub argument_of_perigee: f64,
    pub mean_anomaly: f64,

    /// Length of each propagation run, minutes
    pub span_minutes: f64,
    pub step_minutes: f64,
    pub crossing_axis: Axis,
}

impl Default for SatelliteConfig {
    fn default() -> Self {
        // Terra (NORAD 25994), epoch 2019-10-16
        SatelliteConfig {
            radius: 6_378_140.0,
            mu: 3.986e14,
            ground_offset: 235.0,
            epoch_year: 2019,
            epoch_day: 289.088_730_13,
            inclination: 98.1961,
            right_ascension: 1.7962,
            eccentricity: 0.000_147_3,
            argument_of_perigee: 92.0911,
            mean_anomaly: 268.0459,
            span_minutes: 1440.0,
            step_minutes: 1.0,
            crossing_axis: Axis::Y,
        }
    }
}

fn parse_value<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| OrbitError::Config(format!("can't parse {:?} as a value for {}", value, name)))
}

impl SatelliteConfig {
    /// Starts from the defaults and overrides each named value in turn.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Result<Self> {
        let mut config = SatelliteConfig::default();
        for (name, value) in pairs {
            config.set(name, value)?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "radius" | "RE" => self.radius = parse_value(name, value)?,
            "mu" => self.mu = parse_value(name, value)?,
            "ground_offset" | "phi" => self.ground_offset = parse_value(name, value)?,
            "epoch_year" => self.epoch_year = parse_value(name, value)?,
            "epoch_day" => self.epoch_day = parse_value(name, value)?,
            "inclination" => self.inclination = parse_value(name, value)?,
            "right_ascension" => self.right_ascension = parse_value(name, value)?,
            "eccentricity" => self.eccentricity = parse_value(name, value)?,
            "argument_of_perigee" => self.argument_of_perigee = parse_value(name, value)?,
            "mean_anomaly" => self.mean_anomaly = parse_value(name, value)?,
            "span_minutes" => self.span_minutes = parse_value(name, value)?,
            "step_minutes" => self.step_minutes = parse_value(name, value)?,
            "crossing_axis" => self.crossing_axis = value.parse()?,
            _ => return Err(OrbitError::Config(format!("unknown setting {:?}", name))),
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let check = |ok: bool, what: &str| {
            if ok {
                Ok(())
            } else {
                Err(OrbitError::Config(what.to_owned()))
            }
        };
        check(self.radius > 0.0, "radius must be positive")?;
        check(self.mu > 0.0, "mu must be positive")?;
        check(
            (0.0..1.0).contains(&self.eccentricity),
            "eccentricity must be in [0, 1)",
        )?;
        check(self.step_minutes > 0.0, "step_minutes must be positive")?;
        check(
            self.span_minutes >= self.step_minutes,
            "span_minutes must cover at least one step",
        )
    }

    /// Epoch of the reference element set.
    pub fn epoch(&self) -> Result<NaiveDateTime> {
        Calendar::from_day_of_year(self.epoch_year, self.epoch_day)?.to_datetime()
    }

    /// Offsets from the epoch, in minutes, at which each run is sampled.
    pub fn sample_minutes(&self) -> Vec<f64> {
        sample_grid(self.span_minutes, self.step_minutes)
    }

    /// The reference element set, flown at the given mean motion (rad/min).
    pub fn reference_elements(&self, mean_motion: f64) -> Result<MeanElements> {
        Ok(MeanElements {
            epoch: self.epoch()?,
            mean_motion,
            eccentricity: self.eccentricity,
            argument_of_perigee: self.argument_of_perigee.to_radians(),
            inclination: self.inclination.to_radians(),
            mean_anomaly: self.mean_anomaly.to_radians(),
            right_ascension: self.right_ascension.to_radians(),
        })
    }

    /// Mean motion (rad/min) of a circular orbit at `altitude` meters.
    pub fn mean_motion_at(&self, altitude: f64) -> f64 {
        let a = self.radius + altitude;
        (self.mu / a.powi(3)).sqrt() * 60.0
    }

    /// Period (s) of a circular orbit at `altitude` meters.
    pub fn circular_period(&self, altitude: f64) -> f64 {
        2.0 * PI * 60.0 / self.mean_motion_at(altitude)
    }
}
