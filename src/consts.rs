use std::f64::consts::PI;

// Julian date of the J2000.0 epoch, 2000 January 1 12:00 TT
pub const J2000_JD: f64 = 2_451_545.0;
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;
pub const SECONDS_PER_DAY: f64 = 86_400.0;
pub const MINUTES_PER_DAY: f64 = 1_440.0;

pub const AU_KM: f64 = 149_597_870.7;

// WGS-84 equatorial radius
pub const EARTH_RADIUS_KM: f64 = 6_378.137;
pub const EARTH_MU_KM3_S2: f64 = 398_600.441_8;

pub fn get_circular_velocity(radius: f64, mu: f64) -> f64 {
    (mu / radius).sqrt()
}

pub fn get_period(a: f64, mu: f64) -> f64 {
    (4.0 * PI * PI * a.powi(3) / mu).sqrt()
}

/// Mean motion of a circular orbit of radius `a`, in radians per minute.
pub fn get_mean_motion(a: f64, mu: f64) -> f64 {
    (mu / a.powi(3)).sqrt() * 60.0
}
