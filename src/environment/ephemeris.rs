//! Low-precision analytic solar ephemeris (Vallado, algorithm 29). Good to
//! about 0.01 degrees between 1950 and 2050, which is plenty for deciding
//! whether a satellite is in shadow.

use nalgebra::Vector3;

use crate::consts::AU_KM;
use crate::time::JulianDate;

/// Reduces an angle in degrees to [0, 360).
fn wrap_degrees(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

/// Position of the Sun relative to the Earth's center, in the mean-equator
/// inertial frame, in km.
pub fn sun_position(t: JulianDate) -> Vector3<f64> {
    // UT1 stands in for TDB; the difference is well below this model's accuracy
    let centuries = t.j2000_centuries();

    let mean_longitude = wrap_degrees(280.460_618_4 + 36_000.770_053_61 * centuries);
    let mean_anomaly = wrap_degrees(357.527_723_3 + 35_999.050_34 * centuries).to_radians();

    let ecliptic_longitude = wrap_degrees(
        mean_longitude
            + 1.914_666_471 * mean_anomaly.sin()
            + 0.019_994_643 * (2.0 * mean_anomaly).sin(),
    )
    .to_radians();
    let distance_au = 1.000_140_612
        - 0.016_708_617 * mean_anomaly.cos()
        - 0.000_139_589 * (2.0 * mean_anomaly).cos();
    let obliquity = (23.439_291 - 0.013_004_2 * centuries).to_radians();

    let (sin_lambda, cos_lambda) = ecliptic_longitude.sin_cos();
    let (sin_eps, cos_eps) = obliquity.sin_cos();

    Vector3::new(cos_lambda, cos_eps * sin_lambda, sin_eps * sin_lambda) * (distance_au * AU_KM)
}

pub fn sun_positions(times: &[JulianDate]) -> Vec<Vector3<f64>> {
    times.iter().map(|&t| sun_position(t)).collect()
}
