use crate::error::{OrbitError, Result};
use crate::math::root_finding::{find_root_bracket, newton_plus_bisection};

pub fn mean_to_eccentric(mean_anomaly: f64, e: f64) -> Result<f64> {
    if !(0.0..1.0).contains(&e) {
        return Err(OrbitError::NoConvergence(format!(
            "eccentricity {} is not elliptic",
            e
        )));
    }

    // This doesn't have a closed form, so let's do some rootfinding
    let kepler = |x: f64| -> f64 { x - e * x.sin() - mean_anomaly };
    let kepler_der = |x: f64| -> f64 { 1.0 - e * x.cos() };

    // For a circle, E = M exactly and there's nothing to bracket
    if kepler(mean_anomaly) == 0.0 {
        return Ok(mean_anomaly);
    }

    let no_convergence = || {
        OrbitError::NoConvergence(format!(
            "Kepler's equation with M = {}, e = {}",
            mean_anomaly, e
        ))
    };
    let bracket = find_root_bracket(kepler, mean_anomaly, e + 0.1, 100).ok_or_else(no_convergence)?;
    newton_plus_bisection(|x| (kepler(x), kepler_der(x)), bracket, 100).ok_or_else(no_convergence)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use super::*;

    fn eccentric_to_mean(eccentric_anomaly: f64, e: f64) -> f64 {
        eccentric_anomaly - e * eccentric_anomaly.sin()
    }

    #[test]
    fn test_kepler_round_trip() {
        for &e in [0.0, 0.0001473, 0.1, 0.5, 0.9].iter() {
            for i in 0..12 {
                let mean = -PI + i as f64 * PI / 6.0 + 0.1;
                let eccentric = mean_to_eccentric(mean, e).unwrap();
                assert_relative_eq!(eccentric_to_mean(eccentric, e), mean, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn test_apsides_are_fixed_points() {
        for &e in [0.0, 0.3, 0.7].iter() {
            assert_abs_diff_eq!(mean_to_eccentric(0.0, e).unwrap(), 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(mean_to_eccentric(PI, e).unwrap(), PI, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_rejects_open_orbits() {
        assert!(mean_to_eccentric(1.0, 1.0).is_err());
        assert!(mean_to_eccentric(1.0, -0.1).is_err());
    }
}
