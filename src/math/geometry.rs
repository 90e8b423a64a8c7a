use nalgebra::{Rotation3, Vector3};

pub fn reject(u: &Vector3<f64>, v: &Vector3<f64>) -> Vector3<f64> {
    // Computes the vector rejection of u from v. v must be non-zero.
    let u_proj_v = u.dot(v) * v / v.norm_squared();
    u - u_proj_v
}

/// Sine of the (unsigned) angle between two vectors. Neither may be zero.
pub fn sin_angle(u: &Vector3<f64>, v: &Vector3<f64>) -> f64 {
    u.cross(v).norm() / (u.norm() * v.norm())
}

/// Arcsine that tolerates arguments a rounding error outside [-1, 1].
pub fn clamped_asin(x: f64) -> f64 {
    x.clamp(-1.0, 1.0).asin()
}

/// Rotation taking the perifocal frame (periapsis along x, orbit normal along
/// z) to the inertial frame.
pub fn rotation_from_angles(incl: f64, lan: f64, argp: f64) -> Rotation3<f64> {
    // We have an orbit in the xy plane where the periapsis is pointed along the
    // x-axis. So first, we rotate it around z until the periapsis is at argp
    // away from the x-axis (which will now be the ascending node). We then
    // rotate around x to get the inclination, and then one final turn around z
    // to get the correct longitude of the AN.
    Rotation3::from_axis_angle(&Vector3::z_axis(), lan)
        * Rotation3::from_axis_angle(&Vector3::x_axis(), incl)
        * Rotation3::from_axis_angle(&Vector3::z_axis(), argp)
}
