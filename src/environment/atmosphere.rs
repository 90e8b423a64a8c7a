//! Piecewise-exponential density model.
//!
//! Density within each layer falls off as `rho_0 * exp(-(h - h_0) / H)`,
//! where `H` is the layer's scale height. Layer parameters are from Wertz
//! (1978), as tabulated in Vallado p. 565, eq. 8-33: US Standard Atmosphere
//! below 25 km, CIRA-72 up to 500 km and CIRA-72 with an exospheric
//! temperature of 1000 K above that. Only the 150-1000 km rows are kept.

use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtmosphereLayer {
    /// Altitude of the bottom of the layer, in km
    pub base_altitude: f64,
    /// Density at `base_altitude`, in kg/m^3
    pub base_density: f64,
    /// Scale height, in km
    pub scale_height: f64,
}

const fn layer(base_altitude: f64, base_density: f64, scale_height: f64) -> AtmosphereLayer {
    AtmosphereLayer {
        base_altitude,
        base_density,
        scale_height,
    }
}

/// Sorted by base altitude.
pub static WERTZ_1978: [AtmosphereLayer; 14] = [
    layer(150.0, 2.070e-09, 22.523),
    layer(180.0, 5.464e-10, 29.740),
    layer(200.0, 2.789e-10, 37.105),
    layer(250.0, 7.248e-11, 45.546),
    layer(300.0, 2.418e-11, 53.628),
    layer(350.0, 9.518e-12, 53.298),
    layer(400.0, 3.725e-12, 58.515),
    layer(450.0, 1.585e-12, 60.828),
    layer(500.0, 6.967e-13, 63.822),
    layer(600.0, 1.454e-13, 71.835),
    layer(700.0, 3.614e-14, 88.667),
    layer(800.0, 1.170e-14, 124.640),
    layer(900.0, 5.245e-15, 181.050),
    layer(1000.0, 3.019e-15, 268.000),
];

const TABLE_FLOOR_KM: f64 = 150.0;
const TABLE_CEILING_KM: f64 = 1000.0;

impl AtmosphereLayer {
    pub fn density_at(&self, altitude: f64) -> f64 {
        self.base_density * (-(altitude - self.base_altitude) / self.scale_height).exp()
    }
}

/// Finds the layer whose base is the highest one at or below `altitude`.
/// Altitudes under the table use the bottom layer, and altitudes over it use
/// the top one.
pub fn layer_for(altitude: f64) -> &'static AtmosphereLayer {
    // Equivalent to a right-sided binary search, minus one
    let above = WERTZ_1978.partition_point(|layer| layer.base_altitude <= altitude);
    &WERTZ_1978[above.saturating_sub(1)]
}

/// Atmospheric density (kg/m^3) at a height (km) above the ellipsoid.
pub fn density(altitude: f64) -> f64 {
    if !(TABLE_FLOOR_KM..=TABLE_CEILING_KM).contains(&altitude) {
        warn!(
            altitude,
            "altitude outside the {}-{} km density table, extrapolating from the nearest layer",
            TABLE_FLOOR_KM,
            TABLE_CEILING_KM
        );
    }
    layer_for(altitude).density_at(altitude)
}

pub fn densities(altitudes: &[f64]) -> Vec<f64> {
    altitudes.iter().map(|&h| density(h)).collect()
}
