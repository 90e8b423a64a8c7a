pub mod anomaly;
pub mod geometry;
pub mod intervals;
pub mod root_finding;
