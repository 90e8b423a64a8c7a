//! Orbit-level analysis: sampled trajectories, the propagators that produce
//! them, node-crossing detection, and the pipeline that turns a design point
//! into orbital period, eclipse time, speed and slew angle.

pub mod crossing;
pub mod pipeline;
pub mod propagator;
pub mod state;

pub use crossing::{detect_crossings, CrossingEvent, OrbitSummary};
pub use pipeline::{DesignPoint, Fidelity, OrbitColumns, OrbitGeometryPipeline, OrbitSample};
pub use propagator::{KeplerPropagator, MeanElements, Propagator, Sgp4Propagator};
pub use state::{Axis, StateVector, Trajectory};
