pub mod config;
pub mod consts;
pub mod environment;
pub mod error;
pub mod file;
pub mod math;
pub mod orbit;
pub mod time;

pub use error::{OrbitError, Result};
