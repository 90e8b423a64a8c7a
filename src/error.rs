use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrbitError {
    #[error("found {found} ascending node crossing(s); at least 2 are needed to estimate a period")]
    InsufficientCrossings { found: usize },

    #[error("year {year} is outside the supported calendar range 1900-2100")]
    CalendarRange { year: i32 },

    #[error("invalid calendar field: {0}")]
    InvalidCalendar(String),

    #[error("propagation failed: {0}")]
    Propagation(String),

    #[error("root finder did not converge: {0}")]
    NoConvergence(String),

    #[error("bad configuration: {0}")]
    Config(String),

    #[error("got {times} sample time(s) but {states} state(s)")]
    TrajectoryShape { times: usize, states: usize },

    #[error("got {altitudes} altitude(s) but {offsets} ground offset(s)")]
    LengthMismatch { altitudes: usize, offsets: usize },

    #[error("sample {index} is invalid: {source}")]
    Sample {
        index: usize,
        #[source]
        source: Box<OrbitError>,
    },
}

pub type Result<T> = std::result::Result<T, OrbitError>;
