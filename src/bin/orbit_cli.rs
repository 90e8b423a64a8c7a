use std::path::PathBuf;
use std::process;

use sat_orbit::config::SatelliteConfig;
use sat_orbit::file::read_config;
use sat_orbit::orbit::pipeline::design_points;
use sat_orbit::orbit::{Fidelity, OrbitGeometryPipeline};

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FidelityArg {
    Low,
    High,
}

impl From<FidelityArg> for Fidelity {
    fn from(arg: FidelityArg) -> Self {
        match arg {
            FidelityArg::Low => Fidelity::Low,
            FidelityArg::High => Fidelity::High,
        }
    }
}

/// Orbital period, eclipse time, speed and slew angle for circular orbits at
/// the given altitudes.
#[derive(Debug, Parser)]
struct Args {
    /// Mean altitude above the surface, in meters
    #[arg(long = "altitude", required = true, num_args = 1..)]
    altitudes: Vec<f64>,

    /// Ground offset for the slew angle, in meters; one per altitude
    #[arg(long = "offset", num_args = 1..)]
    offsets: Vec<f64>,

    #[arg(long, value_enum, default_value_t = FidelityArg::Low)]
    fidelity: FidelityArg,

    /// Settings file; defaults are used for anything it leaves out
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => read_config(path),
        None => Ok(SatelliteConfig::default()),
    };
    let config = config.unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        process::exit(1);
    });

    let offsets = if args.offsets.is_empty() {
        None
    } else {
        Some(args.offsets.as_slice())
    };
    let points = design_points(&args.altitudes, offsets, &config).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        process::exit(1);
    });

    let pipeline = OrbitGeometryPipeline::with_sgp4(config);
    let results = pipeline.evaluate_batch(&points, args.fidelity.into());

    println!("altitude_m\tspeed_m_s\tperiod_s\teclipse_s\tslew_rad");
    let mut failed = false;
    for (point, result) in points.iter().zip(results) {
        match result {
            Ok(sample) => println!(
                "{}\t{:.3}\t{:.3}\t{:.3}\t{:.6e}",
                point.altitude, sample.speed, sample.period, sample.eclipse, sample.slew
            ),
            Err(e) => {
                println!("{}\tinvalid: {}", point.altitude, e);
                failed = true;
            }
        }
    }

    if failed {
        process::exit(2);
    }
}
