use std::fs;
use std::path::Path;

use crate::config::SatelliteConfig;
use crate::error::{OrbitError, Result};

/// Reads a configuration file: one header line, then `name value` pairs, one
/// per line. Anything after a `#` is ignored. Settings that don't appear keep
/// their default values.
pub fn read_config(filename: impl AsRef<Path>) -> Result<SatelliteConfig> {
    let filename = filename.as_ref();
    let contents = fs::read_to_string(filename)
        .map_err(|e| OrbitError::Config(format!("{}: {}", filename.display(), e)))?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> Result<SatelliteConfig> {
    let mut config = SatelliteConfig::default();

    // Read lines, skipping header
    for (line_number, line) in contents.lines().enumerate().skip(1) {
        let line = match line.split('#').next() {
            Some(content) => content.trim(),
            None => continue,
        };
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split_ascii_whitespace();
        match (fields.next(), fields.next(), fields.next()) {
            (Some(name), Some(value), None) => config.set(name, value).map_err(|e| {
                OrbitError::Config(format!("line {}: {}", line_number + 1, e))
            })?,
            _ => {
                return Err(OrbitError::Config(format!(
                    "line {}: expected `name value`, got {:?}",
                    line_number + 1,
                    line
                )))
            }
        }
    }

    config.validate()?;
    Ok(config)
}
