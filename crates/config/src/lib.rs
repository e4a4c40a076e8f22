//! Configuration models and loaders for the Staged Ascent Simulator.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Stage configuration parsed from rocket catalogs.
///
/// Every physical field defaults to zero so a catalog only states what a
/// stage actually has; an unpowered interstage omits the engine fields
/// entirely.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct StageConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub dry_mass_kg: f64,
    #[serde(default)]
    pub fuel_mass_kg: f64,
    #[serde(default)]
    pub max_thrust_n: f64,
    #[serde(default)]
    pub max_dmdt_kg_s: f64,
    #[serde(default)]
    pub length_m: f64,
}

/// Payload configuration parsed from rocket catalogs.
#[derive(Debug, Deserialize, Clone)]
pub struct PayloadConfig {
    #[serde(default)]
    pub name: Option<String>,
    pub mass_kg: f64,
}

/// Rocket configuration: aerodynamic constants plus the component manifests.
/// Stages are listed in staging order; the first entry lights first.
#[derive(Debug, Deserialize, Clone)]
pub struct RocketConfig {
    pub name: String,
    pub coeff_drag: f64,
    pub cross_sec_area_m2: f64,
    #[serde(default)]
    pub stages: Vec<StageConfig>,
    #[serde(default)]
    pub srbs: Vec<StageConfig>,
    #[serde(default)]
    pub payloads: Vec<PayloadConfig>,
}

/// Launch body configuration for the reference flight driver.
#[derive(Debug, Deserialize, Clone)]
pub struct BodyConfig {
    pub name: String,
    pub surface_gravity_m_s2: f64,
    pub radius_m: f64,
    pub atmosphere: Option<AtmosphereConfig>,
}

/// Exponential-atmosphere metadata for drag calculations.
#[derive(Debug, Deserialize, Clone)]
pub struct AtmosphereConfig {
    pub surface_density_kg_m3: f64,
    pub scale_height_m: f64,
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Load rocket configurations from a YAML file, a TOML file, or a directory
/// of TOML files (one rocket per file).
pub fn load_rockets<P: AsRef<Path>>(path: P) -> Result<Vec<RocketConfig>, ConfigError> {
    load_records(path)
}

/// Load launch body configurations. Accepts the same path forms as
/// [`load_rockets`].
pub fn load_bodies<P: AsRef<Path>>(path: P) -> Result<Vec<BodyConfig>, ConfigError> {
    load_records(path)
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
