//! Catalog-to-runtime assembly: turn configuration records into live rockets.

use std::path::Path;

use ascent_config::{BodyConfig, ConfigError, RocketConfig};
use ascent_core::vector;
use ascent_vehicle::{Payload, PayloadError, Rocket, RocketError, Stage, StageError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("rocket '{0}' not found in catalog")]
    RocketNotFound(String),
    #[error("body '{0}' not found in catalog")]
    BodyNotFound(String),
    #[error("catalog is empty")]
    EmptyCatalog,
    #[error(transparent)]
    Rocket(#[from] RocketError),
    #[error(transparent)]
    Stage(#[from] StageError),
    #[error(transparent)]
    Payload(#[from] PayloadError),
}

/// Load rocket configurations from a catalog path (YAML file, TOML file, or
/// directory of TOML files).
pub fn load_rockets<P: AsRef<Path>>(path: P) -> Result<Vec<RocketConfig>, ScenarioError> {
    Ok(ascent_config::load_rockets(path)?)
}

/// Load launch body configurations from a catalog path.
pub fn load_bodies<P: AsRef<Path>>(path: P) -> Result<Vec<BodyConfig>, ScenarioError> {
    Ok(ascent_config::load_bodies(path)?)
}

/// Select a rocket from the catalog by case-insensitive name.
pub fn select_rocket<'a>(
    configs: &'a [RocketConfig],
    name: &str,
) -> Result<&'a RocketConfig, ScenarioError> {
    if configs.is_empty() {
        return Err(ScenarioError::EmptyCatalog);
    }
    let upper = name.to_uppercase();
    configs
        .iter()
        .find(|cfg| cfg.name.to_uppercase() == upper)
        .ok_or_else(|| ScenarioError::RocketNotFound(name.to_string()))
}

/// Select a launch body from the catalog by case-insensitive name.
pub fn select_body<'a>(
    configs: &'a [BodyConfig],
    name: &str,
) -> Result<&'a BodyConfig, ScenarioError> {
    if configs.is_empty() {
        return Err(ScenarioError::EmptyCatalog);
    }
    let upper = name.to_uppercase();
    configs
        .iter()
        .find(|cfg| cfg.name.to_uppercase() == upper)
        .ok_or_else(|| ScenarioError::BodyNotFound(name.to_string()))
}

/// Build the runtime aggregate from its configuration record. Stages are
/// appended in catalog order, so the first entry is the first active stage.
/// The rocket starts at the origin with zero momentum.
pub fn build_rocket(config: &RocketConfig) -> Result<Rocket, ScenarioError> {
    let mut rocket = Rocket::new(vector::ZERO, config.coeff_drag, config.cross_sec_area_m2)?;
    for stage_cfg in &config.stages {
        rocket.add_stage(Stage::from_config(stage_cfg)?);
    }
    for srb_cfg in &config.srbs {
        rocket.add_srb(Stage::from_config(srb_cfg)?);
    }
    for payload_cfg in &config.payloads {
        rocket.add_payload(Payload::from_config(payload_cfg)?);
    }
    Ok(rocket)
}
