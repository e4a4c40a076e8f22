//! Inert mass carried by the rocket.

use std::fmt;

use ascent_config::PayloadConfig;
use thiserror::Error;

/// Dead weight: contributes to the mass budget and nothing else.
/// Immutable once constructed.
#[derive(Debug, Clone)]
pub struct Payload {
    name: Option<String>,
    mass_kg: f64,
}

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("payload mass must be positive and finite, got {0}")]
    InvalidMass(f64),
}

impl Payload {
    /// Construct a payload of the given mass.
    pub fn new(mass_kg: f64) -> Result<Self, PayloadError> {
        if !mass_kg.is_finite() || mass_kg <= 0.0 {
            return Err(PayloadError::InvalidMass(mass_kg));
        }
        Ok(Self {
            name: None,
            mass_kg,
        })
    }

    /// Construct a payload from its catalog record.
    pub fn from_config(config: &PayloadConfig) -> Result<Self, PayloadError> {
        let mut payload = Self::new(config.mass_kg)?;
        payload.name = config.name.clone();
        Ok(payload)
    }

    pub fn mass_kg(&self) -> f64 {
        self.mass_kg
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "Payload '{}' mass is {:.2} kg.", name, self.mass_kg),
            None => write!(f, "Payload mass is {:.2} kg.", self.mass_kg),
        }
    }
}
