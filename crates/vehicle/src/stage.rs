//! A propulsive unit: dry structure plus consumable propellant driving a
//! throttleable engine.

use std::fmt;

use ascent_config::StageConfig;
use ascent_core::units::pct_to_fraction;
use ascent_core::vector::{self, Vector3};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StageError {
    #[error("stage parameter {name} must be non-negative and finite, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("throttle must lie within [0, 100], got {0}")]
    ThrottleOutOfRange(f64),
}

/// One stage of the launch vehicle. Used both in the sequential stage stack
/// and as a strap-on booster; the aggregate decides which role it plays.
#[derive(Debug, Clone)]
pub struct Stage {
    name: Option<String>,
    dry_mass_kg: f64,
    fuel_mass_kg: f64,
    max_thrust_n: f64,
    max_dmdt_kg_s: f64,
    length_m: f64,
    throttle_pct: f64,
    axis: Vector3,
}

fn checked(value: f64, name: &'static str) -> Result<f64, StageError> {
    if !value.is_finite() || value < 0.0 {
        return Err(StageError::InvalidParameter { name, value });
    }
    Ok(value)
}

impl Stage {
    /// Construct a stage from its catalog record. Omitted fields default to
    /// zero in the record itself; provided values must be non-negative.
    ///
    /// A new stage starts with the throttle closed and its orientation axis
    /// at the zero vector; the axis carries no meaning until it is set.
    pub fn from_config(config: &StageConfig) -> Result<Self, StageError> {
        Ok(Self {
            name: config.name.clone(),
            dry_mass_kg: checked(config.dry_mass_kg, "dry_mass_kg")?,
            fuel_mass_kg: checked(config.fuel_mass_kg, "fuel_mass_kg")?,
            max_thrust_n: checked(config.max_thrust_n, "max_thrust_n")?,
            max_dmdt_kg_s: checked(config.max_dmdt_kg_s, "max_dmdt_kg_s")?,
            length_m: checked(config.length_m, "length_m")?,
            throttle_pct: 0.0,
            axis: vector::ZERO,
        })
    }

    /// Command a throttle setting as a percentage of maximum thrust.
    pub fn set_throttle(&mut self, throttle_pct: f64) -> Result<(), StageError> {
        if !throttle_pct.is_finite() || !(0.0..=100.0).contains(&throttle_pct) {
            return Err(StageError::ThrottleOutOfRange(throttle_pct));
        }
        self.throttle_pct = throttle_pct;
        Ok(())
    }

    /// Command full throttle. Ignition of a solid booster has no intermediate
    /// settings, so this cannot fail.
    pub fn ignite(&mut self) {
        self.throttle_pct = 100.0;
    }

    /// Instantaneous thrust at the current throttle. Recomputed on every call;
    /// the throttle may change between reads.
    pub fn current_thrust_n(&self) -> f64 {
        self.max_thrust_n * pct_to_fraction(self.throttle_pct)
    }

    /// Instantaneous propellant flow at the current throttle.
    pub fn current_fuel_consumption_kg_s(&self) -> f64 {
        self.max_dmdt_kg_s * pct_to_fraction(self.throttle_pct)
    }

    /// Burn propellant for one `dt_s`-long tick at the current throttle.
    ///
    /// Fuel is not clamped at zero: a stage burned past empty reports
    /// negative fuel and keeps producing thrust until the throttle is closed
    /// or the stage is separated. Burnout detection belongs to the driver.
    pub fn update_mass(&mut self, dt_s: f64) {
        self.fuel_mass_kg -= self.current_fuel_consumption_kg_s() * dt_s;
    }

    /// The stage-local orientation axis.
    pub fn attitude(&self) -> Vector3 {
        self.axis
    }

    pub fn set_attitude(&mut self, axis: Vector3) {
        self.axis = axis;
    }

    pub fn dry_mass_kg(&self) -> f64 {
        self.dry_mass_kg
    }

    pub fn fuel_mass_kg(&self) -> f64 {
        self.fuel_mass_kg
    }

    /// Structure plus remaining propellant.
    pub fn wet_mass_kg(&self) -> f64 {
        self.dry_mass_kg + self.fuel_mass_kg
    }

    pub fn max_thrust_n(&self) -> f64 {
        self.max_thrust_n
    }

    pub fn max_dmdt_kg_s(&self) -> f64 {
        self.max_dmdt_kg_s
    }

    pub fn length_m(&self) -> f64 {
        self.length_m
    }

    pub fn throttle_pct(&self) -> f64 {
        self.throttle_pct
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "Stage '{}': ", name)?;
        } else {
            write!(f, "Stage: ")?;
        }
        write!(
            f,
            "dry mass {:.2} kg, fuel mass {:.2} kg, max thrust {:.2} N, max fuel consumption {:.2} kg/s",
            self.dry_mass_kg, self.fuel_mass_kg, self.max_thrust_n, self.max_dmdt_kg_s
        )
    }
}
