//! The discrete-time ascent loop.

use ascent_core::vector;
use ascent_vehicle::{Rocket, RocketError, Stage};
use serde::Serialize;
use thiserror::Error;

use crate::environment::Environment;

/// Driver settings for one ascent run.
#[derive(Debug, Clone)]
pub struct AscentConfig {
    pub time_step_s: f64,
    pub max_time_s: f64,
    /// Throttle commanded on the active stage at ignition and after every
    /// stage separation.
    pub throttle_pct: f64,
    pub roll_rate_rad_s: f64,
    /// Record every Nth tick; the initial and final states are always kept.
    pub sample_stride: usize,
}

impl Default for AscentConfig {
    fn default() -> Self {
        Self {
            time_step_s: 0.1,
            max_time_s: 600.0,
            throttle_pct: 100.0,
            roll_rate_rad_s: 0.0,
            sample_stride: 10,
        }
    }
}

#[derive(Debug, Error)]
pub enum FlightError {
    #[error("ascent time step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),
    #[error("ascent duration must be positive and finite, got {0}")]
    InvalidDuration(f64),
    #[error(transparent)]
    Rocket(#[from] RocketError),
}

/// How the run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AscentOutcome {
    /// The wall-clock budget ran out while still flying.
    MaxTimeReached,
    /// Every stage and booster burned out and was jettisoned.
    Depleted,
    /// Fell back below the launch altitude.
    Impact,
}

impl AscentOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            AscentOutcome::MaxTimeReached => "max time reached",
            AscentOutcome::Depleted => "all stages depleted",
            AscentOutcome::Impact => "ground impact",
        }
    }
}

impl std::fmt::Display for AscentOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-tick telemetry record.
#[derive(Debug, Clone, Serialize)]
pub struct AscentSample {
    pub time_s: f64,
    pub altitude_m: f64,
    pub speed_m_s: f64,
    pub mass_kg: f64,
    pub thrust_n: f64,
    pub attitude_rad: f64,
    pub fuel_kg: f64,
}

/// Staging action the driver took, with the tick it happened on.
#[derive(Debug, Clone, Serialize)]
pub struct StagingEvent {
    pub time_s: f64,
    pub action: StagingAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StagingAction {
    StageSeparated,
    BoostersSeparated,
}

/// Summary of one ascent run.
#[derive(Debug, Clone)]
pub struct AscentSummary {
    pub outcome: AscentOutcome,
    pub elapsed_s: f64,
    pub max_altitude_m: f64,
    pub max_speed_m_s: f64,
    pub final_mass_kg: f64,
    pub propellant_used_kg: f64,
    pub staging: Vec<StagingEvent>,
    pub samples: Vec<AscentSample>,
}

/// Fly the rocket until impact, depletion, or the time budget.
///
/// Each tick depletes propellant, composes thrust with gravity and drag,
/// integrates momentum then position (semi-implicit Euler), and advances the
/// attitude. The core does not auto-detect burnout, so the driver separates
/// the active stage when its fuel is exhausted and the booster group when
/// every booster runs dry.
pub fn run_ascent(
    rocket: &mut Rocket,
    env: &Environment,
    config: &AscentConfig,
) -> Result<AscentSummary, FlightError> {
    let dt = config.time_step_s;
    if !dt.is_finite() || dt <= 0.0 {
        return Err(FlightError::InvalidTimeStep(dt));
    }
    if !config.max_time_s.is_finite() || config.max_time_s <= 0.0 {
        return Err(FlightError::InvalidDuration(config.max_time_s));
    }

    let launch_altitude_m = rocket.pos_m()[1];
    rocket.adjust_throttle(config.throttle_pct)?;
    rocket.ignite_srbs();
    rocket.set_roll_rate(config.roll_rate_rad_s)?;

    let stride = config.sample_stride.max(1);
    let mut samples = vec![sample_of(rocket, 0.0, launch_altitude_m)];
    let mut staging = Vec::new();

    let mut time_s = 0.0;
    let mut tick: usize = 0;
    let mut outcome = AscentOutcome::MaxTimeReached;
    let mut max_altitude_m = 0.0_f64;
    let mut max_speed_m_s = 0.0_f64;
    let mut propellant_used_kg = 0.0_f64;

    while time_s + 1e-9 < config.max_time_s {
        propellant_used_kg += burn_rate_kg_s(rocket) * dt;
        rocket.update_total_mass(dt)?;

        let mass_kg = rocket.total_mass_kg();
        if mass_kg <= 0.0 {
            outcome = AscentOutcome::Depleted;
            break;
        }

        let altitude_m = rocket.pos_m()[1] - launch_altitude_m;
        let velocity_m_s = rocket.velocity_m_s();
        let gravity_n = [0.0, -mass_kg * env.gravity_m_s2(altitude_m), 0.0];
        let drag_n = env.drag_force_n(
            altitude_m,
            &velocity_m_s,
            rocket.coeff_drag(),
            rocket.cross_sec_area_m2(),
        );
        let force_n = vector::add(&vector::add(&rocket.total_thrust(), &gravity_n), &drag_n);

        // Momentum first, then position from the updated velocity.
        let momentum = vector::add(&rocket.momentum_kg_m_s(), &vector::scale(&force_n, dt));
        rocket.set_momentum_kg_m_s(momentum);
        let velocity_m_s = rocket.velocity_m_s();
        rocket.set_pos_m(vector::add(&rocket.pos_m(), &vector::scale(&velocity_m_s, dt)));
        rocket.set_attitude(dt);

        time_s += dt;
        tick += 1;

        if rocket
            .active_stage()
            .is_some_and(|stage| stage.fuel_mass_kg() <= 0.0)
        {
            rocket.separate_active_stage()?;
            rocket.adjust_throttle(config.throttle_pct)?;
            staging.push(StagingEvent {
                time_s,
                action: StagingAction::StageSeparated,
            });
        }
        if !rocket.srbs().is_empty() && rocket.srbs().iter().all(|srb| srb.fuel_mass_kg() <= 0.0) {
            rocket.separate_srbs()?;
            staging.push(StagingEvent {
                time_s,
                action: StagingAction::BoostersSeparated,
            });
        }

        let altitude_m = rocket.pos_m()[1] - launch_altitude_m;
        let speed_m_s = vector::norm(&rocket.velocity_m_s());
        max_altitude_m = max_altitude_m.max(altitude_m);
        max_speed_m_s = max_speed_m_s.max(speed_m_s);

        if tick % stride == 0 {
            samples.push(sample_of(rocket, time_s, launch_altitude_m));
        }

        if altitude_m < 0.0 {
            outcome = AscentOutcome::Impact;
            break;
        }
        if rocket.active_stage().is_none() && rocket.srbs().is_empty() {
            outcome = AscentOutcome::Depleted;
            break;
        }
    }

    if tick % stride != 0 {
        samples.push(sample_of(rocket, time_s, launch_altitude_m));
    }

    Ok(AscentSummary {
        outcome,
        elapsed_s: time_s,
        max_altitude_m,
        max_speed_m_s,
        final_mass_kg: rocket.total_mass_kg(),
        propellant_used_kg,
        staging,
        samples,
    })
}

fn burn_rate_kg_s(rocket: &Rocket) -> f64 {
    let active = rocket
        .active_stage()
        .map(Stage::current_fuel_consumption_kg_s)
        .unwrap_or(0.0);
    let srbs: f64 = rocket
        .srbs()
        .iter()
        .map(Stage::current_fuel_consumption_kg_s)
        .sum();
    active + srbs
}

fn sample_of(rocket: &Rocket, time_s: f64, launch_altitude_m: f64) -> AscentSample {
    let fuel_kg = rocket
        .active_stage()
        .map(Stage::fuel_mass_kg)
        .unwrap_or(0.0)
        + rocket.srbs().iter().map(Stage::fuel_mass_kg).sum::<f64>();
    AscentSample {
        time_s,
        altitude_m: rocket.pos_m()[1] - launch_altitude_m,
        speed_m_s: vector::norm(&rocket.velocity_m_s()),
        mass_kg: rocket.total_mass_kg(),
        thrust_n: vector::norm(&rocket.total_thrust()),
        attitude_rad: rocket.attitude_rad(),
        fuel_kg,
    }
}
