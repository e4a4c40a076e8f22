//! The rocket aggregate and its update rules.

use std::collections::VecDeque;
use std::fmt;

use ascent_core::vector::{self, UP, Vector3};
use thiserror::Error;

use crate::payload::Payload;
use crate::stage::{Stage, StageError};

#[derive(Debug, Error)]
pub enum RocketError {
    #[error("drag coefficient must be positive and finite, got {0}")]
    InvalidDragCoefficient(f64),
    #[error("cross-sectional area must be positive and finite, got {0}")]
    InvalidCrossSection(f64),
    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),
    #[error("roll rate must be finite, got {0}")]
    InvalidRollRate(f64),
    #[error(transparent)]
    Stage(#[from] StageError),
    #[error("no stages remain to separate")]
    NoStagesRemaining,
    #[error("no boosters remain to separate")]
    NoBoostersRemaining,
    #[error("cannot separate from a rocket with zero total mass")]
    MasslessSeparation,
}

/// A launch vehicle: an ordered stage stack, a booster group that fires and
/// separates as one unit, inert payloads, and the bulk kinematic state the
/// simulation loop integrates against.
///
/// The front of the stage stack is the active stage; reserves behind it stay
/// inert until a separation promotes them. All access goes through
/// `front()`/`pop_front()` so the convention holds at every site.
#[derive(Debug, Clone)]
pub struct Rocket {
    stages: VecDeque<Stage>,
    srbs: Vec<Stage>,
    payloads: Vec<Payload>,
    coeff_drag: f64,
    cross_sec_area_m2: f64,
    pos_m: Vector3,
    momentum_kg_m_s: Vector3,
    axis: Vector3,
    roll_rate_rad_s: f64,
}

impl Rocket {
    /// Construct an empty rocket at the given position. Components are added
    /// afterwards; the axis starts at world "up" and momentum at zero.
    pub fn new(pos_m: Vector3, coeff_drag: f64, cross_sec_area_m2: f64) -> Result<Self, RocketError> {
        if !coeff_drag.is_finite() || coeff_drag <= 0.0 {
            return Err(RocketError::InvalidDragCoefficient(coeff_drag));
        }
        if !cross_sec_area_m2.is_finite() || cross_sec_area_m2 <= 0.0 {
            return Err(RocketError::InvalidCrossSection(cross_sec_area_m2));
        }
        Ok(Self {
            stages: VecDeque::new(),
            srbs: Vec::new(),
            payloads: Vec::new(),
            coeff_drag,
            cross_sec_area_m2,
            pos_m,
            momentum_kg_m_s: vector::ZERO,
            axis: UP,
            roll_rate_rad_s: 0.0,
        })
    }

    /// Append a stage to the staging order. The first stage added becomes the
    /// active stage.
    pub fn add_stage(&mut self, stage: Stage) {
        self.stages.push_back(stage);
    }

    /// Add a strap-on booster to the group. The whole group ignites and
    /// separates together.
    pub fn add_srb(&mut self, srb: Stage) {
        self.srbs.push(srb);
    }

    pub fn add_payload(&mut self, payload: Payload) {
        self.payloads.push(payload);
    }

    /// Total vehicle mass, recomputed from the live components on every call.
    pub fn total_mass_kg(&self) -> f64 {
        let srbs: f64 = self.srbs.iter().map(Stage::wet_mass_kg).sum();
        let stages: f64 = self.stages.iter().map(Stage::wet_mass_kg).sum();
        let payloads: f64 = self.payloads.iter().map(Payload::mass_kg).sum();
        srbs + stages + payloads
    }

    /// Thrust of the active stage, directed along the vehicle axis. The zero
    /// vector when no stages remain.
    pub fn active_stage_thrust(&self) -> Vector3 {
        match self.stages.front() {
            Some(stage) => vector::scale(&self.axis, stage.current_thrust_n()),
            None => vector::ZERO,
        }
    }

    /// Combined booster thrust, directed along the vehicle axis. The zero
    /// vector when no boosters remain.
    pub fn srb_thrust(&self) -> Vector3 {
        if self.srbs.is_empty() {
            return vector::ZERO;
        }
        let total_thrust_n: f64 = self.srbs.iter().map(Stage::current_thrust_n).sum();
        vector::scale(&self.axis, total_thrust_n)
    }

    pub fn total_thrust(&self) -> Vector3 {
        vector::add(&self.active_stage_thrust(), &self.srb_thrust())
    }

    /// Deplete propellant for one tick. Only the active stage burns; reserve
    /// stages stay untouched until a separation promotes them. Every booster
    /// in the group burns.
    pub fn update_total_mass(&mut self, dt_s: f64) -> Result<(), RocketError> {
        if !dt_s.is_finite() || dt_s <= 0.0 {
            return Err(RocketError::InvalidTimeStep(dt_s));
        }
        if let Some(stage) = self.stages.front_mut() {
            stage.update_mass(dt_s);
        }
        for srb in &mut self.srbs {
            srb.update_mass(dt_s);
        }
        Ok(())
    }

    /// Jettison the active stage, promoting the next stage in the stack.
    ///
    /// The stage leaves at the vehicle's bulk velocity: momentum shrinks in
    /// proportion to the shed mass so the velocity carried into the next tick
    /// is unchanged. Returns the separated stage.
    pub fn separate_active_stage(&mut self) -> Result<Stage, RocketError> {
        if self.stages.is_empty() {
            return Err(RocketError::NoStagesRemaining);
        }
        let total_mass_kg = self.total_mass_kg();
        if total_mass_kg <= 0.0 {
            return Err(RocketError::MasslessSeparation);
        }
        let velocity_m_s = vector::scale(&self.momentum_kg_m_s, 1.0 / total_mass_kg);
        let Some(spent) = self.stages.pop_front() else {
            return Err(RocketError::NoStagesRemaining);
        };
        self.momentum_kg_m_s = vector::scale(&velocity_m_s, self.total_mass_kg());
        Ok(spent)
    }

    /// Jettison the whole booster group at the vehicle's bulk velocity.
    /// Partial booster separation is not supported. Returns the separated
    /// boosters.
    pub fn separate_srbs(&mut self) -> Result<Vec<Stage>, RocketError> {
        if self.srbs.is_empty() {
            return Err(RocketError::NoBoostersRemaining);
        }
        let total_mass_kg = self.total_mass_kg();
        if total_mass_kg <= 0.0 {
            return Err(RocketError::MasslessSeparation);
        }
        let velocity_m_s = vector::scale(&self.momentum_kg_m_s, 1.0 / total_mass_kg);
        let spent = std::mem::take(&mut self.srbs);
        self.momentum_kg_m_s = vector::scale(&velocity_m_s, self.total_mass_kg());
        Ok(spent)
    }

    /// Angle in radians between the vehicle axis and world "up", in [0, π].
    /// The dot product is clamped before `acos` to absorb float drift in the
    /// unit axis.
    pub fn attitude_rad(&self) -> f64 {
        vector::dot(&self.axis, &UP).clamp(-1.0, 1.0).acos()
    }

    /// Advance the attitude by the roll rate over one tick. The rotation is
    /// confined to the X-Y plane.
    pub fn set_attitude(&mut self, dt_s: f64) {
        let theta = self.attitude_rad() + self.roll_rate_rad_s * dt_s;
        self.axis = vector::unit(&[theta.sin(), theta.cos(), 0.0]);
    }

    pub fn set_roll_rate(&mut self, roll_rate_rad_s: f64) -> Result<(), RocketError> {
        if !roll_rate_rad_s.is_finite() {
            return Err(RocketError::InvalidRollRate(roll_rate_rad_s));
        }
        self.roll_rate_rad_s = roll_rate_rad_s;
        Ok(())
    }

    /// Forward a throttle command to the active stage. A no-op when no stages
    /// remain; otherwise the stage's own validation applies.
    pub fn adjust_throttle(&mut self, throttle_pct: f64) -> Result<(), RocketError> {
        match self.stages.front_mut() {
            Some(stage) => Ok(stage.set_throttle(throttle_pct)?),
            None => Ok(()),
        }
    }

    /// Ignite every booster at full throttle. A no-op when no boosters remain.
    pub fn ignite_srbs(&mut self) {
        for srb in &mut self.srbs {
            srb.ignite();
        }
    }

    pub fn active_stage(&self) -> Option<&Stage> {
        self.stages.front()
    }

    /// Stages in staging order, the active stage first.
    pub fn stages(&self) -> impl Iterator<Item = &Stage> {
        self.stages.iter()
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn srbs(&self) -> &[Stage] {
        &self.srbs
    }

    pub fn payloads(&self) -> &[Payload] {
        &self.payloads
    }

    pub fn coeff_drag(&self) -> f64 {
        self.coeff_drag
    }

    pub fn cross_sec_area_m2(&self) -> f64 {
        self.cross_sec_area_m2
    }

    pub fn pos_m(&self) -> Vector3 {
        self.pos_m
    }

    /// Position is integrated by the owning simulation loop, not by the core.
    pub fn set_pos_m(&mut self, pos_m: Vector3) {
        self.pos_m = pos_m;
    }

    pub fn momentum_kg_m_s(&self) -> Vector3 {
        self.momentum_kg_m_s
    }

    /// Momentum is integrated by the owning simulation loop, not by the core.
    pub fn set_momentum_kg_m_s(&mut self, momentum_kg_m_s: Vector3) {
        self.momentum_kg_m_s = momentum_kg_m_s;
    }

    /// Bulk velocity; the zero vector when no mass remains.
    pub fn velocity_m_s(&self) -> Vector3 {
        let total_mass_kg = self.total_mass_kg();
        if total_mass_kg > 0.0 {
            vector::scale(&self.momentum_kg_m_s, 1.0 / total_mass_kg)
        } else {
            vector::ZERO
        }
    }

    pub fn axis(&self) -> Vector3 {
        self.axis
    }

    pub fn roll_rate_rad_s(&self) -> f64 {
        self.roll_rate_rad_s
    }
}

impl fmt::Display for Rocket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rocket stats:")?;
        writeln!(f)?;
        writeln!(f, "Drag coefficient: {:.2}", self.coeff_drag)?;
        writeln!(f, "Cross-sectional area: {:.2} m^2", self.cross_sec_area_m2)?;
        for stage in &self.stages {
            writeln!(f, "{stage}")?;
        }
        for srb in &self.srbs {
            writeln!(f, "Booster {srb}")?;
        }
        for payload in &self.payloads {
            writeln!(f, "{payload}")?;
        }
        write!(f, "Total mass: {:.2} kg", self.total_mass_kg())
    }
}
