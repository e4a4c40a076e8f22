//! Gravity and atmosphere of the body the rocket climbs away from.

use ascent_config::BodyConfig;
use ascent_core::constants::{EARTH_RADIUS_M, G0, SCALE_HEIGHT_M, SEA_LEVEL_DENSITY_KG_M3};
use ascent_core::vector::{self, Vector3};

#[derive(Debug, Clone)]
struct Atmosphere {
    surface_density_kg_m3: f64,
    scale_height_m: f64,
}

/// Environmental force model: inverse-square gravity anchored to the surface
/// value, plus an optional exponential atmosphere.
#[derive(Debug, Clone)]
pub struct Environment {
    surface_gravity_m_s2: f64,
    radius_m: f64,
    atmosphere: Option<Atmosphere>,
}

impl Environment {
    pub fn from_config(config: &BodyConfig) -> Self {
        Self {
            surface_gravity_m_s2: config.surface_gravity_m_s2,
            radius_m: config.radius_m,
            atmosphere: config.atmosphere.as_ref().map(|atm| Atmosphere {
                surface_density_kg_m3: atm.surface_density_kg_m3,
                scale_height_m: atm.scale_height_m,
            }),
        }
    }

    /// Sea-level Earth without a catalog.
    pub fn earth() -> Self {
        Self {
            surface_gravity_m_s2: G0,
            radius_m: EARTH_RADIUS_M,
            atmosphere: Some(Atmosphere {
                surface_density_kg_m3: SEA_LEVEL_DENSITY_KG_M3,
                scale_height_m: SCALE_HEIGHT_M,
            }),
        }
    }

    /// Gravitational acceleration at the given altitude above the surface.
    pub fn gravity_m_s2(&self, altitude_m: f64) -> f64 {
        let r = self.radius_m + altitude_m.max(0.0);
        self.surface_gravity_m_s2 * (self.radius_m / r).powi(2)
    }

    /// Atmospheric density at the given altitude; zero for airless bodies.
    pub fn density_kg_m3(&self, altitude_m: f64) -> f64 {
        match &self.atmosphere {
            Some(atm) => {
                atm.surface_density_kg_m3 * f64::exp(-altitude_m.max(0.0) / atm.scale_height_m)
            }
            None => 0.0,
        }
    }

    /// Aerodynamic drag force opposing the velocity.
    pub fn drag_force_n(
        &self,
        altitude_m: f64,
        velocity_m_s: &Vector3,
        coeff_drag: f64,
        cross_sec_area_m2: f64,
    ) -> Vector3 {
        let speed = vector::norm(velocity_m_s);
        if speed == 0.0 {
            return vector::ZERO;
        }
        let dynamic_pressure = 0.5 * self.density_kg_m3(altitude_m) * speed * speed;
        let magnitude = dynamic_pressure * coeff_drag * cross_sec_area_m2;
        vector::scale(velocity_m_s, -magnitude / speed)
    }
}
