//! The physical core of the simulator: payloads, stages, and the rocket
//! aggregate with its mass, thrust, separation, and attitude rules.

pub mod payload;
pub mod rocket;
pub mod stage;

pub use payload::{Payload, PayloadError};
pub use rocket::{Rocket, RocketError};
pub use stage::{Stage, StageError};
