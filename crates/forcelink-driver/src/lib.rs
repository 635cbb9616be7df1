//! # forcelink-driver
//!
//! Loopback coupling driver for running a forcelink participant without
//! an external coupling library.
//!
//! The driver plays the structural side of the coupling: a rigid body
//! under gravity, integrated with implicit Euler, whose displacement is
//! sent to the participant and whose load is the force the participant
//! returns. Explicit and implicit (checkpointed fixed-point) schemes are
//! supported.

pub mod body;
pub mod config;
pub mod driver;

pub use body::{BodyState, RigidBody};
pub use config::{CouplingScheme, DriverConfig};
pub use driver::{CouplingDriver, RunReport};
