//! # forcelink-adapter
//!
//! The force-generating coupling participant: timestep state machine,
//! checkpoint protocol and diagnostic sampling.
//!
//! ## Key Types
//!
//! - [`ForceGenerator`] — owns coordinates, displacement, evaluated force,
//!   clock and the single checkpoint slot
//! - [`ForceLaw`] — pluggable `(time, displacement) -> force` evaluation
//! - [`Snapshot`] — state captured by `save_old_state`
//! - [`DiagnosticSampler`] — optional per-step `(displacement, force)` rows
//! - [`Participant`] — lifecycle surface a coupling driver talks to

pub mod force_law;
pub mod generator;
pub mod laws;
pub mod participant;
pub mod sampler;
pub mod snapshot;

pub use force_law::ForceLaw;
pub use generator::{ForceGenerator, GeneratorState};
pub use participant::{ForceParticipant, Participant};
pub use sampler::DiagnosticSampler;
pub use snapshot::Snapshot;

/// Re-exported so callers can build force vectors without a direct `glam` dependency.
pub use glam::DVec3;
