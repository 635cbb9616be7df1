//! Checkpoint state for implicit coupling.
//!
//! A snapshot captures everything a repeated coupling iteration needs to
//! start over: displacement buffer, evaluated force and clock.

use glam::DVec3;

use forcelink_types::Real;

/// Generator state captured by `save_old_state`.
///
/// Immutable once taken. The generator keeps at most one, in an
/// `Option<Snapshot>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    displacements: Vec<Real>,
    force: DVec3,
    time: Real,
}

impl Snapshot {
    /// Copies the given state.
    pub fn capture(displacements: &[Real], force: DVec3, time: Real) -> Self {
        Self {
            displacements: displacements.to_vec(),
            force,
            time,
        }
    }

    /// Displacement buffer at capture time.
    pub fn displacements(&self) -> &[Real] {
        &self.displacements
    }

    /// Evaluated force at capture time.
    pub fn force(&self) -> DVec3 {
        self.force
    }

    /// Simulation time at capture time.
    pub fn time(&self) -> Real {
        self.time
    }
}
