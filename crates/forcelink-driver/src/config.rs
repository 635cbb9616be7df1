//! Driver configuration.

use forcelink_types::Real;

/// How the driver couples body and participant within a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CouplingScheme {
    /// One exchange per step, always accepted.
    Explicit,
    /// Checkpointed fixed-point iteration. The step is repeated from the
    /// checkpoint until the body displacement changes by less than
    /// `tolerance`, or `max_iterations` is reached.
    Implicit { max_iterations: u32, tolerance: Real },
}

impl CouplingScheme {
    /// Implicit scheme with 20 iterations and a 1e-10 displacement tolerance.
    pub fn implicit() -> Self {
        Self::Implicit {
            max_iterations: 20,
            tolerance: 1e-10,
        }
    }

    pub fn is_implicit(&self) -> bool {
        matches!(self, Self::Implicit { .. })
    }
}

/// Configuration for a [`CouplingDriver`](crate::driver::CouplingDriver) run.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    pub scheme: CouplingScheme,
    /// Upper bound imposed on the participant's preferred step size.
    pub max_dt: Option<Real>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            scheme: CouplingScheme::Explicit,
            max_dt: None,
        }
    }
}

impl DriverConfig {
    pub fn implicit() -> Self {
        Self {
            scheme: CouplingScheme::implicit(),
            ..Default::default()
        }
    }
}
