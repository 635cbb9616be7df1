//! Ready-made force laws.
//!
//! These are the activation profiles commonly paired with the participant
//! (a magnet pulling on a rigid body once it comes close enough). None of
//! them is special to the generator.

use glam::DVec3;

use forcelink_types::Real;

use crate::force_law::ForceLaw;

/// Constant force switched on once the displacement magnitude reaches
/// `threshold`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdForce {
    /// Activation distance (same unit as the displacement).
    pub threshold: Real,
    /// Force applied while active.
    pub force: DVec3,
}

impl ThresholdForce {
    pub fn new(threshold: Real, force: DVec3) -> Self {
        Self { threshold, force }
    }
}

impl ForceLaw for ThresholdForce {
    fn evaluate(&self, _time: Real, displacement: DVec3) -> DVec3 {
        if displacement.length() >= self.threshold {
            self.force
        } else {
            DVec3::ZERO
        }
    }

    fn name(&self) -> &str {
        "threshold"
    }
}

/// Logistic blend between zero and `force` over the displacement magnitude:
/// `force / (1 + exp(-(|u| - center) / width))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SigmoidForce {
    /// Magnitude at which half the force is applied.
    pub center: Real,
    /// Transition width. Smaller is sharper; must be positive.
    pub width: Real,
    /// Fully activated force.
    pub force: DVec3,
}

impl SigmoidForce {
    pub fn new(center: Real, width: Real, force: DVec3) -> Self {
        Self {
            center,
            width,
            force,
        }
    }

    /// Activation factor in `[0, 1]` for a displacement magnitude.
    pub fn activation(&self, magnitude: Real) -> Real {
        1.0 / (1.0 + (-(magnitude - self.center) / self.width).exp())
    }
}

impl ForceLaw for SigmoidForce {
    fn evaluate(&self, _time: Real, displacement: DVec3) -> DVec3 {
        self.force * self.activation(displacement.length())
    }

    fn name(&self) -> &str {
        "sigmoid"
    }
}

/// Constant force inside the open time window `(start, stop)`, zero
/// outside. Ignores the displacement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseForce {
    pub start: Real,
    pub stop: Real,
    pub force: DVec3,
}

impl PulseForce {
    pub fn new(start: Real, stop: Real, force: DVec3) -> Self {
        Self { start, stop, force }
    }
}

impl ForceLaw for PulseForce {
    fn evaluate(&self, time: Real, _displacement: DVec3) -> DVec3 {
        if time > self.start && time < self.stop {
            self.force
        } else {
            DVec3::ZERO
        }
    }

    fn name(&self) -> &str {
        "pulse"
    }
}
