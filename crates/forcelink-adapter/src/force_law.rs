//! Force law trait — the physics model behind the participant.
//!
//! The generator only depends on this call signature. Closures with the
//! matching signature are force laws too, so one-off models need no type:
//!
//! ```
//! use forcelink_adapter::{DVec3, ForceLaw};
//!
//! let spring = |_t: f64, u: DVec3| -u * 10.0;
//! assert_eq!(spring.evaluate(0.0, DVec3::X), DVec3::new(-10.0, 0.0, 0.0));
//! ```

use glam::DVec3;

use forcelink_types::Real;

/// Maps a rigid-body displacement at a point in time to a force.
///
/// # Implementations
///
/// - [`ThresholdForce`](crate::laws::ThresholdForce) — constant force past a displacement magnitude
/// - [`SigmoidForce`](crate::laws::SigmoidForce) — smooth activation over displacement magnitude
/// - [`PulseForce`](crate::laws::PulseForce) — constant force inside a time window
/// - any `Fn(Real, DVec3) -> DVec3`
pub trait ForceLaw {
    /// Evaluate the force for displacement `displacement` at `time`.
    fn evaluate(&self, time: Real, displacement: DVec3) -> DVec3;

    /// Returns the law's name for logging.
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> ForceLaw for F
where
    F: Fn(Real, DVec3) -> DVec3,
{
    fn evaluate(&self, time: Real, displacement: DVec3) -> DVec3 {
        self(time, displacement)
    }
}
