//! Rigid body integrated with implicit Euler.
//!
//! Solves `m x'' = m g + f(t)` written as a first-order system in
//! position and velocity:
//!
//! ```text
//! v_{n+1} = v_n + dt * (g + f / m)
//! x_{n+1} = x_n + dt * v_{n+1}
//! ```
//!
//! Stepping returns a candidate [`BodyState`] without touching the body,
//! so a coupling iteration can be repeated before the step is committed.

use glam::DVec3;

use forcelink_types::Real;

/// Standard gravitational acceleration (m/s²).
pub const STANDARD_GRAVITY: Real = 9.81;

/// Position and velocity of the body.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BodyState {
    /// Displacement from the initial position.
    pub position: DVec3,
    pub velocity: DVec3,
}

/// Point mass standing in for the structural solver.
#[derive(Debug, Clone)]
pub struct RigidBody {
    pub mass: Real,
    /// Gravitational acceleration vector.
    pub gravity: DVec3,
    state: BodyState,
}

impl RigidBody {
    /// A body of `mass` at rest, with gravity pointing along `-z`.
    pub fn new(mass: Real) -> Self {
        Self {
            mass,
            gravity: DVec3::new(0.0, 0.0, -STANDARD_GRAVITY),
            state: BodyState::default(),
        }
    }

    /// Solid cylinder of the given radius, height and density.
    pub fn cylinder(radius: Real, height: Real, density: Real) -> Self {
        Self::new(std::f64::consts::PI * radius * radius * height * density)
    }

    pub fn with_gravity(mut self, gravity: DVec3) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_state(mut self, state: BodyState) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> BodyState {
        self.state
    }

    /// Candidate state after `dt` under external `force`.
    pub fn step(&self, dt: Real, force: DVec3) -> BodyState {
        let acceleration = self.gravity + force / self.mass;
        let velocity = self.state.velocity + dt * acceleration;
        BodyState {
            position: self.state.position + dt * velocity,
            velocity,
        }
    }

    /// Accepts a candidate produced by [`step`](Self::step).
    pub fn commit(&mut self, state: BodyState) {
        self.state = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_fall_one_step() {
        let body = RigidBody::new(2.0);
        let next = body.step(0.1, DVec3::ZERO);
        assert!((next.velocity.z + 0.981).abs() < 1e-12);
        assert!((next.position.z + 0.0981).abs() < 1e-12);
        // Not committed.
        assert_eq!(body.state(), BodyState::default());
    }

    #[test]
    fn weight_balanced_by_force_stays_put() {
        let body = RigidBody::new(0.5);
        let lift = DVec3::new(0.0, 0.0, 0.5 * STANDARD_GRAVITY);
        let next = body.step(0.01, lift);
        assert!(next.position.length() < 1e-15);
    }

    #[test]
    fn cylinder_mass() {
        let body = RigidBody::cylinder(1.0, 2.0, 3.0);
        assert!((body.mass - 6.0 * std::f64::consts::PI).abs() < 1e-12);
    }
}
