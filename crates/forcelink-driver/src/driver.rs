//! Coupling driver — advances a participant and a rigid body together.

use std::path::PathBuf;
use std::time::Instant;

use glam::DVec3;

use forcelink_adapter::Participant;
use forcelink_types::constants::DIM;
use forcelink_types::{Field, ForcelinkError, ForcelinkResult, Real};

use crate::body::{BodyState, RigidBody};
use crate::config::{CouplingScheme, DriverConfig};

/// Summary of a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Accepted steps.
    pub steps: u32,
    /// Participant solves, including repeated iterations.
    pub iterations: u32,
    /// Checkpoint restores.
    pub rollbacks: u32,
    /// Steps accepted at the iteration limit without meeting the tolerance.
    pub unconverged_steps: u32,
    /// Sum of accepted step sizes.
    pub final_time: Real,
    pub final_state: BodyState,
    /// Total force on the body after the last accepted step.
    pub final_force: DVec3,
    /// Diagnostic table written by the participant on stop, if any.
    pub samples_path: Option<PathBuf>,
    pub wall_time: f64,
}

/// Runs a participant against a [`RigidBody`] until the participant
/// reports it is done.
pub struct CouplingDriver;

impl CouplingDriver {
    /// Runs the full lifecycle: `start`, the timestep loop, `stop`.
    pub fn run(
        participant: &mut dyn Participant,
        body: &mut RigidBody,
        config: &DriverConfig,
    ) -> ForcelinkResult<RunReport> {
        let start = Instant::now();
        let n = participant.num_points() * DIM;
        let in_field = participant.in_field();
        let out_field = participant.out_field();

        let mut displacement = vec![0.0; n];
        let mut forces = vec![0.0; n];

        let mut report = RunReport {
            steps: 0,
            iterations: 0,
            rollbacks: 0,
            unconverged_steps: 0,
            final_time: 0.0,
            final_state: body.state(),
            final_force: DVec3::ZERO,
            samples_path: None,
            wall_time: 0.0,
        };

        tracing::info!(
            participant = participant.name(),
            points = participant.num_points(),
            scheme = ?config.scheme,
            "coupling run started"
        );
        participant.start();

        let mut force = DVec3::ZERO;
        while participant.is_running() {
            if config.scheme.is_implicit() {
                participant.save_old_state();
            }

            let dt = match config.max_dt {
                Some(max) => participant.begin_time_step().min(max),
                None => participant.begin_time_step(),
            };
            if dt.is_nan() || dt <= 0.0 {
                return Err(ForcelinkError::InvalidConfig(format!(
                    "Timestep must be positive, got {dt}"
                )));
            }

            let committed = body.state().position;
            let mut estimate = force;
            let mut iteration = 0;
            let accepted = loop {
                iteration += 1;
                report.iterations += 1;

                let candidate = body.step(dt, estimate);
                fill_displacement(in_field, candidate.position, committed, &mut displacement);
                participant.set(in_field, &displacement)?;
                participant.solve_time_step()?;
                participant.get(out_field, &mut forces)?;
                let new_force = total_force(&forces);

                match config.scheme {
                    CouplingScheme::Explicit => break (candidate, new_force),
                    CouplingScheme::Implicit {
                        max_iterations,
                        tolerance,
                    } => {
                        let residual =
                            (body.step(dt, new_force).position - candidate.position).length();
                        if residual < tolerance {
                            break (candidate, new_force);
                        }
                        if iteration >= max_iterations {
                            tracing::warn!(
                                step = report.steps,
                                residual,
                                "coupling iteration limit reached, accepting step"
                            );
                            report.unconverged_steps += 1;
                            break (candidate, new_force);
                        }
                        participant.reload_old_state()?;
                        report.rollbacks += 1;
                        estimate = new_force;
                    }
                }
            };

            let (state, new_force) = accepted;
            body.commit(state);
            force = new_force;
            participant.end_time_step();
            participant.advance_time(dt);
            report.steps += 1;
            report.final_time += dt;

            tracing::debug!(
                step = report.steps,
                time = report.final_time,
                iterations = iteration,
                z = state.position.z,
                fz = force.z,
                "step accepted"
            );
        }

        report.samples_path = participant.stop()?;
        report.final_state = body.state();
        report.final_force = force;
        report.wall_time = start.elapsed().as_secs_f64();

        tracing::info!(
            steps = report.steps,
            iterations = report.iterations,
            rollbacks = report.rollbacks,
            time = report.final_time,
            "coupling run finished"
        );
        Ok(report)
    }
}

/// Broadcasts the body displacement to every point. Delta fields receive
/// the change since the last committed position, which is what the
/// participant holds after a rollback.
fn fill_displacement(field: Field, position: DVec3, committed: DVec3, out: &mut [Real]) {
    let value = match field {
        Field::DisplacementDeltas => position - committed,
        _ => position,
    };
    let value = value.to_array();
    for slot in out.chunks_exact_mut(DIM) {
        slot.copy_from_slice(&value);
    }
}

fn total_force(forces: &[Real]) -> DVec3 {
    forces
        .chunks_exact(DIM)
        .map(DVec3::from_slice)
        .fold(DVec3::ZERO, |acc, f| acc + f)
}
