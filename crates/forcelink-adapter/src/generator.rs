//! Force generator — the participant's timestep state machine.
//!
//! The generator owns a fixed point cloud and a displacement buffer with
//! one scalar per coordinate component. Each step the orchestrator writes
//! displacements, the generator evaluates a [`ForceLaw`] once, and the
//! orchestrator reads the force back, spread over all points.
//!
//! The body is rigid and does not rotate, so the first point's
//! displacement describes the motion of every point.
//!
//! # Protocol
//!
//! ```text
//! start()
//! while is_running() {
//!     [save_old_state()]            // implicit schemes
//!     dt = begin_time_step()
//!     set(in_field, displacements)?
//!     solve_time_step(&law, sample)
//!     get(out_field, &mut forces)?
//!     reload_old_state()? | end_time_step()
//! }
//! stop()?
//! ```
//!
//! The generator never moves its own clock. A driver that wants
//! `is_running()` to turn false reports each accepted step through
//! [`ForceGenerator::advance_time`].

use std::path::{Path, PathBuf};

use glam::DVec3;

use forcelink_io::forces_csv::write_forces_csv;
use forcelink_io::{SampleRow, Settings};
use forcelink_types::constants::{DIM, FORCES_CSV};
use forcelink_types::{Field, ForcelinkError, ForcelinkResult, Real};

use crate::force_law::ForceLaw;
use crate::sampler::DiagnosticSampler;
use crate::snapshot::Snapshot;

/// Observable state of the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorState {
    /// Constructed, not yet started.
    Idle,
    /// Running without a checkpoint.
    Stepping,
    /// Running with a checkpoint that can be restored.
    CheckpointPending,
    /// Stopped. `start()` may run it again.
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Idle,
    Running,
    Stopped,
}

/// Force-generating coupling participant.
#[derive(Debug, Clone)]
pub struct ForceGenerator {
    coords: Vec<Real>,
    displacements: Vec<Real>,
    settings: Settings,
    in_field: Field,
    out_field: Field,
    current_time: Real,
    // Evaluated force, not a solution.
    force: DVec3,
    saved: Option<Snapshot>,
    sampler: DiagnosticSampler,
    lifecycle: Lifecycle,
}

impl ForceGenerator {
    /// Builds a generator over `coords` (`[x0, y0, z0, x1, ...]`).
    ///
    /// Fails with `SizeMismatch` if `coords` is empty or not made of
    /// triplets, and with `InvalidField` if the settings name unknown
    /// fields.
    pub fn new(coords: &[Real], settings: Settings) -> ForcelinkResult<Self> {
        if coords.is_empty() || coords.len() % DIM != 0 {
            return Err(ForcelinkError::SizeMismatch {
                operation: "ForceGenerator::new",
                expected: format!("a non-zero multiple of {DIM}"),
                actual: coords.len(),
            });
        }
        let in_field = settings.in_field()?;
        let out_field = settings.out_field()?;

        Ok(Self {
            coords: coords.to_vec(),
            displacements: vec![0.0; coords.len()],
            settings,
            in_field,
            out_field,
            current_time: 0.0,
            force: DVec3::ZERO,
            saved: None,
            sampler: DiagnosticSampler::new(),
            lifecycle: Lifecycle::Idle,
        })
    }

    /// Mesh dimensionality.
    #[inline]
    pub const fn dim() -> usize {
        DIM
    }

    // ─── Solver controls ──────────────────────────────────────

    /// Zeroes displacement and force and enters the running state.
    pub fn start(&mut self) {
        self.force = DVec3::ZERO;
        self.displacements.fill(0.0);
        self.lifecycle = Lifecycle::Running;
        tracing::info!(
            solver = %self.settings.solver_name,
            mesh = %self.settings.mesh_name,
            points = self.num_coordinates(),
            "force generator started"
        );
    }

    /// Writes the sample table to `forces.csv` in the working directory
    /// if anything was sampled, and stops.
    ///
    /// Returns the path of the written file.
    pub fn stop(&mut self) -> ForcelinkResult<Option<PathBuf>> {
        self.stop_to(Path::new("."))
    }

    /// Like [`stop`](Self::stop), writing `forces.csv` into `dir`.
    pub fn stop_to(&mut self, dir: &Path) -> ForcelinkResult<Option<PathBuf>> {
        let written = if self.sampler.is_empty() {
            None
        } else {
            let path = dir.join(FORCES_CSV);
            write_forces_csv(&path, self.sampler.rows())?;
            self.sampler.take();
            Some(path)
        };
        self.lifecycle = Lifecycle::Stopped;
        tracing::info!(time = self.current_time, "force generator stopped");
        Ok(written)
    }

    /// `current_time <= endt`.
    pub fn is_running(&self) -> bool {
        self.current_time <= self.settings.endt
    }

    /// Preferred timestep size. The caller may cap it further.
    pub fn begin_time_step(&self) -> Real {
        self.settings.dt
    }

    /// Evaluates `law` at the current time for the first point's
    /// displacement and stores the result. With `sample`, also records the
    /// `(displacement, force)` pair for the diagnostic table.
    pub fn solve_time_step<L>(&mut self, law: &L, sample: bool)
    where
        L: ForceLaw + ?Sized,
    {
        let u = self.rigid_displacement();
        self.force = law.evaluate(self.current_time, u);
        if sample {
            self.sampler.record(u, self.force);
        }
        tracing::trace!(
            time = self.current_time,
            law = law.name(),
            u = ?u,
            force = ?self.force,
            "force evaluated"
        );
    }

    /// Accepts the step: drops the checkpoint.
    pub fn end_time_step(&mut self) {
        if self.saved.take().is_some() {
            tracing::debug!(time = self.current_time, "checkpoint discarded");
        }
    }

    /// Moves the clock forward by an accepted step size.
    pub fn advance_time(&mut self, dt: Real) {
        self.current_time += dt;
    }

    // ─── Mesh information ─────────────────────────────────────

    /// Number of points.
    pub fn num_coordinates(&self) -> usize {
        self.coords.len() / DIM
    }

    /// Flat coordinate buffer.
    pub fn coordinates(&self) -> &[Real] {
        &self.coords
    }

    /// Copies the coordinates into `out`, which must have the same length.
    pub fn copy_coordinates(&self, out: &mut [Real]) -> ForcelinkResult<()> {
        if out.len() != self.coords.len() {
            return Err(ForcelinkError::wrong_length(
                "ForceGenerator::copy_coordinates",
                self.coords.len(),
                out.len(),
            ));
        }
        out.copy_from_slice(&self.coords);
        Ok(())
    }

    // ─── Field exchange ───────────────────────────────────────

    /// Writes an inbound field by name: `Displacements` overwrites,
    /// `DisplacementDeltas` adds elementwise.
    pub fn set(&mut self, name: &str, values: &[Real]) -> ForcelinkResult<()> {
        let field = Field::from_name(name)
            .filter(|f| f.is_inbound())
            .ok_or_else(|| ForcelinkError::InvalidField {
                operation: "ForceGenerator::set",
                name: name.to_string(),
            })?;
        self.set_field(field, values)
    }

    /// [`set`](Self::set) for an already resolved field.
    pub fn set_field(&mut self, field: Field, values: &[Real]) -> ForcelinkResult<()> {
        if values.len() != self.displacements.len() {
            return Err(ForcelinkError::wrong_length(
                "ForceGenerator::set",
                self.displacements.len(),
                values.len(),
            ));
        }
        match field {
            Field::Displacements => self.displacements.copy_from_slice(values),
            Field::DisplacementDeltas => {
                for (u, du) in self.displacements.iter_mut().zip(values) {
                    *u += du;
                }
            }
            Field::Forces => {
                return Err(ForcelinkError::InvalidField {
                    operation: "ForceGenerator::set",
                    name: field.as_str().to_string(),
                })
            }
        }
        Ok(())
    }

    /// Reads the outbound field by name into `forces`.
    ///
    /// Every 3-slot receives `force / n` with `n = forces.len() / 3`, so
    /// the slots sum to the evaluated force.
    pub fn get(&self, name: &str, forces: &mut [Real]) -> ForcelinkResult<()> {
        match Field::from_name(name) {
            Some(field) => self.get_field(field, forces),
            None => Err(ForcelinkError::InvalidField {
                operation: "ForceGenerator::get",
                name: name.to_string(),
            }),
        }
    }

    /// [`get`](Self::get) for an already resolved field.
    pub fn get_field(&self, field: Field, forces: &mut [Real]) -> ForcelinkResult<()> {
        if field != self.out_field {
            return Err(ForcelinkError::InvalidField {
                operation: "ForceGenerator::get",
                name: field.as_str().to_string(),
            });
        }
        if forces.len() % DIM != 0 {
            return Err(ForcelinkError::not_multiple_of(
                "ForceGenerator::get",
                DIM,
                forces.len(),
            ));
        }
        let num_forces = forces.len() / DIM;
        if num_forces == 0 {
            return Ok(());
        }

        let share = (self.force / num_forces as Real).to_array();
        for slot in forces.chunks_exact_mut(DIM) {
            slot.copy_from_slice(&share);
        }
        Ok(())
    }

    // ─── Checkpointing ────────────────────────────────────────

    /// Captures displacement, force and time, replacing any earlier
    /// checkpoint.
    pub fn save_old_state(&mut self) {
        self.saved = Some(Snapshot::capture(
            &self.displacements,
            self.force,
            self.current_time,
        ));
        tracing::debug!(time = self.current_time, "checkpoint saved");
    }

    /// Restores the checkpoint. The checkpoint stays available for
    /// further rollbacks until [`end_time_step`](Self::end_time_step).
    pub fn reload_old_state(&mut self) -> ForcelinkResult<()> {
        let saved = self.saved.as_ref().ok_or(ForcelinkError::NoSavedState)?;
        self.displacements.copy_from_slice(saved.displacements());
        self.force = saved.force();
        self.current_time = saved.time();
        tracing::debug!(time = self.current_time, "checkpoint restored");
        Ok(())
    }

    // ─── Inspection ───────────────────────────────────────────

    pub fn state(&self) -> GeneratorState {
        match self.lifecycle {
            Lifecycle::Idle => GeneratorState::Idle,
            Lifecycle::Stopped => GeneratorState::Stopped,
            Lifecycle::Running if self.saved.is_some() => GeneratorState::CheckpointPending,
            Lifecycle::Running => GeneratorState::Stepping,
        }
    }

    pub fn has_checkpoint(&self) -> bool {
        self.saved.is_some()
    }

    pub fn checkpoint(&self) -> Option<&Snapshot> {
        self.saved.as_ref()
    }

    pub fn displacements(&self) -> &[Real] {
        &self.displacements
    }

    /// Last evaluated force (not divided by the point count).
    pub fn force(&self) -> DVec3 {
        self.force
    }

    pub fn current_time(&self) -> Real {
        self.current_time
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Resolved inbound field from the settings.
    pub fn in_field(&self) -> Field {
        self.in_field
    }

    /// Resolved outbound field from the settings.
    pub fn out_field(&self) -> Field {
        self.out_field
    }

    /// Rows sampled since the last `stop`.
    pub fn samples(&self) -> &[SampleRow] {
        self.sampler.rows()
    }

    fn rigid_displacement(&self) -> DVec3 {
        DVec3::new(
            self.displacements[0],
            self.displacements[1],
            self.displacements[2],
        )
    }
}
