//! Participant trait — what a coupling driver calls.
//!
//! A driver advances any participant through the same lifecycle
//! without knowing which physics it wraps:
//!
//! ```text
//! participant.start();
//! while participant.is_running() {
//!     participant.save_old_state();          // implicit schemes only
//!     let dt = participant.begin_time_step();
//!     participant.set(in_field, &u)?;
//!     participant.solve_time_step()?;
//!     participant.get(out_field, &mut f)?;
//!     participant.reload_old_state()?;        // to repeat the step
//!     participant.end_time_step();            // once accepted
//!     participant.advance_time(dt);
//! }
//! participant.stop()?;
//! ```

use std::path::PathBuf;

use forcelink_types::{Field, ForcelinkResult, Real};

use crate::force_law::ForceLaw;
use crate::generator::ForceGenerator;

/// Lifecycle surface of a coupling participant.
pub trait Participant {
    /// Returns the participant's name.
    fn name(&self) -> &str;

    /// Number of coupling points.
    fn num_points(&self) -> usize;

    /// Field the driver should write displacements into.
    fn in_field(&self) -> Field;

    /// Field the driver should read forces from.
    fn out_field(&self) -> Field;

    fn start(&mut self);

    fn is_running(&self) -> bool;

    /// Preferred timestep size.
    fn begin_time_step(&mut self) -> Real;

    fn set(&mut self, field: Field, values: &[Real]) -> ForcelinkResult<()>;

    fn solve_time_step(&mut self) -> ForcelinkResult<()>;

    fn get(&self, field: Field, buffer: &mut [Real]) -> ForcelinkResult<()>;

    fn save_old_state(&mut self);

    fn reload_old_state(&mut self) -> ForcelinkResult<()>;

    fn end_time_step(&mut self);

    /// Reports an accepted step of size `dt`.
    fn advance_time(&mut self, dt: Real);

    /// Shuts down. Returns the path of any diagnostic file written.
    fn stop(&mut self) -> ForcelinkResult<Option<PathBuf>>;
}

/// A [`ForceGenerator`] bound to its force law.
pub struct ForceParticipant<L> {
    generator: ForceGenerator,
    law: L,
    sample: bool,
    output_dir: PathBuf,
}

impl<L: ForceLaw> ForceParticipant<L> {
    /// Wraps `generator`. Sampling is off; output goes to the working directory.
    pub fn new(generator: ForceGenerator, law: L) -> Self {
        Self {
            generator,
            law,
            sample: false,
            output_dir: PathBuf::from("."),
        }
    }

    /// Records a diagnostic row on every solve.
    pub fn with_sampling(mut self, sample: bool) -> Self {
        self.sample = sample;
        self
    }

    /// Directory `forces.csv` is written to on stop.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn generator(&self) -> &ForceGenerator {
        &self.generator
    }

    pub fn law(&self) -> &L {
        &self.law
    }

    /// Unwraps the generator.
    pub fn into_inner(self) -> ForceGenerator {
        self.generator
    }
}

impl<L: ForceLaw> Participant for ForceParticipant<L> {
    fn name(&self) -> &str {
        &self.generator.settings().solver_name
    }

    fn num_points(&self) -> usize {
        self.generator.num_coordinates()
    }

    fn in_field(&self) -> Field {
        self.generator.in_field()
    }

    fn out_field(&self) -> Field {
        self.generator.out_field()
    }

    fn start(&mut self) {
        self.generator.start();
    }

    fn is_running(&self) -> bool {
        self.generator.is_running()
    }

    fn begin_time_step(&mut self) -> Real {
        self.generator.begin_time_step()
    }

    fn set(&mut self, field: Field, values: &[Real]) -> ForcelinkResult<()> {
        self.generator.set_field(field, values)
    }

    fn solve_time_step(&mut self) -> ForcelinkResult<()> {
        self.generator.solve_time_step(&self.law, self.sample);
        Ok(())
    }

    fn get(&self, field: Field, buffer: &mut [Real]) -> ForcelinkResult<()> {
        self.generator.get_field(field, buffer)
    }

    fn save_old_state(&mut self) {
        self.generator.save_old_state();
    }

    fn reload_old_state(&mut self) -> ForcelinkResult<()> {
        self.generator.reload_old_state()
    }

    fn end_time_step(&mut self) {
        self.generator.end_time_step();
    }

    fn advance_time(&mut self, dt: Real) {
        self.generator.advance_time(dt);
    }

    fn stop(&mut self) -> ForcelinkResult<Option<PathBuf>> {
        self.generator.stop_to(&self.output_dir)
    }
}
