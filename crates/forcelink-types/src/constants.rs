//! Dimensions, defaults and fixed names.

use crate::scalar::Real;

/// Spatial dimension of the point cloud. Coordinates come in triplets.
pub const DIM: usize = 3;

/// Default preferred timestep size (seconds).
pub const DEFAULT_DT: Real = 5.0e-3;

/// Default end of the simulated interval (seconds).
pub const DEFAULT_END_TIME: Real = 3.0e-1;

/// Default participant name announced to the orchestrator.
pub const DEFAULT_SOLVER_NAME: &str = "ts_dummy_adapter";

/// Default name of the coupling mesh.
pub const DEFAULT_MESH_NAME: &str = "dummy_magnet";

/// File written by the diagnostic sampler on shutdown.
pub const FORCES_CSV: &str = "forces.csv";

/// Default column delimiter for point-cloud files.
pub const DEFAULT_DELIMITER: char = ',';

/// Lines starting with this character are skipped by the loader.
pub const DEFAULT_COMMENT: char = '#';
