//! Diagnostic sampler.

use glam::DVec3;

use forcelink_io::SampleRow;

/// Append-only table of `(displacement, force)` rows, flushed at shutdown.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticSampler {
    rows: Vec<SampleRow>,
}

impl DiagnosticSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one row.
    pub fn record(&mut self, displacement: DVec3, force: DVec3) {
        self.rows.push([
            displacement.x,
            displacement.y,
            displacement.z,
            force.x,
            force.y,
            force.z,
        ]);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[SampleRow] {
        &self.rows
    }

    /// Drains all rows, leaving the sampler empty.
    pub fn take(&mut self) -> Vec<SampleRow> {
        std::mem::take(&mut self.rows)
    }
}
