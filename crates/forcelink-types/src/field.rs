//! Named data channels exchanged with the coupling orchestrator.
//!
//! The orchestrator addresses arrays by string name. Names are resolved
//! into [`Field`] once, at the settings boundary, so the per-step calls
//! compare enum values instead of strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ForcelinkError;

/// A data channel the participant reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    /// Absolute displacement per coordinate (inbound, overwrites).
    Displacements,
    /// Displacement increment per coordinate (inbound, accumulates).
    DisplacementDeltas,
    /// Force per coordinate (outbound).
    Forces,
}

impl Field {
    /// All known fields.
    pub fn all() -> &'static [Field] {
        &[Field::Displacements, Field::DisplacementDeltas, Field::Forces]
    }

    /// Wire name used by the orchestrator.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Displacements => "Displacements",
            Field::DisplacementDeltas => "DisplacementDeltas",
            Field::Forces => "Forces",
        }
    }

    /// Resolves a wire name. Returns `None` for unknown names.
    pub fn from_name(name: &str) -> Option<Field> {
        Field::all().iter().copied().find(|f| f.as_str() == name)
    }

    /// True for fields the orchestrator writes into the participant.
    #[inline]
    pub fn is_inbound(self) -> bool {
        matches!(self, Field::Displacements | Field::DisplacementDeltas)
    }

    /// True for fields the orchestrator reads from the participant.
    #[inline]
    pub fn is_outbound(self) -> bool {
        matches!(self, Field::Forces)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = ForcelinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::from_name(s).ok_or_else(|| ForcelinkError::InvalidField {
            operation: "Field::from_str",
            name: s.to_string(),
        })
    }
}
