//! Settings and point-cloud validation.
//!
//! Validates inputs before the participant is constructed,
//! catching data-level errors early with clear diagnostics.

use forcelink_types::constants::DIM;
use forcelink_types::{ForcelinkError, ForcelinkResult, Real};

use crate::settings::Settings;

/// Validates a settings record.
///
/// Checks:
/// - Names are non-empty
/// - `inField` names an inbound field, `outField` an outbound one
/// - `dt` and `endt` are finite and positive
pub fn validate_settings(settings: &Settings) -> ForcelinkResult<()> {
    if settings.solver_name.trim().is_empty() {
        return Err(ForcelinkError::InvalidConfig(
            "solverName must not be empty".into(),
        ));
    }
    if settings.mesh_name.trim().is_empty() {
        return Err(ForcelinkError::InvalidConfig(
            "meshName must not be empty".into(),
        ));
    }

    settings.in_field()?;
    settings.out_field()?;

    if !settings.dt.is_finite() || settings.dt <= 0.0 {
        return Err(ForcelinkError::InvalidConfig(format!(
            "Timestep dt must be positive, got {}",
            settings.dt
        )));
    }
    if !settings.endt.is_finite() || settings.endt <= 0.0 {
        return Err(ForcelinkError::InvalidConfig(format!(
            "End time endt must be positive, got {}",
            settings.endt
        )));
    }

    Ok(())
}

/// Validates a flat coordinate buffer.
pub fn validate_point_cloud(coords: &[Real]) -> ForcelinkResult<()> {
    if coords.is_empty() {
        return Err(ForcelinkError::InvalidConfig(
            "Point cloud has no points".into(),
        ));
    }
    if coords.len() % DIM != 0 {
        return Err(ForcelinkError::not_multiple_of(
            "validate_point_cloud",
            DIM,
            coords.len(),
        ));
    }
    if let Some(i) = coords.iter().position(|v| !v.is_finite()) {
        return Err(ForcelinkError::InvalidConfig(format!(
            "Point {} has a non-finite coordinate",
            i / DIM
        )));
    }
    Ok(())
}
