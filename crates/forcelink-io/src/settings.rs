//! Participant settings.
//!
//! The settings record is read-only once the participant is built.
//! On disk it lives in a TOML document under a `[settings]` table:
//!
//! ```toml
//! [settings]
//! solverName = "ts_dummy_adapter"
//! meshName = "dummy_magnet"
//! inField = "Displacements"
//! outField = "Forces"
//! dt = 0.005
//! endt = 0.3
//! ```
//!
//! Keys that are absent fall back to the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use forcelink_types::constants::{
    DEFAULT_DT, DEFAULT_END_TIME, DEFAULT_MESH_NAME, DEFAULT_SOLVER_NAME,
};
use forcelink_types::{Field, ForcelinkError, ForcelinkResult, Real};

const BANNER: &str = "# ============================================================";
const RULE: &str = "# ------------------------------------------------------------";

/// Configuration record of the force-generating participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Participant name announced to the orchestrator.
    pub solver_name: String,
    /// Name of the coupling mesh.
    pub mesh_name: String,
    /// Name of the inbound displacement field.
    pub in_field: String,
    /// Name of the outbound force field.
    pub out_field: String,
    /// Preferred timestep size (seconds).
    pub dt: Real,
    /// End of the simulated interval (seconds).
    pub endt: Real,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            solver_name: DEFAULT_SOLVER_NAME.to_string(),
            mesh_name: DEFAULT_MESH_NAME.to_string(),
            in_field: Field::Displacements.as_str().to_string(),
            out_field: Field::Forces.as_str().to_string(),
            dt: DEFAULT_DT,
            endt: DEFAULT_END_TIME,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct SettingsDocument {
    settings: Settings,
}

impl Settings {
    /// Parses a settings document.
    pub fn from_toml_str(text: &str) -> ForcelinkResult<Self> {
        let doc: SettingsDocument =
            toml::from_str(text).map_err(|e| ForcelinkError::Serialization(e.to_string()))?;
        Ok(doc.settings)
    }

    /// Loads a settings document from disk.
    pub fn load(path: impl AsRef<Path>) -> ForcelinkResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|_| ForcelinkError::FileNotFound {
            path: path.to_path_buf(),
        })?;
        let settings = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), ?settings, "settings loaded");
        Ok(settings)
    }

    /// Renders the settings as a document readable by [`from_toml_str`](Self::from_toml_str).
    pub fn to_toml_string(&self) -> ForcelinkResult<String> {
        let doc = SettingsDocument {
            settings: self.clone(),
        };
        toml::to_string(&doc).map_err(|e| ForcelinkError::Serialization(e.to_string()))
    }

    /// Renders the settings document framed by banner comments, for logs
    /// and the `settings` CLI command.
    pub fn dump(&self) -> ForcelinkResult<String> {
        let body = self.to_toml_string()?;
        Ok(format!(
            "{BANNER}\n# SETTINGS:\n{RULE}\n{}\n{BANNER}\n",
            body.trim_end()
        ))
    }

    /// Resolves `in_field`. It must name an inbound field.
    pub fn in_field(&self) -> ForcelinkResult<Field> {
        resolve(&self.in_field, "Settings::in_field", Field::is_inbound)
    }

    /// Resolves `out_field`. It must name an outbound field.
    pub fn out_field(&self) -> ForcelinkResult<Field> {
        resolve(&self.out_field, "Settings::out_field", Field::is_outbound)
    }
}

fn resolve(
    name: &str,
    operation: &'static str,
    accept: fn(Field) -> bool,
) -> ForcelinkResult<Field> {
    Field::from_name(name)
        .filter(|&f| accept(f))
        .ok_or_else(|| ForcelinkError::InvalidField {
            operation,
            name: name.to_string(),
        })
}
