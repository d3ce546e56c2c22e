//! Script settings for the start-print transform
//!
//! Mirrors the option surface a slicer exposes per post-processing script:
//! an enable toggle, the macro command name, the full-control mode, and one
//! include flag per argument category. Settings load from JSON or TOML files
//! stored next to the job or in a user directory.

use crate::error::{SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options controlling the start-print transform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StartPrintSettings {
    /// Master enable for the whole transform.
    pub enabled: bool,
    /// Name of the controller-side start print macro. Empty disables the
    /// transform just like `enabled = false`.
    #[serde(rename = "macro")]
    pub macro_name: String,
    /// Strip the slicer's native heating preamble in favour of the macro.
    pub full_control: bool,
    /// Include the layer-0 bed temperature. Variable: BED_TEMP
    pub bed: bool,
    /// Include layer-0 hotend temperatures. Variable: T0_TEMP etc
    pub hotend: bool,
    /// Include nozzle sizes per extruder. Variable: T0_NOZZLE etc
    pub nozzle: bool,
    /// Include material types per extruder. Variable: T0_MATERIAL etc
    pub material: bool,
    /// Include standby temperatures per extruder (IDEX). Variable: T0_STANDBY_TEMP etc
    pub standby: bool,
    /// Include the profile layer height. Variable: LAYER_HEIGHT
    pub layer: bool,
}

impl Default for StartPrintSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            macro_name: "START_PRINT".to_string(),
            full_control: false,
            bed: true,
            hotend: true,
            nozzle: true,
            material: true,
            standby: true,
            layer: true,
        }
    }
}

impl StartPrintSettings {
    /// Create settings with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the transform should run at all. A blank macro name disables
    /// the feature the same way the enable toggle does.
    pub fn is_active(&self) -> bool {
        self.enabled && !self.macro_name.trim().is_empty()
    }

    /// Load settings from file (JSON or TOML).
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let settings: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)?
        } else {
            return Err(SettingsError::UnsupportedFormat(
                path.display().to_string(),
            ));
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to file (JSON or TOML).
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::to_string_pretty(self)
                .map_err(|e| SettingsError::SaveError(e.to_string()))?
        } else {
            return Err(SettingsError::UnsupportedFormat(
                path.display().to_string(),
            ));
        };

        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate the settings.
    ///
    /// The macro name is spliced into the output as the first token of a
    /// space-joined line, so internal whitespace would corrupt the call.
    /// A blank name is fine: it means "disabled", not "invalid".
    pub fn validate(&self) -> SettingsResult<()> {
        if self.macro_name.trim().chars().any(char::is_whitespace) {
            return Err(SettingsError::InvalidSetting {
                key: "macro".to_string(),
                reason: "must be a single token without whitespace".to_string(),
            });
        }
        Ok(())
    }
}
