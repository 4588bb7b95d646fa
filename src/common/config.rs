use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while loading [`EngineSettings`] from TOML.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid settings: {0:?}")]
    Invalid(Vec<String>),
}

/// Tunable knobs for the whole engine. Every field has a default, so an empty
/// TOML document (or `EngineSettings::default()`) yields a working engine.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct EngineSettings {
    #[serde(default)]
    pub grid: GridSettings,
    #[serde(default)]
    pub drag: DragSettings,
    #[serde(default)]
    pub resize: ResizeSettings,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct GridSettings {
    /// Height of one grid row in pixels. Vertical offsets are multiples of this.
    #[serde(default = "default_row_height")]
    pub row_height: f64,
    /// Pixel radius within which the pointer counts as touching a column
    /// boundary. Consumed by hosts drawing snap guides; placement itself
    /// always snaps.
    #[serde(default = "default_snap_threshold")]
    pub snap_threshold: f64,
    /// Visual spacing between fields in pixels. Rendering-only; collision
    /// math never sees it.
    #[serde(default = "default_field_gap")]
    pub field_gap: f64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct DragSettings {
    /// Cumulative pointer travel in pixels before a drag leaves the
    /// below-threshold phase and starts producing previews.
    #[serde(default = "default_drag_threshold")]
    pub drag_threshold: f64,
    /// Minimum interval between preview recomputations. Zero disables the
    /// throttle, which tests rely on.
    #[serde(default = "default_preview_throttle_ms")]
    pub preview_throttle_ms: u64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Copy)]
#[serde(deny_unknown_fields)]
pub struct ResizeSettings {
    /// Fraction of the container width a resize handle must travel to step
    /// the field one magnetic width up or down.
    #[serde(default = "default_step_fraction")]
    pub step_fraction: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            row_height: default_row_height(),
            snap_threshold: default_snap_threshold(),
            field_gap: default_field_gap(),
        }
    }
}

impl Default for DragSettings {
    fn default() -> Self {
        Self {
            drag_threshold: default_drag_threshold(),
            preview_throttle_ms: default_preview_throttle_ms(),
        }
    }
}

impl Default for ResizeSettings {
    fn default() -> Self { Self { step_fraction: default_step_fraction() } }
}

impl EngineSettings {
    pub fn read(path: &Path) -> Result<EngineSettings, SettingsError> {
        let buf = std::fs::read_to_string(path)?;
        Self::parse(&buf)
    }

    pub fn parse(buf: &str) -> Result<EngineSettings, SettingsError> {
        let settings: EngineSettings = toml::from_str(buf)?;
        let issues = settings.validate();
        if !issues.is_empty() {
            return Err(SettingsError::Invalid(issues));
        }
        Ok(settings)
    }

    /// Validates the configuration and returns a list of issues found.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        issues.extend(self.grid.validate());
        issues.extend(self.drag.validate());
        issues.extend(self.resize.validate());

        issues
    }
}

impl GridSettings {
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.row_height <= 0.0 {
            issues.push(format!("grid.row_height must be positive, got {}", self.row_height));
        }

        if self.snap_threshold < 0.0 {
            issues.push(format!(
                "grid.snap_threshold must be non-negative, got {}",
                self.snap_threshold
            ));
        }

        if self.field_gap < 0.0 {
            issues.push(format!("grid.field_gap must be non-negative, got {}", self.field_gap));
        }

        issues
    }
}

impl DragSettings {
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.drag_threshold < 0.0 {
            issues.push(format!(
                "drag.drag_threshold must be non-negative, got {}",
                self.drag_threshold
            ));
        }

        issues
    }
}

impl ResizeSettings {
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.step_fraction <= 0.0 || self.step_fraction > 1.0 {
            issues.push(format!(
                "resize.step_fraction must be in (0, 1], got {}",
                self.step_fraction
            ));
        }

        issues
    }
}

fn default_row_height() -> f64 { 80.0 }

fn default_snap_threshold() -> f64 { 12.0 }

fn default_field_gap() -> f64 { 8.0 }

fn default_drag_threshold() -> f64 { 6.0 }

fn default_preview_throttle_ms() -> u64 { 100 }

fn default_step_fraction() -> f64 { 0.10 }
