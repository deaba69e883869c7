//! Centralized scene options with TOML preset support.
//!
//! Layout dimensions, motion parameters, group presets, the topper star and
//! the snowfall are consolidated here. Options serialize to/from TOML so a
//! scene can be tuned without recompiling.

mod groups;
mod layout;
mod motion;
mod snow;

use std::path::Path;

pub use groups::{GroupPreset, TopperOptions};
pub use layout::LayoutOptions;
pub use motion::{DampingMode, MotionOptions, SwayOptions};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use snow::SnowOptions;

use crate::error::EvergreenError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[motion]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct Options {
    /// Tree and scatter cloud dimensions.
    pub layout: LayoutOptions,
    /// Interpolation, jitter, spin and sway.
    pub motion: MotionOptions,
    /// Batched particle groups, in render order.
    pub groups: Vec<GroupPreset>,
    /// Topper star.
    pub topper: TopperOptions,
    /// Ambient snowfall.
    pub snow: SnowOptions,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            layout: LayoutOptions::default(),
            motion: MotionOptions::default(),
            groups: GroupPreset::defaults(),
            topper: TopperOptions::default(),
            snow: SnowOptions::default(),
        }
    }
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text and validate them.
    pub fn from_toml_str(content: &str) -> Result<Self, EvergreenError> {
        let opts: Self = toml::from_str(content)
            .map_err(|e| EvergreenError::OptionsParse(e.to_string()))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, EvergreenError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), EvergreenError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| EvergreenError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(EvergreenError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }

    /// Check every section for out-of-range values.
    pub fn validate(&self) -> Result<(), EvergreenError> {
        self.layout.validate()?;
        self.motion.validate()?;
        self.topper.validate()?;
        self.snow.validate()?;
        for group in &self.groups {
            if !(group.speed > 0.0 && group.speed.is_finite()) {
                return Err(EvergreenError::InvalidOptions(format!(
                    "group '{}' speed must be positive, got {}",
                    group.name, group.speed
                )));
            }
        }
        Ok(())
    }
}
