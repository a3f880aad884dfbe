//! Centralized viewer options with TOML preset support.
//!
//! Viewport size, animation timing, track geometry, colors, and the initial
//! track stack are consolidated here. Options serialize to/from TOML so a
//! viewer configuration can be saved as a preset and reloaded.

mod animation;
mod colors;
mod display;
mod geometry;
mod layout;

use std::path::{Path, PathBuf};

pub use animation::AnimationOptions;
pub use colors::{ColorOptions, CATEGORY10, SET2};
pub use display::DisplayOptions;
pub use geometry::GeometryOptions;
pub use layout::{default_tracks, TrackSpec};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::TrackError;

/// File extension of saved presets.
pub const PRESET_EXTENSION: &str = "toml";

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[animation]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct ViewerOptions {
    /// Viewport and zoom parameters.
    pub display: DisplayOptions,
    /// Transition timing.
    pub animation: AnimationOptions,
    /// Track heights and glyph sizes.
    #[schemars(skip)]
    pub geometry: GeometryOptions,
    /// Color palette options.
    #[schemars(skip)]
    pub colors: ColorOptions,
    /// Initial track stack, top to bottom.
    pub tracks: Vec<TrackSpec>,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            display: DisplayOptions::default(),
            animation: AnimationOptions::default(),
            geometry: GeometryOptions::default(),
            colors: ColorOptions::default(),
            tracks: default_tracks(),
        }
    }
}

impl ViewerOptions {
    /// Generate JSON Schema describing the user-facing options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(ViewerOptions)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, TrackError> {
        toml::from_str(content)
            .map_err(|e| TrackError::OptionsParse(e.to_string()))
    }

    /// Serialize to pretty-printed TOML.
    pub fn to_toml(&self) -> Result<String, TrackError> {
        toml::to_string_pretty(self)
            .map_err(|e| TrackError::OptionsParse(e.to_string()))
    }

    /// Read a viewer configuration from disk. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, TrackError> {
        log::debug!("loading viewer options from {}", path.display());
        Self::from_toml(&std::fs::read_to_string(path)?)
    }

    /// Write this configuration to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), TrackError> {
        let text = self.to_toml()?;
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty())
        {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, text)?;
        log::debug!("saved viewer options to {}", path.display());
        Ok(())
    }

    /// Path of the preset called `name` inside `dir`.
    #[must_use]
    pub fn preset_path(dir: &Path, name: &str) -> PathBuf {
        dir.join(format!("{name}.{PRESET_EXTENSION}"))
    }

    /// Names of the presets stored in `dir`, sorted. An unreadable
    /// directory holds no presets.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(dir) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|p| p.extension().is_some_and(|e| e == PRESET_EXTENSION))
            .filter_map(|p| p.file_stem()?.to_str().map(str::to_owned))
            .collect();
        names.sort_unstable();
        names
    }
}
