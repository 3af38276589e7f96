//! Display settings consumed by the renderer
//!
//! `HighlightConfig` is a plain struct owned by the caller and passed by
//! reference into every render call. `SettingKey` is the fixed, ordered list
//! of settings the interactive menu shows and edits.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

const SETTINGS_FILE: &str = "settings.toml";

/// Size thresholds for highlighting, in whole megabytes.
///
/// Expected to be ascending, but nothing enforces it; the renderer applies
/// its ladder to whatever values are stored here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub minor: i64,
    pub medium: i64,
    pub above_average: i64,
    pub max: i64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            minor: 100,
            medium: 1000,
            above_average: 4000,
            max: 5000,
        }
    }
}

/// Display toggles and highlight thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub show_size: bool,
    pub show_last_change: bool,
    pub show_creation_date: bool,
    pub highlight: bool,
    pub shorten_paths: bool,
    pub thresholds: Thresholds,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            show_size: true,
            show_last_change: false,
            show_creation_date: false,
            highlight: true,
            shorten_paths: false,
            thresholds: Thresholds::default(),
        }
    }
}

impl HighlightConfig {
    /// Parse settings from TOML text. Missing keys keep their defaults.
    pub fn from_toml(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, path)
    }

    /// Load the per-user settings file if one exists, else defaults.
    pub fn load_default() -> Result<Self, ConfigError> {
        match default_settings_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}

/// `<config dir>/grove/settings.toml`, when the platform has a config dir.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("grove").join(SETTINGS_FILE))
}

/// Current value of a setting, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingValue {
    Flag(bool),
    Megabytes(i64),
}

impl std::fmt::Display for SettingValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingValue::Flag(v) => write!(f, "{}", v),
            SettingValue::Megabytes(v) => write!(f, "{}MB", v),
        }
    }
}

/// Every user-editable setting, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    ShowSize,
    ShowLastChange,
    ShowCreationDate,
    Highlight,
    ShortenPaths,
    MinorSize,
    MediumSize,
    AboveAverageSize,
    MaxSize,
}

impl SettingKey {
    pub const ALL: [SettingKey; 9] = [
        SettingKey::ShowSize,
        SettingKey::ShowLastChange,
        SettingKey::ShowCreationDate,
        SettingKey::Highlight,
        SettingKey::ShortenPaths,
        SettingKey::MinorSize,
        SettingKey::MediumSize,
        SettingKey::AboveAverageSize,
        SettingKey::MaxSize,
    ];

    /// Look up a setting by its 1-based menu number.
    pub fn from_menu_number(n: usize) -> Option<SettingKey> {
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn label(self) -> &'static str {
        match self {
            SettingKey::ShowSize => "Show size",
            SettingKey::ShowLastChange => "Show date of last change",
            SettingKey::ShowCreationDate => "Show creation date",
            SettingKey::Highlight => "Highlight",
            SettingKey::ShortenPaths => "Shorten the absolute path",
            SettingKey::MinorSize => "minimum size for highlighting",
            SettingKey::MediumSize => "medium size for highlighting",
            SettingKey::AboveAverageSize => "above average size for highlighting",
            SettingKey::MaxSize => "maximum size for highlighting",
        }
    }

    pub fn value(self, config: &HighlightConfig) -> SettingValue {
        let t = &config.thresholds;
        match self {
            SettingKey::ShowSize => SettingValue::Flag(config.show_size),
            SettingKey::ShowLastChange => SettingValue::Flag(config.show_last_change),
            SettingKey::ShowCreationDate => SettingValue::Flag(config.show_creation_date),
            SettingKey::Highlight => SettingValue::Flag(config.highlight),
            SettingKey::ShortenPaths => SettingValue::Flag(config.shorten_paths),
            SettingKey::MinorSize => SettingValue::Megabytes(t.minor),
            SettingKey::MediumSize => SettingValue::Megabytes(t.medium),
            SettingKey::AboveAverageSize => SettingValue::Megabytes(t.above_average),
            SettingKey::MaxSize => SettingValue::Megabytes(t.max),
        }
    }

    /// Parse `input` and store it. The config is untouched on error.
    pub fn apply(self, config: &mut HighlightConfig, input: &str) -> Result<(), ConfigError> {
        let input = input.trim();
        let invalid = || ConfigError::InvalidValue {
            key: self.label(),
            value: input.to_string(),
        };

        match self.value(config) {
            SettingValue::Flag(_) => {
                let value = parse_flag(input).ok_or_else(invalid)?;
                *self.flag_mut(config) = value;
            }
            SettingValue::Megabytes(_) => {
                let value: i64 = input.parse().map_err(|_| invalid())?;
                *self.megabytes_mut(config) = value;
            }
        }
        Ok(())
    }

    fn flag_mut(self, config: &mut HighlightConfig) -> &mut bool {
        match self {
            SettingKey::ShowSize => &mut config.show_size,
            SettingKey::ShowLastChange => &mut config.show_last_change,
            SettingKey::ShowCreationDate => &mut config.show_creation_date,
            SettingKey::Highlight => &mut config.highlight,
            _ => &mut config.shorten_paths,
        }
    }

    fn megabytes_mut(self, config: &mut HighlightConfig) -> &mut i64 {
        let t = &mut config.thresholds;
        match self {
            SettingKey::MinorSize => &mut t.minor,
            SettingKey::MediumSize => &mut t.medium,
            SettingKey::AboveAverageSize => &mut t.above_average,
            _ => &mut t.max,
        }
    }
}

fn parse_flag(input: &str) -> Option<bool> {
    if input.eq_ignore_ascii_case("true") {
        Some(true)
    } else if input.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
