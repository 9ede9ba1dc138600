//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Check-in policy (single check-in per day)
//! - Garden cosmetics (flower scale and sway ranges, layout jitter, seed)
//! - Breathing session length
//! - Entry storage file name
//!
//! Configuration is stored at `~/.config/mindbloom/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::data_dir;
use super::entries::DEFAULT_ENTRIES_FILE;
use crate::error::ConfigError;

/// Check-in policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckInConfig {
    /// Reject a second check-in on the same calendar day.
    #[serde(default)]
    pub one_per_day: bool,
}

/// Garden appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GardenConfig {
    #[serde(default = "default_scale_min")]
    pub scale_min: f64,
    #[serde(default = "default_scale_max")]
    pub scale_max: f64,
    /// Maximum sway offset either side, in degrees.
    #[serde(default = "default_sway_degrees")]
    pub sway_degrees: f64,
    #[serde(default = "default_jitter_x")]
    pub jitter_x: f64,
    #[serde(default = "default_jitter_y")]
    pub jitter_y: f64,
    /// Fixed seed for the cosmetic randomness; fresh entropy when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Breathing exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreathingConfig {
    /// Cycles per session; 0 runs until stopped.
    #[serde(default = "default_max_cycles")]
    pub max_cycles: u32,
}

/// Entry storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_entries_file")]
    pub entries_file: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/mindbloom/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub checkin: CheckInConfig,
    #[serde(default)]
    pub garden: GardenConfig,
    #[serde(default)]
    pub breathing: BreathingConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

fn default_scale_min() -> f64 {
    0.7
}
fn default_scale_max() -> f64 {
    1.2
}
fn default_sway_degrees() -> f64 {
    8.0
}
fn default_jitter_x() -> f64 {
    0.04
}
fn default_jitter_y() -> f64 {
    0.03
}
fn default_max_cycles() -> u32 {
    4
}
fn default_entries_file() -> String {
    DEFAULT_ENTRIES_FILE.into()
}

impl Default for CheckInConfig {
    fn default() -> Self {
        Self { one_per_day: false }
    }
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            scale_min: default_scale_min(),
            scale_max: default_scale_max(),
            sway_degrees: default_sway_degrees(),
            jitter_x: default_jitter_x(),
            jitter_y: default_jitter_y(),
            seed: None,
        }
    }
}

impl Default for BreathingConfig {
    fn default() -> Self {
        Self {
            max_cycles: default_max_cycles(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            entries_file: default_entries_file(),
        }
    }
}

/// Largest accepted flower scale.
pub const MAX_SCALE: f64 = 10.0;
/// Largest accepted sway either side, in degrees.
pub const MAX_SWAY_DEGREES: f64 = 180.0;
/// Largest accepted layout jitter, as a fraction of the canvas.
pub const MAX_JITTER: f64 = 0.5;

// NaN fails every comparison, so these also reject non-finite values.
fn scale_ok(value: f64) -> bool {
    value > 0.0 && value <= MAX_SCALE
}
fn sway_ok(value: f64) -> bool {
    (0.0..=MAX_SWAY_DEGREES).contains(&value)
}
fn jitter_ok(value: f64) -> bool {
    (0.0..=MAX_JITTER).contains(&value)
}

impl GardenConfig {
    /// Check every range against its accepted bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("garden.scale_min", self.scale_min, scale_ok(self.scale_min), "must be in (0, 10]"),
            ("garden.scale_max", self.scale_max, scale_ok(self.scale_max), "must be in (0, 10]"),
            (
                "garden.sway_degrees",
                self.sway_degrees,
                sway_ok(self.sway_degrees),
                "must be in [0, 180]",
            ),
            ("garden.jitter_x", self.jitter_x, jitter_ok(self.jitter_x), "must be in [0, 0.5]"),
            ("garden.jitter_y", self.jitter_y, jitter_ok(self.jitter_y), "must be in [0, 0.5]"),
        ];
        match checks.into_iter().find(|(_, _, ok, _)| !ok) {
            Some((key, value, _, bounds)) => Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("{value} {bounds}"),
            }),
            None => Ok(()),
        }
    }

    /// Copy with every out-of-bounds range replaced by its default.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let keep = |value: f64, ok: fn(f64) -> bool, fallback: f64| {
            if ok(value) {
                value
            } else {
                fallback
            }
        };
        Self {
            scale_min: keep(self.scale_min, scale_ok, defaults.scale_min),
            scale_max: keep(self.scale_max, scale_ok, defaults.scale_max),
            sway_degrees: keep(self.sway_degrees, sway_ok, defaults.sway_degrees),
            jitter_x: keep(self.jitter_x, jitter_ok, defaults.jitter_x),
            jitter_y: keep(self.jitter_y, jitter_ok, defaults.jitter_y),
            seed: self.seed,
        }
    }
}

impl BreathingConfig {
    /// Session cap for [`crate::BreathingSession`]; `None` when uncapped.
    pub fn cycle_cap(&self) -> Option<u32> {
        (self.max_cycles > 0).then_some(self.max_cycles)
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(ConfigError::UnknownKey(key.to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;

                // `garden.seed` is optional and absent from the serialized form when unset.
                let new_value = match obj.get(part) {
                    _ if key == "garden.seed" => {
                        if value.is_empty() || value == "none" {
                            serde_json::Value::Null
                        } else {
                            serde_json::Value::Number(
                                value
                                    .parse::<u64>()
                                    .map_err(|e| invalid(e.to_string()))?
                                    .into(),
                            )
                        }
                    }
                    Some(serde_json::Value::Bool(_)) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    Some(serde_json::Value::Number(n)) if n.is_f64() => value
                        .parse::<f64>()
                        .ok()
                        .and_then(serde_json::Number::from_f64)
                        .map(serde_json::Value::Number)
                        .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?,
                    Some(serde_json::Value::Number(_)) => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|e| invalid(e.to_string()))?,
                    Some(serde_json::Value::String(_)) => serde_json::Value::String(value.into()),
                    Some(_) => return Err(invalid("not a scalar value".into())),
                    None => return Err(ConfigError::UnknownKey(key.to_string())),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        }

        Err(ConfigError::UnknownKey(key.to_string()))
    }

    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("config.toml"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from the data directory, writing defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a value parses but is out of
    /// bounds.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Self = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.garden.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key, in memory only.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed
    /// as the key's type, or it is out of bounds. `self` is left unchanged
    /// on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.garden.validate()?;
        *self = updated;
        Ok(())
    }
}
