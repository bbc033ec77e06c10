// SPDX-License-Identifier: MPL-2.0
//! Configuration resolution and persistence.
//!
//! Every tunable consumed by the engine goes through a three-tier
//! precedence chain at startup: a deployment-level environment override
//! beats a user-persisted preference, which beats the compiled default.
//! The result is a [`Setting`] carrying the resolved value plus a `locked`
//! flag; locked values came from the environment and refuse in-app
//! mutation.
//!
//! User preferences are persisted to a `settings.toml` under the platform
//! config directory. `load_from_path`/`save_to_path` exist as test seams.

pub mod defaults;

use crate::error::Result;
use defaults::{
    DEFAULT_HISTORY_SIZE, DEFAULT_PAGE_SIZE, DEFAULT_PRELOAD_COUNT, DEFAULT_ZOOM_LEVEL,
    MAX_HISTORY_SIZE, MAX_PAGE_SIZE, MAX_PRELOAD_COUNT, MAX_ZOOM_LEVEL, MIN_PAGE_SIZE,
    MIN_ZOOM_LEVEL,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "vuvur";

/// A resolved configuration value plus where it may still be changed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Setting<T> {
    pub value: T,
    /// `true` when the value came from a deployment-level override and
    /// must not be mutated by in-app controls.
    pub locked: bool,
}

impl<T> Setting<T> {
    /// Resolves one value through the precedence chain:
    /// environment override > stored preference > compiled default.
    #[must_use]
    pub fn resolve(env: Option<T>, stored: Option<T>, default: T) -> Self {
        match env {
            Some(value) => Self {
                value,
                locked: true,
            },
            None => Self {
                value: stored.unwrap_or(default),
                locked: false,
            },
        }
    }

    /// Replaces the value unless it is locked. Returns whether the update
    /// was applied.
    pub fn set(&mut self, value: T) -> bool {
        if self.locked {
            return false;
        }
        self.value = value;
        true
    }
}

/// User preferences as persisted on disk. Absent fields fall through to
/// the compiled defaults during resolution.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StoredPrefs {
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub preload_count: Option<usize>,
    #[serde(default)]
    pub history_size: Option<usize>,
    #[serde(default)]
    pub zoom_level: Option<f32>,
}

/// Deployment-level overrides read from the process environment.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    pub page_size: Option<u32>,
    pub preload_count: Option<usize>,
    pub history_size: Option<usize>,
    pub zoom_level: Option<f32>,
}

impl EnvOverrides {
    /// Reads the `VUVUR_*` override variables. Unparseable values are
    /// ignored, falling through to the next tier.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            page_size: parse_env("VUVUR_PAGE_SIZE"),
            preload_count: parse_env("VUVUR_PRELOAD_COUNT"),
            history_size: parse_env("VUVUR_HISTORY_SIZE"),
            zoom_level: parse_env("VUVUR_ZOOM_LEVEL"),
        }
    }
}

fn parse_env<T: FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

/// The full set of resolved engine settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub page_size: Setting<u32>,
    pub preload_count: Setting<usize>,
    pub history_size: Setting<usize>,
    pub zoom_level: Setting<f32>,
}

impl Settings {
    /// Resolves all settings through the precedence chain, clamping each
    /// value into its documented bounds.
    #[must_use]
    pub fn resolve(env: &EnvOverrides, stored: &StoredPrefs) -> Self {
        let mut settings = Self {
            page_size: Setting::resolve(env.page_size, stored.page_size, DEFAULT_PAGE_SIZE),
            preload_count: Setting::resolve(
                env.preload_count,
                stored.preload_count,
                DEFAULT_PRELOAD_COUNT,
            ),
            history_size: Setting::resolve(
                env.history_size,
                stored.history_size,
                DEFAULT_HISTORY_SIZE,
            ),
            zoom_level: Setting::resolve(env.zoom_level, stored.zoom_level, DEFAULT_ZOOM_LEVEL),
        };
        settings.page_size.value = settings.page_size.value.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE);
        settings.preload_count.value = settings.preload_count.value.min(MAX_PRELOAD_COUNT);
        settings.history_size.value = settings.history_size.value.min(MAX_HISTORY_SIZE);
        settings.zoom_level.value = settings.zoom_level.value.clamp(MIN_ZOOM_LEVEL, MAX_ZOOM_LEVEL);
        settings
    }

    /// Exports the unlocked values for persistence. Locked values are
    /// deployment-owned and never written back to the user's preferences.
    #[must_use]
    pub fn to_stored(&self) -> StoredPrefs {
        StoredPrefs {
            page_size: (!self.page_size.locked).then_some(self.page_size.value),
            preload_count: (!self.preload_count.locked).then_some(self.preload_count.value),
            history_size: (!self.history_size.locked).then_some(self.history_size.value),
            zoom_level: (!self.zoom_level.locked).then_some(self.zoom_level.value),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::resolve(&EnvOverrides::default(), &StoredPrefs::default())
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<StoredPrefs> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(StoredPrefs::default())
}

pub fn save(prefs: &StoredPrefs) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(prefs, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<StoredPrefs> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(prefs: &StoredPrefs, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(prefs)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn env_override_wins_and_locks() {
        let env = EnvOverrides {
            page_size: Some(50),
            ..EnvOverrides::default()
        };
        let stored = StoredPrefs {
            page_size: Some(30),
            ..StoredPrefs::default()
        };
        let settings = Settings::resolve(&env, &stored);
        assert_eq!(settings.page_size.value, 50);
        assert!(settings.page_size.locked);
    }

    #[test]
    fn stored_preference_beats_default() {
        let stored = StoredPrefs {
            preload_count: Some(7),
            ..StoredPrefs::default()
        };
        let settings = Settings::resolve(&EnvOverrides::default(), &stored);
        assert_eq!(settings.preload_count.value, 7);
        assert!(!settings.preload_count.locked);
    }

    #[test]
    fn compiled_default_is_the_fallback() {
        let settings = Settings::default();
        assert_eq!(settings.page_size.value, DEFAULT_PAGE_SIZE);
        assert_eq!(settings.zoom_level.value, DEFAULT_ZOOM_LEVEL);
        assert!(!settings.page_size.locked);
    }

    #[test]
    fn locked_setting_refuses_mutation() {
        let mut setting = Setting {
            value: 20_u32,
            locked: true,
        };
        assert!(!setting.set(40));
        assert_eq!(setting.value, 20);

        setting.locked = false;
        assert!(setting.set(40));
        assert_eq!(setting.value, 40);
    }

    #[test]
    fn resolution_clamps_out_of_range_values() {
        let stored = StoredPrefs {
            page_size: Some(0),
            zoom_level: Some(0.5),
            ..StoredPrefs::default()
        };
        let settings = Settings::resolve(&EnvOverrides::default(), &stored);
        assert_eq!(settings.page_size.value, MIN_PAGE_SIZE);
        assert_eq!(settings.zoom_level.value, MIN_ZOOM_LEVEL);
    }

    #[test]
    fn locked_values_are_not_exported() {
        let env = EnvOverrides {
            zoom_level: Some(3.0),
            ..EnvOverrides::default()
        };
        let settings = Settings::resolve(&env, &StoredPrefs::default());
        let stored = settings.to_stored();
        assert!(stored.zoom_level.is_none());
        assert_eq!(stored.page_size, Some(DEFAULT_PAGE_SIZE));
    }

    #[test]
    fn save_and_load_round_trip_preserves_prefs() {
        let prefs = StoredPrefs {
            page_size: Some(40),
            preload_count: Some(5),
            history_size: Some(10),
            zoom_level: Some(2.0),
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&prefs, &config_path).expect("failed to save prefs");
        let loaded = load_from_path(&config_path).expect("failed to load prefs");

        assert_eq!(loaded.page_size, prefs.page_size);
        assert_eq!(loaded.preload_count, prefs.preload_count);
        assert_eq!(loaded.history_size, prefs.history_size);
        assert_eq!(loaded.zoom_level, prefs.zoom_level);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert!(loaded.page_size.is_none());
    }
}
