//! Settings management
//!
//! Render settings persist as JSON in `{config_dir}/splat/settings.json`, or
//! in any file passed with `--config`. Missing fields take their defaults.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use splat_core::render::Renderer;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings that persist across runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Resolution, splat parameters and presentation
    pub renderer: Renderer,
    /// Seed of the demo row when no scene file is given
    pub seed: u64,
    /// Half-count of the demo row (the row holds `2 * row_count + 1` circles)
    pub row_count: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            renderer: Renderer::default(),
            seed: 0,
            row_count: 40,
        }
    }
}

/// Default location of the settings file
pub fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("splat").join("settings.json"))
}

/// Load settings.
///
/// An explicit path must exist and parse. Without one, the default location
/// is tried and any problem there falls back to defaults.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    if let Some(path) = explicit {
        return read_settings(path);
    }

    let Some(path) = settings_path() else {
        return Ok(Settings::default());
    };
    if !path.exists() {
        return Ok(Settings::default());
    }

    match read_settings(&path) {
        Ok(settings) => Ok(settings),
        Err(e) => {
            tracing::warn!("Ignoring settings at {}: {:#}", path.display(), e);
            Ok(Settings::default())
        }
    }
}

fn read_settings(path: &Path) -> Result<Settings> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse settings file {}", path.display()))?;
    settings
        .renderer
        .validate()
        .with_context(|| format!("Invalid settings in {}", path.display()))?;
    Ok(settings)
}

/// Save settings to `explicit`, or to the default location
pub fn save_settings(settings: &Settings, explicit: Option<&Path>) -> Result<PathBuf> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => match settings_path() {
            Some(p) => p,
            None => bail!("Could not determine config directory"),
        },
    };

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    let json = serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;
    fs::write(&path, json).context("Failed to write settings file")?;
    Ok(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use splat_core::prelude::Resolution;

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("splat_settings_{}_{}", std::process::id(), name))
    }

    #[test]
    fn defaults_match_reference_demo() {
        let s = Settings::default();
        assert_eq!(s.renderer.resolution.size(), 512);
        assert_eq!(s.row_count, 40);
        assert!((s.renderer.params.smoothing - 0.04).abs() < 1e-6);
    }

    #[test]
    fn save_then_load_round_trips() {
        let path = temp_file("roundtrip.json");
        let mut settings = Settings::default();
        settings.seed = 99;
        settings.renderer.resolution = Resolution::from_power(6).unwrap();

        save_settings(&settings, Some(&path)).unwrap();
        let loaded = load_settings(Some(&path)).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, settings);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let path = temp_file("partial.json");
        fs::write(&path, r#"{ "seed": 5, "renderer": { "resolution": 4 } }"#).unwrap();
        let loaded = load_settings(Some(&path)).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded.seed, 5);
        assert_eq!(loaded.renderer.resolution.size(), 16);
        assert_eq!(loaded.row_count, 40);
    }

    #[test]
    fn explicit_path_errors_are_reported() {
        assert!(load_settings(Some(&temp_file("missing.json"))).is_err());

        let path = temp_file("bad_power.json");
        fs::write(&path, r#"{ "renderer": { "resolution": 30 } }"#).unwrap();
        let result = load_settings(Some(&path));
        let _ = fs::remove_file(&path);
        assert!(result.is_err());
    }

    #[test]
    fn invalid_presentation_is_rejected() {
        let path = temp_file("bad_border.json");
        fs::write(
            &path,
            r#"{ "renderer": { "presentation": { "border_width": -0.5 } } }"#,
        )
        .unwrap();
        let result = load_settings(Some(&path));
        let _ = fs::remove_file(&path);
        assert!(result.is_err());
    }
}
