//! Runtime settings
//!
//! Loaded from an optional JSON file; every key is optional and falls back
//! to its default.
//!
//! Loading does not log: the log filter lives in the settings, so the logger
//! can only start afterwards. Callers log the returned `SettingsOrigin` once
//! it is up.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Where the settings in use came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsOrigin {
    /// Read from this file
    File(PathBuf),
    /// This file did not exist, built-in defaults apply
    Defaults(PathBuf),
}

impl fmt::Display for SettingsOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsOrigin::File(path) => write!(f, "Loaded settings from {}", path.display()),
            SettingsOrigin::Defaults(path) => {
                write!(f, "No settings at {}, using defaults", path.display())
            }
        }
    }
}

/// Window settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    /// Initial inner width in logical pixels
    pub width: u32,
    /// Initial inner height in logical pixels
    pub height: u32,
    /// Wait for vertical blank when presenting
    pub vsync: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            vsync: true,
        }
    }
}

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowSettings,

    /// Seed for the serve direction RNG; `None` picks one from the clock
    pub seed: Option<u64>,

    /// `env_logger` filter, e.g. "info" or "brickplay=debug,wgpu=warn".
    /// `RUST_LOG` wins when set.
    pub log_filter: Option<String>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            seed: None,
            log_filter: None,
            master_volume: 0.8,
            muted: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON text
    pub fn from_json(json: &str, path: &Path) -> Result<Self, SettingsError> {
        serde_json::from_str(json).map_err(|source| SettingsError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load settings from a JSON file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json, path)
    }

    /// Load settings from `path`, or use defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<(Self, SettingsOrigin), SettingsError> {
        if !path.exists() {
            return Ok((Self::default(), SettingsOrigin::Defaults(path.to_path_buf())));
        }
        let settings = Self::load_from(path)?;
        Ok((settings, SettingsOrigin::File(path.to_path_buf())))
    }

    /// Save settings as pretty-printed JSON
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Seed to use for this run
    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_missing_keys_use_defaults() {
        let s = Settings::from_json(r#"{ "seed": 42, "window": { "width": 640 } }"#, Path::new("t"))
            .unwrap();
        assert_eq!(s.seed, Some(42));
        assert_eq!(s.window.width, 640);
        assert_eq!(s.window.height, 768);
        assert!(s.window.vsync);
        assert_eq!(s.master_volume, 0.8);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = Settings::from_json("{ not json", Path::new("bad.json")).unwrap_err();
        assert!(matches!(err, SettingsError::Json { .. }));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("brickplay-settings-{}.json", std::process::id()));
        let settings = Settings {
            seed: Some(7),
            muted: true,
            ..Default::default()
        };
        settings.save_to(&path).unwrap();
        let loaded = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = Path::new("/nonexistent/brickplay/settings.json");
        let (settings, origin) = Settings::load_or_default(path).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(origin, SettingsOrigin::Defaults(path.to_path_buf()));
        assert_eq!(
            origin.to_string(),
            "No settings at /nonexistent/brickplay/settings.json, using defaults"
        );
        assert!(matches!(
            Settings::load_from(path),
            Err(SettingsError::Io { .. })
        ));
    }

    #[test]
    fn test_existing_file_reports_its_path() {
        let path = std::env::temp_dir().join(format!("brickplay-origin-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "seed": 5 }"#).unwrap();
        let (settings, origin) = Settings::load_or_default(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(settings.seed, Some(5));
        assert_eq!(origin, SettingsOrigin::File(path.clone()));
        assert!(origin.to_string().starts_with("Loaded settings from "));
    }

    #[test]
    fn test_explicit_seed_wins() {
        assert_eq!(Settings { seed: Some(3), ..Default::default() }.effective_seed(), 3);
    }

    /// Records every log line so tests can check what loading emits
    struct CaptureLogger {
        lines: Mutex<Vec<String>>,
    }

    impl log::Log for CaptureLogger {
        fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
            true
        }

        fn log(&self, record: &log::Record<'_>) {
            if let Ok(mut lines) = self.lines.lock() {
                lines.push(record.args().to_string());
            }
        }

        fn flush(&self) {}
    }

    static CAPTURE: CaptureLogger = CaptureLogger {
        lines: Mutex::new(Vec::new()),
    };

    #[test]
    fn test_loading_logs_nothing_before_the_logger_starts() {
        // Anything logged while loading would be lost, since the logger is
        // configured from the loaded settings
        log::set_logger(&CAPTURE).expect("no other logger in the test binary");
        log::set_max_level(log::LevelFilter::Trace);

        let name = format!("brickplay-silent-{}", std::process::id());
        let missing = std::env::temp_dir().join(format!("{name}-missing.json"));
        let present = std::env::temp_dir().join(format!("{name}-present.json"));
        std::fs::write(&present, "{}").unwrap();

        let (_, missing_origin) = Settings::load_or_default(&missing).unwrap();
        let (_, present_origin) = Settings::load_or_default(&present).unwrap();
        Settings::load_from(&present).unwrap();
        std::fs::remove_file(&present).ok();

        let lines = CAPTURE.lines.lock().unwrap().clone();
        assert!(
            lines.iter().all(|line| !line.contains(&name)),
            "loading logged: {lines:?}"
        );

        // The caller reports the origin once logging is up
        log::info!("{missing_origin}");
        log::info!("{present_origin}");
        let lines = CAPTURE.lines.lock().unwrap().clone();
        assert_eq!(lines.iter().filter(|line| line.contains(&name)).count(), 2);
    }
}
