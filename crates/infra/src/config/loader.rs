//! Configuration loader
//!
//! ## Loading Strategy
//! 1. `WHENLY_CONFIG_PATH` if set, otherwise the first file found by
//!    [`probe_config_paths`]
//! 2. No file at all means built-in defaults
//! 3. `WHENLY_*` environment variables override single values
//! 4. The result is validated
//!
//! ## Environment Variables
//! - `WHENLY_CONFIG_PATH`: explicit config file
//! - `WHENLY_HOUR_HEIGHT_PX`: pixels per grid hour
//! - `WHENLY_SNAP_MINUTES`: snap step in minutes
//! - `WHENLY_MIN_BLOCK_MINUTES`: shortest allowed block
//! - `WHENLY_LANE_OVERLAP_PERCENT`: lane overlap for concurrent blocks
//! - `WHENLY_LONG_PRESS_MS`: touch long-press delay
//! - `WHENLY_DAY_DRAG_THRESHOLD_PX`: month-grid touch drag threshold
//! - `WHENLY_SYNTHETIC_MOUSE_GUARD_MS`: mouse suppression after touch
//!
//! ## File Locations
//! `whenly.{toml,json}` then `config.{toml,json}` in the working directory
//! and its parent, then the same names next to the executable.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use whenly_domain::{Config, Result, WhenlyError};

const CONFIG_PATH_VAR: &str = "WHENLY_CONFIG_PATH";
const FILE_NAMES: [&str; 4] = ["whenly.toml", "whenly.json", "config.toml", "config.json"];

/// Load, override and validate the configuration.
///
/// # Errors
/// Returns `WhenlyError::Config` if:
/// - `WHENLY_CONFIG_PATH` points at a missing or malformed file
/// - a probed file is malformed
/// - an override cannot be parsed
/// - the merged configuration fails validation
pub fn load() -> Result<Config> {
    let base = match std::env::var_os(CONFIG_PATH_VAR) {
        Some(path) => load_from_file(Some(PathBuf::from(path)))?,
        None => match probe_config_paths() {
            Some(path) => load_from_file(Some(path))?,
            None => {
                tracing::debug!("No config file found, using defaults");
                Config::default()
            }
        },
    };
    let config = apply_env_overrides(base)?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations. TOML and JSON are
/// detected by extension; missing fields take their defaults.
///
/// # Errors
/// Returns `WhenlyError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(WhenlyError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            WhenlyError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| WhenlyError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| WhenlyError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| WhenlyError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(WhenlyError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// First existing config file among the standard locations.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd.join(".."));
        dirs.insert(0, cwd);
    }
    if let Some(exe_dir) = std::env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf)) {
        dirs.push(exe_dir);
    }

    dirs.iter()
        .flat_map(|dir| FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

/// Apply `WHENLY_*` overrides on top of `config`.
///
/// # Errors
/// Returns `WhenlyError::Config` naming the variable that failed to parse.
pub fn apply_env_overrides(mut config: Config) -> Result<Config> {
    override_with(&mut config.grid.hour_height_px, "WHENLY_HOUR_HEIGHT_PX")?;
    override_with(&mut config.grid.snap_minutes, "WHENLY_SNAP_MINUTES")?;
    override_with(&mut config.grid.min_block_minutes, "WHENLY_MIN_BLOCK_MINUTES")?;
    override_with(&mut config.grid.lane_overlap_percent, "WHENLY_LANE_OVERLAP_PERCENT")?;
    override_with(&mut config.gesture.long_press_ms, "WHENLY_LONG_PRESS_MS")?;
    override_with(&mut config.gesture.day_drag_threshold_px, "WHENLY_DAY_DRAG_THRESHOLD_PX")?;
    override_with(&mut config.gesture.synthetic_mouse_guard_ms, "WHENLY_SYNTHETIC_MOUSE_GUARD_MS")?;
    Ok(config)
}

fn override_with<T>(slot: &mut T, key: &str) -> Result<()>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Ok(raw) = std::env::var(key) else {
        return Ok(());
    };
    *slot = raw
        .trim()
        .parse()
        .map_err(|e| WhenlyError::Config(format!("Invalid value for {key}: {e}")))?;
    tracing::debug!(key, "Configuration value overridden from environment");
    Ok(())
}
