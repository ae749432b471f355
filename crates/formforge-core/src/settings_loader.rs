//! Settings loading from configuration files.
//!
//! This module loads [`Settings`] from TOML or JSON files and applies
//! environment variable overrides.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `FORMFORGE_DEBUG` | `debug` |
//! | `FORMFORGE_LOG_LEVEL` | `log_level` |
//! | `FORMFORGE_STORE_PATH` | `store_path` |
//! | `FORMFORGE_ITEMS_PER_PAGE` | `items_per_page` |
//! | `FORMFORGE_EXPORT_DIR` | `export_dir` |
//! | `FORMFORGE_STYLESHEET_HREF` | `stylesheet_href` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use formforge_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file_with_env("formforge.toml").unwrap();
//! ```

use std::path::{Path, PathBuf};

use crate::error::FormForgeError;
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// Keys missing from the TOML keep their default values.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or cannot be deserialized.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, FormForgeError> {
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| FormForgeError::Configuration(format!("Failed to parse TOML: {e}")))?;

    merge_over_defaults(toml_to_json(toml_value), "TOML")
}

/// Loads settings from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, FormForgeError> {
    from_toml_str(&read_config(path.as_ref(), "TOML")?)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<Settings, FormForgeError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or cannot be deserialized.
pub fn from_json_str(json_str: &str) -> Result<Settings, FormForgeError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| FormForgeError::Configuration(format!("Failed to parse JSON: {e}")))?;

    merge_over_defaults(json_value, "JSON")
}

/// Loads settings from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the JSON is malformed.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, FormForgeError> {
    from_json_str(&read_config(path.as_ref(), "JSON")?)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Loads settings from `path` when it is given, or from `formforge.toml` in
/// the working directory when that exists, falling back to defaults.
/// Environment overrides are applied in every case.
///
/// Files ending in `.json` are read as JSON, everything else as TOML.
///
/// # Errors
///
/// Returns an error if an explicitly given file cannot be read or parsed.
pub fn load(path: Option<&Path>) -> Result<Settings, FormForgeError> {
    let mut settings = match path {
        Some(p) if p.extension().is_some_and(|ext| ext == "json") => from_json_file(p)?,
        Some(p) => from_toml_file(p)?,
        None if Path::new("formforge.toml").exists() => from_toml_file("formforge.toml")?,
        None => Settings::default(),
    };
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Applies `FORMFORGE_*` environment variable overrides to a settings struct.
pub fn apply_env_overrides(settings: &mut Settings) {
    apply_overrides_from(settings, |key| std::env::var(key).ok());
}

/// Applies overrides using an arbitrary variable lookup.
///
/// `lookup` receives the full variable name (e.g. `FORMFORGE_DEBUG`).
/// Unparseable numeric values are ignored.
pub fn apply_overrides_from(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(val) = lookup("FORMFORGE_DEBUG") {
        settings.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }

    if let Some(val) = lookup("FORMFORGE_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Some(val) = lookup("FORMFORGE_STORE_PATH") {
        settings.store_path = PathBuf::from(val);
    }

    if let Some(val) = lookup("FORMFORGE_ITEMS_PER_PAGE") {
        if let Ok(n) = val.parse::<usize>() {
            settings.items_per_page = n;
        }
    }

    if let Some(val) = lookup("FORMFORGE_EXPORT_DIR") {
        settings.export_dir = PathBuf::from(val);
    }

    if let Some(val) = lookup("FORMFORGE_STYLESHEET_HREF") {
        settings.stylesheet_href = val;
    }
}

// ============================================================
// Helpers
// ============================================================

fn read_config(path: &Path, kind: &str) -> Result<String, FormForgeError> {
    std::fs::read_to_string(path).map_err(|e| {
        FormForgeError::Configuration(format!(
            "Failed to read {kind} file '{}': {e}",
            path.display()
        ))
    })
}

fn merge_over_defaults(
    value: serde_json::Value,
    kind: &str,
) -> Result<Settings, FormForgeError> {
    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        FormForgeError::Configuration(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, value);
    serde_json::from_value(merged).map_err(|e| {
        FormForgeError::Configuration(format!("Failed to deserialize settings from {kind}: {e}"))
    })
}

/// Converts a TOML value to a `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => {
            let map: serde_json::Map<String, serde_json::Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            serde_json::Value::Object(map)
        }
    }
}

/// Deep-merges two JSON values. The `override_val` takes precedence.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = if let Some(base_v) = base_map.remove(&key) {
                    merge_json(base_v, override_v)
                } else {
                    override_v
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_val) => override_val,
    }
}
